// src/lib.rs
//! Grand exchange prices, the item catalog and player hiscores for Old School RuneScape.
//!
//! ```no_run
//! use osrs_utils::{PlayerHiscores, PriceClient, ClientOptions};
//!
//! let player = PlayerHiscores::fetch("Zezima", "N")?;
//! println!("attack xp: {}", player.skills()["attack"].xp);
//!
//! let prices = PriceClient::new(&ClientOptions::default());
//! println!("whip: {}", prices.current_price(4151));
//! # Ok::<(), osrs_utils::Error>(())
//! ```

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod alch;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod file;
pub mod hiscores;
pub mod prices;
pub mod progress;

pub use catalog::{ItemCatalog, ItemRecord, SearchCriteria};
pub use config::options::{CatalogOptions, ClientOptions, Endpoints};
pub use crate::core::sanitize::convert;
pub use error::{Error, Result};
pub use hiscores::{AccountType, HiscoresClient, Layout, PlayerHiscores, Snapshot};
pub use prices::{Pacing, PriceClient, Timestep};
