// src/hiscores/mod.rs
//! # Player hiscores
//!
//! Reads the `index_lite` hiscores API and turns its flat numeric feed into a
//! [`Snapshot`].
//!
//! ## Pieces
//! - [`layout`] – the field catalog. Names every entry of the feed in order and
//!   derives all token offsets from per-group widths. Versioned; a newer
//!   catalog can be loaded from JSON when the game adds skills or bosses.
//! - [`decode`] – pure feed → snapshot decoding (and the inverse `encode`).
//!   Rejects feeds whose token count does not match the layout.
//! - [`client`] – one GET per lookup against the table for an
//!   [`AccountType`], then decode.
//!
//! ## Failure mapping
//! ```text
//! bad type code        → Error::InvalidAccountType   (before any request)
//! non-2xx from table   → Error::PlayerNotFound
//! no response          → Error::Net
//! token count/garbage  → Error::MalformedFeed
//! ```
//!
//! `-1` anywhere in the feed means "unranked" and is kept as-is.
pub mod client;
pub mod decode;
pub mod layout;
pub mod types;

pub use client::{AccountType, HiscoresClient, PlayerHiscores};
pub use decode::{decode, decode_with, encode, FeedError};
pub use layout::{GroupKind, Layout};
pub use types::{ActivityEntry, BossEntry, Group, SkillEntry, Snapshot, UNRANKED};
