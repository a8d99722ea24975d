// src/prices/mod.rs
pub mod client;
pub mod pacing;

pub use client::{PriceClient, Route, Timestep};
pub use pacing::Pacing;
