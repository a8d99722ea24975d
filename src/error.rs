// src/error.rs
use thiserror::Error;

use crate::core::net::NetError;
use crate::hiscores::{AccountType, FeedError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Account type code outside N, IM, UIM, HCIM, DMM, S, T.
    #[error("invalid account type {0:?}; valid types: N, IM, UIM, HCIM, DMM, S, T")]
    InvalidAccountType(String),

    /// The hiscores table answered with a non-success status.
    #[error("no account named {username:?} found on the {account_type} hiscores")]
    PlayerNotFound { username: String, account_type: AccountType },

    #[error("malformed hiscores feed: {0}")]
    MalformedFeed(#[from] FeedError),

    #[error(transparent)]
    Net(#[from] NetError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Well-formed JSON in an unexpected shape.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// A field catalog that can't describe a feed unambiguously.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    #[error("not a number: {0:?}")]
    InvalidNumber(String),

    #[error("invalid timestep {0:?}; valid: 5m, 1h, 6h, 24h")]
    InvalidTimestep(String),
}
