// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;
use crate::prices::Pacing;

/// Base URLs for every upstream API. Defaults point at the live services.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub prices: String,
    pub ge_detail: String,
    pub graph: String,
    pub hiscores: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            prices: s!(PRICES_ENDPOINT),
            ge_detail: s!(GE_DETAIL_ENDPOINT),
            graph: s!(GRAPH_ENDPOINT),
            hiscores: s!(HISCORES_ENDPOINT),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientOptions {
    pub user_agent: String,
    pub timeout: Duration,
    /// Minimum spacing between price requests; none by default.
    pub pacing: Pacing,
    pub endpoints: Endpoints,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            user_agent: s!(USER_AGENT),
            timeout: Duration::from_secs(TIMEOUT_SECS),
            pacing: Pacing::none(),
            endpoints: Endpoints::default(),
        }
    }
}

impl ClientOptions {
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }
}

/// Where the item catalog lives on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogOptions {
    path: PathBuf,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self { path: PathBuf::from(STORE_DIR).join(CATALOG_FILE) }
    }
}

impl CatalogOptions {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub fn default_log_path() -> PathBuf {
    PathBuf::from(STORE_DIR).join(LOG_FILE)
}
