// src/config/consts.rs

// Net config
pub const PRICES_ENDPOINT: &str = "https://prices.runescape.wiki/api/v1/osrs";
pub const GE_DETAIL_ENDPOINT: &str = "https://secure.runescape.com/m=itemdb_oldschool/api/catalogue/detail.json";
pub const GRAPH_ENDPOINT: &str = "https://secure.runescape.com/m=itemdb_oldschool/api/graph/";
pub const HISCORES_ENDPOINT: &str = "https://secure.runescape.com/";
// The wiki API blocks default library user agents
pub const USER_AGENT: &str = "osrs_utils/1.0 (OSRS item search)";
pub const TIMEOUT_SECS: u64 = 15;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const CATALOG_FILE: &str = "item_data.json";
pub const LOG_FILE: &str = "debug.log";
pub const JSON_INDENT: &[u8] = b"    ";

// Pacing
pub const REQUEST_PAUSE_MS: u64 = 500; // be polite

// Items
pub const NATURE_RUNE_ID: u32 = 561;
