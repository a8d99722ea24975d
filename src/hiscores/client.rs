// src/hiscores/client.rs

use std::fmt;
use std::str::FromStr;

use crate::config::options::{ClientOptions, Endpoints};
use crate::core::net::{self, HttpTransport, NetError, Transport};
use crate::error::{Error, Result};

use super::decode::decode_with;
use super::layout::Layout;
use super::types::{ActivityEntry, BossEntry, Group, SkillEntry, Snapshot};

/// Which hiscores table to read. Each has its own endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccountType {
    Normal,
    Ironman,
    UltimateIronman,
    HardcoreIronman,
    Deadman,
    Seasonal,
    Tournament,
}

impl AccountType {
    pub const ALL: [AccountType; 7] = [
        AccountType::Normal,
        AccountType::Ironman,
        AccountType::UltimateIronman,
        AccountType::HardcoreIronman,
        AccountType::Deadman,
        AccountType::Seasonal,
        AccountType::Tournament,
    ];

    pub fn code(self) -> &'static str {
        match self {
            AccountType::Normal => "N",
            AccountType::Ironman => "IM",
            AccountType::UltimateIronman => "UIM",
            AccountType::HardcoreIronman => "HCIM",
            AccountType::Deadman => "DMM",
            AccountType::Seasonal => "S",
            AccountType::Tournament => "T",
        }
    }

    /// The `m=` module of the table's URL.
    pub fn table(self) -> &'static str {
        match self {
            AccountType::Normal => "hiscore_oldschool",
            AccountType::Ironman => "hiscore_oldschool_ironman",
            AccountType::UltimateIronman => "hiscore_oldschool_ultimate",
            AccountType::HardcoreIronman => "hiscore_oldschool_hardcore_ironman",
            AccountType::Deadman => "hiscore_oldschool_deadman",
            AccountType::Seasonal => "hiscore_oldschool_seasonal",
            AccountType::Tournament => "hiscore_oldschool_tournament",
        }
    }

    pub fn url(self, endpoints: &Endpoints) -> String {
        format!("{}m={}/index_lite.ws", endpoints.hiscores, self.table())
    }
}

impl FromStr for AccountType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_ascii_uppercase();
        AccountType::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or_else(|| Error::InvalidAccountType(s!(s)))
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccountType::Normal => "normal",
            AccountType::Ironman => "ironman",
            AccountType::UltimateIronman => "ultimate ironman",
            AccountType::HardcoreIronman => "hardcore ironman",
            AccountType::Deadman => "deadman",
            AccountType::Seasonal => "seasonal",
            AccountType::Tournament => "tournament",
        };
        f.write_str(name)
    }
}

/// One player's decoded hiscores, fetched at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerHiscores {
    username: String,
    account_type: AccountType,
    snapshot: Snapshot,
}

impl PlayerHiscores {
    /// Look `username` up on the live hiscores. `account_type` is a code
    /// (`N`, `IM`, `UIM`, `HCIM`, `DMM`, `S`, `T`), case-insensitive, and is
    /// validated before any request goes out.
    pub fn fetch(username: &str, account_type: &str) -> Result<Self> {
        HiscoresClient::new(&ClientOptions::default()).lookup(username, account_type)
    }

    pub fn username(&self) -> &str { &self.username }
    pub fn account_type(&self) -> AccountType { self.account_type }
    pub fn snapshot(&self) -> &Snapshot { &self.snapshot }
    pub fn overall(&self) -> &SkillEntry { &self.snapshot.overall }
    pub fn skills(&self) -> &Group<SkillEntry> { &self.snapshot.skills }
    pub fn activities(&self) -> &Group<ActivityEntry> { &self.snapshot.activities }
    pub fn bosses(&self) -> &Group<BossEntry> { &self.snapshot.bosses }

    pub fn into_snapshot(self) -> Snapshot { self.snapshot }
}

pub struct HiscoresClient {
    transport: Box<dyn Transport>,
    endpoints: Endpoints,
    layout: Layout,
}

impl HiscoresClient {
    pub fn new(opts: &ClientOptions) -> Self {
        Self::with_transport(opts, Box::new(HttpTransport::new(opts)))
    }

    pub fn with_transport(opts: &ClientOptions, transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            endpoints: opts.endpoints.clone(),
            layout: Layout::default(),
        }
    }

    /// Decode against a different field catalog (e.g. one loaded from JSON).
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn layout(&self) -> &Layout { &self.layout }

    pub fn lookup(&self, username: &str, account_type: &str) -> Result<PlayerHiscores> {
        let account_type: AccountType = account_type.parse()?;
        self.lookup_typed(username, account_type)
    }

    /// Fetch and decode. A non-success status means the name does not exist
    /// on that table and becomes [`Error::PlayerNotFound`]; a transport
    /// failure stays [`Error::Net`].
    pub fn lookup_typed(&self, username: &str, account_type: AccountType) -> Result<PlayerHiscores> {
        let feed = self.fetch_feed(username, account_type)?;
        let snapshot = decode_with(&feed, &self.layout).inspect_err(|e| {
            loge!("Hiscores feed for {username:?} ({}) did not decode: {e}", account_type.code());
        })?;

        Ok(PlayerHiscores {
            username: s!(username),
            account_type,
            snapshot,
        })
    }

    /// The raw index_lite text for a player.
    pub fn fetch_feed(&self, username: &str, account_type: AccountType) -> Result<String> {
        let url = account_type.url(&self.endpoints);
        let query = query!["player" => username];
        logd!("GET {}", net::describe(&url, &query));

        match self.transport.get(&url, &query) {
            Ok(body) => Ok(body),
            Err(NetError::Status { code, .. }) => {
                logd!("Hiscores returned HTTP {code} for {username:?} ({})", account_type.code());
                Err(Error::PlayerNotFound { username: s!(username), account_type })
            }
            Err(e) => Err(e.into()),
        }
    }
}
