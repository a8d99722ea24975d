// src/hiscores/layout.rs
//
// The positional schema of the index_lite feed.
//
// Feed = overall, then one entry per skill, activity and boss, in catalog
// order. Each group has a fixed entry width (tokens per entry):
//
//   overall     1 entry  × 3  (rank, level, xp)
//   skills      N entries × 3 (rank, level, xp)
//   activities  N entries × 2 (rank, value)
//   bosses      N entries × 2 (rank, kc)
//
// Offsets are derived from these widths; nothing else in the crate does
// offset arithmetic. The name lists must match the upstream order exactly:
// a reorder mislabels data without any detectable error.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_VERSION: &str = "osrs-2022-10";

pub const SKILLS: &[&str] = &[
    "attack",
    "defence",
    "strength",
    "hitpoints",
    "ranged",
    "prayer",
    "magic",
    "cooking",
    "woodcutting",
    "fletching",
    "fishing",
    "firemaking",
    "crafting",
    "smithing",
    "mining",
    "herblore",
    "agility",
    "thieving",
    "slayer",
    "farming",
    "runecraft",
    "hunter",
    "construction",
];

pub const ACTIVITIES: &[&str] = &[
    "leaguepoints",
    "bhhunter",
    "bhrogue",
    "allclues",
    "beginnerclues",
    "easyclues",
    "mediumclues",
    "hardclues",
    "eliteclues",
    "masterclues",
    "lmsrank",
    "pvprank",
    "swzeal",
    "riftsclosed",
];

static OVERALL: LazyLock<[String; 1]> = LazyLock::new(|| [s!("overall")]);

pub const BOSSES: &[&str] = &[
    "sire",
    "hydra",
    "barrows",
    "bryophyta",
    "callisto",
    "cerberus",
    "cox",
    "coxc",
    "chaosele",
    "chaosfanatic",
    "zilyana",
    "corp",
    "crazyarch",
    "prime",
    "rex",
    "supreme",
    "darch",
    "graardor",
    "mole",
    "gg",
    "hespori",
    "kq",
    "kbd",
    "kraken",
    "kree",
    "kril",
    "mimic",
    "nex",
    "nightmare",
    "pnightmare",
    "obor",
    "sarachnis",
    "scorpia",
    "skotizo",
    "tempoross",
    "gauntlet",
    "cgauntlet",
    "tob",
    "tobhard",
    "thermy",
    "toa",
    "toaex",
    "zuk",
    "jad",
    "venenatis",
    "vetion",
    "vorkath",
    "wintertodt",
    "zalcano",
    "zulrah",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupKind {
    Overall,
    Skills,
    Activities,
    Bosses,
}

impl GroupKind {
    pub const ALL: [GroupKind; 4] = [
        GroupKind::Overall,
        GroupKind::Skills,
        GroupKind::Activities,
        GroupKind::Bosses,
    ];

    /// Tokens per entry.
    pub fn width(self) -> usize {
        match self {
            GroupKind::Overall | GroupKind::Skills => 3,
            GroupKind::Activities | GroupKind::Bosses => 2,
        }
    }
}

/// One contiguous run of entries inside the feed.
#[derive(Clone, Copy, Debug)]
pub struct FieldGroup<'a> {
    pub kind: GroupKind,
    pub names: &'a [String],
    /// Index of the group's first token.
    pub offset: usize,
}

impl FieldGroup<'_> {
    pub fn width(&self) -> usize {
        self.kind.width()
    }

    pub fn token_len(&self) -> usize {
        self.names.len() * self.width()
    }

    /// Token index of field `field` of entry `entry`.
    pub fn index_of(&self, entry: usize, field: usize) -> usize {
        self.offset + entry * self.width() + field
    }
}

/// Versioned field catalog. Load a newer one from JSON when the game adds
/// content; the built-in default matches [`DEFAULT_VERSION`].
///
/// Every deserialization path goes through [`Layout::validate`], so a layout
/// with a repeated name never reaches the decoder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLayout")]
pub struct Layout {
    pub version: String,
    pub skills: Vec<String>,
    pub activities: Vec<String>,
    pub bosses: Vec<String>,
}

#[derive(Deserialize)]
struct RawLayout {
    version: String,
    skills: Vec<String>,
    activities: Vec<String>,
    bosses: Vec<String>,
}

impl TryFrom<RawLayout> for Layout {
    type Error = Error;

    fn try_from(raw: RawLayout) -> Result<Self> {
        let layout = Layout {
            version: raw.version,
            skills: raw.skills,
            activities: raw.activities,
            bosses: raw.bosses,
        };
        layout.validate()?;
        Ok(layout)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION, SKILLS, ACTIVITIES, BOSSES)
    }
}

impl Layout {
    pub fn new(version: &str, skills: &[&str], activities: &[&str], bosses: &[&str]) -> Self {
        let owned = |names: &[&str]| -> Vec<String> { names.iter().map(|n| s!(*n)).collect() };
        Self {
            version: s!(version),
            skills: owned(skills),
            activities: owned(activities),
            bosses: owned(bosses),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: RawLayout = serde_json::from_str(text)?;
        raw.try_into()
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Names must be unique within a group; lookups by name would
    /// otherwise only ever reach the first entry.
    pub fn validate(&self) -> Result<()> {
        for group in self.groups() {
            let mut seen = HashSet::with_capacity(group.names.len());
            if let Some(dup) = group.names.iter().find(|n| !seen.insert(n.as_str())) {
                return Err(Error::InvalidLayout(format!(
                    "{} lists {dup:?} twice in {:?}",
                    self.version, group.kind
                )));
            }
        }
        Ok(())
    }

    fn names(&self, kind: GroupKind) -> &[String] {
        match kind {
            GroupKind::Overall => &OVERALL[..],
            GroupKind::Skills => &self.skills,
            GroupKind::Activities => &self.activities,
            GroupKind::Bosses => &self.bosses,
        }
    }

    /// All groups in feed order with their cumulative offsets.
    pub fn groups(&self) -> [FieldGroup<'_>; 4] {
        let mut offset = 0;
        GroupKind::ALL.map(|kind| {
            let group = FieldGroup { kind, names: self.names(kind), offset };
            offset += group.token_len();
            group
        })
    }

    pub fn group(&self, kind: GroupKind) -> FieldGroup<'_> {
        let [overall, skills, activities, bosses] = self.groups();
        match kind {
            GroupKind::Overall => overall,
            GroupKind::Skills => skills,
            GroupKind::Activities => activities,
            GroupKind::Bosses => bosses,
        }
    }

    /// `3 + 3*skills + 2*activities + 2*bosses`
    pub fn expected_tokens(&self) -> usize {
        self.groups().iter().map(FieldGroup::token_len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_sizes() {
        let layout = Layout::default();
        assert_eq!(layout.skills.len(), 23);
        assert_eq!(layout.activities.len(), 14);
        assert_eq!(layout.bosses.len(), 50);
        assert_eq!(layout.expected_tokens(), 200);
    }

    #[test]
    fn offsets_are_cumulative() {
        let layout = Layout::default();
        let [overall, skills, activities, bosses] = layout.groups();
        assert_eq!(overall.offset, 0);
        assert_eq!(skills.offset, 3);
        assert_eq!(activities.offset, 72);
        assert_eq!(bosses.offset, 100);

        assert_eq!(skills.index_of(0, 0), 3);
        assert_eq!(skills.index_of(22, 2), 71);
        assert_eq!(activities.index_of(13, 1), 99);
        assert_eq!(bosses.index_of(49, 1), 199);
    }

    #[test]
    fn catalog_names_are_unique() {
        let layout = Layout::default();
        for names in [&layout.skills, &layout.activities, &layout.bosses] {
            let mut sorted = names.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), names.len());
        }
    }

    #[test]
    fn loads_from_json() {
        let json = r#"{
            "version": "test-1",
            "skills": ["attack", "defence"],
            "activities": ["allclues"],
            "bosses": ["obor", "mole", "kbd"]
        }"#;
        let layout = Layout::from_json_str(json).unwrap();
        assert_eq!(layout.version, "test-1");
        assert_eq!(layout.expected_tokens(), 3 + 6 + 2 + 6);
        assert_eq!(layout.group(GroupKind::Bosses).offset, 11);
        assert_eq!(layout.group(GroupKind::Overall).names, &[s!("overall")]);
    }

    #[test]
    fn json_missing_group_is_an_error() {
        assert!(Layout::from_json_str(r#"{"version":"x","skills":[]}"#).is_err());
    }

    #[test]
    fn repeated_name_is_rejected() {
        let json = r#"{"version":"dup","skills":["attack","attack"],"activities":[],"bosses":[]}"#;
        let err = Layout::from_json_str(json).unwrap_err();
        assert!(matches!(err, Error::InvalidLayout(_)));
        assert!(err.to_string().contains("\"attack\" twice"), "{err}");
        assert!(serde_json::from_str::<Layout>(json).is_err());

        let built = Layout::new("dup", &["attack"], &["allclues"], &["obor", "obor"]);
        assert!(matches!(built.validate(), Err(Error::InvalidLayout(_))));
        assert!(Layout::default().validate().is_ok());
    }

    #[test]
    fn plain_serde_keeps_the_overall_group() {
        let layout: Layout = serde_json::from_str(
            r#"{"version":"t","skills":["attack"],"activities":["allclues"],"bosses":["obor"]}"#,
        )
        .unwrap();
        assert_eq!(layout.expected_tokens(), 10);
        assert_eq!(layout.group(GroupKind::Skills).offset, 3);

        let text = serde_json::to_string(&Layout::default()).unwrap();
        assert_eq!(serde_json::from_str::<Layout>(&text).unwrap(), Layout::default());
    }
}
