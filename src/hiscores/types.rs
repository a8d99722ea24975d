// src/hiscores/types.rs
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Rank/level/xp/score value meaning "not on the hiscores".
pub const UNRANKED: i64 = -1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SkillEntry {
    pub rank: i64,
    pub level: i64,
    pub xp: i64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ActivityEntry {
    pub rank: i64,
    pub value: i64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct BossEntry {
    pub rank: i64,
    pub kc: i64,
}

impl SkillEntry {
    pub fn is_ranked(&self) -> bool { self.rank != UNRANKED }
}
impl ActivityEntry {
    pub fn is_ranked(&self) -> bool { self.rank != UNRANKED }
}
impl BossEntry {
    pub fn is_ranked(&self) -> bool { self.rank != UNRANKED }
}

/// Named entries kept in catalog order. Serializes as a JSON object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for Group<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T> Group<T> {
    pub fn with_capacity(n: usize) -> Self {
        Self { entries: Vec::with_capacity(n) }
    }

    pub fn push(&mut self, name: impl Into<String>, entry: T) {
        self.entries.push((name.into(), entry));
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(n, e)| (n.as_str(), e))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl<T> std::ops::Index<&str> for Group<T> {
    type Output = T;

    fn index(&self, name: &str) -> &T {
        match self.get(name) {
            Some(e) => e,
            None => panic!("no entry named {name:?}"),
        }
    }
}

impl<T: serde::Serialize> Serialize for Group<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, entry) in &self.entries {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

/// A fully decoded index_lite feed.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Snapshot {
    pub overall: SkillEntry,
    pub skills: Group<SkillEntry>,
    pub activities: Group<ActivityEntry>,
    pub bosses: Group<BossEntry>,
}
