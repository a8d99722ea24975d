// src/catalog.rs
//
// Local copy of the wiki's item mapping, plus search over it.
//
// The file is the upstream array written back verbatim (pretty-printed).
// It is replaced wholesale by `refresh` and only read otherwise. There is
// no locking: a `load` racing a `refresh` can see a partial or missing file,
// which reads as an empty catalog.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::options::CatalogOptions;
use crate::error::{Error, Result};
use crate::file;
use crate::prices::PriceClient;

/// One entry of the mapping. Fields the crate doesn't know about are kept
/// in `extra` so nothing upstream sends is lost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lowalch: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highalch: Option<i64>,
    /// GE buy limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    /// Wiki file name of the inventory icon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Conjunctive filter. Unset fields don't constrain.
///
/// `name`, `examine` and `icon` match as case-insensitive substrings; every
/// other set field must be equal. A record lacking a field never equals a
/// set criterion for it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub examine: Option<String>,
    pub id: Option<u32>,
    pub members: Option<bool>,
    pub lowalch: Option<i64>,
    pub highalch: Option<i64>,
    pub limit: Option<i64>,
    pub value: Option<i64>,
    pub icon: Option<String>,
    pub name: Option<String>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self { self.name = Some(name.into()); self }
    pub fn examine(mut self, text: impl Into<String>) -> Self { self.examine = Some(text.into()); self }
    pub fn icon(mut self, icon: impl Into<String>) -> Self { self.icon = Some(icon.into()); self }
    pub fn id(mut self, id: u32) -> Self { self.id = Some(id); self }
    pub fn members(mut self, members: bool) -> Self { self.members = Some(members); self }
    pub fn lowalch(mut self, v: i64) -> Self { self.lowalch = Some(v); self }
    pub fn highalch(mut self, v: i64) -> Self { self.highalch = Some(v); self }
    pub fn limit(mut self, v: i64) -> Self { self.limit = Some(v); self }
    pub fn value(mut self, v: i64) -> Self { self.value = Some(v); self }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, item: &ItemRecord) -> bool {
        contains(&self.name, Some(item.name.as_str()))
            && contains(&self.examine, item.examine.as_deref())
            && contains(&self.icon, item.icon.as_deref())
            && equals(self.id, Some(item.id))
            && equals(self.members, item.members)
            && equals(self.lowalch, item.lowalch)
            && equals(self.highalch, item.highalch)
            && equals(self.limit, item.limit)
            && equals(self.value, item.value)
    }

    /// Matching records, in input order.
    pub fn filter<'a, I>(&self, records: I) -> Vec<ItemRecord>
    where
        I: IntoIterator<Item = &'a ItemRecord>,
    {
        records.into_iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

fn contains(needle: &Option<String>, hay: Option<&str>) -> bool {
    match needle.as_deref() {
        None | Some("") => true,
        Some(n) => hay.is_some_and(|h| h.to_lowercase().contains(&n.to_lowercase())),
    }
}

fn equals<T: PartialEq>(want: Option<T>, have: Option<T>) -> bool {
    match want {
        None => true,
        Some(w) => have.is_some_and(|h| h == w),
    }
}

pub struct ItemCatalog {
    options: CatalogOptions,
}

impl ItemCatalog {
    pub fn new(options: CatalogOptions) -> Self {
        Self { options }
    }

    pub fn path(&self) -> &Path {
        self.options.path()
    }

    /// Fetch the full mapping and overwrite the local file.
    /// Returns whether a new file was written; failures are logged.
    pub fn refresh(&self, prices: &PriceClient) -> bool {
        match self.try_refresh(prices) {
            Ok(n) => {
                logf!("Catalog refreshed: {n} items → {}", self.path().display());
                true
            }
            Err(e) => {
                loge!("Catalog refresh failed: {e}");
                false
            }
        }
    }

    /// Like [`ItemCatalog::refresh`], returning the item count or the cause.
    /// An empty or non-array mapping is refused and the old file kept.
    pub fn try_refresh(&self, prices: &PriceClient) -> Result<usize> {
        let mapping = prices.try_mapping()?;
        let count = match &mapping {
            Value::Array(items) if !items.is_empty() => items.len(),
            _ => return Err(Error::UnexpectedResponse(s!("item mapping is empty"))),
        };
        self.save_raw(&mapping)?;
        Ok(count)
    }

    /// Write an already fetched mapping as-is.
    pub fn save_raw(&self, mapping: &Value) -> Result<()> {
        file::write_json_pretty(self.path(), mapping)
    }

    /// Every cached record, in file order. Empty if the file is absent or
    /// unreadable; never fails.
    pub fn load(&self) -> Vec<ItemRecord> {
        match self.try_load() {
            Ok(items) => items,
            Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                logd!("No catalog at {}; treating as empty", self.path().display());
                Vec::new()
            }
            Err(e) => {
                loge!("Could not read catalog {}: {e}", self.path().display());
                Vec::new()
            }
        }
    }

    /// Entries that don't look like items are skipped, not fatal.
    pub fn try_load(&self) -> Result<Vec<ItemRecord>> {
        let doc = file::read_json(self.path())?;
        let Value::Array(entries) = doc else {
            return Err(Error::UnexpectedResponse(format!(
                "{} does not hold an item array",
                self.path().display()
            )));
        };

        let mut items = Vec::with_capacity(entries.len());
        for (i, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<ItemRecord>(entry) {
                Ok(item) => items.push(item),
                Err(e) => logd!("Skipping catalog entry {i}: {e}"),
            }
        }
        Ok(items)
    }

    pub fn search(&self, criteria: &SearchCriteria) -> Vec<ItemRecord> {
        criteria.filter(&self.load())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(v: Value) -> ItemRecord {
        serde_json::from_value(v).unwrap()
    }

    fn fixture() -> Vec<ItemRecord> {
        vec![
            item(json!({ "id": 1359, "name": "Rune axe", "members": true, "value": 100 })),
            item(json!({ "id": 1351, "name": "Bronze axe", "members": false, "value": 10 })),
            item(json!({ "id": 1289, "name": "Rune sword", "members": true, "value": 200 })),
        ]
    }

    fn names(items: &[ItemRecord]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn substring_and_equality_are_conjunctive() {
        let items = fixture();

        let c = SearchCriteria::new().name("rune").members(true);
        assert_eq!(names(&c.filter(&items)), ["Rune axe", "Rune sword"]);

        let c = SearchCriteria::new().name("axe").value(10);
        assert_eq!(names(&c.filter(&items)), ["Bronze axe"]);

        let c = SearchCriteria::new().name("rune").value(10);
        assert!(c.filter(&items).is_empty());
    }

    #[test]
    fn empty_criteria_match_everything_in_order() {
        let items = fixture();
        let c = SearchCriteria::new();
        assert!(c.is_empty());
        assert_eq!(names(&c.filter(&items)), ["Rune axe", "Bronze axe", "Rune sword"]);
    }

    #[test]
    fn members_false_is_a_real_constraint() {
        let items = fixture();
        assert_eq!(names(&SearchCriteria::new().members(false).filter(&items)), ["Bronze axe"]);
    }

    #[test]
    fn substring_is_case_insensitive_on_both_sides() {
        let items = fixture();
        assert_eq!(names(&SearchCriteria::new().name("RUNE S").filter(&items)), ["Rune sword"]);
    }

    #[test]
    fn missing_fields_never_equal_a_set_criterion() {
        let items = vec![item(json!({ "id": 2, "name": "Cannonball", "examine": "Ammo for the Dwarf Cannon." }))];
        assert!(SearchCriteria::new().limit(11000).filter(&items).is_empty());
        assert!(SearchCriteria::new().icon("cannon").filter(&items).is_empty());
        assert_eq!(SearchCriteria::new().examine("dwarf").filter(&items).len(), 1);
    }

    #[test]
    fn missing_members_is_neither_members_nor_free() {
        let items = vec![item(json!({ "id": 2, "name": "Cannonball" }))];
        assert_eq!(items[0].members, None);
        assert!(SearchCriteria::new().members(false).filter(&items).is_empty());
        assert!(SearchCriteria::new().members(true).filter(&items).is_empty());
        assert_eq!(serde_json::to_value(&items[0]).unwrap(), json!({ "id": 2, "name": "Cannonball" }));
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let v = json!({ "id": 4151, "name": "Abyssal whip", "members": true, "highalch": 72000, "wiki_slug": "whip" });
        let rec = item(v.clone());
        assert_eq!(rec.extra.get("wiki_slug"), Some(&json!("whip")));
        assert_eq!(serde_json::to_value(&rec).unwrap(), v);
    }
}
