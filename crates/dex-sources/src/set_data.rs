//! Set data: the game's own description of each expansion.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// One entry of the set data map, keyed by release key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetData {
    #[serde(default)]
    pub name: String,
    /// Expansion code, e.g. `SM10` → `UNB`.
    pub external_id: String,
    /// Series name, or `NONE` for sets that are not expansions.
    pub block: String,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub secret_count: u32,
    /// Format GUIDs.
    #[serde(default)]
    pub legal_formats: Vec<String>,
    /// Set on minor, trainer kit, anniversary, promo and energy sets.
    #[serde(default)]
    pub promo: bool,
    /// Milliseconds since the epoch.
    #[serde(default)]
    pub post_release_restricted: i64,
}

/// The set data map with its entries in file order, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetDataMap(pub Vec<(String, SetData)>);

impl SetDataMap {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SetData)> {
        self.0.iter().map(|(key, data)| (key.as_str(), data))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for SetDataMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer
            .deserialize_map(EntriesVisitor(PhantomData))
            .map(Self)
    }
}

/// Keeps object entries in document order.
struct EntriesVisitor<T>(PhantomData<T>);

impl<'de, T: DeserializeOwned> Visitor<'de> for EntriesVisitor<T> {
    type Value = Vec<(String, T)>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, T>()? {
            entries.push((key, value));
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_file_order() {
        let map: SetDataMap = serde_json::from_str(
            r#"{
                "SM9": {"externalId": "TEU", "block": "SM", "count": 181, "secretCount": 15},
                "SM10": {"externalId": "UNB", "block": "SM", "promo": false},
                "SM1": {"externalId": "SUM", "block": "SM"}
            }"#,
        )
        .unwrap();
        let keys: Vec<&str> = map.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["SM9", "SM10", "SM1"]);
        assert_eq!(map.0[0].1.secret_count, 15);
        assert!(map.0[2].1.legal_formats.is_empty());
    }
}
