//! JSON objects written in a chosen key order.

use std::cmp::Ordering;
use std::fmt::Display;

use dex_model::DefinitionKey;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Entries serialized as one JSON object, in vector order.
pub(crate) struct OrderedMap<K, V>(pub Vec<(K, V)>);

impl<K: Display, V: Serialize> Serialize for OrderedMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(&key.to_string(), value)?;
        }
        map.end()
    }
}

/// Identifiers before asset names; identifiers descending, assets ascending.
pub(crate) fn catalog_order(a: &DefinitionKey, b: &DefinitionKey) -> Ordering {
    match (a, b) {
        (DefinitionKey::Id(a), DefinitionKey::Id(b)) => b.cmp(a),
        (DefinitionKey::Id(_), DefinitionKey::Asset(_)) => Ordering::Less,
        (DefinitionKey::Asset(_), DefinitionKey::Id(_)) => Ordering::Greater,
        (DefinitionKey::Asset(a), DefinitionKey::Asset(b)) => a.cmp(b),
    }
}
