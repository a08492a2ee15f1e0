//! Source GUID to catalog key cross-reference.

use std::collections::{BTreeMap, BTreeSet};

use dex_model::{Definition, DefinitionKey, ItemId};
use serde::{Serialize, Serializer};

use crate::ordered::{OrderedMap, catalog_order};

/// Every GUID seen in a run and the identifier or asset it became.
///
/// Holds keys only; the definitions stay in their schemas.
#[derive(Debug, Default)]
pub struct GuidMap {
    entries: BTreeMap<String, DefinitionKey>,
    collisions: Vec<String>,
}

impl GuidMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, guid: &str, definition: &Definition) {
        self.insert(guid, definition.key());
    }

    /// Maps a GUID to a bare identifier (currency items have no definition).
    pub fn define_id(&mut self, guid: &str, id: ItemId) {
        self.insert(guid, DefinitionKey::Id(id.value()));
    }

    fn insert(&mut self, guid: &str, key: DefinitionKey) {
        if let Some(previous) = self.entries.insert(guid.to_string(), key) {
            tracing::warn!(guid, %previous, "Redefining GUID");
            self.collisions.push(guid.to_string());
        }
    }

    pub fn get(&self, guid: &str) -> Option<&DefinitionKey> {
        self.entries.get(guid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// GUIDs that were defined more than once, in the order they were redefined.
    pub fn collisions(&self) -> &[String] {
        &self.collisions
    }

    /// Distinct identifiers, descending.
    pub fn itemlist(&self) -> Vec<i32> {
        let ids: BTreeSet<i32> = self
            .entries
            .values()
            .filter_map(|key| match key {
                DefinitionKey::Id(id) => Some(*id),
                DefinitionKey::Asset(_) => None,
            })
            .collect();
        ids.into_iter().rev().collect()
    }

    /// Distinct asset names, ascending.
    pub fn productlist(&self) -> Vec<String> {
        let assets: BTreeSet<&str> = self
            .entries
            .values()
            .filter_map(|key| match key {
                DefinitionKey::Asset(asset) => Some(asset.as_str()),
                DefinitionKey::Id(_) => None,
            })
            .collect();
        assets.into_iter().map(str::to_string).collect()
    }
}

impl Serialize for GuidMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<(&String, &DefinitionKey)> = self.entries.iter().collect();
        // Stable: GUIDs sharing a key stay in GUID order.
        entries.sort_by(|a, b| catalog_order(a.1, b.1));
        OrderedMap(entries).serialize(serializer)
    }
}
