//! The catalog-wide item set written to `items.json`.

use std::collections::BTreeMap;

use dex_model::{Definition, DefinitionKey};
use serde::{Serialize, Serializer};
use serde_json::json;

use crate::error::{CatalogError, Result};
use crate::ordered::{OrderedMap, catalog_order};
use crate::schema::ExpansionSchema;

/// Every definition of a run, keyed by asset name or identifier.
///
/// Borrows from the schemas that own the definitions.
#[derive(Debug, Default)]
pub struct CatalogItems<'a> {
    items: BTreeMap<DefinitionKey, &'a Definition>,
}

impl<'a> CatalogItems<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every definition of a schema. An empty schema is fatal, as is a
    /// key another schema already defined.
    pub fn define(&mut self, schema: &'a ExpansionSchema) -> Result<()> {
        if schema.is_empty() {
            return Err(CatalogError::fatal(
                format!("Expansion {} has no items defined", schema.expansion()),
                serde_json::Value::Null,
            ));
        }
        for definition in schema.definitions() {
            let key = definition.key();
            if let Some(old) = self.items.get(&key) {
                return Err(CatalogError::fatal(
                    format!("Redefining item {key}"),
                    json!({ "new": definition, "old": old }),
                ));
            }
            self.items.insert(key, definition);
        }
        Ok(())
    }

    pub fn get(&self, key: &DefinitionKey) -> Option<&'a Definition> {
        self.items.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Serialize for CatalogItems<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut entries: Vec<(&DefinitionKey, &&Definition)> = self.items.iter().collect();
        entries.sort_by(|a, b| catalog_order(a.0, b.0));
        OrderedMap(entries).serialize(serializer)
    }
}
