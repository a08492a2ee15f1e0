//! Release files: one JSON array of attribute dictionaries per release key.

use std::path::Path;

use dex_model::{AttributeCode, AttributeMap};
use serde_json::Value;

use crate::error::{Result, SourcesError};

/// Parses a release. Every record is filed under `key`, whatever its own
/// release code says.
pub fn parse_release(key: &str, path: &Path, bytes: &[u8]) -> Result<Vec<AttributeMap>> {
    let records: Vec<Value> =
        serde_json::from_slice(bytes).map_err(|e| SourcesError::json(path, e))?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, mut record)| {
            if let Some(object) = record.as_object_mut() {
                object.insert(
                    AttributeCode::RELEASE_CODE.0.to_string(),
                    Value::String(key.to_string()),
                );
            }
            AttributeMap::from_json(record).map_err(|source| SourcesError::Record {
                key: key.to_string(),
                index,
                source,
            })
        })
        .collect()
}
