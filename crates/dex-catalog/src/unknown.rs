use std::collections::BTreeSet;

use dex_model::AttributeMap;

use crate::error::{CatalogError, Result};

/// Attribute codes seen during a run that the vocabulary does not declare.
///
/// Collected for every record, skipped ones included, and reported once so
/// a vocabulary update can cover all of them in one go.
#[derive(Debug, Default)]
pub struct UnknownAttributes {
    codes: BTreeSet<String>,
}

impl UnknownAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collect(&mut self, attributes: &AttributeMap) {
        for key in attributes.unknown_keys() {
            if self.codes.insert(key.clone()) {
                tracing::debug!(code = %key, "unknown attribute");
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    pub fn check(&self) -> Result<()> {
        if self.codes.is_empty() {
            return Ok(());
        }
        Err(CatalogError::UnknownAttributes {
            codes: self.codes.iter().cloned().collect(),
        })
    }
}
