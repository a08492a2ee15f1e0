//! Errors that abort an item run.

use dex_core::ClassifyError;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// A record could not be classified.
    #[error("{expansion}: {source}")]
    Classify {
        expansion: String,
        #[source]
        source: ClassifyError,
    },

    /// Aggregation found a contradiction it cannot resolve.
    #[error("{message}")]
    Fatal { message: String, context: Box<Value> },

    /// Attribute codes outside the vocabulary, collected over the whole run.
    #[error("Unknown attributes: {}", .codes.join(", "))]
    UnknownAttributes { codes: Vec<String> },

    #[error("Unknown currency item {asset}")]
    UnknownCurrency { asset: String },
}

impl CatalogError {
    pub fn fatal(message: impl Into<String>, context: Value) -> Self {
        Self::Fatal {
            message: message.into(),
            context: Box::new(context),
        }
    }

    /// Offending record or definitions, when the error has any.
    pub fn context(&self) -> Option<&Value> {
        match self {
            Self::Classify { source, .. } => Some(source.context()),
            Self::Fatal { context, .. } => Some(context.as_ref()),
            Self::UnknownAttributes { .. } | Self::UnknownCurrency { .. } => None,
        }
        .filter(|context| !context.is_null())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
