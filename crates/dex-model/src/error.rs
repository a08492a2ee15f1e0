#![deny(unsafe_code)]

use crate::attributes::AttributeShape;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("unknown {kind} code: {code}")]
    UnknownCode { kind: &'static str, code: i64 },

    #[error("unknown {kind} value: {value:?}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("attribute {code} ({name}) expected {expected}, found {found}")]
    AttributeShape {
        code: i64,
        name: &'static str,
        expected: AttributeShape,
        found: String,
    },

    #[error("attribute dictionary is not a JSON object")]
    NotAnObject,
}

impl ModelError {
    pub(crate) fn unknown_variant(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
