//! Fatal classification errors.
//!
//! A fatal error aborts the whole run. It always carries the offending
//! attribute dictionary (and the partial definition, when one exists) so the
//! failure can be inspected without re-running.

use dex_model::ModelError;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The source data contradicts an assumption the classifier relies on.
    #[error("{message}")]
    Fatal { message: String, context: Box<Value> },

    /// An attribute value does not fit its declared shape or enum.
    #[error("invalid attribute: {source}")]
    Attributes {
        #[source]
        source: ModelError,
        context: Box<Value>,
    },
}

impl ClassifyError {
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::Fatal {
            message: message.into(),
            context: Box::new(Value::Null),
        }
    }

    /// Attaches context unless the error already carries some.
    pub fn with_context(self, value: Value) -> Self {
        match self {
            Self::Fatal { message, context } if context.is_null() => Self::Fatal {
                message,
                context: Box::new(value),
            },
            Self::Attributes { source, context } if context.is_null() => Self::Attributes {
                source,
                context: Box::new(value),
            },
            other => other,
        }
    }

    pub fn context(&self) -> &Value {
        match self {
            Self::Fatal { context, .. } | Self::Attributes { context, .. } => context,
        }
    }
}

impl From<ModelError> for ClassifyError {
    fn from(source: ModelError) -> Self {
        Self::Attributes {
            source,
            context: Box::new(Value::Null),
        }
    }
}

/// Builds a [`ClassifyError::Fatal`] from a format string.
#[macro_export]
macro_rules! fatal {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::error::ClassifyError::fatal(format!($fmt $(, $arg)*))
    };
}

pub type Result<T> = std::result::Result<T, ClassifyError>;
