//! Log of non-fatal contradictions found in the source data.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// One detected anomaly. The run continues after recording it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inconsistency {
    pub message: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub context: Value,
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if !self.context.is_null() {
            write!(f, " {}", self.context)?;
        }
        Ok(())
    }
}

/// Append-only for the duration of a run. Clear it before starting a new one.
#[derive(Debug, Default)]
pub struct InconsistencyLog {
    entries: Vec<Inconsistency>,
}

impl InconsistencyLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, message: impl Into<String>) {
        self.record_with(message, Value::Null);
    }

    pub fn record_with(&mut self, message: impl Into<String>, context: Value) {
        let entry = Inconsistency {
            message: message.into(),
            context,
        };
        tracing::info!(target: "dex::inconsistency", "{entry}");
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Inconsistency] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// One line per entry, in recording order.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
