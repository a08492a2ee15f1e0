//! Ordered decision tables.
//!
//! A table is a list of rules evaluated top to bottom; the first rule whose
//! `when` holds decides. Its `then` may still decline (`None`), which is
//! fatal with the rule's `otherwise` message: a matched branch with no
//! outcome means the source data has a combination the catalog cannot
//! represent.

/// One row of a decision table over facts `F`.
pub struct Rule<F, T> {
    pub name: &'static str,
    pub when: fn(&F) -> bool,
    pub then: fn(&F) -> Option<T>,
    pub otherwise: &'static str,
    /// Inconsistency to record when this rule decides.
    pub note: Option<fn(&F) -> Option<String>>,
}

impl<F, T> Rule<F, T> {
    pub const fn new(name: &'static str, when: fn(&F) -> bool, then: fn(&F) -> Option<T>) -> Self {
        Self {
            name,
            when,
            then,
            otherwise: "no outcome for matched rule",
            note: None,
        }
    }

    pub const fn or_fatal(mut self, message: &'static str) -> Self {
        self.otherwise = message;
        self
    }

    pub const fn noting(mut self, note: fn(&F) -> Option<String>) -> Self {
        self.note = Some(note);
        self
    }
}

/// Outcome of a table and the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision<T> {
    pub rule: &'static str,
    pub outcome: T,
    pub note: Option<String>,
}

/// Evaluates `rules` in order. `Err` carries the fatal message.
pub fn decide<F, T>(
    table: &'static str,
    rules: &[Rule<F, T>],
    facts: &F,
) -> Result<Decision<T>, String> {
    let rule = rules
        .iter()
        .find(|rule| (rule.when)(facts))
        .ok_or_else(|| format!("no {table} rule matched"))?;
    let outcome = (rule.then)(facts).ok_or_else(|| rule.otherwise.to_string())?;
    let note = rule.note.and_then(|note| note(facts));
    tracing::trace!(table, rule = rule.name, "decided");
    Ok(Decision {
        rule: rule.name,
        outcome,
        note,
    })
}
