//! The translation string database.

use std::collections::BTreeMap;

use dex_core::Translator;
use tracing::{debug, warn};

/// Key → string map merged from one or more string releases.
///
/// Keys are stored lowercase, the form [`Translator::lookup`] receives.
#[derive(Debug, Clone, Default)]
pub struct StringDatabase {
    strings: BTreeMap<String, String>,
    overrides: usize,
}

impl StringDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a release; its strings replace any already present.
    pub fn merge(&mut self, release: &str, strings: BTreeMap<String, String>) {
        let count = strings.len();
        for (key, text) in strings {
            let key = key.to_lowercase();
            if let Some(previous) = self.strings.get(&key)
                && *previous != text
            {
                warn!(release, key = %key, previous = %previous, text = %text, "release overrides string");
                self.overrides += 1;
            }
            self.strings.insert(key, text);
        }
        debug!(release, count, "merged string release");
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Strings replaced by a later release with a different text.
    pub fn overrides(&self) -> usize {
        self.overrides
    }
}

impl Translator for StringDatabase {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }
}

impl FromIterator<(String, String)> for StringDatabase {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut database = Self::new();
        database.merge("inline", iter.into_iter().collect());
        database
    }
}
