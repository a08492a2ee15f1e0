//! Translation key lookup.
//!
//! Raw attributes reference display strings by key, wrapped in `$$$`
//! markers. The string source itself lives outside this crate.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;

/// Marker around translation keys in raw attributes.
pub const KEY_MARKER: &str = "$$$";

/// A marker pair with nothing between it: the empty string.
const EMPTY_KEY: &str = "$$$$$$";

const ABILITIES: &str = "com.direwolfdigital.cake.rules.abilities.";

/// Keys the game references but never defined, and the key that holds the string.
const KEY_REPAIRS: [(&str, &str); 4] = [
    (
        "trainers.SM12.ProfessorOaksSetu.GameText",
        "trainers.SM12.ProfessorOaksSetup.GameText",
    ),
    (
        "trainers.SM12.DragoniumZDragonClaw..GameText",
        "trainers.SM12.DragoniumZDragonClaw.GameText",
    ),
    (
        "trainers.SWSH1.ProfessorsResearch.GameText",
        "trainers.SWSH1.ProfessorsResearchProfessorMagnolia.GameText",
    ),
    (
        "pokeabilities.FieldRunner.Title",
        "pokeabilities.promo_swsh.abilityfieldrunner.title",
    ),
];

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>?").expect("Invalid HTML tag regex"));

/// Key → string lookup.
///
/// Implementors provide [`Translator::lookup`] over normalized (lowercase,
/// marker-free) keys; [`Translator::translate`] does the normalization.
pub trait Translator {
    fn lookup(&self, key: &str) -> Option<&str>;

    /// `None` when the key has no (or an empty) string.
    fn translate(&self, key: &str) -> Option<String> {
        if key == EMPTY_KEY {
            return Some(String::new());
        }
        let key = normalize_key(key);
        let translated = self.lookup(&key).filter(|text| !text.is_empty());
        if translated.is_none() {
            tracing::trace!(key = %key, "translation missing");
        }
        translated.map(|text| text.replace("\\n", "\n"))
    }
}

impl Translator for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl Translator for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// Strips markers, repairs known broken keys and lowercases.
pub fn normalize_key(key: &str) -> String {
    let key = key.replace(KEY_MARKER, "");
    let repaired = key.strip_prefix(ABILITIES).and_then(|rest| {
        KEY_REPAIRS
            .iter()
            .find(|(broken, _)| *broken == rest)
            .map(|(_, fixed)| format!("{ABILITIES}{fixed}"))
    });
    repaired.unwrap_or(key).to_lowercase()
}

/// Whether a raw value is a translation key rather than literal text.
pub fn is_key(value: &str) -> bool {
    value.starts_with(KEY_MARKER)
}

/// Removes markup tags, including an unterminated trailing `<`.
pub fn strip_html(text: &str) -> String {
    HTML_TAG.replace_all(text, "").into_owned()
}
