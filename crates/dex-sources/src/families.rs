//! Pokémon family names.

use std::collections::BTreeMap;

use dex_core::Translator;
use tracing::warn;

/// Family id → display name, in ascending id order.
pub type FamilyMap = BTreeMap<u32, String>;

/// Translates the raw family map (family id → localizable key).
///
/// Families without a translation are left out.
pub fn build_family_map(raw: &BTreeMap<String, String>, translator: &dyn Translator) -> FamilyMap {
    let mut families = FamilyMap::new();
    for (id, key) in raw {
        let Ok(family) = id.parse::<u32>() else {
            warn!(id = %id, "family id is not a number");
            continue;
        };
        match translator.translate(key) {
            Some(name) => {
                families.insert(family, name);
            }
            None => warn!(family, key = %key, "Could not resolve family name"),
        }
    }
    families
}
