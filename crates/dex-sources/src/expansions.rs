//! Expansion catalog build from set data.
//!
//! The catalog is what the item run starts from: every expansion the game
//! knows, named and flagged, with the release key its records are filed under.

use std::str::FromStr;

use dex_core::{Translator, strip_html};
use dex_model::{
    ExpansionDefinition, ExpansionFlags, ExpansionRegistry, ExpansionSeries, Formats, ReleaseMap,
    series,
};
use tracing::{debug, info};

use crate::error::{Result, SourcesError};
use crate::set_data::{SetData, SetDataMap};

/// Set data block of sets that are not expansions.
const NO_BLOCK: &str = "NONE";

/// Red Star Promos are filed under their own block but belong to XY.
const RED_STAR_PROMOS: &str = "RSP";

const ENERGY_SUFFIX: &str = "Energy";

/// Anniversary expansions carry no expansion flag.
const ANNIVERSARY: [&str; 2] = ["GEN", "HIF"];

/// Collection numbers energy cards reuse in trainer kits.
const HOLES: [(&str, &[u32]); 2] = [
    ("TK-Lycanroc", &[2, 3, 6, 7, 8, 9, 10, 17, 20, 24, 26, 28]),
    ("TK-AlolanRaichu", &[1, 3, 5, 7, 8, 9, 10, 12, 24, 27, 28]),
];

/// Expansions newest first, and where each release key points.
#[derive(Debug, Clone, Default)]
pub struct ExpansionCatalog {
    pub expansions: Vec<ExpansionDefinition>,
    pub releases: ReleaseMap,
}

impl ExpansionCatalog {
    pub fn registry(&self) -> ExpansionRegistry {
        ExpansionRegistry::new(self.expansions.clone())
    }
}

pub fn build_expansion_catalog(
    set_data: &SetDataMap,
    translator: &dyn Translator,
) -> Result<ExpansionCatalog> {
    let mut catalog = ExpansionCatalog::default();
    for (key, data) in set_data.iter() {
        if data.block == NO_BLOCK {
            info!(key, "Skipping expansion");
            continue;
        }
        let expansion = expansion_definition(key, data, translator)?;
        debug!(code = %expansion.code, key, "saving expansion");
        catalog.releases.insert(key, expansion.code.clone());
        catalog.expansions.push(expansion);
    }
    catalog.expansions.reverse();
    info!(expansions = catalog.expansions.len(), "expansion catalog built");
    Ok(catalog)
}

fn expansion_definition(
    key: &str,
    data: &SetData,
    translator: &dyn Translator,
) -> Result<ExpansionDefinition> {
    let block = if data.block == RED_STAR_PROMOS {
        "XY"
    } else {
        data.block.as_str()
    };
    let series = ExpansionSeries::from_str(block)
        .ok()
        .filter(|series| series.is_playable())
        .ok_or_else(|| {
            SourcesError::set_data(key, format!("Block {} does not exist in ExpansionSeries", data.block))
        })?;
    let code = data.external_id.as_str();
    if series::expansion_id(series, code).is_none() {
        return Err(SourcesError::set_data(
            key,
            format!("Expansion \"{code}\" does not exist in Expansions_{}", data.block),
        ));
    }

    let energy = code.ends_with(ENERGY_SUFFIX);
    let name_key = if energy {
        format!("set.name.{}", key.replace("_Energy", "1"))
    } else {
        format!("set.name.{key}")
    };
    let name = translator
        .translate(&name_key)
        .map(|name| strip_html(&name))
        .filter(|name| !name.is_empty())
        .ok_or_else(|| SourcesError::MissingExpansionName {
            key: key.to_string(),
        })?;
    let name = if energy {
        format!("{name} Series Energy")
    } else {
        name
    };

    let formats = data
        .legal_formats
        .iter()
        .filter_map(|guid| Formats::from_guid(guid))
        .fold(Formats::empty(), |formats, format| formats | format);

    Ok(ExpansionDefinition {
        name,
        code: code.to_string(),
        key: Some(key.to_string()),
        series,
        formats,
        cards: data.count,
        secret: data.secret_count,
        legal: data.post_release_restricted.div_euclid(1000),
        flags: expansion_flags(code, data.promo),
        holes: HOLES
            .iter()
            .find(|(kit, _)| *kit == code)
            .map(|(_, holes)| holes.to_vec()),
    })
}

/// The first matching kind wins; the set data promo flag marks minor expansions.
fn expansion_flags(code: &str, promo: bool) -> ExpansionFlags {
    if code.starts_with("PR-") || code == RED_STAR_PROMOS {
        ExpansionFlags::PROMO
    } else if code.ends_with(ENERGY_SUFFIX) {
        ExpansionFlags::ENERGY
    } else if ANNIVERSARY.contains(&code) {
        ExpansionFlags::empty()
    } else if code.starts_with("TK-") {
        ExpansionFlags::TRAINER_KIT
    } else if promo {
        ExpansionFlags::MINOR
    } else {
        ExpansionFlags::empty()
    }
}
