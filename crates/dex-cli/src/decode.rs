//! Human-readable breakdown of a packed item identifier.
//!
//! The identifier fields come from the codec alone. The definition part is
//! read back from a generated expansion schema, so it needs a previous run.

use std::collections::BTreeMap;
use std::fmt;

use dex_model::{
    AbilityType, BoosterPackIndex, CardKind, Expansion, ExpansionRegistry, ItemCategory, ItemId,
    ItemType, PokemonType, Rarity, price_index::price_index_name,
};
use serde::Deserialize;
use serde_json::Value;

/// Definition fields as found in an expansion schema document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DefinitionView {
    pub name: Option<String>,
    pub no: Option<u32>,
    pub col_no: Option<String>,
    pub hp: Option<i64>,
    pub family: Option<i64>,
    pub cat: Option<ItemCategory>,
    pub kind: Option<CardKind>,
    pub rarity: Option<Rarity>,
    pub abilities: Vec<AbilityView>,
    pub attacks: Vec<AttackView>,
    pub weakness: Option<PokemonType>,
    pub weaknesses: Option<Vec<PokemonType>>,
    pub weakness_amt: Option<i64>,
    pub resistance: Option<PokemonType>,
    pub resist: Option<i64>,
    pub retreat: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilityView {
    pub name: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub kind: AbilityType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttackView {
    pub name: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub damage: Option<i64>,
    #[serde(default)]
    pub op: Option<String>,
    #[serde(default)]
    pub cost: Vec<PokemonType>,
}

impl DefinitionView {
    /// Finds `id` among the cards or packs of a serialized schema.
    pub fn find(schema: &Value, id: ItemId) -> Option<serde_json::Result<Self>> {
        let key = id.to_string();
        ["items", "packs"]
            .iter()
            .find_map(|section| schema.get(section)?.get(&key))
            .map(|definition| Self::deserialize(definition))
    }

    fn has_traits(&self) -> bool {
        self.weakness.is_some()
            || self.weaknesses.is_some()
            || self.resistance.is_some()
            || self.retreat.is_some_and(|retreat| retreat > 0)
    }
}

/// Identifier fields, then the definition when one was found.
pub struct ItemReport<'a> {
    pub id: ItemId,
    pub expansion: Expansion<'a>,
    pub definition: Option<DefinitionView>,
    /// Family id to translated name.
    pub families: BTreeMap<String, String>,
}

impl<'a> ItemReport<'a> {
    /// `None` when the identifier does not name a known expansion.
    pub fn new(id: ItemId, registry: &'a ExpansionRegistry) -> Option<Self> {
        let expansion = id.expansion(registry);
        if !expansion.is_valid() {
            return None;
        }
        Some(Self {
            id,
            expansion,
            definition: None,
            families: BTreeMap::new(),
        })
    }

    pub fn with_definition(
        mut self,
        definition: DefinitionView,
        families: BTreeMap<String, String>,
    ) -> Self {
        self.definition = Some(definition);
        self.families = families;
        self
    }

    fn fmt_fields(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id;
        writeln!(f, "# itemid {id}")?;
        let series = self
            .expansion
            .series_kind()
            .map_or("Unknown", |series| series.as_str());
        writeln!(f, "* Series: {series} (seriesId: {})", id.series())?;
        writeln!(
            f,
            "* Expansion: {} (expansionId: {})",
            self.expansion.code(),
            id.expansion_id()
        )?;

        let item_type = id.item_kind();
        let type_name = item_type.map_or("Unknown", ItemType::as_str);
        match item_type.and_then(ItemType::suffix) {
            Some(suffix) => writeln!(
                f,
                "* ItemType: {type_name} (suffix: {suffix}) (itemType: {})",
                id.item_type()
            )?,
            None => writeln!(f, "* ItemType: {type_name} (itemType: {})", id.item_type())?,
        }

        let pack = (item_type == Some(ItemType::BoosterPack))
            .then(|| u8::try_from(id.index()).ok())
            .flatten()
            .and_then(|index| BoosterPackIndex::try_from(index).ok());
        match pack {
            Some(pack) => writeln!(f, "* ItemIndex: {pack} (itemIndex: {})", id.index())?,
            None => writeln!(f, "* ItemIndex: {}", id.index())?,
        }
        if let Some(bucket) = price_index_name(id) {
            writeln!(f, "* PriceIndex: {bucket}")?;
        }
        Ok(())
    }

    fn fmt_definition(&self, f: &mut fmt::Formatter<'_>, def: &DefinitionView) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "# Definition")?;
        if let Some(name) = &def.name {
            write!(f, "* Name: {} {name}", self.expansion.code())?;
            match (&def.col_no, def.no) {
                (Some(col_no), _) => write!(f, " #{col_no}")?,
                (None, Some(no)) => write!(f, " #{no}")?,
                (None, None) => {}
            }
            if let Some(hp) = def.hp.filter(|hp| *hp > 0) {
                write!(f, " ({hp} HP)")?;
            }
            writeln!(f)?;
            if let Some(family) = def.family.filter(|family| *family != 0) {
                let name = self
                    .families
                    .get(&family.to_string())
                    .map_or("?", String::as_str);
                writeln!(f, "* Family: {name}")?;
            }
        }
        if let Some(cat) = def.cat {
            writeln!(f, "* Category: {cat} (cat: {})", cat.code())?;
        }
        if let Some(kind) = def.kind {
            writeln!(f, "* Kind: {kind} (kind: {})", kind.code())?;
        }
        if let Some(rarity) = def.rarity.filter(|rarity| *rarity != Rarity::None) {
            writeln!(f, "* Rarity: {rarity} (rarity: {})", rarity.code())?;
        }

        if !def.abilities.is_empty() {
            writeln!(f)?;
            writeln!(f, "# Abilities")?;
            for ability in &def.abilities {
                writeln!(f, "* {} [{}]", ability.name, ability.kind.readable())?;
                writeln!(f, "> {}", ability.text.as_deref().unwrap_or_default())?;
            }
        }

        if !def.attacks.is_empty() {
            writeln!(f)?;
            writeln!(f, "# Attacks")?;
            for attack in &def.attacks {
                writeln!(f, "* {}", attack_line(attack))?;
                if let Some(text) = attack.text.as_deref().filter(|text| !text.is_empty()) {
                    writeln!(f, "> {text}")?;
                }
            }
        }

        if def.has_traits() {
            writeln!(f)?;
            writeln!(f, "# Traits")?;
            let amount = def
                .weakness_amt
                .map_or_else(|| "2x".to_string(), |amount| format!("+{amount}"));
            if let Some(weakness) = def.weakness {
                writeln!(f, "* Weakness: {weakness} ({amount})")?;
            }
            if let Some(weaknesses) = &def.weaknesses {
                let names: Vec<&str> = weaknesses.iter().map(|kind| kind.as_str()).collect();
                writeln!(f, "* Weaknesses: {} ({amount})", names.join(", "))?;
            }
            if let Some(resistance) = def.resistance {
                writeln!(f, "* Resistance: {resistance} (-{})", def.resist.unwrap_or_default())?;
            }
            if let Some(retreat) = def.retreat.filter(|retreat| *retreat > 0) {
                writeln!(f, "* Retreat Cost: {retreat}")?;
            }
        }
        Ok(())
    }
}

/// `{L}{C} Thunderbolt: 120+`
fn attack_line(attack: &AttackView) -> String {
    let mut line: String = attack
        .cost
        .iter()
        .map(|kind| format!("{{{}}}", kind.letter()))
        .collect();
    if !line.is_empty() {
        line.push(' ');
    }
    line.push_str(&attack.name);
    if let Some(damage) = attack.damage.filter(|damage| *damage != 0) {
        line.push_str(&format!(": {damage}{}", attack.op.as_deref().unwrap_or_default()));
    }
    line
}

impl fmt::Display for ItemReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_fields(f)?;
        if let Some(definition) = &self.definition {
            self.fmt_definition(f, definition)?;
        }
        Ok(())
    }
}
