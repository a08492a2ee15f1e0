//! Attacks and abilities of a card.

use dex_model::raw::{COST_ORDER, RawAbility, RawAbilityType, RawPokemonType};
use dex_model::{AbilityDefinition, AbilityType, AttackDefinition, PokemonType};

use crate::context::ClassifyContext;
use crate::error::Result;
use crate::fatal;
use crate::translate::strip_html;

/// Most energy symbols an attack cost may carry.
const MAX_ATTACK_COST: usize = 10;

/// Attacks and abilities split out of a card's ability list.
#[derive(Debug, Default)]
pub(crate) struct Moves {
    pub attacks: Vec<AttackDefinition>,
    pub abilities: Vec<AbilityDefinition>,
}

/// Normalized type of a raw type name. `None` for `NoColor`.
pub(crate) fn pokemon_type(name: &str) -> Result<Option<PokemonType>> {
    let raw: RawPokemonType = name.parse()?;
    if raw == RawPokemonType::NoColor {
        return Ok(None);
    }
    raw.normalized()
        .map(Some)
        .ok_or_else(|| fatal!("Type {name} has no catalog type"))
}

pub(crate) fn parse_moves(raw: &[RawAbility], ctx: &ClassifyContext<'_>) -> Result<Moves> {
    let mut moves = Moves::default();
    for ability in raw.iter().filter(|ability| !ability.ignore_in_filtering) {
        let name = ctx
            .translate(&ability.title)
            .ok_or_else(|| fatal!("Ability title {} has no translation", ability.title))?;
        let name = strip_html(&name);
        // The game shows nothing for a missing text, so neither do we.
        let text = ability
            .game_text
            .as_deref()
            .and_then(|key| ctx.translate(key))
            .map(|text| strip_html(&text))
            .filter(|text| !text.is_empty());

        let kind: RawAbilityType = ability.ability_type.parse()?;
        let ability_type = match kind {
            RawAbilityType::Attack => {
                moves.attacks.push(attack(name, text, ability)?);
                continue;
            }
            RawAbilityType::PokeAbility => AbilityType::Ability,
            RawAbilityType::PokePower => AbilityType::PokePower,
            RawAbilityType::PokeBody => AbilityType::PokeBody,
            RawAbilityType::AncientTrait => AbilityType::AncientTrait,
            RawAbilityType::StadiumAbility | RawAbilityType::EnergyAbility => continue,
            other => return Err(fatal!("Unhandled ability type: {other}")),
        };
        moves.abilities.push(AbilityDefinition {
            name,
            text,
            kind: ability_type,
        });
    }
    Ok(moves)
}

fn attack(name: String, text: Option<String>, raw: &RawAbility) -> Result<AttackDefinition> {
    let mut cost = Vec::new();
    for (type_name, count) in &raw.cost {
        let Some(energy) = pokemon_type(type_name)? else {
            return Err(fatal!("Attack {name} has a NoColor cost"));
        };
        let count = usize::try_from(*count)
            .ok()
            .filter(|count| cost.len() + count <= MAX_ATTACK_COST)
            .ok_or_else(|| fatal!("Attack {name} costs more than {MAX_ATTACK_COST} energy"))?;
        cost.extend(std::iter::repeat_n(energy, count));
    }
    cost.sort_by_key(|energy| cost_position(*energy));

    Ok(AttackDefinition {
        name,
        text,
        damage: (raw.damage != 0).then_some(raw.damage),
        op: raw.amount_operator.clone().filter(|op| !op.is_empty()),
        cost,
    })
}

/// Position in the printed cost order.
fn cost_position(energy: PokemonType) -> usize {
    COST_ORDER
        .iter()
        .position(|ordered| *ordered == energy)
        .unwrap_or(COST_ORDER.len())
}
