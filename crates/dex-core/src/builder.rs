//! Definition assembly and the final content scan.

use dex_model::raw::RawCardType;
use dex_model::{AttributeCode, AttributeMap, Definition};
use serde_json::{Value, json};

use crate::base::ItemBase;
use crate::card::classify_card;
use crate::context::ClassifyContext;
use crate::error::{ClassifyError, Result};
use crate::fatal;
use crate::inconsistency::InconsistencyLog;
use crate::product::classify_product;
use crate::skip::{SkipReason, skip_reason};
use crate::translate::KEY_MARKER;

/// A built definition and what the aggregator needs to know about its record.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltItem {
    pub definition: Definition,
    pub guid: Option<String>,
    /// Identical to another record apart from its GUID.
    pub true_duplicate: bool,
}

/// Outcome of classifying one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    Skipped(SkipReason),
    Built(Box<BuiltItem>),
}

/// Classifies one record: skip filters first, then card or product.
pub fn classify(
    attributes: &AttributeMap,
    ctx: &ClassifyContext<'_>,
    log: &mut InconsistencyLog,
) -> Result<Classified> {
    if let Some(reason) = skip_reason(attributes) {
        tracing::debug!(
            guid = attributes.text(AttributeCode::GUID).unwrap_or_default(),
            %reason,
            "skipping item"
        );
        return Ok(Classified::Skipped(reason));
    }
    build_definition(attributes, ctx, log).map(|item| Classified::Built(Box::new(item)))
}

/// Builds the definition of a record that passed the skip filters.
///
/// Fatal errors carry the record (and the definition, once one exists) as context.
pub fn build_definition(
    attributes: &AttributeMap,
    ctx: &ClassifyContext<'_>,
    log: &mut InconsistencyLog,
) -> Result<BuiltItem> {
    let raw_context = || json!({ "attributes": attributes.raw() });

    let card_type: Option<RawCardType> = attributes
        .parse(AttributeCode::CARD_TYPE)
        .map_err(|err| ClassifyError::from(err).with_context(raw_context()))?;
    let base = ItemBase::gather(attributes, ctx, log).map_err(|err| err.with_context(raw_context()))?;

    let (definition, true_duplicate) = match card_type {
        Some(card_type) => {
            let card = classify_card(attributes, ctx, &base, card_type.category(), log)
                .map_err(|err| err.with_context(raw_context()))?;
            (card.definition, card.true_duplicate)
        }
        None => {
            let product = classify_product(attributes, ctx, &base, log)
                .map_err(|err| err.with_context(raw_context()))?;
            (Definition::Product(product), false)
        }
    };

    check_content(&definition).map_err(|err| {
        err.with_context(json!({
            "attributes": attributes.raw(),
            "definition": serde_json::to_value(&definition).unwrap_or(Value::Null),
        }))
    })?;

    tracing::trace!(id = %definition.id(), name = definition.name(), "built definition");
    Ok(BuiltItem {
        definition,
        guid: attributes
            .non_empty_text(AttributeCode::GUID)
            .map(str::to_string),
        true_duplicate,
    })
}

/// Rejects markup and unresolved translation keys in any text field.
pub fn check_content(definition: &Definition) -> Result<()> {
    for field in definition.text_fields() {
        if field.contains('<') {
            return Err(fatal!("Item definition includes HTML"));
        }
        if field.contains(KEY_MARKER) {
            return Err(fatal!("Item definition includes unresolved translation"));
        }
    }
    Ok(())
}
