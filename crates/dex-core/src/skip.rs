//! Filters for records that never become catalog items.

use std::fmt;

use dex_model::raw::RawProductType;
use dex_model::{AttributeCode, AttributeMap};

use crate::translate::KEY_MARKER;

/// Why a record was dropped. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Region-locked boosters for Brazil.
    RegionLocked,
    InternalProductType,
    /// Name is not a translation key, or is the empty key.
    UnlocalizedName,
    Newsletter,
    NotTradable,
    TrainerChallengeDeck,
    EventPromo,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RegionLocked => "region-locked",
            Self::InternalProductType => "internal product type",
            Self::UnlocalizedName => "unlocalized name",
            Self::Newsletter => "newsletter bundle",
            Self::NotTradable => "not tradable",
            Self::TrainerChallengeDeck => "trainer challenge deck",
            Self::EventPromo => "event promo",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const RESTRICTED_REGION: &str = "BR";

/// First matching skip reason, if any.
pub fn skip_reason(attributes: &AttributeMap) -> Option<SkipReason> {
    internal_reason(attributes).or_else(|| untradable_reason(attributes))
}

fn internal_reason(attributes: &AttributeMap) -> Option<SkipReason> {
    if attributes.text(AttributeCode::REGION_CODE) == Some(RESTRICTED_REGION) {
        return Some(SkipReason::RegionLocked);
    }

    // Unknown product types are left for the product classifier to reject.
    let product_type = attributes
        .text(AttributeCode::PRODUCT_TYPE)
        .and_then(|name| name.parse::<RawProductType>().ok());
    if product_type.is_some_and(RawProductType::is_internal) {
        return Some(SkipReason::InternalProductType);
    }

    let name = attributes.text(AttributeCode::NAME).unwrap_or_default();
    if !name.starts_with(KEY_MARKER) || name == "$$$$$$" {
        return Some(SkipReason::UnlocalizedName);
    }

    let asset = attributes.text(AttributeCode::ASSET_CLASS).unwrap_or_default();
    if asset.starts_with("MonthlyNewsletter_") || asset.ends_with("NewsletterBundle") {
        return Some(SkipReason::Newsletter);
    }

    None
}

fn untradable_reason(attributes: &AttributeMap) -> Option<SkipReason> {
    if attributes.is_false(AttributeCode::VALID_FOR_TRADE) {
        Some(SkipReason::NotTradable)
    } else if attributes.is_true(AttributeCode::IS_TC_DECK) {
        Some(SkipReason::TrainerChallengeDeck)
    } else if attributes.is_true(AttributeCode::IS_MCD_PROMO) {
        Some(SkipReason::EventPromo)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attributes(value: serde_json::Value) -> AttributeMap {
        AttributeMap::from_json(value).unwrap()
    }

    #[test]
    fn filters_apply_in_order() {
        let brazil = attributes(json!({"10300": "BR", "10140": "plain name"}));
        assert_eq!(skip_reason(&brazil), Some(SkipReason::RegionLocked));

        let proofset = attributes(json!({"10540": "Proofset", "10140": "$$$name$$$"}));
        assert_eq!(skip_reason(&proofset), Some(SkipReason::InternalProductType));

        let empty = attributes(json!({"10140": "$$$$$$"}));
        assert_eq!(skip_reason(&empty), Some(SkipReason::UnlocalizedName));

        let newsletter = attributes(json!({"10140": "$$$n$$$", "200871": "May_NewsletterBundle"}));
        assert_eq!(skip_reason(&newsletter), Some(SkipReason::Newsletter));
    }

    #[test]
    fn untradable_flags() {
        let locked = attributes(json!({"10140": "$$$n$$$", "10640": false}));
        assert_eq!(skip_reason(&locked), Some(SkipReason::NotTradable));

        let promo = attributes(json!({"10140": "$$$n$$$", "201414": true}));
        assert_eq!(skip_reason(&promo), Some(SkipReason::EventPromo));

        let tradable = attributes(json!({"10140": "$$$n$$$", "10640": true}));
        assert_eq!(skip_reason(&tradable), None);
    }
}
