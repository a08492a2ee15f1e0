//! Fields every item shares: display name and owning expansion.

use dex_model::{AttributeCode, AttributeMap, Expansion};

use crate::context::ClassifyContext;
use crate::error::Result;
use crate::fatal;
use crate::inconsistency::InconsistencyLog;
use crate::translate::strip_html;

pub(crate) struct ItemBase<'a> {
    pub name: String,
    pub expansion: Expansion<'a>,
    /// Asset class: a print issue for cards, the asset name for products.
    pub asset: Option<String>,
}

impl<'a> ItemBase<'a> {
    pub fn gather(
        attributes: &AttributeMap,
        ctx: &ClassifyContext<'a>,
        log: &mut InconsistencyLog,
    ) -> Result<Self> {
        let key = attributes.text(AttributeCode::NAME).unwrap_or_default();
        let asset = attributes
            .non_empty_text(AttributeCode::ASSET_CLASS)
            .map(str::to_string);
        let release = attributes.text(AttributeCode::RELEASE_CODE).unwrap_or_default();

        let name = match (ctx.translate(key), &asset) {
            (Some(name), _) => name,
            (None, Some(asset)) => {
                log.record(format!(
                    "Product {asset} from release {release} has a missing translation for its ’name’ ({key})"
                ));
                asset.clone()
            }
            (None, None) => {
                return Err(fatal!(
                    "Item from release {release} has a missing translation for its ’name’ ({key})"
                ));
            }
        };

        if let Some(unlock) = attributes.non_empty_text(AttributeCode::UNLOCK_PRODUCT_TYPE) {
            let second = attributes.text(AttributeCode::UNLOCK_PRODUCT_TYPE_2);
            if second != Some(unlock) {
                let subject = asset
                    .as_deref()
                    .map_or_else(|| format!("Item from release {release}"), |asset| format!("Product {asset}"));
                log.record(format!(
                    "{subject} UnlockProductTypes do not match: 1={unlock} 2={}",
                    second.unwrap_or_default()
                ));
            }
        }

        Ok(Self {
            // Some names (trainer kit bundles) carry markup.
            name: strip_html(&name),
            expansion: ctx.expansion_for(attributes.text(AttributeCode::RELEASE_CODE)),
            asset,
        })
    }
}
