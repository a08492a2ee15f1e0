//! Schema aggregation and the whole-catalog item run.

pub mod currency;
pub mod error;
pub mod guid_map;
pub mod items;
mod ordered;
pub mod run;
pub mod schema;
pub mod unknown;

pub use currency::{CURRENCY_RELEASES, currency_item, define_currency};
pub use error::{CatalogError, Result};
pub use guid_map::GuidMap;
pub use items::CatalogItems;
pub use run::{
    PRODUCT_SCHEMA, RunInput, RunOptions, RunOutput, RunProgress, RunStage, SchemaSummary,
    run_items,
};
pub use schema::{ExpansionSchema, ExpansionStats};
pub use unknown::UnknownAttributes;
