//! The item run with explicit stages.
//!
//! The run follows these stages in order:
//! 1. **Expansions**: classify each expansion's release into its schema,
//!    then correct the expansion's statistics from what the schema holds
//! 2. **Products**: classify the remaining product releases into one
//!    `PTCGO` schema
//! 3. **Currency**: map currency records to their fixed identifiers
//!
//! Unknown attributes are checked after stage 1 and again after stage 2, so a
//! failing run reports every unknown code it saw up to that point.

use std::collections::BTreeMap;

use dex_core::{Classified, ClassifyContext, InconsistencyLog, Translator, classify};
use dex_model::{AttributeMap, ExpansionDefinition, ExpansionRegistry, ReleaseMap};
use serde_json::Value;
use tracing::{info, info_span, warn};

use crate::currency::{CURRENCY_RELEASES, define_currency};
use crate::error::{CatalogError, Result};
use crate::guid_map::GuidMap;
use crate::items::CatalogItems;
use crate::schema::{ExpansionSchema, ExpansionStats};
use crate::unknown::UnknownAttributes;

/// Name of the schema holding products that belong to no expansion.
pub const PRODUCT_SCHEMA: &str = "PTCGO";

/// Energy releases duplicate the expansion energy cards.
const ENERGY_RELEASE_SUFFIX: &str = "_Energy";

/// Inputs of a run, all loaded beforehand.
pub struct RunInput<'a> {
    /// Expansion catalog, newest first, with release keys.
    pub expansions: Vec<ExpansionDefinition>,
    /// Records by release key.
    pub releases: &'a BTreeMap<String, Vec<AttributeMap>>,
    pub translator: &'a dyn Translator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Fail the run on attribute codes outside the vocabulary.
    pub strict_attributes: bool,
    /// Build the `PTCGO` schema from product releases.
    pub product_schema: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            strict_attributes: true,
            product_schema: true,
        }
    }
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict_attributes(mut self, strict: bool) -> Self {
        self.strict_attributes = strict;
        self
    }

    pub fn with_product_schema(mut self, enabled: bool) -> Self {
        self.product_schema = enabled;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Expansions,
    Products,
    Currency,
}

/// Reported before each release is processed.
#[derive(Debug, Clone, Copy)]
pub struct RunProgress<'a> {
    pub stage: RunStage,
    /// Zero-based position within the stage.
    pub position: usize,
    pub total: usize,
    pub release: &'a str,
}

/// What one schema ended up with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSummary {
    pub expansion: String,
    pub cards: usize,
    pub packs: usize,
    pub products: usize,
    pub skipped: usize,
    pub stats: ExpansionStats,
}

impl SchemaSummary {
    fn new(schema: &ExpansionSchema, skipped: usize) -> Self {
        Self {
            expansion: schema.expansion().to_string(),
            cards: schema.cards().count(),
            packs: schema.packs().count(),
            products: schema.products().count(),
            skipped,
            stats: schema.stats(),
        }
    }
}

/// Everything a successful run produces.
#[derive(Debug)]
pub struct RunOutput {
    /// Expansion catalog with corrected statistics and no release keys.
    pub expansions: Vec<ExpansionDefinition>,
    /// One schema per expansion that had item data, in catalog order.
    pub schemas: Vec<ExpansionSchema>,
    pub product_schema: Option<ExpansionSchema>,
    pub product_releases: Vec<String>,
    /// Expansions skipped for lack of item data.
    pub missing: Vec<String>,
    pub summaries: Vec<SchemaSummary>,
    pub guids: GuidMap,
    pub log: InconsistencyLog,
}

impl RunOutput {
    /// Every schema, the product schema last.
    pub fn all_schemas(&self) -> impl Iterator<Item = &ExpansionSchema> {
        self.schemas.iter().chain(self.product_schema.as_ref())
    }

    /// The catalog-wide item set. Fails on a key defined by two expansion schemas.
    pub fn items(&self) -> Result<CatalogItems<'_>> {
        let mut items = CatalogItems::new();
        for schema in &self.schemas {
            items.define(schema)?;
        }
        Ok(items)
    }
}

/// Mutable state threaded through one run.
#[derive(Default)]
struct RunState {
    log: InconsistencyLog,
    guids: GuidMap,
    unknown: UnknownAttributes,
}

impl RunState {
    /// Classifies `records` into `schema`. Returns the number of skipped records.
    fn define(
        &mut self,
        schema: &mut ExpansionSchema,
        records: &[AttributeMap],
        ctx: &ClassifyContext<'_>,
    ) -> Result<usize> {
        let mut skipped = 0;
        for record in records {
            let classified =
                classify(record, ctx, &mut self.log).map_err(|source| CatalogError::Classify {
                    expansion: schema.expansion().to_string(),
                    source,
                })?;
            match classified {
                Classified::Skipped(_) => skipped += 1,
                Classified::Built(item) => schema.insert(*item, &mut self.log, &mut self.guids)?,
            }
            self.unknown.collect(record);
        }
        Ok(skipped)
    }

    fn check_unknown(&self, options: RunOptions) -> Result<()> {
        if options.strict_attributes {
            return self.unknown.check();
        }
        if !self.unknown.is_empty() {
            warn!(
                codes = %self.unknown.codes().collect::<Vec<_>>().join(", "),
                "unknown attributes"
            );
        }
        Ok(())
    }
}

/// Runs every stage. `on_progress` is called before each release.
pub fn run_items<F>(input: RunInput<'_>, options: RunOptions, mut on_progress: F) -> Result<RunOutput>
where
    F: FnMut(RunProgress<'_>),
{
    let RunInput {
        mut expansions,
        releases,
        translator,
    } = input;
    let registry = ExpansionRegistry::new(expansions.clone());
    let release_map = ReleaseMap::from_registry(&registry);
    let ctx = ClassifyContext::new(&registry, &release_map, translator);
    let mut state = RunState::default();

    // Stage 1: expansions
    let mut schemas = Vec::new();
    let mut summaries = Vec::new();
    let mut missing = Vec::new();
    let total = expansions.len();
    for (position, expansion) in expansions.iter_mut().enumerate() {
        let records = expansion
            .key
            .as_deref()
            .and_then(|key| releases.get(key));
        let Some(records) = records else {
            warn!(
                expansion = %expansion.code,
                "Expansion does not have item data available yet. This is an error if this is not an upcoming expansion."
            );
            missing.push(expansion.code.clone());
            continue;
        };
        on_progress(RunProgress {
            stage: RunStage::Expansions,
            position,
            total,
            release: &expansion.code,
        });

        let span = info_span!("expansion", code = %expansion.code);
        let _guard = span.enter();
        let mut schema = ExpansionSchema::new(expansion.code.clone());
        let skipped = state.define(&mut schema, records, &ctx)?;
        if schema.is_empty() {
            return Err(CatalogError::fatal(
                format!("Expansion {} has no items defined", expansion.code),
                Value::Null,
            ));
        }
        correct_statistics(expansion, &schema, &mut state.log)?;

        let summary = SchemaSummary::new(&schema, skipped);
        info!(
            cards = summary.cards,
            packs = summary.packs,
            products = summary.products,
            skipped,
            "expansion schema built"
        );
        summaries.push(summary);
        schemas.push(schema);
    }
    state.check_unknown(options)?;

    // Stage 2: products
    let product_releases: Vec<String> = releases
        .keys()
        .filter(|release| is_product_release(release, &expansions))
        .cloned()
        .collect();
    let product_schema = if options.product_schema {
        let _guard = info_span!("products").entered();
        let mut schema = ExpansionSchema::new(PRODUCT_SCHEMA);
        let mut skipped = 0;
        for (position, release) in product_releases.iter().enumerate() {
            on_progress(RunProgress {
                stage: RunStage::Products,
                position,
                total: product_releases.len(),
                release,
            });
            if let Some(records) = releases.get(release) {
                skipped += state.define(&mut schema, records, &ctx)?;
            }
        }
        state.check_unknown(options)?;
        info!(releases = %product_releases.join(", "), products = schema.len(), "product schema built");
        summaries.push(SchemaSummary::new(&schema, skipped));
        Some(schema)
    } else {
        None
    };

    // Stage 3: currency
    for (position, release) in CURRENCY_RELEASES.iter().enumerate() {
        on_progress(RunProgress {
            stage: RunStage::Currency,
            position,
            total: CURRENCY_RELEASES.len(),
            release,
        });
        match releases.get(*release) {
            Some(records) => {
                let defined = define_currency(records, &mut state.guids)?;
                info!(release, defined, "currency items mapped");
            }
            None => warn!(release, "currency release missing"),
        }
    }

    for expansion in &mut expansions {
        expansion.key = None;
    }

    let output = RunOutput {
        expansions,
        schemas,
        product_schema,
        product_releases,
        missing,
        summaries,
        guids: state.guids,
        log: state.log,
    };
    let items = output.items()?.len();
    info!(
        items,
        guids = output.guids.len(),
        inconsistencies = output.log.len(),
        "item run complete"
    );
    Ok(output)
}

/// Adopts the computed card and secret counts, logging each correction.
/// A total that still disagrees with the highest collection number is fatal.
fn correct_statistics(
    expansion: &mut ExpansionDefinition,
    schema: &ExpansionSchema,
    log: &mut InconsistencyLog,
) -> Result<()> {
    let stats = schema.stats();
    let code = &expansion.code;
    if expansion.cards != stats.cards {
        log.record(format!(
            "Expansion {code}: Collection count {} => {}",
            expansion.cards, stats.cards
        ));
        expansion.cards = stats.cards;
    }
    if expansion.secret != stats.secret {
        log.record(format!(
            "Expansion {code}: Secret count {} => {}",
            expansion.secret, stats.secret
        ));
        expansion.secret = stats.secret;
    }

    let total = expansion.cards + expansion.secret;
    if total != stats.max_collection_no {
        return Err(CatalogError::fatal(
            format!(
                "Expansion {code} total card count is {} cards + {} = {total}, but in the schema the max collection number is {}",
                expansion.cards, expansion.secret, stats.max_collection_no
            ),
            Value::Null,
        ));
    }

    expansion.flags |= stats.flags;
    Ok(())
}

fn is_product_release(release: &str, expansions: &[ExpansionDefinition]) -> bool {
    !CURRENCY_RELEASES.contains(&release)
        && !release.ends_with(ENERGY_RELEASE_SUFFIX)
        && !expansions
            .iter()
            .any(|expansion| expansion.key.as_deref() == Some(release))
}
