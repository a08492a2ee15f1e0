use std::path::PathBuf;

use chrono::{DateTime, TimeDelta, Utc};
use dex_catalog::SchemaSummary;
use dex_sources::VerifySummary;

#[derive(Debug)]
pub struct ExpansionsResult {
    pub expansions: usize,
    pub releases: usize,
    pub catalog: PathBuf,
    pub set_map: PathBuf,
}

#[derive(Debug)]
pub struct FamiliesResult {
    pub families: usize,
    pub unresolved: usize,
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct ItemsResult {
    pub sources: VerifySummary,
    pub output_dir: PathBuf,
    pub started_at: DateTime<Utc>,
    pub elapsed: TimeDelta,
    pub summaries: Vec<SchemaSummary>,
    /// Expansions skipped for lack of item data.
    pub missing: Vec<String>,
    pub product_releases: Vec<String>,
    pub items: usize,
    pub guids: usize,
    pub collisions: usize,
    pub inconsistencies: usize,
    pub written: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct AllResult {
    pub expansions: ExpansionsResult,
    pub families: FamiliesResult,
    pub items: ItemsResult,
}
