//! Boundary adapters: pinned source files in, JSON documents out.

pub mod error;
pub mod expansions;
pub mod families;
pub mod manifest;
pub mod output;
pub mod paths;
pub mod releases;
pub mod set_data;
pub mod sources;
pub mod strings;

pub use error::{Result, SourcesError};
pub use expansions::{ExpansionCatalog, build_expansion_catalog};
pub use families::{FamilyMap, build_family_map};
pub use manifest::{FileRole, Manifest, ManifestFile, Pins, sha256_hex};
pub use output::{render_log, write_json, write_run_outputs, write_text};
pub use paths::{DATA_ENV_VAR, DataLayout, SOURCES_ENV_VAR, data_root, sources_root};
pub use set_data::{SetData, SetDataMap};
pub use sources::{SourceSet, VerifySummary};
pub use strings::StringDatabase;
