//! Source and output directory resolution.

use std::path::{Path, PathBuf};

/// Environment variable for overriding the source directory.
pub const SOURCES_ENV_VAR: &str = "DEX_SOURCES_DIR";

/// Environment variable for overriding the output directory.
pub const DATA_ENV_VAR: &str = "DEX_DATA_DIR";

/// Get the source root directory.
///
/// Resolution order:
/// 1. `DEX_SOURCES_DIR` environment variable
/// 2. `sources/` directory relative to workspace root
pub fn sources_root() -> PathBuf {
    env_or_workspace(SOURCES_ENV_VAR, "sources")
}

/// Get the output root directory.
///
/// Resolution order:
/// 1. `DEX_DATA_DIR` environment variable
/// 2. `data/` directory relative to workspace root
pub fn data_root() -> PathBuf {
    env_or_workspace(DATA_ENV_VAR, "data")
}

fn env_or_workspace(var: &str, dir: &str) -> PathBuf {
    if let Ok(root) = std::env::var(var) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..").join(dir)
}

/// Files written under the output root.
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn expansion(&self, code: &str) -> PathBuf {
        self.root.join("expansion").join(format!("{code}.json"))
    }

    pub fn items(&self) -> PathBuf {
        self.root.join("items.json")
    }

    pub fn item_map(&self) -> PathBuf {
        self.root.join("item-map.json")
    }

    pub fn itemlist(&self) -> PathBuf {
        self.root.join("itemlist.json")
    }

    pub fn productlist(&self) -> PathBuf {
        self.root.join("productlist.json")
    }

    pub fn expansions(&self) -> PathBuf {
        self.root.join("expansions.json")
    }

    /// The expansion catalog with release keys, before any item run.
    pub fn expansion_catalog(&self) -> PathBuf {
        self.root.join("catalog").join("expansions.json")
    }

    pub fn families(&self) -> PathBuf {
        self.root.join("families.json")
    }

    pub fn set_map(&self) -> PathBuf {
        self.root.join("ptcgo-set-map.json")
    }

    pub fn inconsistencies(&self) -> PathBuf {
        self.root.join("logs").join("items.inconsistencies.txt")
    }
}
