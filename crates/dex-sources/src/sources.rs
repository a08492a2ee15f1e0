//! A verified source directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dex_model::AttributeMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, info_span};

use crate::error::{Result, SourcesError};
use crate::manifest::{FileRole, MANIFEST_FILE, Manifest, ManifestFile, Pins, verify_file};
use crate::releases::parse_release;
use crate::set_data::SetDataMap;
use crate::strings::StringDatabase;

#[derive(Debug, Clone, Serialize)]
pub struct VerifySummary {
    pub sources_dir: PathBuf,
    pub pins: Pins,
    pub file_count: usize,
    pub releases: usize,
    pub string_releases: usize,
    pub has_families: bool,
}

/// Source directory whose manifest and file digests have been checked.
#[derive(Debug, Clone)]
pub struct SourceSet {
    root: PathBuf,
    manifest: Manifest,
}

impl SourceSet {
    /// Loads the manifest under `root` and verifies every listed file.
    pub fn verify(root: &Path) -> Result<(Self, VerifySummary)> {
        let _guard = info_span!("verify_sources", root = %root.display()).entered();
        let manifest = Manifest::load(&root.join(MANIFEST_FILE))?;
        manifest.validate()?;

        let mut files: Vec<&ManifestFile> = manifest.files.iter().collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        for file in files {
            verify_file(root, file)?;
            debug!(path = %file.path, role = %file.role, "verified");
        }

        let summary = VerifySummary {
            sources_dir: root.to_path_buf(),
            pins: manifest.pins.clone(),
            file_count: manifest.files.len(),
            releases: manifest.files_with_role(FileRole::Release).count(),
            string_releases: manifest.files_with_role(FileRole::Strings).count(),
            has_families: manifest.files_with_role(FileRole::Families).next().is_some(),
        };
        info!(files = summary.file_count, releases = summary.releases, "sources verified");
        Ok((
            Self {
                root: root.to_path_buf(),
                manifest,
            },
            summary,
        ))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Reads a listed file, checking its digest again.
    fn read(&self, file: &ManifestFile) -> Result<(PathBuf, Vec<u8>)> {
        let bytes = verify_file(&self.root, file)?;
        Ok((self.root.join(&file.path), bytes))
    }

    fn read_json<T: DeserializeOwned>(&self, file: &ManifestFile) -> Result<T> {
        let (path, bytes) = self.read(file)?;
        serde_json::from_slice(&bytes).map_err(|e| SourcesError::json(path, e))
    }

    /// Every string release merged in manifest order.
    pub fn load_strings(&self) -> Result<StringDatabase> {
        let mut database = StringDatabase::new();
        for file in self.manifest.files_with_role(FileRole::Strings) {
            let strings: BTreeMap<String, String> = self.read_json(file)?;
            database.merge(&file.path, strings);
        }
        info!(strings = database.len(), overrides = database.overrides(), "string database loaded");
        Ok(database)
    }

    pub fn load_set_data(&self) -> Result<SetDataMap> {
        self.read_json(self.manifest.single(FileRole::SetData)?)
    }

    /// Raw family map: family id → name key.
    pub fn load_family_keys(&self) -> Result<BTreeMap<String, String>> {
        self.read_json(self.manifest.single(FileRole::Families)?)
    }

    pub fn release_keys(&self) -> impl Iterator<Item = &str> {
        self.manifest
            .files_with_role(FileRole::Release)
            .filter_map(|file| file.key.as_deref())
    }

    /// Records of every release, by release key.
    pub fn load_releases(&self) -> Result<BTreeMap<String, Vec<AttributeMap>>> {
        let mut releases = BTreeMap::new();
        for file in self.manifest.files_with_role(FileRole::Release) {
            // Validated: release files carry a key.
            let Some(key) = file.key.as_deref() else {
                continue;
            };
            let (path, bytes) = self.read(file)?;
            let records = parse_release(key, &path, &bytes)?;
            debug!(key, records = records.len(), "release loaded");
            releases.insert(key.to_string(), records);
        }
        info!(releases = releases.len(), "releases loaded");
        Ok(releases)
    }
}
