//! The source manifest: every input file, pinned by SHA-256.
//!
//! ```toml
//! [manifest]
//! schema = "dex.sources-manifest"
//! schema_version = 1
//!
//! [pins]
//! items_version = 412
//!
//! [[files]]
//! path = "items/SM10.json"
//! sha256 = "…"
//! kind = "json"
//! role = "release"
//! key = "SM10"
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::Digest;

use crate::error::{Result, SourcesError};

pub const MANIFEST_FILE: &str = "manifest.toml";
pub const MANIFEST_SCHEMA: &str = "dex.sources-manifest";
const SCHEMA_VERSION: u32 = 1;

const ALLOWED_KINDS: &[&str] = &["json"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub manifest: ManifestHeader,
    pub pins: Pins,
    #[serde(default)]
    pub files: Vec<ManifestFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub schema: String,
    pub schema_version: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pins {
    /// Item manifest version the releases were taken from.
    pub items_version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strings_version: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileRole {
    /// Attribute records of one release; needs a `key`.
    Release,
    /// A string release. Later files override earlier ones.
    Strings,
    SetData,
    Families,
}

impl FileRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::Strings => "strings",
            Self::SetData => "set_data",
            Self::Families => "families",
        }
    }

    /// Roles a manifest may list at most once.
    fn is_single(self) -> bool {
        matches!(self, Self::SetData | Self::Families)
    }
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestFile {
    pub path: String,
    pub sha256: String,
    pub kind: String,
    pub role: FileRole,
    /// Release key, for `release` files only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| SourcesError::io(path, e))?;
        toml::from_str(&contents).map_err(|e| SourcesError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn files_with_role(&self, role: FileRole) -> impl Iterator<Item = &ManifestFile> {
        self.files.iter().filter(move |file| file.role == role)
    }

    pub fn single(&self, role: FileRole) -> Result<&ManifestFile> {
        self.files_with_role(role)
            .next()
            .ok_or_else(|| SourcesError::MissingRole {
                role: role.to_string(),
            })
    }

    /// Structural checks that need no file access.
    pub fn validate(&self) -> Result<()> {
        if self.manifest.schema != MANIFEST_SCHEMA {
            return Err(SourcesError::InvalidManifest {
                message: format!("unsupported schema: {}", self.manifest.schema),
            });
        }
        if self.manifest.schema_version != SCHEMA_VERSION {
            return Err(SourcesError::InvalidManifest {
                message: format!(
                    "unsupported schema_version: {}",
                    self.manifest.schema_version
                ),
            });
        }

        let mut singles = BTreeSet::new();
        let mut keys = BTreeSet::new();
        let mut paths = BTreeSet::new();
        for file in &self.files {
            if file.role.is_single() && !singles.insert(file.role) {
                return Err(SourcesError::DuplicateRole {
                    role: file.role.to_string(),
                });
            }

            match (file.role, file.key.as_deref()) {
                (FileRole::Release, Some(key)) => {
                    if !keys.insert(key) {
                        return Err(SourcesError::DuplicateRelease {
                            key: key.to_string(),
                        });
                    }
                }
                (FileRole::Release, None) => {
                    return Err(SourcesError::InvalidManifest {
                        message: format!("release file {} has no key", file.path),
                    });
                }
                (_, Some(_)) => {
                    return Err(SourcesError::InvalidManifest {
                        message: format!("{} file {} has a release key", file.role, file.path),
                    });
                }
                (_, None) => {}
            }

            if !ALLOWED_KINDS.contains(&file.kind.as_str()) {
                return Err(SourcesError::InvalidManifest {
                    message: format!("unsupported kind '{}' for {}", file.kind, file.path),
                });
            }

            validate_sha(&file.sha256, &file.path)?;
            let path = validate_path(&file.path)?;
            if !paths.insert(path) {
                return Err(SourcesError::InvalidManifest {
                    message: format!("file listed twice: {}", file.path),
                });
            }
        }

        for role in [FileRole::Strings, FileRole::SetData] {
            if self.files_with_role(role).next().is_none() {
                return Err(SourcesError::MissingRole {
                    role: role.to_string(),
                });
            }
        }
        Ok(())
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(sha2::Sha256::digest(bytes))
}

/// Reads a listed file and checks its digest. Returns the file contents.
pub fn verify_file(root: &Path, file: &ManifestFile) -> Result<Vec<u8>> {
    let full_path = root.join(&file.path);
    let bytes = std::fs::read(&full_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SourcesError::MissingFile {
                path: full_path.clone(),
            }
        } else {
            SourcesError::io(full_path.clone(), e)
        }
    })?;

    let actual = sha256_hex(&bytes);
    let expected = file.sha256.to_ascii_lowercase();
    if actual != expected {
        return Err(SourcesError::Sha256Mismatch {
            path: full_path,
            expected,
            actual,
        });
    }
    Ok(bytes)
}

fn validate_sha(sha: &str, path: &str) -> Result<()> {
    let invalid = |message: &str| SourcesError::InvalidSha256 {
        path: PathBuf::from(path),
        message: message.to_string(),
    };
    if sha.len() != 64 {
        return Err(invalid("expected 64 hex characters"));
    }
    if !sha.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid("not hexadecimal"));
    }
    Ok(())
}

/// A relative path that stays inside the source root.
fn validate_path(raw: &str) -> Result<PathBuf> {
    let path = PathBuf::from(raw);
    let invalid = |message: &str| SourcesError::InvalidPath {
        path: path.clone(),
        message: message.to_string(),
    };
    if raw.is_empty() {
        return Err(invalid("empty path"));
    }

    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir => return Err(invalid("path escapes the source root")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("path must be relative"));
            }
        }
    }
    Ok(normalized)
}
