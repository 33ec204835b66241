//! Package manifest (`package.json`) access.
//!
//! Only the fields the assembler reads or rewrites are typed. Every other
//! field is kept in an ordered catch-all so saving a manifest never drops
//! content the assembler does not understand.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Dependency section of a manifest: package name to version range.
pub type DependencyMap = IndexMap<String, String>;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct PackageManifest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<DependencyMap>,
    #[serde(rename = "devDependencies", skip_serializing_if = "Option::is_none")]
    pub dev_dependencies: Option<DependencyMap>,
    // Catch-all for other fields to preserve them
    #[serde(flatten)]
    pub other: IndexMap<String, serde_json::Value>,
}

impl PackageManifest {
    /// Reads the manifest at `path`.
    ///
    /// A missing file is `ManifestNotFound`; content that is not a JSON
    /// object with string-valued dependency sections is `ManifestParse`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => Error::ManifestNotFound {
                path: path.to_path_buf(),
                message: err.to_string(),
            },
            _ => Error::Io(err),
        })?;

        serde_json::from_str(&content).map_err(|err| Error::ManifestParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Writes the manifest as two-space indented JSON with a trailing newline.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        fs::write(path, content)?;
        Ok(())
    }

    /// The `name` field, required for anything merged into the assembly.
    pub fn require_name(&self, path: &Path) -> Result<&str> {
        self.name.as_deref().ok_or_else(|| Error::ManifestNotFound {
            path: path.to_path_buf(),
            message: "manifest has no 'name' field".to_string(),
        })
    }

    /// The `version` field, required for anything merged into the assembly.
    pub fn require_version(&self, path: &Path) -> Result<&str> {
        self.version.as_deref().ok_or_else(|| Error::ManifestParse {
            path: path.to_path_buf(),
            message: "manifest has no 'version' field".to_string(),
        })
    }
}
