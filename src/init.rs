//! Workspace initialization.
//!
//! Prepares a host checkout for aggregation: determines the host version,
//! writes the assembly manifest skeleton and creates the checkout directory.

use std::fs;

use indexmap::IndexMap;
use log::info;

use crate::config::{Layout, Settings};
use crate::defaults;
use crate::error::{Error, Result};
use crate::manifest::{DependencyMap, PackageManifest};

/// Version of the host framework.
///
/// Taken from the host manifest's `version` when it has one, otherwise from
/// the host's core package manifest.
pub fn host_version(layout: &Layout) -> Result<String> {
    let host_manifest = layout.host_manifest();
    if host_manifest.exists() {
        if let Some(version) = PackageManifest::load(&host_manifest)?.version {
            return Ok(version);
        }
    }

    let path = layout.host_core_manifest();
    PackageManifest::load(&path)?
        .version
        .ok_or_else(|| Error::ManifestParse {
            path,
            message: "host core manifest has no 'version' field".to_string(),
        })
}

/// The assembly manifest of a workspace that has no extensions yet. It
/// depends on the host's core package at `^<host_version>`.
pub fn assembly_skeleton(settings: &Settings) -> PackageManifest {
    let mut other = IndexMap::new();
    other.insert("private".to_string(), serde_json::Value::Bool(true));

    let mut dependencies = DependencyMap::new();
    dependencies.insert(
        format!("{}{}", settings.namespace_prefix, defaults::HOST_CORE_PACKAGE),
        format!("^{}", settings.host_version),
    );

    PackageManifest {
        name: Some(defaults::ASSEMBLY_PACKAGE_NAME.to_string()),
        version: Some(settings.host_version.clone()),
        dependencies: Some(dependencies),
        dev_dependencies: None,
        other,
    }
}

/// Renders the assembly manifest skeleton and creates the checkout
/// directory.
///
/// An existing assembly manifest is overwritten, dropping the entries of
/// earlier runs, unless `keep_existing` is set. Returns `true` when the
/// skeleton was written.
pub fn generate(layout: &Layout, settings: &Settings, keep_existing: bool) -> Result<bool> {
    let assembly_manifest = layout.assembly_manifest();
    let written = if keep_existing && assembly_manifest.exists() {
        info!("Keeping existing assembly manifest {}", assembly_manifest.display());
        false
    } else {
        fs::create_dir_all(&layout.assembly_dir)?;
        assembly_skeleton(settings).save(&assembly_manifest)?;
        info!("Generated assembly manifest {}", assembly_manifest.display());
        true
    };

    fs::create_dir_all(&layout.checkout_dir)?;
    Ok(written)
}
