//! # Assembly Manifest
//!
//! The assembly manifest is the root `package.json` of the assembled
//! distribution. Its `dependencies` map gains one `name: version` entry per
//! linked extension package.
//!
//! Every extension pipeline updates the same file with a read-modify-write
//! cycle. Two unsynchronized cycles that overlap both start from the same
//! content and the later write drops the earlier one's entries, so the
//! aggregator routes all updates through one `AssemblyWriter`, which holds a
//! lock for the whole cycle.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::info;

use crate::defaults;
use crate::error::{Error, Result};
use crate::manifest::{DependencyMap, PackageManifest};

/// Reads `(name, version)` from the manifest inside a linked package.
pub fn package_identity(linked_path: &Path) -> Result<(String, String)> {
    let manifest_path = linked_path.join(defaults::MANIFEST_FILE);
    let manifest = PackageManifest::load(&manifest_path)?;
    let name = manifest.require_name(&manifest_path)?.to_string();
    let version = manifest.require_version(&manifest_path)?.to_string();
    Ok((name, version))
}

/// Upserts the identity of every package in `linked_paths` into the
/// `dependencies` of the assembly manifest at `assembly_manifest_path`.
///
/// Existing entries are only ever updated, never removed. This performs an
/// unguarded read-modify-write; concurrent callers must go through
/// [`AssemblyWriter`].
pub fn merge(linked_paths: &[PathBuf], assembly_manifest_path: &Path) -> Result<()> {
    // Read every identity first so a broken package leaves the assembly untouched.
    let identities = linked_paths
        .iter()
        .map(|path| package_identity(path))
        .collect::<Result<Vec<_>>>()?;

    let mut assembly = PackageManifest::load(assembly_manifest_path)?;
    let dependencies = assembly.dependencies.get_or_insert_with(DependencyMap::new);
    for (name, version) in identities {
        info!("Adding {}@{} to the assembly", name, version);
        dependencies.insert(name, version);
    }
    assembly.save(assembly_manifest_path)
}

/// Single owner of the assembly manifest during an aggregation run.
///
/// Each call to [`AssemblyWriter::merge`] runs its whole read-modify-write
/// cycle while holding the writer's lock.
#[derive(Debug)]
pub struct AssemblyWriter {
    path: Mutex<PathBuf>,
}

impl AssemblyWriter {
    pub fn new(assembly_manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            path: Mutex::new(assembly_manifest_path.into()),
        }
    }

    /// Merges `linked_paths` into the assembly manifest, serialized with
    /// every other merge through this writer.
    pub fn merge(&self, linked_paths: &[PathBuf]) -> Result<()> {
        let path = self.path.lock().map_err(|_| Error::LockPoisoned {
            context: "assembly manifest".to_string(),
        })?;
        merge(linked_paths, &path)
    }
}
