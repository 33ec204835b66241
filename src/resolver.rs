//! # Version Resolution
//!
//! Extensions are developed against their own copies of shared dependencies.
//! Before they can be built inside the host workspace, each extension
//! manifest is rewritten so that:
//!
//! 1.  any package the host pins in its own `devDependencies` uses the
//!     host's version, whatever the extension declared;
//! 2.  any package in the host framework's namespace (e.g. `@theia/`) is
//!     pinned to `^<host version>`;
//! 3.  everything else keeps the extension's declared version.
//!
//! The host pins are collected once per run into a `GlobalDependencySet`,
//! which has no mutating API and is shared by reference between pipelines.

use std::path::Path;

use log::{debug, warn};

use crate::error::Result;
use crate::manifest::{DependencyMap, PackageManifest};

/// Versions pinned by the host framework's own development dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalDependencySet {
    pins: DependencyMap,
}

impl GlobalDependencySet {
    /// Collects the `devDependencies` of the host manifest at `path`.
    ///
    /// A host manifest without a `devDependencies` section yields an empty
    /// set. A missing or unreadable host manifest is an error.
    pub fn from_host_manifest(path: &Path) -> Result<Self> {
        let manifest = PackageManifest::load(path)?;
        match manifest.dev_dependencies {
            Some(pins) => Ok(Self { pins }),
            None => {
                warn!(
                    "Host manifest {} has no devDependencies, no versions will be pinned",
                    path.display()
                );
                Ok(Self::default())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pins.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for GlobalDependencySet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pins: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Returns the version an extension should depend on for `name`.
///
/// Host pins win over the namespace rule, which wins over the declared
/// version. Feeding the result back in as `declared` returns it unchanged.
pub fn resolve_dependency(
    name: &str,
    declared: &str,
    global: &GlobalDependencySet,
    host_version: &str,
    namespace_prefix: &str,
) -> String {
    if let Some(pinned) = global.get(name) {
        return pinned.to_string();
    }

    if name.starts_with(namespace_prefix) {
        return format!("^{}", host_version);
    }

    declared.to_string()
}

/// The resolution inputs of one run, bundled for repeated use.
#[derive(Debug, Clone, Copy)]
pub struct VersionPolicy<'a> {
    pub global: &'a GlobalDependencySet,
    pub host_version: &'a str,
    pub namespace_prefix: &'a str,
}

impl<'a> VersionPolicy<'a> {
    pub fn new(global: &'a GlobalDependencySet, host_version: &'a str, namespace_prefix: &'a str) -> Self {
        Self {
            global,
            host_version,
            namespace_prefix,
        }
    }

    pub fn resolve(&self, name: &str, declared: &str) -> String {
        resolve_dependency(name, declared, self.global, self.host_version, self.namespace_prefix)
    }

    /// Rewrites every value of `dependencies` in place. Keys and their order
    /// are untouched. Returns the number of values that changed.
    pub fn apply(&self, dependencies: &mut DependencyMap) -> usize {
        let mut changed = 0;
        for (name, version) in dependencies.iter_mut() {
            let resolved = self.resolve(name, version);
            if resolved != *version {
                debug!("{}: {} -> {}", name, version, resolved);
                *version = resolved;
                changed += 1;
            }
        }
        changed
    }

    /// Applies the policy to the `dependencies` and `devDependencies` of the
    /// manifest at `path` and writes it back.
    pub fn rewrite_manifest(&self, path: &Path) -> Result<()> {
        let mut manifest = PackageManifest::load(path)?;

        let mut changed = 0;
        if let Some(dependencies) = manifest.dependencies.as_mut() {
            changed += self.apply(dependencies);
        }
        if let Some(dev_dependencies) = manifest.dev_dependencies.as_mut() {
            changed += self.apply(dev_dependencies);
        }

        manifest.save(path)?;
        debug!("Rewrote {} ({} versions changed)", path.display(), changed);
        Ok(())
    }
}

/// Rewrites the dependency sections of the manifest at `manifest_path`
/// according to [`resolve_dependency`].
pub fn rewrite_manifest(
    manifest_path: &Path,
    global: &GlobalDependencySet,
    host_version: &str,
    namespace_prefix: &str,
) -> Result<()> {
    VersionPolicy::new(global, host_version, namespace_prefix).rewrite_manifest(manifest_path)
}
