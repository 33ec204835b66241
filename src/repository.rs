//! # Extension Repositories
//!
//! This module turns an `ExtensionDescriptor` into a `ClonedExtension`: a
//! local checkout of the extension owned by a single pipeline.
//!
//! ## Design
//!
//! Fetching is hidden behind the `RepositoryCloner` trait so the aggregation
//! pipeline never depends on how a source tree arrives on disk. The
//! application uses `GitCloner`, which shells out to the system `git`
//! command. Tests substitute cloners that copy fixture directories or fail
//! on demand.

use std::path::{Path, PathBuf};

use crate::config::ExtensionDescriptor;
use crate::defaults;
use crate::error::{Error, Result};

/// Fetches a source tree at a given ref into a local directory.
pub trait RepositoryCloner: Send + Sync {
    /// Clones `source` into `parent/name` at `r#ref` (`None` for the default
    /// branch) and returns the local directory.
    ///
    /// Implementations must tolerate being called again for the same
    /// destination.
    fn clone_repository(
        &self,
        source: &str,
        parent: &Path,
        name: &str,
        r#ref: Option<&str>,
    ) -> Result<PathBuf>;
}

/// The default implementation of `RepositoryCloner`, which uses the system's
/// `git` command.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCloner;

impl RepositoryCloner for GitCloner {
    fn clone_repository(
        &self,
        source: &str,
        parent: &Path,
        name: &str,
        r#ref: Option<&str>,
    ) -> Result<PathBuf> {
        let target_dir = std::path::absolute(parent.join(name))?;
        crate::git::clone_shallow(source, r#ref, &target_dir)?;
        Ok(target_dir)
    }
}

/// An extension checked out locally, together with the workspace links that
/// were created for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClonedExtension {
    pub descriptor: ExtensionDescriptor,
    /// Local checkout; belongs to the pipeline that cloned it.
    pub cloned_dir: PathBuf,
    /// Absolute workspace link paths, empty until linking has run.
    pub linked_paths: Vec<PathBuf>,
}

impl ClonedExtension {
    pub fn new(descriptor: ExtensionDescriptor, cloned_dir: PathBuf) -> Self {
        Self {
            descriptor,
            cloned_dir,
            linked_paths: Vec::new(),
        }
    }

    /// Absolute directories to link: each listed folder of the checkout, or
    /// the checkout itself when no folders are listed.
    pub fn source_dirs(&self) -> Result<Vec<PathBuf>> {
        let root = std::path::absolute(&self.cloned_dir)?;
        if self.descriptor.folders.is_empty() {
            return Ok(vec![root]);
        }
        Ok(self
            .descriptor
            .folders
            .iter()
            .map(|folder| root.join(folder))
            .collect())
    }

    /// Manifest of every linked package, in link order.
    pub fn linked_manifests(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.linked_paths
            .iter()
            .map(|link| link.join(defaults::MANIFEST_FILE))
    }
}

/// Clones the extension described by `descriptor` below `checkout_dir`.
///
/// The clone directory is named after the last segment of the source
/// locator.
pub fn fetch(
    descriptor: &ExtensionDescriptor,
    cloner: &dyn RepositoryCloner,
    checkout_dir: &Path,
) -> Result<ClonedExtension> {
    let name = crate::git::repository_name(&descriptor.source).ok_or_else(|| Error::GitClone {
        url: descriptor.source.clone(),
        r#ref: descriptor
            .ref_name()
            .unwrap_or(crate::git::DEFAULT_BRANCH)
            .to_string(),
        message: "cannot derive a repository name from the source".to_string(),
    })?;

    let cloned_dir =
        cloner.clone_repository(&descriptor.source, checkout_dir, &name, descriptor.ref_name())?;
    Ok(ClonedExtension::new(descriptor.clone(), cloned_dir))
}
