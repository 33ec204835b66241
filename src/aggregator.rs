//! # Extension Aggregation
//!
//! The aggregator assembles every extension listed in a descriptor file into
//! the host workspace. One pipeline runs per extension:
//!
//! 1.  **Clone** the extension repository below the checkout directory.
//! 2.  **Link** its package directories into the packages workspace.
//! 3.  **Resolve** the dependency versions of every linked manifest against
//!     the host's pinned versions.
//! 4.  **Merge** the identity of every linked package into the assembly
//!     manifest.
//!
//! Pipelines run in parallel on the rayon thread pool. They share two
//! resources: the `GlobalDependencySet`, built once before any pipeline
//! starts and only read afterwards, and the assembly manifest, which is only
//! written through one `AssemblyWriter`.
//!
//! The first pipeline error aborts the run. Pipelines that have not started
//! yet are skipped, and the error is returned to the caller.

use std::fs;
use std::path::Path;

use log::{debug, info};
use rayon::prelude::*;

use crate::assembly::AssemblyWriter;
use crate::config::{self, ExtensionDescriptor, Layout, Settings};
use crate::error::Result;
use crate::linker;
use crate::repository::{self, ClonedExtension, GitCloner, RepositoryCloner};
use crate::resolver::{GlobalDependencySet, VersionPolicy};

/// Drives the clone, link, resolve and merge pipeline for a set of extensions.
pub struct Aggregator {
    layout: Layout,
    settings: Settings,
    cloner: Box<dyn RepositoryCloner>,
}

impl Aggregator {
    /// Creates an aggregator that fetches extensions with the system `git`.
    pub fn new(layout: Layout, settings: Settings) -> Self {
        Self::with_cloner(layout, settings, Box::new(GitCloner))
    }

    /// Creates an aggregator with a custom `RepositoryCloner`.
    pub fn with_cloner(layout: Layout, settings: Settings, cloner: Box<dyn RepositoryCloner>) -> Self {
        Self {
            layout,
            settings,
            cloner,
        }
    }

    /// Assembles every extension listed in the descriptor file at
    /// `descriptor_path`.
    ///
    /// Returns the processed extensions in descriptor order.
    pub fn aggregate(&self, descriptor_path: &Path) -> Result<Vec<ClonedExtension>> {
        info!("Reading extensions from {}", descriptor_path.display());
        let descriptors = config::from_file(descriptor_path)?;
        self.aggregate_descriptors(&descriptors)
    }

    /// Assembles the given extensions.
    pub fn aggregate_descriptors(
        &self,
        descriptors: &[ExtensionDescriptor],
    ) -> Result<Vec<ClonedExtension>> {
        config::check_unique_clone_names(descriptors)?;
        let global = GlobalDependencySet::from_host_manifest(&self.layout.host_manifest())?;
        debug!("{} host dependency versions pinned", global.len());

        fs::create_dir_all(&self.layout.checkout_dir)?;

        let policy = VersionPolicy::new(
            &global,
            &self.settings.host_version,
            &self.settings.namespace_prefix,
        );
        let writer = AssemblyWriter::new(self.layout.assembly_manifest());

        descriptors
            .par_iter()
            .map(|descriptor| self.add_extension(descriptor, policy, &writer))
            .collect()
    }

    fn add_extension(
        &self,
        descriptor: &ExtensionDescriptor,
        policy: VersionPolicy<'_>,
        writer: &AssemblyWriter,
    ) -> Result<ClonedExtension> {
        info!("Cloning {}...", descriptor.source);
        let mut extension =
            repository::fetch(descriptor, self.cloner.as_ref(), &self.layout.checkout_dir)?;

        linker::link(&mut extension, &self.layout.packages_dir, &self.settings.link_prefix)?;
        debug_assert!(!extension.linked_paths.is_empty());

        for manifest in extension.linked_manifests() {
            policy.rewrite_manifest(&manifest)?;
        }

        writer.merge(&extension.linked_paths)?;
        info!(
            "Extension {} added ({} package(s))",
            descriptor.source,
            extension.linked_paths.len()
        );
        Ok(extension)
    }
}
