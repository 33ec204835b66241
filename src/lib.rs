//! # Extension Assembler Library
//!
//! Assembles a host framework checkout with a set of independently developed
//! extensions. Each extension is cloned from its own repository, linked into
//! the host's package workspace, has its dependency versions aligned with the
//! host, and is registered in the assembly manifest that the distribution is
//! built from.
//!
//! ## Quick Example
//!
//! ```
//! use extension_assembler::config;
//! use extension_assembler::resolver::{resolve_dependency, GlobalDependencySet};
//!
//! let descriptors = config::parse(r#"
//! extensions:
//!   - source: https://github.com/org/plugin.git
//!     ref: main
//!     folders: [plugin-ext]
//! "#).unwrap();
//! assert_eq!(descriptors.len(), 1);
//!
//! let global: GlobalDependencySet = [("rimraf", "5.6.7")].into_iter().collect();
//! assert_eq!(resolve_dependency("rimraf", "1.0.0", &global, "1.2.3", "@theia/"), "5.6.7");
//! assert_eq!(resolve_dependency("@theia/core", "0.0.1", &global, "1.2.3", "@theia/"), "^1.2.3");
//! ```
//!
//! ## Modules
//!
//! - **`config`**: the extension descriptor file plus the on-disk `Layout`
//!   and run `Settings`.
//! - **`manifest`**: load and save `package.json` files without losing
//!   fields this crate does not model.
//! - **`resolver`**: the version alignment policy and manifest rewriting.
//! - **`repository`, `git`**: fetching extension sources.
//! - **`linker`**: workspace links under the host's packages directory.
//! - **`assembly`**: the serialized writer of the assembly manifest.
//! - **`aggregator`**: runs one pipeline per extension in parallel.
//! - **`init`, `clean`**: preparing and resetting a host checkout.
//!
//! ## Execution Flow
//!
//! `Aggregator::aggregate` reads the host's development dependencies once,
//! then for every descriptor, in parallel:
//!
//! 1.  **Fetch**: clone the extension into the checkout directory.
//! 2.  **Link**: link the extension (or each listed folder) into the workspace.
//! 3.  **Rewrite**: align the dependency versions of every linked manifest.
//! 4.  **Register**: add every linked package to the assembly manifest.
//!
//! The first failing pipeline aborts the run.

pub mod aggregator;
pub mod assembly;
pub mod clean;
pub mod config;
pub mod defaults;
pub mod error;
pub mod git;
pub mod init;
pub mod linker;
pub mod manifest;
pub mod output;
pub mod repository;
pub mod resolver;

#[cfg(test)]
mod resolver_proptest;
