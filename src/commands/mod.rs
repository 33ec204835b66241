//! # CLI Command Implementations
//!
//! One module per subcommand of `extension-assembler`. Each holds an `Args`
//! struct derived with `clap` and an `execute` function that calls into the
//! `extension_assembler` library.
//!
//! The options naming the host checkout and the run settings are shared by
//! several commands and live here.

pub mod clean;
pub mod extensions;
pub mod init;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use extension_assembler::config::{Layout, Settings};
use extension_assembler::defaults;

/// Location of the host checkout and its well-known directories.
#[derive(Args, Debug, Clone)]
pub struct WorkspaceArgs {
    /// Root of the host framework checkout.
    #[arg(long, value_name = "DIR", default_value = ".", env = "EXT_ASSEMBLER_ROOT")]
    pub root: PathBuf,

    /// Directory receiving the extension clones (default: <ROOT>/che).
    #[arg(long, value_name = "DIR", env = "EXT_ASSEMBLER_CHECKOUT_DIR")]
    pub checkout_dir: Option<PathBuf>,

    /// Directory holding the assembly manifest (default: <ROOT>/examples/assembly).
    #[arg(long, value_name = "DIR", env = "EXT_ASSEMBLER_ASSEMBLY_DIR")]
    pub assembly_dir: Option<PathBuf>,
}

impl WorkspaceArgs {
    pub fn layout(&self) -> Layout {
        let mut layout = Layout::from_root(&self.root);
        if let Some(dir) = &self.checkout_dir {
            layout.checkout_dir = dir.clone();
        }
        if let Some(dir) = &self.assembly_dir {
            layout.assembly_dir = dir.clone();
        }
        layout
    }
}

/// Version alignment and link naming options.
#[derive(Args, Debug, Clone)]
pub struct SettingsArgs {
    /// Host framework version; read from the host manifests when omitted.
    #[arg(long, value_name = "VERSION", env = "EXT_ASSEMBLER_HOST_VERSION")]
    pub host_version: Option<String>,

    /// Package namespace of the host framework.
    #[arg(
        long,
        value_name = "PREFIX",
        default_value = defaults::HOST_NAMESPACE_PREFIX,
        env = "EXT_ASSEMBLER_NAMESPACE_PREFIX"
    )]
    pub namespace_prefix: String,

    /// Prefix of the workspace link names.
    #[arg(
        long,
        value_name = "PREFIX",
        default_value = defaults::LINK_PREFIX,
        env = "EXT_ASSEMBLER_LINK_PREFIX"
    )]
    pub link_prefix: String,
}

impl SettingsArgs {
    pub fn settings(&self, layout: &Layout) -> Result<Settings> {
        if self.namespace_prefix.is_empty() {
            // Every package name starts with "", so all of them would be caret-pinned
            bail!("The host namespace prefix must not be empty (--namespace-prefix)");
        }
        let host_version = match &self.host_version {
            Some(version) => version.clone(),
            None => extension_assembler::init::host_version(layout).with_context(|| {
                format!(
                    "Cannot determine the host version below {} (use --host-version)",
                    layout.host_root.display()
                )
            })?,
        };
        Ok(Settings::new(host_version)
            .with_namespace_prefix(&self.namespace_prefix)
            .with_link_prefix(&self.link_prefix))
    }
}

/// Path of the descriptor file: explicit, or `extensions.yml` in the root.
pub fn descriptor_path(explicit: Option<&PathBuf>, layout: &Layout) -> PathBuf {
    explicit
        .cloned()
        .unwrap_or_else(|| layout.host_root.join(defaults::DESCRIPTOR_FILE))
}
