//! # Init Command Implementation
//!
//! Prepares a host checkout and assembles its extensions in one go:
//!
//! - determines the host version (flag, host manifest or core package)
//! - renders the assembly manifest skeleton, replacing the previous one
//!   unless `--keep-assembly` is given
//! - creates the checkout directory
//! - runs the same aggregation as the `extensions` command

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use extension_assembler::init;
use extension_assembler::output::{OutputConfig, Status};

use super::{descriptor_path, SettingsArgs, WorkspaceArgs};

/// Generate the assembly manifest and aggregate the configured extensions
#[derive(Args, Debug)]
pub struct InitArgs {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Extension descriptor file (default: <ROOT>/extensions.yml).
    #[arg(short, long, value_name = "FILE", env = "EXT_ASSEMBLER_EXTENSIONS")]
    pub extensions: Option<PathBuf>,

    /// Keep an existing assembly manifest instead of regenerating it.
    #[arg(long)]
    pub keep_assembly: bool,

    /// Only prepare the workspace, do not aggregate extensions.
    #[arg(long)]
    pub skip_extensions: bool,

    /// Only print errors.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `init` command.
pub fn execute(args: InitArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let layout = args.workspace.layout();
    let settings = args.settings.settings(&layout)?;

    if !args.quiet {
        println!(
            "{}",
            out.status(
                Status::Step,
                format!(
                    "Initializing {} for host version {}",
                    layout.host_root.display(),
                    settings.host_version
                )
            )
        );
    }

    let written = init::generate(&layout, &settings, args.keep_assembly).with_context(|| {
        format!(
            "Failed to prepare the assembly in {}",
            layout.assembly_dir.display()
        )
    })?;
    if !args.quiet {
        let message = if written {
            format!("Generated {}", layout.assembly_manifest().display())
        } else {
            format!("Kept existing {}", layout.assembly_manifest().display())
        };
        println!("{}", out.status(Status::Done, message));
    }

    if args.skip_extensions {
        return Ok(());
    }

    let descriptors = descriptor_path(args.extensions.as_ref(), &layout);
    super::extensions::run(&out, layout, settings, &descriptors, args.quiet)
}
