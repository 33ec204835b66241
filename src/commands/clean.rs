//! # Clean Command Implementation
//!
//! Resets a host checkout to its state before `init`: removes the extension
//! links from the packages workspace, the extension clones, the assembly
//! directory and `node_modules`. The host's own packages are kept.

use anyhow::{Context, Result};
use clap::Args;

use extension_assembler::clean;
use extension_assembler::output::{OutputConfig, Status};

use super::WorkspaceArgs;

/// Remove extension links, clones, the assembly and node_modules
#[derive(Args, Debug)]
pub struct CleanArgs {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    /// Only print errors.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `clean` command.
pub fn execute(args: CleanArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let layout = args.workspace.layout();

    let report = clean::clean(&layout)
        .with_context(|| format!("Failed to clean {}", layout.host_root.display()))?;

    if !args.quiet {
        for path in report.links_removed.iter().chain(&report.dirs_removed) {
            println!(
                "{}",
                out.status(Status::Info, format!("Removed {}", path.display()))
            );
        }
        println!(
            "{}",
            out.status(
                Status::Done,
                format!(
                    "Cleaned {} link(s) and {} directory(ies)",
                    report.links_removed.len(),
                    report.dirs_removed.len()
                )
            )
        );
    }
    Ok(())
}
