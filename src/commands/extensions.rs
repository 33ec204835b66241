//! # Extensions Command Implementation
//!
//! Runs the aggregation for every extension listed in the descriptor file:
//! clone, link into the packages workspace, align dependency versions and
//! register in the assembly manifest. The assembly manifest must exist; the
//! `init` command creates it.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use extension_assembler::aggregator::Aggregator;
use extension_assembler::config::{Layout, Settings};
use extension_assembler::output::{OutputConfig, Status};
use extension_assembler::repository::ClonedExtension;

use super::{descriptor_path, SettingsArgs, WorkspaceArgs};

/// Clone, link and register the extensions of a descriptor file
#[derive(Args, Debug)]
pub struct ExtensionsArgs {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Extension descriptor file (default: <ROOT>/extensions.yml).
    #[arg(short, long, value_name = "FILE", env = "EXT_ASSEMBLER_EXTENSIONS")]
    pub extensions: Option<PathBuf>,

    /// Only print errors.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `extensions` command.
pub fn execute(args: ExtensionsArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let layout = args.workspace.layout();
    let settings = args.settings.settings(&layout)?;
    let descriptors = descriptor_path(args.extensions.as_ref(), &layout);

    run(&out, layout, settings, &descriptors, args.quiet)
}

/// Aggregates the extensions of `descriptors` and reports the result.
pub(crate) fn run(
    out: &OutputConfig,
    layout: Layout,
    settings: Settings,
    descriptors: &Path,
    quiet: bool,
) -> Result<()> {
    if !quiet {
        println!(
            "{}",
            out.status(
                Status::Step,
                format!("Aggregating extensions from {}", descriptors.display())
            )
        );
    }

    let aggregator = Aggregator::new(layout, settings);
    let extensions = aggregator
        .aggregate(descriptors)
        .with_context(|| format!("Aggregation of {} failed", descriptors.display()))?;

    if !quiet {
        print_summary(out, &extensions);
    }
    Ok(())
}

fn print_summary(out: &OutputConfig, extensions: &[ClonedExtension]) {
    for extension in extensions {
        for link in &extension.linked_paths {
            println!(
                "{}",
                out.status(
                    Status::Info,
                    format!("{} -> {}", extension.descriptor.source, link.display())
                )
            );
        }
    }
    let packages: usize = extensions.iter().map(|e| e.linked_paths.len()).sum();
    println!(
        "{}",
        out.status(
            Status::Done,
            format!(
                "Assembled {} extension(s), {} package(s)",
                extensions.len(),
                packages
            )
        )
    );
}
