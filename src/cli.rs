//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Extension Assembler - Assemble a host framework with its extensions
#[derive(Parser, Debug)]
#[command(name = "extension-assembler")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the assembly manifest and aggregate the configured extensions
    Init(commands::init::InitArgs),

    /// Clone, link and register the extensions of a descriptor file
    Extensions(commands::extensions::ExtensionsArgs),

    /// Remove extension links, clones, the assembly and node_modules
    Clean(commands::clean::CleanArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Init(args) => commands::init::execute(args, &self.color),
            Commands::Extensions(args) => commands::extensions::execute(args, &self.color),
            Commands::Clean(args) => commands::clean::execute(args, &self.color),
        }
    }
}

/// `RUST_LOG` takes precedence over `--log-level`.
fn init_logging(log_level: &str) {
    let mut builder = if std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some() {
        env_logger::Builder::from_default_env()
    } else {
        let mut builder = env_logger::Builder::new();
        builder.parse_filters(log_level);
        builder
    };
    // A logger may already be installed when running inside tests
    let _ = builder.format_timestamp(None).try_init();
}
