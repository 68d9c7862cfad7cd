//! CLI argument parsing, logger setup and command dispatch

use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use workspace_setup::output::OutputConfig;

use crate::commands;

/// Workspace Setup - Synchronize the git submodules a build workspace needs
#[derive(Parser, Debug)]
#[command(name = "workspace-setup")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "info",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sync and fetch the required submodules of a workspace
    Setup(commands::setup::SetupArgs),

    /// Show whether each required submodule is missing, clean or dirty
    Status(commands::status::StatusArgs),

    /// Display the nested submodule hierarchy of a workspace
    Tree(commands::tree::TreeArgs),
}

impl Cli {
    /// Execute the CLI command, returning the process exit code.
    pub fn execute(self) -> Result<i32> {
        let output = OutputConfig::from_env_and_flag(&self.color);
        let log_file = match &self.command {
            Commands::Setup(args) => args.log_file.as_deref(),
            _ => None,
        };
        init_logging(&self.log_level, &output, log_file)?;

        match self.command {
            Commands::Setup(args) => commands::setup::execute(args, &output),
            Commands::Status(args) => commands::status::execute(args, &output),
            Commands::Tree(args) => commands::tree::execute(args),
        }
    }
}

/// Install `env_logger` at `level`, unless `RUST_LOG` says otherwise.
///
/// With `log_file`, log lines go to that file instead of stderr.
fn init_logging(level: &str, output: &OutputConfig, log_file: Option<&Path>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));
    builder.format_timestamp(None).format_target(false);

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory {}", parent.display())
                })?;
            }
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder
                .target(env_logger::Target::Pipe(Box::new(file)))
                .write_style(env_logger::WriteStyle::Never);
        }
        None => {
            builder.write_style(output.write_style());
        }
    }

    builder.try_init().context("Failed to initialize logging")
}
