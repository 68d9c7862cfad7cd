//! # Workspace Setup CLI
//!
//! This is the binary entry point for the `workspace-setup` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Installing the logger.
//! - Executing the selected command and turning its result into an exit code.
//!
//! The core application logic lives in the `workspace_setup` library crate, so
//! the binary stays a thin wrapper around it.

mod cli;
mod commands;

use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();
    match cli.execute() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
