//! # Setup Command Implementation
//!
//! Implements `workspace-setup setup`, which brings every submodule named in
//! the workspace settings onto disk.
//!
//! ## Modes
//!
//! - **Standard** (default): one `git submodule sync` for the declared set,
//!   then a fetch per submodule. Checkouts with local changes are skipped
//!   unless `--force` is given, in which case the workspace is hard-reset and
//!   cleaned first.
//! - **Special** (`--special FILE`): each submodule's remote is rewritten
//!   through the URL substitution table in `FILE` before it is initialized,
//!   recursing into nested submodules.
//!
//! The command exits with 0 only if nothing failed.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use workspace_setup::output::{mark, OutputConfig};
use workspace_setup::process::SystemProcessRunner;
use workspace_setup::setup::{SetupOptions, SetupOutcome, WorkspaceSetup};

use super::{resolve_workspace, settings_provider};

/// Sync and fetch the required submodules of a workspace
#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Root directory of the workspace repository
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub workspace: PathBuf,

    /// Settings file declaring the required submodules
    ///
    /// Defaults to `.workspace-setup.yaml` in the workspace root.
    #[arg(short, long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Discard local changes and fetch every submodule regardless of state
    #[arg(long, visible_alias = "FORCE", alias = "Force")]
    pub force: bool,

    /// Local object cache used as `--reference` for new clones
    #[arg(
        long,
        value_name = "DIR",
        env = "OMNICACHE_PATH",
        visible_alias = "OMNICACHE",
        alias = "Omnicache"
    )]
    pub omnicache: Option<PathBuf>,

    /// Perform a special setup with the URL substitutions in FILE
    #[arg(long, value_name = "FILE", value_parser = existing_file)]
    pub special: Option<PathBuf>,

    /// Write log output to FILE instead of stderr
    ///
    /// The file is kept when `--force` cleans the workspace.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// Accept only a path to an existing regular file, made absolute.
fn existing_file(value: &str) -> std::result::Result<PathBuf, String> {
    let path = std::path::absolute(value).map_err(|e| e.to_string())?;
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("{} is not an existing file", path.display()))
    }
}

/// Execute the `setup` command.
pub fn execute(args: SetupArgs, output: &OutputConfig) -> Result<i32> {
    let workspace = resolve_workspace(&args.workspace)?;
    let settings = settings_provider(&workspace, args.settings.as_deref());

    let preserve = args
        .log_file
        .as_deref()
        .and_then(|log| preserved_path(&workspace, log))
        .into_iter()
        .collect();

    let options = SetupOptions {
        workspace,
        force: args.force,
        reference: args.omnicache,
        special: args.special,
        preserve,
    };

    let runner = SystemProcessRunner;
    let outcome = WorkspaceSetup::new(&runner, options).run(&settings);
    print_summary(&outcome, output);
    Ok(outcome.exit_code())
}

/// Workspace-relative form of `log_file`, if it lives inside the workspace.
fn preserved_path(workspace: &Path, log_file: &Path) -> Option<String> {
    let absolute = std::path::absolute(log_file).ok()?;
    let relative = absolute.strip_prefix(workspace).ok()?;
    Some(relative.to_string_lossy().replace('\\', "/"))
}

fn print_summary(outcome: &SetupOutcome, output: &OutputConfig) {
    let report = &outcome.report;
    for path in &report.synced {
        println!("{} {}", mark(output, true), path);
    }
    for path in &report.skipped {
        println!("{} {} (skipped: local changes)", mark(output, true), path);
    }
    for failure in &report.failed {
        println!("{} {}", mark(output, false), failure);
    }
    if let Some(fatal) = &outcome.fatal {
        println!("{} {}", mark(output, false), fatal);
    }

    if outcome.is_success() {
        println!("Setup complete.");
    } else {
        println!("Setup FAILED.");
    }
}
