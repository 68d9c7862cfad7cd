//! # Status Command Implementation
//!
//! Implements `workspace-setup status`, a read-only report of each required
//! submodule: `missing` (not on disk), `clean`, or `dirty` (local changes or a
//! checkout that differs from the recorded commit).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use workspace_setup::output::{paint_state, OutputConfig};
use workspace_setup::process::SystemProcessRunner;
use workspace_setup::sync::SyncEngine;

use super::{load_required, resolve_workspace, settings_provider};

/// Show whether each required submodule is missing, clean or dirty
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Root directory of the workspace repository
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub workspace: PathBuf,

    /// Settings file declaring the required submodules
    #[arg(short, long, value_name = "FILE")]
    pub settings: Option<PathBuf>,
}

/// Execute the `status` command.
pub fn execute(args: StatusArgs, output: &OutputConfig) -> Result<i32> {
    let workspace = resolve_workspace(&args.workspace)?;
    let required = load_required(&settings_provider(&workspace, args.settings.as_deref()))?;

    if required.is_empty() {
        println!("No required submodules declared.");
        return Ok(0);
    }

    let runner = SystemProcessRunner;
    let engine = SyncEngine::new(&runner, workspace.clone());
    for submodule in &required {
        let state = engine
            .state(&submodule.path)
            .with_context(|| format!("Failed to inspect {}", submodule.path))?;
        println!("{}: {}", submodule.path, paint_state(output, state));
    }

    Ok(0)
}
