//! # CLI Command Implementations
//!
//! Each subcommand of `workspace-setup` lives in its own module with:
//! - An `Args` struct that defines the command-specific options, derived
//!   using `clap`.
//! - An `execute` function that performs the command through the
//!   `workspace_setup` library and returns the process exit code.

pub mod setup;
pub mod status;
pub mod tree;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use workspace_setup::config::{FileSettings, RequiredSubmodule, SettingsProvider};

/// Absolute form of `workspace`, which must be an existing directory.
pub fn resolve_workspace(workspace: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(workspace)
        .with_context(|| format!("Invalid workspace path {}", workspace.display()))?;
    if !absolute.is_dir() {
        anyhow::bail!("Workspace {} is not a directory", absolute.display());
    }
    Ok(absolute)
}

/// The settings provider selected by `--settings`, or the workspace default.
pub fn settings_provider(workspace: &Path, settings: Option<&Path>) -> FileSettings {
    match settings {
        Some(path) => FileSettings::new(path),
        None => FileSettings::for_workspace(workspace),
    }
}

/// Load the declared submodules, with the settings file named on failure.
pub fn load_required(provider: &FileSettings) -> Result<Vec<RequiredSubmodule>> {
    provider.required_submodules().with_context(|| {
        format!(
            "Failed to load settings from {}",
            provider.path().display()
        )
    })
}
