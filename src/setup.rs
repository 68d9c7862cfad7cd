//! # Workspace Setup
//!
//! `WorkspaceSetup` is the top-level driver behind `workspace-setup setup`:
//!
//! 1.  **Git check**: `git --version` must succeed and report at least
//!     `MINIMUM_GIT_VERSION`.
//! 2.  **Special configuration**: loaded and validated up front, so a
//!     malformed file aborts the run before anything is cleaned.
//! 3.  **Force clean** (with `force`): hard reset and `git clean -xffd` of the
//!     root repository and of every checked-out required submodule. Files listed
//!     in `SetupOptions::preserve` (e.g. an open log file) survive the clean.
//! 4.  **Sync**: special sync when a special configuration is given, standard
//!     sync otherwise (see `crate::sync`).
//!
//! `run` never returns an error. Fatal conditions are logged and recorded in
//! the returned `SetupOutcome`, which is successful only if nothing was fatal
//! and no individual submodule failed, in either mode.

use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::config::{self, RequiredSubmodule, SettingsProvider};
use crate::error::{Error, Result};
use crate::git::Git;
use crate::manifest;
use crate::process::ProcessRunner;
use crate::sync::{SyncEngine, SyncReport};
use crate::version::{check_minimum, parse_git_version, MINIMUM_GIT_VERSION};

/// How a setup run should behave.
#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    /// Root of the workspace repository.
    pub workspace: PathBuf,
    /// Discard local changes before syncing and never skip dirty submodules.
    pub force: bool,
    /// Local object cache passed to `git submodule update --reference`.
    pub reference: Option<PathBuf>,
    /// Special configuration document; selects special sync.
    pub special: Option<PathBuf>,
    /// Workspace-relative paths excluded from the root `git clean`.
    pub preserve: Vec<String>,
}

/// Result of a setup run.
#[derive(Debug, Default)]
pub struct SetupOutcome {
    pub report: SyncReport,
    /// The condition that aborted the run, if any.
    pub fatal: Option<Error>,
}

impl SetupOutcome {
    pub fn is_success(&self) -> bool {
        self.fatal.is_none() && self.report.is_clean()
    }

    /// Process exit code: 0 on success, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// Drives a complete setup of one workspace.
pub struct WorkspaceSetup<'a> {
    runner: &'a dyn ProcessRunner,
    options: SetupOptions,
}

impl<'a> WorkspaceSetup<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, options: SetupOptions) -> Self {
        Self { runner, options }
    }

    /// Run the whole setup against the declarations from `settings`.
    pub fn run(&self, settings: &dyn SettingsProvider) -> SetupOutcome {
        let mut outcome = SetupOutcome::default();
        if let Err(e) = self.try_run(settings, &mut outcome.report) {
            error!("FAILED!");
            error!("{}", e);
            outcome.fatal = Some(e);
        } else if !outcome.report.is_clean() {
            error!(
                "{} required submodule(s) failed to sync",
                outcome.report.failed.len()
            );
        }
        outcome
    }

    fn try_run(&self, settings: &dyn SettingsProvider, report: &mut SyncReport) -> Result<()> {
        let workspace = &self.options.workspace;
        if !workspace.is_dir() {
            return Err(Error::Path {
                path: workspace.clone(),
                message: "workspace is not a directory".to_string(),
            });
        }

        let required = settings.required_submodules()?;
        let git = Git::new(self.runner);
        self.verify_git(&git)?;

        // A broken special configuration must fail before anything is cleaned.
        let special_config = match &self.options.special {
            Some(special) if !required.is_empty() => {
                info!("## Performing a special setup using file: {}", special.display());
                Some(config::load_special_config(special)?)
            }
            _ => None,
        };

        if self.options.force {
            self.clean(&git, &required)?;
        }

        if required.is_empty() {
            info!("No required submodules declared.");
            return Ok(());
        }

        let engine = SyncEngine::new(self.runner, workspace.clone());
        *report = match &special_config {
            Some(special_config) => engine
                .special_sync(&required, special_config)
                .map_err(Box::new)?,
            None => engine.standard_sync(&required, self.options.force, self.reference())?,
        };
        Ok(())
    }

    fn verify_git(&self, git: &Git) -> Result<()> {
        let output = git.version(&self.options.workspace)?;
        let current = parse_git_version(&output)?;
        info!("Git version: {} ({})", current, output);
        check_minimum(&current, MINIMUM_GIT_VERSION)
    }

    /// The object cache, if one is configured and exists.
    fn reference(&self) -> Option<&Path> {
        let reference = self.options.reference.as_deref()?;
        if reference.exists() {
            Some(reference)
        } else {
            warn!(
                "Omnicache path set to invalid path: {}",
                reference.display()
            );
            None
        }
    }

    fn clean(&self, git: &Git, required: &[RequiredSubmodule]) -> Result<()> {
        let workspace = &self.options.workspace;
        info!("## Cleaning the root repo...");
        git.reset_hard(workspace)
            .and_then(|_| git.clean(workspace, &self.options.preserve))
            .inspect_err(|_| error!("Error while trying to clean the environment!"))?;
        info!("Done.");

        for submodule in required {
            let location = workspace.join(&submodule.path);
            if !manifest::is_checked_out(&location) {
                debug!("Nothing to clean at {}", location.display());
                continue;
            }
            info!("## Cleaning Git repository: {}...", submodule.path);
            git.reset_hard(&location)
                .and_then(|_| git.clean(&location, &[]))
                .inspect_err(|_| error!("Error while trying to clean the environment!"))?;
            info!("Done.");
        }
        Ok(())
    }
}
