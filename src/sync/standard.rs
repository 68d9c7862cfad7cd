//! Standard sync: one combined `submodule sync`, then a fetch per submodule.

use std::path::Path;

use log::{error, info};

use super::{SubmoduleFailure, SubmoduleState, SyncEngine, SyncReport};
use crate::config::RequiredSubmodule;
use crate::error::Result;

impl SyncEngine<'_> {
    /// Sync and fetch every submodule in `required`.
    ///
    /// `Err` only when the combined `git submodule sync` fails; nothing is
    /// fetched in that case. Per-submodule failures are collected in the
    /// report and do not stop the remaining submodules.
    ///
    /// An existing checkout with local changes is skipped unless `force` is
    /// set. `reference` seeds new clones from a local object cache.
    pub fn standard_sync(
        &self,
        required: &[RequiredSubmodule],
        force: bool,
        reference: Option<&Path>,
    ) -> Result<SyncReport> {
        let mut report = SyncReport::default();
        if required.is_empty() {
            return Ok(report);
        }

        let paths: Vec<&str> = required.iter().map(|r| r.path.as_str()).collect();
        info!("## Syncing Git repositories: {}...", paths.join(" "));
        if let Err(e) = self.git.submodule_sync(&self.root, &paths) {
            error!("Error while trying to synchronize the environment!");
            error!("{}", e);
            return Err(e);
        }
        info!("Done.");

        for submodule in required {
            info!("## Checking Git repository: {}...", submodule.path);
            match self.fetch_one(submodule, force, reference) {
                Ok(true) => {
                    info!("Done.");
                    report.synced.push(submodule.path.clone());
                }
                Ok(false) => report.skipped.push(submodule.path.clone()),
                Err(failure) => {
                    error!("Failed to fetch required repository {}!", submodule.path);
                    error!("{}", failure.cause);
                    report.failed.push(failure);
                }
            }
        }

        Ok(report)
    }

    /// Fetch a single submodule. `Ok(false)` means it was skipped as dirty.
    fn fetch_one(
        &self,
        submodule: &RequiredSubmodule,
        force: bool,
        reference: Option<&Path>,
    ) -> std::result::Result<bool, SubmoduleFailure> {
        let location = self.root.join(&submodule.path);

        if !force {
            let state = self
                .state(&submodule.path)
                .map_err(|e| SubmoduleFailure::new(&location, e))?;
            if state == SubmoduleState::Dirty {
                info!("-- NOTE: Repo currently exists and appears to have local changes!");
                info!("-- Skipping fetch!");
                return Ok(false);
            }
        }

        info!("## Fetching repo.");
        self.git
            .submodule_update(&self.root, &submodule.path, submodule.recursive, reference)
            .map_err(|e| SubmoduleFailure::new(&location, e))?;
        Ok(true)
    }
}
