//! Special sync: rewrite remotes through a substitution table, then
//! initialize submodules depth-first.

use std::path::Path;

use log::{error, info};

use super::{same_submodule_path, SubmoduleFailure, SyncEngine, SyncReport};
use crate::config::{RequiredSubmodule, SpecialConfig, UrlSubstitution};
use crate::manifest::{self, SubmoduleRecord};
use crate::substitution;

impl SyncEngine<'_> {
    /// Initialize every required submodule declared in the root manifest,
    /// rewriting remotes per `config` at every nesting level.
    ///
    /// Submodules are visited in root manifest order. The first failure at
    /// any depth stops the walk and is returned; nothing after it runs.
    pub fn special_sync(
        &self,
        required: &[RequiredSubmodule],
        config: &SpecialConfig,
    ) -> std::result::Result<SyncReport, SubmoduleFailure> {
        let mut report = SyncReport::default();
        let records = manifest::read_submodules(&self.root)
            .map_err(|e| SubmoduleFailure::new(&self.root, e))?;

        for record in &records {
            for submodule in required
                .iter()
                .filter(|r| same_submodule_path(&record.path, &r.path))
            {
                if let Err(failure) = self.init_submodule(
                    &self.root,
                    record,
                    &config.url_substitutions,
                    submodule.recursive,
                ) {
                    error!("{}", failure);
                    return Err(failure);
                }
                report.synced.push(submodule.path.clone());
            }
        }

        Ok(report)
    }

    /// Initialize the submodule `record` of the repository at `root`, then,
    /// if `recursive`, each submodule it declares in turn.
    ///
    /// Nested manifests are read only after the parent's init succeeded,
    /// since they do not exist on disk before that.
    pub fn init_submodule(
        &self,
        root: &Path,
        record: &SubmoduleRecord,
        substitutions: &[UrlSubstitution],
        recursive: bool,
    ) -> std::result::Result<(), SubmoduleFailure> {
        let repo_path = root.join(&record.path);
        info!("## Special init of repo '{}'", repo_path.display());

        if let Some(sub) = substitution::resolve(&record.url, substitutions) {
            if let Err(e) = self.git.submodule_set_url(root, &record.name, sub) {
                error!("Failed to update url for {}", repo_path.display());
                error!("-- From: {}", record.url);
                error!("-- To: {}", sub);
                return Err(SubmoduleFailure::new(&repo_path, e));
            }
        }

        if let Err(e) = self.git.submodule_init(root, &record.path) {
            error!("Failed to initialize repo {}", repo_path.display());
            return Err(SubmoduleFailure::new(&repo_path, e));
        }

        if recursive {
            let nested = manifest::read_submodules(&repo_path)
                .map_err(|e| SubmoduleFailure::new(&repo_path, e))?;
            for child in &nested {
                self.init_submodule(&repo_path, child, substitutions, recursive)?;
            }
        }

        Ok(())
    }
}
