//! # Submodule Synchronization Engine
//!
//! `SyncEngine` brings the required submodules of a workspace onto disk. It
//! has two strategies:
//!
//! - **Standard** (`standard.rs`): one `git submodule sync` for the whole
//!   declared set, then a per-submodule `git submodule update --init` that
//!   skips checkouts with local changes unless forced. A failing sync aborts;
//!   a failing item is recorded and the next item is tried.
//!
//! - **Special** (`special.rs`): a depth-first walk that rewrites each
//!   submodule's remote through a URL substitution table before initializing
//!   it, then descends into the submodules it declares. The first failure at
//!   any depth aborts the whole walk.
//!
//! Neither strategy runs anything in parallel; commands are issued in
//! declaration order so the log reads in processing order.

mod special;
mod standard;

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::git::Git;
use crate::process::ProcessRunner;

/// A submodule that could not be brought onto disk, and why.
#[derive(Debug, thiserror::Error)]
#[error("failed to init '{}': {cause}", path.display())]
pub struct SubmoduleFailure {
    /// Absolute location of the submodule (or repository) that failed.
    pub path: PathBuf,
    #[source]
    pub cause: Error,
}

impl SubmoduleFailure {
    pub fn new(path: impl Into<PathBuf>, cause: Error) -> Self {
        Self {
            path: path.into(),
            cause,
        }
    }
}

/// What happened to each required submodule during a sync.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Workspace-relative paths that were fetched or initialized.
    pub synced: Vec<String>,
    /// Workspace-relative paths left alone because they had local changes.
    pub skipped: Vec<String>,
    /// Submodules that failed without aborting the run.
    pub failed: Vec<SubmoduleFailure>,
}

impl SyncReport {
    /// True when no submodule failed.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Synchronizes the submodules of the repository at `root`.
pub struct SyncEngine<'a> {
    git: Git<'a>,
    root: PathBuf,
}

impl<'a> SyncEngine<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, root: impl Into<PathBuf>) -> Self {
        Self {
            git: Git::new(runner),
            root: root.into(),
        }
    }

    /// On-disk state of the submodule at the workspace-relative `path`.
    ///
    /// A checkout that exists is diffed against the root repository; a diff
    /// that cannot run is an error.
    pub fn state(&self, path: &str) -> Result<SubmoduleState> {
        if !self.root.join(path).exists() {
            return Ok(SubmoduleState::Missing);
        }
        if self.git.is_dirty(&self.root, path)? {
            Ok(SubmoduleState::Dirty)
        } else {
            Ok(SubmoduleState::Clean)
        }
    }
}

/// Whether a submodule is on disk and matches what its parent records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmoduleState {
    Missing,
    Clean,
    /// Local changes, or a checked-out commit other than the recorded one.
    Dirty,
}

impl std::fmt::Display for SubmoduleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SubmoduleState::Missing => "missing",
            SubmoduleState::Clean => "clean",
            SubmoduleState::Dirty => "dirty",
        };
        f.write_str(label)
    }
}

/// Compare manifest and settings paths, ignoring separator style and a
/// trailing separator.
fn same_submodule_path(a: &str, b: &str) -> bool {
    fn normalize(p: &str) -> String {
        p.replace('\\', "/").trim_end_matches('/').to_string()
    }
    normalize(a) == normalize(b)
}
