//! # Workspace Setup Library
//!
//! This library prepares a multi-repository build workspace by bringing a
//! declared set of git submodules onto disk. It is used by the
//! `workspace-setup` command-line tool but can be driven directly by any
//! program that wants to set up a workspace before a build.
//!
//! ## Quick Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use workspace_setup::config::{RequiredSubmodule, StaticSettings};
//! use workspace_setup::process::SystemProcessRunner;
//! use workspace_setup::setup::{SetupOptions, WorkspaceSetup};
//!
//! let settings = StaticSettings(vec![RequiredSubmodule::new("Common/Nt", true)]);
//! let options = SetupOptions {
//!     workspace: PathBuf::from("/src/platform"),
//!     ..Default::default()
//! };
//!
//! let outcome = WorkspaceSetup::new(&SystemProcessRunner, options).run(&settings);
//! std::process::exit(outcome.exit_code());
//! ```
//!
//! ## Core Concepts
//!
//! - **Settings (`config`)**: the required submodules (`RequiredSubmodule`)
//!   come from a `SettingsProvider`, by default the workspace's
//!   `.workspace-setup.yaml`. The special configuration holds a URL
//!   substitution table.
//! - **Manifests (`manifest`)**: each repository's `.gitmodules` is parsed into
//!   `SubmoduleRecord`s when needed.
//! - **Sync engine (`sync`)**: standard sync (sync, dirty check, fetch) and
//!   special sync (recursive URL rewrite and init).
//! - **Orchestration (`setup`)**: git version check, optional force clean, and
//!   dispatch to the engine, reported as a `SetupOutcome`.
//! - **Processes (`process`, `git`)**: every git invocation goes through the
//!   `ProcessRunner` trait so it can be replaced in tests.

pub mod config;
pub mod error;
pub mod git;
pub mod manifest;
pub mod output;
pub mod process;
pub mod setup;
pub mod substitution;
pub mod sync;
pub mod version;

#[cfg(test)]
mod substitution_proptest;
#[cfg(test)]
mod test_support;
