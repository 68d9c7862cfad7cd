//! # Error Handling
//!
//! This module defines the centralized error type for `workspace-setup`. It
//! uses `thiserror` to build an `Error` enum covering every failure the
//! library can report, each variant carrying enough context (the command that
//! ran, the directory it ran in, the file that failed to parse) to be useful
//! in a log line without further decoration.
//!
//! - **`Error`**: all failure modes of the library.
//! - **`Result<T>`**: alias for `std::result::Result<T, Error>`.
//!
//! Whether an error aborts the whole run or only abandons a single submodule
//! is decided by the caller (see `sync` and `setup`), not by the variant.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for workspace-setup operations
#[derive(Error, Debug)]
pub enum Error {
    /// A settings or special configuration document could not be parsed.
    #[error("Configuration parsing error in {}: {message}{}", path.display(), hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        path: PathBuf,
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A `.gitmodules` manifest is malformed or misses a required key.
    #[error("Submodule manifest error in {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    /// An external command could not be started at all.
    #[error("Failed to run `{command}` in {}: {message}", dir.display())]
    ProcessSpawn {
        command: String,
        dir: PathBuf,
        message: String,
    },

    /// A git command ran and exited unsuccessfully.
    #[error("Git command failed in {}: git {command} (exit code {}) - {stderr}", dir.display(), code.map(|c| c.to_string()).unwrap_or_else(|| "none".to_string()))]
    GitCommand {
        command: String,
        dir: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    /// The installed git is older than the supported minimum.
    #[error("Please upgrade Git! Current version is {current}. Minimum is {minimum}.")]
    GitTooOld { current: String, minimum: String },

    /// `git --version` produced output that does not contain a version.
    #[error("Unrecognized git version output: {output}")]
    GitVersion { output: String },

    /// Special setup stopped at a submodule.
    #[error(transparent)]
    Submodule(#[from] Box<crate::sync::SubmoduleFailure>),

    /// A path given on the command line or in settings is unusable.
    #[error("Path error: {}: {message}", path.display())]
    Path { path: PathBuf, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A semantic versioning parsing error, wrapped from `semver::Error`.
    #[error("Semver parsing error: {0}")]
    Semver(#[from] semver::Error),

    /// An INI syntax error, wrapped from `ini::ParseError`.
    #[error("INI parsing error: {0}")]
    Ini(#[from] ini::ParseError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
