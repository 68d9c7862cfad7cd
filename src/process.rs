//! # External Process Execution
//!
//! Every change this tool makes to a workspace goes through an external
//! command. `ProcessRunner` is the single seam for that: the engine and the
//! orchestrator only ever talk to a `&dyn ProcessRunner`, so tests can replace
//! the real `git` with a recording mock.
//!
//! Execution is synchronous. A call blocks until the child exits and its
//! stdout and stderr have been captured in full.

use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::{Error, Result};

/// Captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or `None` if the child was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A zero exit code with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A nonzero exit code with the given stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a named program with arguments in a working directory.
///
/// An `Err` means the program could not be started. A program that started
/// and exited nonzero is an `Ok` whose `CommandOutput::success` is false;
/// deciding whether that is fatal belongs to the caller.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, program: &str, args: &[String], workdir: &Path) -> Result<CommandOutput>;
}

/// The default `ProcessRunner`, backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, program: &str, args: &[String], workdir: &Path) -> Result<CommandOutput> {
        let command_line = format!("{} {}", program, args.join(" "));
        debug!("Cmd to run is: {} (in {})", command_line, workdir.display());

        let output = Command::new(program)
            .args(args)
            .current_dir(workdir)
            .output()
            .map_err(|e| Error::ProcessSpawn {
                command: command_line.clone(),
                dir: workdir.to_path_buf(),
                message: e.to_string(),
            })?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !result.stdout.trim().is_empty() {
            debug!("{}", result.stdout.trim_end());
        }
        if !result.stderr.trim().is_empty() {
            debug!("{}", result.stderr.trim_end());
        }
        debug!("Return Code: {:?}", result.code);

        Ok(result)
    }
}
