//! Git command vocabulary used by the sync engine and the orchestrator.
//!
//! `Git` turns each operation into a `git` invocation through a
//! `ProcessRunner`. Methods that mutate the workspace return `Err` on a
//! nonzero exit so callers can decide with `?` or `match` whether the failure
//! is fatal or only abandons one submodule.

use std::path::Path;

use crate::error::{Error, Result};
use crate::process::{CommandOutput, ProcessRunner};

/// Thin wrapper around the system `git` reached through a `ProcessRunner`.
#[derive(Clone, Copy)]
pub struct Git<'a> {
    runner: &'a dyn ProcessRunner,
}

impl<'a> Git<'a> {
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        Self { runner }
    }

    /// Run git and return its output whatever the exit code.
    fn run(&self, args: &[String], dir: &Path) -> Result<CommandOutput> {
        self.runner.run("git", args, dir)
    }

    /// Run git and turn a nonzero exit into `Error::GitCommand`.
    fn run_checked(&self, args: &[String], dir: &Path) -> Result<CommandOutput> {
        let output = self.run(args, dir)?;
        if !output.success() {
            return Err(Error::GitCommand {
                command: args.join(" "),
                dir: dir.to_path_buf(),
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(output)
    }

    /// Output of `git --version`, trimmed.
    pub fn version(&self, dir: &Path) -> Result<String> {
        let output = self.run_checked(&args(["--version"]), dir)?;
        Ok(output.stdout.trim().to_string())
    }

    /// `git submodule sync -- <paths...>` as a single invocation.
    pub fn submodule_sync(&self, root: &Path, paths: &[&str]) -> Result<()> {
        let mut cmd = args(["submodule", "sync", "--"]);
        cmd.extend(paths.iter().map(|p| p.to_string()));
        self.run_checked(&cmd, root)?;
        Ok(())
    }

    /// `git diff <path>`, returning stdout.
    pub fn diff(&self, repo: &Path, path: &str) -> Result<String> {
        let output = self.run_checked(&args(["diff", path]), repo)?;
        Ok(output.stdout)
    }

    /// Whether the submodule at `path` differs from what `repo` records for it.
    ///
    /// Covers both local modifications inside the submodule and a checked-out
    /// commit that differs from the recorded one. A diff that cannot run is an
    /// error, never "clean".
    pub fn is_dirty(&self, repo: &Path, path: &str) -> Result<bool> {
        Ok(!self.diff(repo, path)?.trim().is_empty())
    }

    /// `git submodule update --init [--recursive] --progress [--reference <dir>] <path>`.
    pub fn submodule_update(
        &self,
        root: &Path,
        path: &str,
        recursive: bool,
        reference: Option<&Path>,
    ) -> Result<()> {
        let mut cmd = args(["submodule", "update", "--init"]);
        if recursive {
            cmd.push("--recursive".to_string());
        }
        cmd.push("--progress".to_string());
        if let Some(reference) = reference {
            cmd.push("--reference".to_string());
            cmd.push(reference.to_string_lossy().into_owned());
        }
        cmd.push(path.to_string());
        self.run_checked(&cmd, root)?;
        Ok(())
    }

    /// `git submodule update --init -- <path>`, non-recursive.
    pub fn submodule_init(&self, repo: &Path, path: &str) -> Result<()> {
        self.run_checked(&args(["submodule", "update", "--init", "--", path]), repo)?;
        Ok(())
    }

    /// `git submodule set-url -- <name> <url>`.
    pub fn submodule_set_url(&self, repo: &Path, name: &str, url: &str) -> Result<()> {
        self.run_checked(&args(["submodule", "set-url", "--", name, url]), repo)?;
        Ok(())
    }

    /// `git reset --hard`.
    pub fn reset_hard(&self, dir: &Path) -> Result<()> {
        self.run_checked(&args(["reset", "--hard"]), dir)?;
        Ok(())
    }

    /// `git clean -xffd [-e <pattern>...]`.
    pub fn clean(&self, dir: &Path, excludes: &[String]) -> Result<()> {
        let mut cmd = args(["clean", "-xffd"]);
        for pattern in excludes {
            cmd.push("-e".to_string());
            cmd.push(pattern.clone());
        }
        self.run_checked(&cmd, dir)?;
        Ok(())
    }
}

fn args<const N: usize>(parts: [&str; N]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}
