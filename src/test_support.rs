//! Test-only helpers: a recording `ProcessRunner` and on-disk repository fixtures.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::process::{CommandOutput, ProcessRunner};

/// One invocation seen by `MockRunner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub workdir: PathBuf,
}

impl RecordedCall {
    /// Arguments joined with spaces, e.g. `"submodule sync -- Common/Nt"`.
    pub fn line(&self) -> String {
        self.args.join(" ")
    }
}

type Responder = dyn Fn(&[String], &Path) -> CommandOutput + Send + Sync;

/// Records every call and answers with a scripted `CommandOutput`.
pub struct MockRunner {
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
    responder: Box<Responder>,
}

impl MockRunner {
    /// Every command succeeds with empty output, except `git --version`.
    pub fn new() -> Self {
        Self::with_responder(|_, _| CommandOutput::ok(""))
    }

    /// Answers with `responder`. `git --version` is always answered with
    /// 2.39.2; use `raw` to script it.
    pub fn with_responder(
        responder: impl Fn(&[String], &Path) -> CommandOutput + Send + Sync + 'static,
    ) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            responder: Box::new(move |args, dir| {
                if args.len() == 1 && args[0] == "--version" {
                    return CommandOutput::ok("git version 2.39.2\n");
                }
                responder(args, dir)
            }),
        }
    }

    /// Answers every call with `responder`, including `git --version`.
    pub fn raw(
        responder: impl Fn(&[String], &Path) -> CommandOutput + Send + Sync + 'static,
    ) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            responder: Box::new(responder),
        }
    }

    pub fn recorded(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Joined argument lines of every call, in order.
    pub fn lines(&self) -> Vec<String> {
        self.recorded().iter().map(RecordedCall::line).collect()
    }

    /// Joined argument lines of calls starting with `prefix`.
    pub fn lines_starting_with(&self, prefix: &str) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.starts_with(prefix))
            .collect()
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, program: &str, args: &[String], workdir: &Path) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(RecordedCall {
            program: program.to_string(),
            args: args.to_vec(),
            workdir: workdir.to_path_buf(),
        });
        Ok((self.responder)(args, workdir))
    }
}

/// Writes a `.gitmodules` declaring `(name, path, url)` entries inside `repo`,
/// creating `repo` if needed.
pub fn write_gitmodules(repo: &Path, entries: &[(&str, &str, &str)]) {
    fs::create_dir_all(repo).unwrap();
    let mut content = String::new();
    for (name, path, url) in entries {
        content.push_str(&format!(
            "[submodule \"{}\"]\n\tpath = {}\n\turl = {}\n",
            name, path, url
        ));
    }
    fs::write(repo.join(".gitmodules"), content).unwrap();
}
