//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_settings(settings::ONE_SUBMODULE);
//!     fixture.command().arg("status").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::settings;
    pub use super::TestFixture;
    #[allow(unused_imports)]
    pub use super::{git, GitRepo};
}

/// Common settings YAML snippets for testing.
#[allow(dead_code)]
pub mod settings {
    /// One recursive submodule.
    pub const ONE_SUBMODULE: &str = "required_submodules:\n  - path: Common/Nt\n";

    /// Two submodules, the second not fetched recursively.
    pub const TWO_SUBMODULES: &str = r#"
required_submodules:
  - path: Common/Nt
  - path: Silicon/Arm
    recursive: false
"#;

    /// No declarations at all.
    pub const EMPTY: &str = "required_submodules: []\n";

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "invalid: yaml: content:";
}

/// A temporary workspace directory with optional settings and files.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `.workspace-setup.yaml` settings file with the given content.
    pub fn with_settings(self, content: &str) -> Self {
        self.with_file(".workspace-setup.yaml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("workspace-setup");
        cmd.current_dir(self.path()).env_remove("OMNICACHE_PATH");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Run git in `dir`, panicking with its stderr on failure.
///
/// Local `file://` clones are allowed for nested submodule tests.
#[allow(dead_code)]
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_CONFIG_COUNT", "1")
        .env("GIT_CONFIG_KEY_0", "protocol.file.allow")
        .env("GIT_CONFIG_VALUE_0", "always")
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// A real git repository with one commit, for integration tests.
#[allow(dead_code)]
pub struct GitRepo {
    pub path: PathBuf,
}

#[allow(dead_code)]
impl GitRepo {
    /// Initialize a repository at `path` with a single committed file.
    pub fn init(path: &Path, file: &str) -> Self {
        std::fs::create_dir_all(path).expect("Failed to create repository dir");
        git(path, &["init", "-q"]);
        std::fs::write(path.join(file), "content\n").expect("Failed to write file");
        git(path, &["add", "."]);
        git(path, &["commit", "-q", "-m", "initial"]);
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Register `upstream` as a submodule at `sub_path` and commit it.
    pub fn add_submodule(&self, upstream: &Path, sub_path: &str) {
        let url = format!("file://{}", upstream.display());
        git(&self.path, &["submodule", "add", "-q", &url, sub_path]);
        git(&self.path, &["commit", "-q", "-m", "add submodule"]);
    }

    /// A fresh clone of this repository without submodules checked out.
    pub fn clone_to(&self, dest: &Path) -> GitRepo {
        let url = format!("file://{}", self.path.display());
        let parent = dest.parent().expect("clone destination has a parent");
        git(parent, &["clone", "-q", &url, &dest.to_string_lossy()]);
        GitRepo {
            path: dest.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_settings() {
        let fixture = TestFixture::new().with_settings(settings::ONE_SUBMODULE);
        assert!(fixture.path().join(".workspace-setup.yaml").exists());
    }

    #[test]
    fn test_settings_are_valid_yaml() {
        for content in [
            settings::ONE_SUBMODULE,
            settings::TWO_SUBMODULES,
            settings::EMPTY,
        ] {
            serde_yaml::from_str::<serde_yaml::Value>(content).expect("Settings should be valid YAML");
        }
        assert!(serde_yaml::from_str::<serde_yaml::Value>(settings::INVALID_YAML).is_err());
    }
}
