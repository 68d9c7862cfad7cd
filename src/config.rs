//! # Configuration
//!
//! Two YAML documents drive a run:
//!
//! - **Workspace settings** (`.workspace-setup.yaml` at the workspace root by
//!   default) declare which submodules a build needs:
//!
//!   ```yaml
//!   required_submodules:
//!     - path: Common/Nt
//!       recursive: true
//!     - path: Silicon/Arm/Drivers
//!       recursive: false
//!   ```
//!
//!   `recursive` defaults to `true`. Settings reach the engine through the
//!   `SettingsProvider` trait, so library callers can supply declarations from
//!   anywhere (`StaticSettings`) instead of a file (`FileSettings`).
//!
//! - **Special configuration**, passed with `--special`, holds the URL
//!   substitution table used by special setup:
//!
//!   ```yaml
//!   url_substitutions:
//!     - url: https://github.com/tianocore/edk2.git
//!       sub: https://mirror.example.com/edk2.git
//!   ```
//!
//!   `url_substitutions` is required; other keys are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// File name of the workspace settings document.
pub const SETTINGS_FILE_NAME: &str = ".workspace-setup.yaml";

/// A workspace-relative submodule path that must be present and synchronized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredSubmodule {
    pub path: String,
    /// Whether nested submodules inside `path` are processed too.
    #[serde(default = "default_recursive")]
    pub recursive: bool,
}

fn default_recursive() -> bool {
    true
}

impl RequiredSubmodule {
    pub fn new(path: impl Into<String>, recursive: bool) -> Self {
        Self {
            path: path.into(),
            recursive,
        }
    }
}

/// Contents of the workspace settings document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub required_submodules: Vec<RequiredSubmodule>,
}

/// Supplies the declared set of required submodules.
pub trait SettingsProvider {
    fn required_submodules(&self) -> Result<Vec<RequiredSubmodule>>;
}

/// Declarations held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings(pub Vec<RequiredSubmodule>);

impl SettingsProvider for StaticSettings {
    fn required_submodules(&self) -> Result<Vec<RequiredSubmodule>> {
        Ok(self.0.clone())
    }
}

/// Declarations read from a YAML settings file.
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
    must_exist: bool,
}

impl FileSettings {
    /// Settings from an explicitly named file, which must exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            must_exist: true,
        }
    }

    /// The workspace's default settings file. A missing file declares nothing.
    pub fn for_workspace(workspace: &Path) -> Self {
        Self {
            path: workspace.join(SETTINGS_FILE_NAME),
            must_exist: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsProvider for FileSettings {
    fn required_submodules(&self) -> Result<Vec<RequiredSubmodule>> {
        if !self.must_exist && !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| Error::Path {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        Ok(parse_settings(&content, &self.path)?.required_submodules)
    }
}

/// Parse a workspace settings document. `origin` is used in error messages.
pub fn parse_settings(yaml_content: &str, origin: &Path) -> Result<Settings> {
    if yaml_content.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
        path: origin.to_path_buf(),
        message: e.to_string(),
        hint: Some("expected `required_submodules: [{path, recursive}]`".to_string()),
    })
}

/// One entry of the URL substitution table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlSubstitution {
    /// Remote URL to replace, compared ignoring case.
    pub url: String,
    /// Replacement remote URL.
    pub sub: String,
}

/// Root of the special setup document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialConfig {
    pub url_substitutions: Vec<UrlSubstitution>,
}

/// Parse a special configuration document. `origin` is used in error messages.
pub fn parse_special_config(yaml_content: &str, origin: &Path) -> Result<SpecialConfig> {
    serde_yaml::from_str(yaml_content).map_err(|e| {
        let message = e.to_string();
        let hint = if message.contains("url_substitutions") {
            Some("add a `url_substitutions:` list of `{url, sub}` entries".to_string())
        } else if message.contains("`url`") || message.contains("`sub`") {
            Some("each substitution needs both `url` and `sub`".to_string())
        } else {
            None
        };
        Error::ConfigParse {
            path: origin.to_path_buf(),
            message,
            hint,
        }
    })
}

/// Load the special configuration document at `path`.
pub fn load_special_config(path: &Path) -> Result<SpecialConfig> {
    let content = fs::read_to_string(path).map_err(|e| Error::Path {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_special_config(&content, path)
}
