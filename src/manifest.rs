//! # Submodule Manifest Reading
//!
//! Parses a repository's `.gitmodules` file into `SubmoduleRecord`s. The file
//! is INI-shaped, one section per submodule:
//!
//! ```text
//! [submodule "Common/Nt"]
//!     path = Common/Nt
//!     url = https://github.com/example/nt.git
//! ```
//!
//! The section header carries the submodule name between
//! `submodule "` and `"`. Records are ephemeral: they are re-read every time a
//! repository's submodules are enumerated.

use std::fs;
use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption};

use crate::error::{Error, Result};

/// File name of a repository's submodule manifest.
pub const MANIFEST_FILE_NAME: &str = ".gitmodules";

/// One submodule declared in a containing repository's manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleRecord {
    pub name: String,
    /// Path relative to the containing repository.
    pub path: String,
    pub url: String,
}

/// Parse the text of a `.gitmodules` file. `origin` is used in error messages.
pub fn parse_manifest(content: &str, origin: &Path) -> Result<Vec<SubmoduleRecord>> {
    // Windows paths and URLs must come through verbatim.
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_str_opt(content, options)?;

    let mut records = Vec::new();
    for (section, properties) in ini.iter() {
        let Some(section) = section else {
            continue;
        };
        let name = section_name(section);
        let field = |key: &str| {
            properties
                .get(key)
                .map(|v| v.trim().to_string())
                .ok_or_else(|| Error::Manifest {
                    path: origin.to_path_buf(),
                    message: format!("submodule \"{}\" has no `{}`", name, key),
                })
        };
        records.push(SubmoduleRecord {
            path: field("path")?,
            url: field("url")?,
            name,
        });
    }
    Ok(records)
}

/// `submodule "Common/Nt"` -> `Common/Nt`.
fn section_name(section: &str) -> String {
    let trimmed = section.trim();
    let inner = trimmed.strip_prefix("submodule").unwrap_or(trimmed).trim();
    inner.trim_matches('"').to_string()
}

/// Submodules declared by the repository at `repo`.
///
/// A repository without a `.gitmodules` file has no submodules.
pub fn read_submodules(repo: &Path) -> Result<Vec<SubmoduleRecord>> {
    let manifest = repo.join(MANIFEST_FILE_NAME);
    if !manifest.is_file() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(&manifest)?;
    parse_manifest(&content, &manifest)
}

/// Whether a submodule checkout exists at `path`.
///
/// A checked-out submodule has a `.git` file (or directory) at its root.
pub fn is_checked_out(path: &Path) -> bool {
    path.join(".git").exists()
}

/// A submodule together with the submodules nested inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleNode {
    pub record: SubmoduleRecord,
    /// Absolute location of the checkout.
    pub location: PathBuf,
    pub checked_out: bool,
    pub children: Vec<SubmoduleNode>,
}

/// Build the submodule hierarchy below `repo`, at most `max_depth` levels deep.
///
/// Only checked-out submodules are descended into, since a nested manifest
/// cannot be read before its parent exists on disk.
pub fn discover_tree(repo: &Path, max_depth: usize) -> Result<Vec<SubmoduleNode>> {
    if max_depth == 0 {
        return Ok(Vec::new());
    }
    read_submodules(repo)?
        .into_iter()
        .map(|record| {
            let location = repo.join(&record.path);
            let checked_out = is_checked_out(&location);
            let children = if checked_out {
                discover_tree(&location, max_depth - 1)?
            } else {
                Vec::new()
            };
            Ok(SubmoduleNode {
                record,
                location,
                checked_out,
                children,
            })
        })
        .collect()
}
