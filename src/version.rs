//! # Git Version Detection
//!
//! The oldest git release the tool accepts is 2.11. The version string
//! reported by `git --version` varies between platforms:
//!
//! - `git version 2.39.2`
//! - `git version 2.39.2.windows.1`
//! - `git version 2.39.2 (Apple Git-143)`
//!
//! Only the first three numeric components are kept and compared as a
//! semantic version.

use semver::Version;

use crate::error::{Error, Result};

/// Oldest git release the tool supports.
pub const MINIMUM_GIT_VERSION: &str = "2.11.0";

/// Extract `major.minor.patch` from the output of `git --version`.
pub fn parse_git_version(output: &str) -> Result<Version> {
    let token = output
        .split_whitespace()
        .find(|word| word.starts_with(|c: char| c.is_ascii_digit()))
        .ok_or_else(|| Error::GitVersion {
            output: output.trim().to_string(),
        })?;

    let mut components: Vec<String> = token
        .split('.')
        .take(3)
        .map(|part| part.chars().take_while(char::is_ascii_digit).collect())
        .collect();

    if components.iter().any(String::is_empty) {
        return Err(Error::GitVersion {
            output: output.trim().to_string(),
        });
    }
    while components.len() < 3 {
        components.push("0".to_string());
    }

    Ok(Version::parse(&components.join("."))?)
}

/// Fail with `Error::GitTooOld` if `current` is below `minimum`.
pub fn check_minimum(current: &Version, minimum: &str) -> Result<()> {
    let minimum_version = Version::parse(minimum)?;
    if *current < minimum_version {
        return Err(Error::GitTooOld {
            current: current.to_string(),
            minimum: minimum_version.to_string(),
        });
    }
    Ok(())
}
