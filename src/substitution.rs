//! Remote URL substitution for special setup.
//!
//! A rule matches when the submodule URL equals its `url` ignoring case.
//! There is no globbing; the first matching rule in declaration order wins.

use crate::config::UrlSubstitution;

/// Replacement URL for `url`, if any rule in `rules` matches it.
pub fn resolve<'a>(url: &str, rules: &'a [UrlSubstitution]) -> Option<&'a str> {
    let wanted = url.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.url.to_lowercase() == wanted)
        .map(|rule| rule.sub.as_str())
}
