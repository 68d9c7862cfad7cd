//! # Output Configuration
//!
//! Controls whether CLI output and log lines are colored. The decision is
//! made once from the `--color` flag and the environment:
//!
//! - `--color=never|always|auto`
//! - `NO_COLOR` disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` disables colors, `CLICOLOR_FORCE=1` forces them
//! - `TERM=dumb` disables colors
//!
//! ```rust,ignore
//! use workspace_setup::output::{paint_state, OutputConfig};
//!
//! let config = OutputConfig::from_env_and_flag("auto");
//! println!("Common/Nt: {}", paint_state(&config, SubmoduleState::Dirty));
//! ```

use std::env;

use console::style;

use crate::sync::SubmoduleState;

/// Output configuration for controlling colors.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from the `--color` flag value
    /// (`always`, `never` or `auto`) and the environment.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }
        console::Term::stderr().features().colors_supported()
    }

    /// Matching `env_logger` write style for log output on stderr.
    pub fn write_style(&self) -> env_logger::WriteStyle {
        if self.use_color {
            env_logger::WriteStyle::Always
        } else {
            env_logger::WriteStyle::Never
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Submodule state label, colored when enabled.
pub fn paint_state(config: &OutputConfig, state: SubmoduleState) -> String {
    let label = state.to_string();
    if !config.use_color {
        return label;
    }
    let styled = match state {
        SubmoduleState::Clean => style(label).green(),
        SubmoduleState::Dirty => style(label).yellow(),
        SubmoduleState::Missing => style(label).red(),
    };
    styled.force_styling(true).to_string()
}

/// A leading status marker: a symbol when colored, a bracketed word otherwise.
pub fn mark(config: &OutputConfig, ok: bool) -> &'static str {
    match (config.use_color, ok) {
        (true, true) => "✅",
        (true, false) => "❌",
        (false, true) => "[OK]",
        (false, false) => "[FAILED]",
    }
}
