//! # Terminal Output
//!
//! Status lines printed by the commands. Whether they carry emoji and color
//! is decided once per run from the `--color` flag and the environment:
//!
//! - `--color=always|never` wins over everything else
//! - `NO_COLOR` (any value) turns color off
//! - `CLICOLOR=0` turns color off, `CLICOLOR_FORCE=1` forces it on
//! - `TERM=dumb` turns color off
//! - otherwise the `console` crate's terminal detection decides

use std::env;
use std::fmt::Display;

use console::style;

/// Decides how status lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// `color_flag` is the value of `--color`: `always`, `never` or `auto`.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };
        Self { use_color }
    }

    fn detect_color_support() -> bool {
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
        console::Term::stdout().features().colors_supported()
    }

    pub fn plain() -> Self {
        Self { use_color: false }
    }

    /// Renders one status line.
    pub fn status(&self, kind: Status, message: impl Display) -> String {
        let marker = emoji(self, kind.emoji(), kind.plain());
        if !self.use_color {
            return format!("{} {}", marker, message);
        }
        let message = match kind {
            Status::Step => style(message.to_string()).bold(),
            Status::Done => style(message.to_string()).green(),
            Status::Warn => style(message.to_string()).yellow(),
            Status::Info => style(message.to_string()),
        };
        format!("{} {}", marker, message)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Kind of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Step,
    Done,
    Info,
    Warn,
}

impl Status {
    fn emoji(self) -> &'static str {
        match self {
            Status::Step => "🔧",
            Status::Done => "✅",
            Status::Info => "📦",
            Status::Warn => "⚠️",
        }
    }

    fn plain(self) -> &'static str {
        match self {
            Status::Step => "[STEP]",
            Status::Done => "[OK]",
            Status::Info => "[INFO]",
            Status::Warn => "[WARN]",
        }
    }
}

/// `emoji_str` when color is enabled, `plain` otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}
