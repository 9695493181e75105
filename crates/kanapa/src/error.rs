//! Error types for configuration, highlighting and rendering.
//!
//! [`RenderError`] is what every public rendering entry point returns. It wraps
//! [`HighlightError`] (raised by a [`Highlighter`](crate::Highlighter)) together
//! with the appearance mode whose highlight failed. [`ConfigError`] covers
//! loading configuration from YAML.

use std::io;
use std::path::PathBuf;

use crate::config::Appearance;

/// Error type for rendering operations.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Neither `code` nor `children` carried any text.
    #[error("one of `code` or `children` is required")]
    MissingCode,

    /// The language identifier was empty.
    #[error("a language identifier is required")]
    MissingLanguage,

    /// Adapter input did not have the expected shape.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The highlighter failed for one appearance mode.
    #[error("highlighting failed for {appearance} mode: {source}")]
    Highlight {
        appearance: Appearance,
        #[source]
        source: HighlightError,
    },

    /// Markup template failure.
    #[error("template error: {0}")]
    Template(String),
}

impl RenderError {
    /// Create a malformed-input error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        RenderError::Template(err.to_string())
    }
}

/// Errors raised by a highlighter backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HighlightError {
    /// The highlighter does not know the language.
    #[error("unknown language '{0}'")]
    UnknownLanguage(String),

    /// The highlighter does not know the theme.
    #[error("unknown theme '{name}' (available: {})", .available.join(", "))]
    UnknownTheme {
        name: String,
        available: Vec<String>,
    },

    /// Any other backend failure.
    #[error("{0}")]
    Failed(String),
}

impl HighlightError {
    /// Create a generic backend failure.
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// YAML could not be parsed into a configuration.
    #[error("failed to parse configuration{}: {message}", .path.as_ref().map(|p| format!(" {}", p.display())).unwrap_or_default())]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse {
            path: None,
            message: err.to_string(),
        }
    }
}
