//! The two appearance modes every code block is rendered in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Class shared by every mode container.
pub const SHARED_CLASS: &str = "kanapa-pre";

/// An appearance mode: light background or dark background.
///
/// Exactly two modes exist and they are always rendered together. Iteration
/// order is [`Appearance::ALL`]: light first, then dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    /// Light mode (light background, dark text).
    Light,
    /// Dark mode (dark background, light text).
    Dark,
}

impl Appearance {
    /// All modes, in rendering order.
    pub const ALL: [Appearance; 2] = [Appearance::Light, Appearance::Dark];

    /// Lower-case label (`light` / `dark`).
    pub fn as_str(self) -> &'static str {
        match self {
            Appearance::Light => "light",
            Appearance::Dark => "dark",
        }
    }

    /// Mode-specific container class (`kanapa-light` / `kanapa-dark`).
    pub fn class_name(self) -> &'static str {
        match self {
            Appearance::Light => "kanapa-light",
            Appearance::Dark => "kanapa-dark",
        }
    }

    /// The other mode.
    pub fn opposite(self) -> Self {
        match self {
            Appearance::Light => Appearance::Dark,
            Appearance::Dark => Appearance::Light,
        }
    }

    /// Media feature matching this mode, without surrounding whitespace.
    pub fn media_feature(self) -> &'static str {
        match self {
            Appearance::Light => "(prefers-color-scheme:light)",
            Appearance::Dark => "(prefers-color-scheme:dark)",
        }
    }
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Appearance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Appearance::Light),
            "dark" => Ok(Appearance::Dark),
            other => Err(format!(
                "unknown appearance '{}' (expected 'light' or 'dark')",
                other
            )),
        }
    }
}
