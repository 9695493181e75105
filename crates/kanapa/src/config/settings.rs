//! Configuration values: theme names per mode and the selector strategy.
//!
//! # YAML
//!
//! ```yaml
//! themes:
//!   light: InspiredGitHub
//!   dark: base16-ocean.dark
//! selectors: system
//! ```
//!
//! or, with explicit selectors:
//!
//! ```yaml
//! selectors:
//!   light: "html[data-theme=light]"
//!   dark: "html[data-theme=dark]"
//! ```
//!
//! Any field may be omitted; omitted fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::appearance::Appearance;
use crate::error::ConfigError;

/// Default light-mode theme.
pub const DEFAULT_LIGHT_THEME: &str = "vitesse-light";

/// Default dark-mode theme.
pub const DEFAULT_DARK_THEME: &str = "vitesse-dark";

/// Theme name for each appearance mode. Both keys are always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeNames {
    pub light: String,
    pub dark: String,
}

impl ThemeNames {
    pub fn new(light: impl Into<String>, dark: impl Into<String>) -> Self {
        Self {
            light: light.into(),
            dark: dark.into(),
        }
    }

    /// Theme configured for `appearance`.
    pub fn get(&self, appearance: Appearance) -> &str {
        match appearance {
            Appearance::Light => &self.light,
            Appearance::Dark => &self.dark,
        }
    }

    /// `(mode, theme)` pairs in rendering order.
    pub fn iter(&self) -> impl Iterator<Item = (Appearance, &str)> + '_ {
        Appearance::ALL.into_iter().map(move |mode| (mode, self.get(mode)))
    }
}

impl Default for ThemeNames {
    fn default() -> Self {
        Self::new(DEFAULT_LIGHT_THEME, DEFAULT_DARK_THEME)
    }
}

/// How the inactive mode's container is hidden.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "SelectorsRepr", into = "SelectorsRepr")]
pub enum Selectors {
    /// Follow the OS preference through `prefers-color-scheme` media queries.
    #[default]
    System,
    /// A selector that matches an ancestor of the code block when each mode is active.
    Explicit { light: String, dark: String },
}

impl Selectors {
    pub fn explicit(light: impl Into<String>, dark: impl Into<String>) -> Self {
        Selectors::Explicit {
            light: light.into(),
            dark: dark.into(),
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Selectors::System)
    }
}

// `selectors: system` or `selectors: { light: ..., dark: ... }`
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SelectorsRepr {
    Keyword(SelectorKeyword),
    Explicit { light: String, dark: String },
}

#[derive(Clone, Serialize, Deserialize)]
enum SelectorKeyword {
    #[serde(rename = "system")]
    System,
}

impl From<SelectorsRepr> for Selectors {
    fn from(repr: SelectorsRepr) -> Self {
        match repr {
            SelectorsRepr::Keyword(SelectorKeyword::System) => Selectors::System,
            SelectorsRepr::Explicit { light, dark } => Selectors::Explicit { light, dark },
        }
    }
}

impl From<Selectors> for SelectorsRepr {
    fn from(selectors: Selectors) -> Self {
        match selectors {
            Selectors::System => SelectorsRepr::Keyword(SelectorKeyword::System),
            Selectors::Explicit { light, dark } => SelectorsRepr::Explicit { light, dark },
        }
    }
}

/// The complete rendering configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub themes: ThemeNames,
    pub selectors: Selectors,
}

impl Config {
    /// Parses a configuration from YAML. Omitted fields keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|err| match err {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })
    }

    /// Serializes the configuration as YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Merges `update` into this configuration.
    ///
    /// Provided fields replace, omitted fields are left as they were. Theme
    /// names merge per mode. Nothing is validated.
    pub fn apply(&mut self, update: ConfigUpdate) {
        if let Some(themes) = update.themes {
            if let Some(light) = themes.light {
                self.themes.light = light;
            }
            if let Some(dark) = themes.dark {
                self.themes.dark = dark;
            }
        }
        if let Some(selectors) = update.selectors {
            self.selectors = selectors;
        }
    }

    /// Returns a copy with `update` merged in.
    pub fn merged(mut self, update: ConfigUpdate) -> Self {
        self.apply(update);
        self
    }
}

/// Partial theme names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemesUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark: Option<String>,
}

/// A partial configuration, merged with [`Config::apply`].
///
/// # Example
///
/// ```rust
/// use kanapa::{Config, ConfigUpdate};
///
/// let config = Config::default().merged(ConfigUpdate::new().dark_theme("monokai"));
/// assert_eq!(config.themes.dark, "monokai");
/// assert_eq!(config.themes.light, "vitesse-light");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub themes: Option<ThemesUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selectors: Option<Selectors>,
}

impl ConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn light_theme(mut self, name: impl Into<String>) -> Self {
        self.themes.get_or_insert_with(ThemesUpdate::default).light = Some(name.into());
        self
    }

    pub fn dark_theme(mut self, name: impl Into<String>) -> Self {
        self.themes.get_or_insert_with(ThemesUpdate::default).dark = Some(name.into());
        self
    }

    pub fn selectors(mut self, selectors: Selectors) -> Self {
        self.selectors = Some(selectors);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.themes
            .as_ref()
            .map_or(true, |t| t.light.is_none() && t.dark.is_none())
            && self.selectors.is_none()
    }
}

impl From<Config> for ConfigUpdate {
    fn from(config: Config) -> Self {
        ConfigUpdate {
            themes: Some(ThemesUpdate {
                light: Some(config.themes.light),
                dark: Some(config.themes.dark),
            }),
            selectors: Some(config.selectors),
        }
    }
}
