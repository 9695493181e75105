//! Theme and selector configuration.
//!
//! Every code block is rendered once per [`Appearance`]. The configuration
//! names the highlighter theme used for each mode and how the page decides
//! which mode is visible:
//!
//! - [`Selectors::System`] emits `prefers-color-scheme` media queries, so the
//!   block follows the OS preference.
//! - [`Selectors::Explicit`] scopes the rules under caller-provided selectors
//!   (for example a `data-theme` attribute toggled by the site).
//!
//! Defaults are `vitesse-light` / `vitesse-dark` with the `system` strategy.
//!
//! ## Updating
//!
//! Updates merge: fields that are not provided keep their current value.
//!
//! ```rust
//! use kanapa::{ConfigStore, ConfigUpdate};
//!
//! let store = ConfigStore::new();
//! store.update(ConfigUpdate::new().dark_theme("base16-ocean.dark"));
//!
//! let config = store.snapshot();
//! assert_eq!(config.themes.light, "vitesse-light");
//! assert_eq!(config.themes.dark, "base16-ocean.dark");
//! ```

mod appearance;
mod settings;
mod store;

pub use appearance::{Appearance, SHARED_CLASS};
pub use settings::{
    Config, ConfigUpdate, Selectors, ThemeNames, ThemesUpdate, DEFAULT_DARK_THEME,
    DEFAULT_LIGHT_THEME,
};
pub use store::{config, update_config, ConfigStore};
