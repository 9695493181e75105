//! # Kanapa - Dual-Theme Code Blocks
//!
//! `kanapa` renders source code as HTML in both a light and a dark theme at
//! once, and ships the CSS that shows exactly one of them. Highlighting itself
//! is delegated to a pluggable [`Highlighter`]; kanapa calls it once per
//! appearance mode, wraps each result in a mode-scoped container and adds the
//! visibility rules.
//!
//! ## Core Concepts
//!
//! - [`Appearance`]: light or dark, the two modes every block is rendered in
//! - [`Config`] / [`ConfigStore`]: theme per mode and the selector strategy
//! - [`Highlighter`]: `(code, lang, theme) -> HTML`, asynchronous
//! - [`Renderer`]: highlights a [`CodeProps`] into a [`RenderedCode`]
//! - [`MdxElement`]: code elements as produced by Markdown/MDX transforms
//! - [`Page`]: collects rendered blocks, keeping one stylesheet
//!
//! ## Quick Start
//!
//! ```rust
//! use futures::executor::block_on;
//! use kanapa::{CodeProps, ConfigStore, ConfigUpdate, Renderer, SyntectHighlighter};
//!
//! let store = ConfigStore::new();
//! store.update(
//!     ConfigUpdate::new()
//!         .light_theme("InspiredGitHub")
//!         .dark_theme("base16-ocean.dark"),
//! );
//!
//! let renderer = Renderer::with_store(SyntectHighlighter::new(), store);
//! let rendered = block_on(renderer.render(&CodeProps::new("rust").code("let x = 1;\n"))).unwrap();
//!
//! let html = rendered.to_html().unwrap();
//! assert!(html.contains("class=\"kanapa-light kanapa-pre\""));
//! assert!(html.contains("class=\"kanapa-dark kanapa-pre\""));
//! assert!(html.contains("@media(prefers-color-scheme:dark){.kanapa-light{display:none;}}"));
//! ```
//!
//! ## Selector Strategies
//!
//! By default the visible block follows the OS preference through
//! `prefers-color-scheme`. Sites with their own theme toggle can scope the
//! rules instead:
//!
//! ```rust
//! use kanapa::{stylesheet, Selectors};
//!
//! let css = stylesheet(&Selectors::explicit("html.light", "html.dark"));
//! assert_eq!(
//!     css,
//!     "html.light .kanapa-dark{display:none;}html.dark .kanapa-light{display:none;}"
//! );
//! ```
//!
//! ## Markdown
//!
//! [`render_markdown`] renders a Markdown document, turning every code block
//! into a themed block and hoisting the stylesheet into the page head.

pub mod code;
pub mod config;
mod error;
pub mod highlight;
pub mod markdown;
pub mod markup;
pub mod mdx;
pub mod prelude;
pub mod stylesheet;

// Error types
pub use error::{ConfigError, HighlightError, RenderError};

// Configuration
pub use config::{
    config, update_config, Appearance, Config, ConfigStore, ConfigUpdate, Selectors, ThemeNames,
    ThemesUpdate, DEFAULT_DARK_THEME, DEFAULT_LIGHT_THEME, SHARED_CLASS,
};

// Highlighting
pub use highlight::{from_fn, FnHighlighter, HighlightRequest, Highlighter};
#[cfg(feature = "syntect")]
pub use highlight::SyntectHighlighter;

// Rendering
pub use code::{CodeProps, Renderer};
pub use markdown::render_markdown;
pub use markup::{ModeBlock, Page, RenderedCode, StyleBlock};
pub use mdx::{language_from_classes, ClassList, MdxElement};
pub use stylesheet::{style_key, stylesheet, STYLE_KEY};
