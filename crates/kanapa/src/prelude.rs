//! Convenient imports for rendering code blocks.
//!
//! ```rust
//! use kanapa::prelude::*;
//! ```

pub use crate::{
    render_markdown, Appearance, CodeProps, Config, ConfigStore, ConfigUpdate, Highlighter,
    MdxElement, Page, RenderError, RenderedCode, Renderer, Selectors,
};

#[cfg(feature = "syntect")]
pub use crate::SyntectHighlighter;
