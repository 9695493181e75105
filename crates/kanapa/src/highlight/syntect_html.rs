//! `syntect`-backed highlighter.
//!
//! Uses syntect's bundled grammars and themes, plus the `vitesse-light` and
//! `vitesse-dark` themes and a TypeScript/TSX grammar shipped with this crate.
//! Additional `.tmTheme` files can be loaded from a folder; each is registered
//! under its file stem.

use std::io::Cursor;
use std::path::Path;

use futures::future::{self, BoxFuture, FutureExt};
use log::{trace, warn};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxDefinition, SyntaxReference, SyntaxSet};

use super::{HighlightRequest, Highlighter};
use crate::error::HighlightError;

const BUNDLED_THEMES: &[(&str, &[u8])] = &[
    (
        "vitesse-light",
        include_bytes!("../../assets/themes/vitesse-light.tmTheme"),
    ),
    (
        "vitesse-dark",
        include_bytes!("../../assets/themes/vitesse-dark.tmTheme"),
    ),
];

const TYPESCRIPT_SYNTAX: &str = include_str!("../../assets/syntaxes/TypeScript.sublime-syntax");

/// Language identifiers that select the plain-text grammar.
const PLAIN_TEXT_ALIASES: &[&str] = &["text", "txt", "plain", "plaintext"];

/// Highlights with syntect and emits inline-styled HTML.
///
/// Highlighting runs on the calling task; the returned future is already
/// resolved.
#[derive(Debug)]
pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
}

impl SyntectHighlighter {
    /// Creates a highlighter with syntect's default grammars and themes plus
    /// the bundled ones.
    pub fn new() -> Self {
        let mut themes = ThemeSet::load_defaults();
        for (name, bytes) in BUNDLED_THEMES {
            match ThemeSet::load_from_reader(&mut Cursor::new(*bytes)) {
                Ok(theme) => {
                    themes.themes.insert((*name).to_string(), theme);
                }
                Err(e) => warn!("bundled theme {} failed to load: {}", name, e),
            }
        }

        Self {
            syntaxes: default_syntaxes(),
            themes,
        }
    }

    /// Loads every `.tmTheme` in `dir`, returning `self` for chaining.
    pub fn with_theme_dir<P: AsRef<Path>>(mut self, dir: P) -> Result<Self, HighlightError> {
        let dir = dir.as_ref();
        self.themes.add_from_folder(dir).map_err(|e| {
            HighlightError::failed(format!("failed to load themes from {}: {}", dir.display(), e))
        })?;
        Ok(self)
    }

    /// Registers a theme under `name`, replacing any theme with that name.
    pub fn add_theme(&mut self, name: impl Into<String>, theme: Theme) {
        self.themes.themes.insert(name.into(), theme);
    }

    /// Names of all available themes, sorted.
    pub fn theme_names(&self) -> Vec<&str> {
        self.themes.themes.keys().map(String::as_str).collect()
    }

    /// Resolves a language identifier by name or file extension.
    pub fn find_syntax(&self, lang: &str) -> Option<&SyntaxReference> {
        let lang = lang.trim();
        if PLAIN_TEXT_ALIASES
            .iter()
            .any(|alias| alias.eq_ignore_ascii_case(lang))
        {
            return Some(self.syntaxes.find_syntax_plain_text());
        }
        self.syntaxes.find_syntax_by_token(lang)
    }

    /// Highlights synchronously.
    pub fn highlight_blocking(&self, request: HighlightRequest<'_>) -> Result<String, HighlightError> {
        let syntax = self
            .find_syntax(request.lang)
            .ok_or_else(|| HighlightError::UnknownLanguage(request.lang.to_string()))?;
        let theme = self
            .themes
            .themes
            .get(request.theme)
            .ok_or_else(|| HighlightError::UnknownTheme {
                name: request.theme.to_string(),
                available: self.theme_names().into_iter().map(String::from).collect(),
            })?;

        trace!(
            "syntect: {} bytes of {} with theme {}",
            request.code.len(),
            syntax.name,
            request.theme
        );
        highlighted_html_for_string(request.code, &self.syntaxes, syntax, theme)
            .map_err(|e| HighlightError::failed(e.to_string()))
    }
}

/// syntect's default grammars with the TypeScript grammar linked in.
fn default_syntaxes() -> SyntaxSet {
    let defaults = SyntaxSet::load_defaults_newlines();
    match SyntaxDefinition::load_from_str(TYPESCRIPT_SYNTAX, true, None) {
        Ok(typescript) => {
            let mut builder = defaults.into_builder();
            builder.add(typescript);
            builder.build()
        }
        Err(e) => {
            warn!("bundled TypeScript grammar failed to load: {}", e);
            defaults
        }
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight<'a>(
        &'a self,
        request: HighlightRequest<'a>,
    ) -> BoxFuture<'a, Result<String, HighlightError>> {
        future::ready(self.highlight_blocking(request)).boxed()
    }
}
