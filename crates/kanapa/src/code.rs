//! The code block renderer.
//!
//! [`Renderer::render`] takes a [`CodeProps`], highlights the text once per
//! appearance mode and returns a [`RenderedCode`]. The per-mode highlight
//! calls are created together and awaited with `try_join_all`, so they make
//! progress concurrently on whatever executor drives the render. Nothing is
//! returned until every mode has resolved, and the first failure fails the
//! whole render.
//!
//! ```rust
//! use futures::executor::block_on;
//! use kanapa::highlight::{from_fn, HighlightRequest};
//! use kanapa::{CodeProps, ConfigStore, Renderer};
//!
//! let highlighter = from_fn(|req: HighlightRequest<'_>| {
//!     Ok(format!("<code data-theme=\"{}\">{}</code>", req.theme, req.code))
//! });
//! let renderer = Renderer::with_store(highlighter, ConfigStore::new());
//!
//! let rendered = block_on(renderer.render(&CodeProps::new("rust").code("let x = 1;"))).unwrap();
//! assert_eq!(rendered.blocks.len(), 2);
//! assert_eq!(rendered.blocks[0].class_names, ["kanapa-light", "kanapa-pre"]);
//! assert!(rendered.blocks[1].html.contains("vitesse-dark"));
//! ```

use std::sync::Arc;

use futures::future::{try_join_all, FutureExt};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigStore, SHARED_CLASS};
use crate::error::RenderError;
use crate::highlight::{HighlightRequest, Highlighter};
use crate::markup::{ModeBlock, RenderedCode, StyleBlock};
use crate::stylesheet::{style_key, stylesheet};

/// Inputs of one code block.
///
/// `code` is the explicit text source and wins over `children`, the fallback.
/// An empty string counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodeProps {
    /// Language identifier understood by the highlighter.
    pub lang: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<String>,
    /// Theme used for every mode instead of the configured ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Space-separated classes added to every container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl CodeProps {
    pub fn new(lang: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            ..Self::default()
        }
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn children(mut self, children: impl Into<String>) -> Self {
        self.children = Some(children.into());
        self
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// The text to highlight: `code` if non-empty, else `children` if non-empty.
    pub fn source(&self) -> Option<&str> {
        self.code
            .as_deref()
            .filter(|code| !code.is_empty())
            .or_else(|| self.children.as_deref().filter(|text| !text.is_empty()))
    }

    fn extra_classes(&self) -> impl Iterator<Item = &str> {
        self.class_name
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
    }
}

/// Renders code blocks with an injected highlighter and configuration.
#[derive(Clone)]
pub struct Renderer {
    highlighter: Arc<dyn Highlighter>,
    config: ConfigStore,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Renderer {
    /// A renderer reading the process-wide configuration.
    pub fn new<H: Highlighter + 'static>(highlighter: H) -> Self {
        Self::with_store(highlighter, ConfigStore::global().clone())
    }

    /// A renderer reading `store`.
    pub fn with_store<H: Highlighter + 'static>(highlighter: H, store: ConfigStore) -> Self {
        Self {
            highlighter: Arc::new(highlighter),
            config: store,
        }
    }

    /// A renderer sharing an existing highlighter.
    pub fn with_shared(highlighter: Arc<dyn Highlighter>, store: ConfigStore) -> Self {
        Self {
            highlighter,
            config: store,
        }
    }

    pub fn config_store(&self) -> &ConfigStore {
        &self.config
    }

    /// Highlights `props` in every appearance mode.
    ///
    /// # Errors
    ///
    /// - [`RenderError::MissingCode`] / [`RenderError::MissingLanguage`] before
    ///   the highlighter is called.
    /// - [`RenderError::Highlight`] when any mode's highlight fails.
    pub async fn render(&self, props: &CodeProps) -> Result<RenderedCode, RenderError> {
        let text = props.source().ok_or(RenderError::MissingCode)?;
        if props.lang.trim().is_empty() {
            return Err(RenderError::MissingLanguage);
        }

        let config = self.config.snapshot();
        let lang = props.lang.as_str();

        let pending = config.themes.iter().map(|(appearance, configured)| {
            let theme = props.theme.as_deref().unwrap_or(configured);
            debug!(
                "highlighting {} bytes of {} for {} mode with theme {}",
                text.len(),
                lang,
                appearance,
                theme
            );
            self.highlighter
                .highlight(HighlightRequest {
                    code: text,
                    lang,
                    theme,
                })
                .map(move |result| match result {
                    Ok(html) => Ok((appearance, html)),
                    Err(source) => Err(RenderError::Highlight { appearance, source }),
                })
        });
        let highlighted = try_join_all(pending).await?;

        let blocks = highlighted
            .into_iter()
            .map(|(appearance, html)| {
                let mut class_names = vec![
                    appearance.class_name().to_string(),
                    SHARED_CLASS.to_string(),
                ];
                class_names.extend(props.extra_classes().map(String::from));
                trace!("{} block: {} bytes of html", appearance, html.len());
                ModeBlock {
                    appearance,
                    class_names,
                    html,
                }
            })
            .collect();

        let css = stylesheet(&config.selectors);
        Ok(RenderedCode {
            style: StyleBlock {
                key: style_key(&config.selectors, &css),
                css,
            },
            blocks,
        })
    }

    /// Shorthand for rendering `code` in `lang`.
    pub async fn code(&self, lang: &str, code: &str) -> Result<RenderedCode, RenderError> {
        self.render(&CodeProps::new(lang).code(code)).await
    }
}
