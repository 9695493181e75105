//! Highlighter abstraction.
//!
//! The renderer never highlights anything itself. It hands `(code, lang,
//! theme)` to a [`Highlighter`] and treats the returned HTML as trusted,
//! self-contained markup. Highlighting is asynchronous so backends that load
//! grammars lazily, or call out to another process, fit the same interface.
//!
//! Two implementations ship with the crate:
//!
//! - [`from_fn`]: wraps a synchronous closure. Handy for tests and for
//!   plugging in an existing highlighting function.
//! - [`SyntectHighlighter`]: backed by `syntect` (cargo feature `syntect`,
//!   enabled by default).
//!
//! ```rust
//! use kanapa::highlight::{from_fn, HighlightRequest, Highlighter};
//!
//! let stub = from_fn(|req: HighlightRequest<'_>| {
//!     Ok(format!("<code data-theme=\"{}\">{}</code>", req.theme, req.code))
//! });
//! let html = futures::executor::block_on(stub.highlight(HighlightRequest {
//!     code: "x",
//!     lang: "text",
//!     theme: "plain",
//! }))
//! .unwrap();
//! assert_eq!(html, "<code data-theme=\"plain\">x</code>");
//! ```

#[cfg(feature = "syntect")]
mod syntect_html;

use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};

use crate::error::HighlightError;

#[cfg(feature = "syntect")]
pub use syntect_html::SyntectHighlighter;

/// One highlight call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightRequest<'a> {
    /// Source text, verbatim.
    pub code: &'a str,
    /// Language identifier understood by the highlighter.
    pub lang: &'a str,
    /// Theme name understood by the highlighter.
    pub theme: &'a str,
}

/// Converts source text into colorized HTML.
pub trait Highlighter: Send + Sync {
    /// Highlights `request.code`, returning a self-contained HTML fragment.
    fn highlight<'a>(
        &'a self,
        request: HighlightRequest<'a>,
    ) -> BoxFuture<'a, Result<String, HighlightError>>;
}

impl<H: Highlighter + ?Sized> Highlighter for Arc<H> {
    fn highlight<'a>(
        &'a self,
        request: HighlightRequest<'a>,
    ) -> BoxFuture<'a, Result<String, HighlightError>> {
        (**self).highlight(request)
    }
}

impl<H: Highlighter + ?Sized> Highlighter for Box<H> {
    fn highlight<'a>(
        &'a self,
        request: HighlightRequest<'a>,
    ) -> BoxFuture<'a, Result<String, HighlightError>> {
        (**self).highlight(request)
    }
}

/// A highlighter backed by a synchronous function. See [`from_fn`].
#[derive(Clone)]
pub struct FnHighlighter<F> {
    func: F,
}

impl<F> std::fmt::Debug for FnHighlighter<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnHighlighter").finish_non_exhaustive()
    }
}

/// Wraps a synchronous closure as a [`Highlighter`].
pub fn from_fn<F>(func: F) -> FnHighlighter<F>
where
    F: Fn(HighlightRequest<'_>) -> Result<String, HighlightError> + Send + Sync,
{
    FnHighlighter { func }
}

impl<F> Highlighter for FnHighlighter<F>
where
    F: Fn(HighlightRequest<'_>) -> Result<String, HighlightError> + Send + Sync,
{
    fn highlight<'a>(
        &'a self,
        request: HighlightRequest<'a>,
    ) -> BoxFuture<'a, Result<String, HighlightError>> {
        future::ready((self.func)(request)).boxed()
    }
}
