//! Adapter for code blocks produced by an MDX/Markdown transform.
//!
//! Markdown-to-markup pipelines turn a fenced block into a `code` element
//! whose text is the snippet and whose class list carries the language as a
//! `language-<id>` token:
//!
//! ```json
//! { "className": "language-rust", "children": "fn main() {}" }
//! ```
//!
//! [`Renderer::render_mdx`] reads that element and forwards it to
//! [`Renderer::render`]. The first `language-` token wins; without one the
//! language is `text`.

use serde::{Deserialize, Serialize};

use crate::code::{CodeProps, Renderer};
use crate::error::RenderError;
use crate::markup::RenderedCode;

/// Prefix marking the language token in a class list.
pub const LANGUAGE_PREFIX: &str = "language-";

/// Language used when no class carries one.
pub const DEFAULT_LANGUAGE: &str = "text";

/// A class list, either space separated or already split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassList {
    Joined(String),
    Tokens(Vec<String>),
}

impl ClassList {
    /// Individual class tokens, in order.
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            ClassList::Joined(joined) => joined.split_whitespace().collect(),
            ClassList::Tokens(tokens) => tokens.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for ClassList {
    fn from(joined: &str) -> Self {
        ClassList::Joined(joined.to_string())
    }
}

impl From<String> for ClassList {
    fn from(joined: String) -> Self {
        ClassList::Joined(joined)
    }
}

impl From<Vec<String>> for ClassList {
    fn from(tokens: Vec<String>) -> Self {
        ClassList::Tokens(tokens)
    }
}

/// The inner `code` element of a transformed code block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MdxElement {
    #[serde(rename = "className", default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<ClassList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<String>,
}

impl MdxElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class_name(mut self, class_name: impl Into<ClassList>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_children(mut self, children: impl Into<String>) -> Self {
        self.children = Some(children.into());
        self
    }

    /// Parses an element from JSON.
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        serde_json::from_str(json)
            .map_err(|e| RenderError::malformed(format!("invalid code element: {}", e)))
    }

    /// The language named by the class list.
    ///
    /// # Errors
    ///
    /// [`RenderError::MalformedInput`] when the element has no class list.
    pub fn language(&self) -> Result<&str, RenderError> {
        let classes = self
            .class_name
            .as_ref()
            .ok_or_else(|| RenderError::malformed("code element has no className"))?;
        Ok(language_from_classes(classes.tokens()))
    }

    /// Converts the element into renderer input. The text is passed verbatim.
    pub fn to_props(&self) -> Result<CodeProps, RenderError> {
        let mut props = CodeProps::new(self.language()?);
        props.children = self.children.clone();
        Ok(props)
    }
}

/// First `language-` token's remainder, or [`DEFAULT_LANGUAGE`].
///
/// The remainder stops at any further `language-` inside the token:
/// `language-c-language-x` gives `c-`.
pub fn language_from_classes<'a, I>(classes: I) -> &'a str
where
    I: IntoIterator<Item = &'a str>,
{
    classes
        .into_iter()
        .find_map(|class| class.strip_prefix(LANGUAGE_PREFIX))
        .map(|rest| rest.find(LANGUAGE_PREFIX).map_or(rest, |end| &rest[..end]))
        .unwrap_or(DEFAULT_LANGUAGE)
}

impl Renderer {
    /// Renders a transformed code element.
    pub async fn render_mdx(&self, element: &MdxElement) -> Result<RenderedCode, RenderError> {
        let props = element.to_props()?;
        self.render(&props).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigStore;
    use crate::highlight::{from_fn, HighlightRequest};
    use futures::executor::block_on;
    use proptest::prelude::*;

    fn echo_renderer() -> Renderer {
        let highlighter = from_fn(|req: HighlightRequest<'_>| {
            Ok(format!("<code data-lang=\"{}\">{}</code>", req.lang, req.code))
        });
        Renderer::with_store(highlighter, ConfigStore::new())
    }

    #[test]
    fn test_language_is_first_language_token() {
        assert_eq!(language_from_classes(["foo", "language-rust", "bar"]), "rust");
        assert_eq!(language_from_classes(["language-c-language-x"]), "c-");
        assert_eq!(
            language_from_classes(["language-js", "language-rust"]),
            "js"
        );
    }

    #[test]
    fn test_language_defaults_to_text() {
        assert_eq!(language_from_classes(["foo", "bar"]), "text");
        assert_eq!(language_from_classes(Vec::<&str>::new()), "text");
    }

    #[test]
    fn test_joined_class_list() {
        let element = MdxElement::new().with_class_name("foo language-rust bar");
        assert_eq!(element.language().unwrap(), "rust");
    }

    #[test]
    fn test_missing_class_list_is_malformed() {
        let element = MdxElement::new().with_children("x");
        assert!(matches!(
            element.language(),
            Err(RenderError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_from_json_accepts_both_shapes() {
        let joined = MdxElement::from_json(r#"{"className":"language-go","children":"x"}"#).unwrap();
        let split =
            MdxElement::from_json(r#"{"className":["hl","language-go"],"children":"x"}"#).unwrap();
        assert_eq!(joined.language().unwrap(), "go");
        assert_eq!(split.language().unwrap(), "go");
    }

    #[test]
    fn test_from_json_rejects_wrong_types() {
        let err = MdxElement::from_json(r#"{"className":42}"#).unwrap_err();
        assert!(matches!(err, RenderError::MalformedInput(_)));
    }

    #[test]
    fn test_render_mdx_passes_text_verbatim() {
        let element = MdxElement::new()
            .with_class_name("language-rust")
            .with_children("  fn main() {}\n");
        let rendered = block_on(echo_renderer().render_mdx(&element)).unwrap();
        assert_eq!(
            rendered.blocks[0].html,
            "<code data-lang=\"rust\">  fn main() {}\n</code>"
        );
    }

    #[test]
    fn test_render_mdx_without_children_is_missing_code() {
        let element = MdxElement::new().with_class_name("language-rust");
        let err = block_on(echo_renderer().render_mdx(&element)).unwrap_err();
        assert!(matches!(err, RenderError::MissingCode));
    }

    proptest! {
        #[test]
        fn prop_language_token_found_anywhere(
            before in proptest::collection::vec("[a-z]{1,8}", 0..4),
            after in proptest::collection::vec("[a-z-]{1,12}", 0..4),
            lang in "[a-z0-9+#]{1,10}",
        ) {
            let token = format!("language-{}", lang);
            let mut classes: Vec<&str> = before.iter().map(String::as_str).collect();
            classes.push(&token);
            classes.extend(after.iter().map(String::as_str));
            prop_assert_eq!(language_from_classes(classes), lang.as_str());
        }
    }
}
