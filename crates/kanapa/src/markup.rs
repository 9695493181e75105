//! Rendered output and its HTML serialization.
//!
//! A [`RenderedCode`] holds the stylesheet and one [`ModeBlock`] per
//! appearance mode. It can be serialized on its own with
//! [`to_html`](RenderedCode::to_html), or collected into a [`Page`], which
//! keeps a single copy of each stylesheet no matter how many blocks use it.
//!
//! Serialization goes through MiniJinja templates with HTML auto-escaping.
//! Class names are escaped; highlighter output and stylesheet text are
//! inserted as-is.

use minijinja::{context, Environment};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::config::Appearance;
use crate::error::RenderError;

const STYLE_TEMPLATE: &str = r#"<style data-href="{{ style.key }}" data-precedence="high">{{ style.css|safe }}</style>"#;

const BLOCKS_TEMPLATE: &str = r#"{% for block in blocks %}<pre class="{{ block.class_names|join(" ") }}">{{ block.html|safe }}</pre>{% endfor %}"#;

const DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{ title }}</title>
{{ head|safe }}
</head>
<body>
{{ body|safe }}
</body>
</html>
"#;

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    for (name, source) in [
        ("style.html", STYLE_TEMPLATE),
        ("blocks.html", BLOCKS_TEMPLATE),
        ("document.html", DOCUMENT_TEMPLATE),
    ] {
        if let Err(err) = env.add_template(name, source) {
            log::error!("invalid built-in template {}: {}", name, err);
        }
    }
    env
});

fn render_template<S: Serialize>(name: &str, ctx: S) -> Result<String, RenderError> {
    Ok(TEMPLATES.get_template(name)?.render(ctx)?)
}

/// The shared stylesheet of a rendered block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleBlock {
    /// Stable de-duplication key.
    pub key: String,
    /// Minified CSS.
    pub css: String,
}

impl StyleBlock {
    pub fn to_html(&self) -> Result<String, RenderError> {
        render_template("style.html", context! { style => self })
    }
}

/// One appearance mode's container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeBlock {
    pub appearance: Appearance,
    /// Mode class, shared class, then caller classes.
    pub class_names: Vec<String>,
    /// Highlighter output, trusted.
    pub html: String,
}

impl ModeBlock {
    /// The `class` attribute value.
    pub fn class_attr(&self) -> String {
        self.class_names.join(" ")
    }
}

/// A highlighted code block in every appearance mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedCode {
    pub style: StyleBlock,
    pub blocks: Vec<ModeBlock>,
}

impl RenderedCode {
    /// The container for `appearance`, if rendered.
    pub fn block(&self, appearance: Appearance) -> Option<&ModeBlock> {
        self.blocks.iter().find(|b| b.appearance == appearance)
    }

    /// Stylesheet followed by the containers.
    pub fn to_html(&self) -> Result<String, RenderError> {
        let mut html = self.style.to_html()?;
        html.push_str(&self.blocks_html()?);
        Ok(html)
    }

    /// Containers only.
    pub fn blocks_html(&self) -> Result<String, RenderError> {
        render_template("blocks.html", context! { blocks => &self.blocks })
    }
}

/// Collects rendered fragments into one page.
///
/// Stylesheets are hoisted out of the body and kept once per key, in the
/// order first seen. A fragment whose CSS differs from the stylesheet already
/// kept under its key is added as well.
#[derive(Debug, Clone, Default)]
pub struct Page {
    styles: Vec<StyleBlock>,
    body: String,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rendered block.
    pub fn push(&mut self, rendered: &RenderedCode) -> Result<(), RenderError> {
        self.add_style(&rendered.style);
        self.body.push_str(&rendered.blocks_html()?);
        Ok(())
    }

    /// Appends raw, trusted HTML to the body.
    pub fn push_html(&mut self, html: &str) {
        self.body.push_str(html);
    }

    fn add_style(&mut self, style: &StyleBlock) {
        if !self.styles.iter().any(|s| s.key == style.key && s.css == style.css) {
            self.styles.push(style.clone());
        }
    }

    /// Number of distinct stylesheets.
    pub fn style_count(&self) -> usize {
        self.styles.len()
    }

    pub fn styles(&self) -> &[StyleBlock] {
        &self.styles
    }

    /// `<style>` elements for the document head.
    pub fn head_html(&self) -> Result<String, RenderError> {
        let mut head = String::new();
        for style in &self.styles {
            head.push_str(&style.to_html()?);
        }
        Ok(head)
    }

    pub fn body_html(&self) -> &str {
        &self.body
    }

    /// A complete HTML document.
    pub fn to_document(&self, title: &str) -> Result<String, RenderError> {
        render_template(
            "document.html",
            context! {
                title => title,
                head => self.head_html()?,
                body => &self.body,
            },
        )
    }
}
