//! Markdown documents with themed code blocks.
//!
//! Code blocks are converted to [`MdxElement`]s the way an MDX transform would
//! (`language-<first info token>`), rendered through
//! [`Renderer::render_mdx`], and spliced back between the surrounding
//! Markdown, which `pulldown-cmark` renders as usual.

use log::debug;
use pulldown_cmark::{html, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::code::Renderer;
use crate::error::RenderError;
use crate::markup::Page;
use crate::mdx::{MdxElement, LANGUAGE_PREFIX};

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES
}

/// Class list a transform would attach to a code block.
fn class_for(kind: &CodeBlockKind<'_>) -> String {
    match kind {
        CodeBlockKind::Fenced(info) => info
            .split(|c: char| c.is_whitespace() || c == ',' || c == '{')
            .next()
            .filter(|lang| !lang.is_empty())
            .map(|lang| format!("{}{}", LANGUAGE_PREFIX, lang))
            .unwrap_or_default(),
        CodeBlockKind::Indented => String::new(),
    }
}

/// Renders `markdown` into a [`Page`].
///
/// # Errors
///
/// The first code block that fails to render fails the document, including
/// empty code blocks ([`RenderError::MissingCode`]).
pub async fn render_markdown(renderer: &Renderer, markdown: &str) -> Result<Page, RenderError> {
    let events: Vec<Event<'_>> = Parser::new_ext(markdown, options()).collect();

    let mut page = Page::new();
    let mut prose: Vec<Event<'_>> = Vec::new();
    let mut open: Option<(String, String)> = None;
    let mut blocks = 0usize;

    for event in events {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                open = Some((class_for(&kind), String::new()));
            }
            Event::Text(text) if open.is_some() => {
                if let Some((_, code)) = open.as_mut() {
                    code.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                let Some((class_name, code)) = open.take() else {
                    continue;
                };
                flush(&mut page, &mut prose);
                let element = MdxElement::new()
                    .with_class_name(class_name)
                    .with_children(code);
                let rendered = renderer.render_mdx(&element).await?;
                page.push(&rendered)?;
                blocks += 1;
            }
            other => prose.push(other),
        }
    }
    flush(&mut page, &mut prose);

    debug!("rendered markdown document with {} code blocks", blocks);
    Ok(page)
}

fn flush<'a>(page: &mut Page, prose: &mut Vec<Event<'a>>) {
    if prose.is_empty() {
        return;
    }
    let mut out = String::new();
    html::push_html(&mut out, prose.drain(..));
    page.push_html(&out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigStore;
    use crate::highlight::{from_fn, HighlightRequest};
    use futures::executor::block_on;

    fn renderer() -> Renderer {
        let highlighter = from_fn(|req: HighlightRequest<'_>| {
            Ok(format!(
                "<code data-lang=\"{}\" data-theme=\"{}\">{}</code>",
                req.lang, req.theme, req.code
            ))
        });
        Renderer::with_store(highlighter, ConfigStore::new())
    }

    #[test]
    fn test_class_for_fenced_info() {
        let fenced = |info: &'static str| class_for(&CodeBlockKind::Fenced(info.into()));
        assert_eq!(fenced("rust"), "language-rust");
        assert_eq!(fenced("rust ignore"), "language-rust");
        assert_eq!(fenced("rust,no_run"), "language-rust");
        assert_eq!(fenced("tsx{1,3}"), "language-tsx");
        assert_eq!(fenced(""), "");
        assert_eq!(class_for(&CodeBlockKind::Indented), "");
    }

    #[test]
    fn test_code_blocks_share_one_stylesheet() {
        let md = "# Title\n\n```rust\nfn a() {}\n```\n\nBetween.\n\n```js\nlet b;\n```\n";
        let page = block_on(render_markdown(&renderer(), md)).unwrap();

        assert_eq!(page.style_count(), 1);
        let body = page.body_html();
        assert!(body.starts_with("<h1>Title</h1>\n<pre class=\"kanapa-light kanapa-pre\">"));
        assert_eq!(body.matches("class=\"kanapa-light kanapa-pre\"").count(), 2);
        assert_eq!(body.matches("class=\"kanapa-dark kanapa-pre\"").count(), 2);
        assert!(body.contains("<code data-lang=\"rust\" data-theme=\"vitesse-dark\">fn a() {}\n</code>"));
        assert!(body.contains("<p>Between.</p>"));
        assert!(body.contains("data-lang=\"js\""));
    }

    #[test]
    fn test_indented_block_is_text() {
        let md = "Intro\n\n    plain block\n";
        let page = block_on(render_markdown(&renderer(), md)).unwrap();
        assert!(page.body_html().contains("data-lang=\"text\""));
    }

    #[test]
    fn test_markdown_without_code_has_no_styles() {
        let page = block_on(render_markdown(&renderer(), "*just* prose")).unwrap();
        assert_eq!(page.style_count(), 0);
        assert_eq!(page.body_html(), "<p><em>just</em> prose</p>\n");
    }

    #[test]
    fn test_empty_fence_fails() {
        let err = block_on(render_markdown(&renderer(), "```rust\n```\n")).unwrap_err();
        assert!(matches!(err, RenderError::MissingCode));
    }
}
