//! End-to-end rendering tests.
//!
//! Highlighting is stubbed with a counting highlighter so the assertions can
//! look at exact markup and at how often the highlighter ran. Tests touching the
//! process-wide configuration run serially and restore the defaults.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::executor::block_on;
use kanapa::{
    from_fn, render_markdown, update_config, Appearance, CodeProps, ConfigStore, ConfigUpdate,
    HighlightError, HighlightRequest, MdxElement, Page, RenderError, Renderer, Selectors,
};
use serial_test::serial;

fn counting_renderer(store: ConfigStore) -> (Arc<AtomicUsize>, Renderer) {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let highlighter = from_fn(move |req: HighlightRequest<'_>| {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(format!(
            "<pre class=\"shiki {}\"><code>{}</code></pre>",
            req.theme, req.code
        ))
    });
    (calls, Renderer::with_store(highlighter, store))
}

// ============================================================================
// Default configuration
// ============================================================================

#[test]
fn tsx_snippet_with_default_config() {
    let (calls, renderer) = counting_renderer(ConfigStore::new());
    let rendered = block_on(renderer.render(&CodeProps::new("tsx").code("let x = 1;"))).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    let light = rendered.block(Appearance::Light).unwrap();
    let dark = rendered.block(Appearance::Dark).unwrap();
    assert_eq!(light.class_attr(), "kanapa-light kanapa-pre");
    assert_eq!(dark.class_attr(), "kanapa-dark kanapa-pre");
    assert_ne!(light.html, dark.html);

    insta::assert_snapshot!(
        rendered.to_html().unwrap(),
        @r#"<style data-href="kanapa-styles" data-precedence="high">@media(prefers-color-scheme:light){.kanapa-dark{display:none;}}@media(prefers-color-scheme:dark){.kanapa-light{display:none;}}</style><pre class="kanapa-light kanapa-pre"><pre class="shiki vitesse-light"><code>let x = 1;</code></pre></pre><pre class="kanapa-dark kanapa-pre"><pre class="shiki vitesse-dark"><code>let x = 1;</code></pre></pre>"#
    );
}

#[test]
fn missing_code_never_reaches_highlighter() {
    let (calls, renderer) = counting_renderer(ConfigStore::new());
    let err = block_on(renderer.render(&CodeProps::new("rust"))).unwrap_err();
    assert!(matches!(err, RenderError::MissingCode));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn two_renders_on_one_page_keep_one_stylesheet() {
    let (_, renderer) = counting_renderer(ConfigStore::new());
    let first = block_on(renderer.code("rust", "a")).unwrap();
    let second = block_on(renderer.code("rust", "b")).unwrap();
    assert_eq!(first.style, second.style);

    let mut page = Page::new();
    page.push(&first).unwrap();
    page.push(&second).unwrap();
    let document = page.to_document("two blocks").unwrap();
    assert_eq!(document.matches("<style").count(), 1);
    assert_eq!(document.matches("kanapa-pre").count(), 4);
}

#[test]
fn page_mixing_selector_strategies_keeps_both_stylesheets() {
    let (_, system) = counting_renderer(ConfigStore::new());
    let scoped_store = ConfigStore::new();
    scoped_store.update(ConfigUpdate::new().selectors(Selectors::explicit(".l", ".d")));
    let (_, scoped) = counting_renderer(scoped_store);

    let mut page = Page::new();
    page.push(&block_on(system.code("rust", "a")).unwrap()).unwrap();
    page.push(&block_on(scoped.code("rust", "b")).unwrap()).unwrap();

    let head = page.head_html().unwrap();
    assert_eq!(page.style_count(), 2);
    assert!(head.contains("@media(prefers-color-scheme:dark)"));
    assert!(head.contains(".l .kanapa-dark{display:none;}"), "got: {}", head);
    assert!(head.contains(".d .kanapa-light{display:none;}"));
}

// ============================================================================
// Process-wide configuration
// ============================================================================

#[test]
#[serial]
fn global_update_merges_dark_theme_only() {
    ConfigStore::global().reset();
    let themes = Arc::new(recording::Themes::default());
    let recorded = themes.clone();
    let renderer = Renderer::new(from_fn(move |req: HighlightRequest<'_>| {
        recorded.push(req.theme);
        Ok(String::from("<code></code>"))
    }));

    update_config(ConfigUpdate::new().dark_theme("X"));
    block_on(renderer.code("rust", "x")).unwrap();
    assert_eq!(themes.take(), vec!["vitesse-light".to_string(), "X".to_string()]);

    update_config(ConfigUpdate::new().light_theme("Y"));
    block_on(renderer.code("rust", "x")).unwrap();
    assert_eq!(themes.take(), vec!["Y".to_string(), "X".to_string()]);

    ConfigStore::global().reset();
}

#[test]
#[serial]
fn global_selector_update_changes_stylesheet() {
    ConfigStore::global().reset();
    let (_, renderer) = counting_renderer(ConfigStore::global().clone());
    update_config(ConfigUpdate::new().selectors(Selectors::explicit(
        "[data-theme=light]",
        "[data-theme=dark]",
    )));
    let rendered = block_on(renderer.code("rust", "x")).unwrap();
    assert_eq!(
        rendered.style.css,
        "[data-theme=light] .kanapa-dark{display:none;}[data-theme=dark] .kanapa-light{display:none;}"
    );
    ConfigStore::global().reset();
}

// ============================================================================
// Failures and adapters
// ============================================================================

#[test]
fn unknown_language_fails_whole_render() {
    let renderer = Renderer::with_store(
        from_fn(|req: HighlightRequest<'_>| Err(HighlightError::UnknownLanguage(req.lang.into()))),
        ConfigStore::new(),
    );
    let err = block_on(renderer.code("klingon", "x")).unwrap_err();
    match err {
        RenderError::Highlight { appearance, source } => {
            assert_eq!(appearance, Appearance::Light);
            assert_eq!(source, HighlightError::UnknownLanguage("klingon".into()));
        }
        other => panic!("expected highlight failure, got {:?}", other),
    }
}

#[test]
fn mdx_element_from_json_renders() {
    let (calls, renderer) = counting_renderer(ConfigStore::new());
    let element =
        MdxElement::from_json(r#"{"className":"foo language-rust bar","children":"fn x() {}"}"#)
            .unwrap();
    let rendered = block_on(renderer.render_mdx(&element)).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(rendered.blocks[0].html.contains("fn x() {}"));
}

#[test]
fn mdx_element_without_class_list_is_malformed() {
    let (calls, renderer) = counting_renderer(ConfigStore::new());
    let element = MdxElement::from_json(r#"{"children":"x"}"#).unwrap();
    let err = block_on(renderer.render_mdx(&element)).unwrap_err();
    assert!(matches!(err, RenderError::MalformedInput(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn markdown_document_end_to_end() {
    let (calls, renderer) = counting_renderer(ConfigStore::new());
    let md = "Some `inline` code.\n\n```rust\nfn main() {}\n```\n\n```\nplain\n```\n";
    let page = block_on(render_markdown(&renderer, md)).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_eq!(page.style_count(), 1);
    assert!(page.body_html().contains("<code>inline</code>"));
}

#[cfg(feature = "syntect")]
#[test]
fn syntect_renders_both_modes() {
    use kanapa::SyntectHighlighter;

    let store = ConfigStore::new();
    store.update(
        ConfigUpdate::new()
            .light_theme("InspiredGitHub")
            .dark_theme("base16-ocean.dark"),
    );
    let renderer = Renderer::with_store(SyntectHighlighter::new(), store);
    let rendered = block_on(renderer.code("rust", "fn main() {}\n")).unwrap();
    assert_eq!(rendered.blocks.len(), 2);
    assert_ne!(rendered.blocks[0].html, rendered.blocks[1].html);
    assert!(rendered.blocks.iter().all(|b| b.html.contains("<pre style=")));
}

#[cfg(feature = "syntect")]
#[test]
fn syntect_renders_tsx_with_default_config() {
    use kanapa::SyntectHighlighter;

    let renderer = Renderer::with_store(SyntectHighlighter::new(), ConfigStore::new());
    let rendered = block_on(renderer.render(&CodeProps::new("tsx").code("let x = 1;"))).unwrap();

    let light = rendered.block(Appearance::Light).unwrap();
    let dark = rendered.block(Appearance::Dark).unwrap();
    assert!(light.html.contains("background-color:#ffffff"), "got: {}", light.html);
    assert!(dark.html.contains("background-color:#121212"), "got: {}", dark.html);
    assert_eq!(light.class_attr(), "kanapa-light kanapa-pre");
}

/// Theme recorder shared between a highlighter closure and the test body.
mod recording {
    use parking_lot::Mutex;

    #[derive(Default)]
    pub struct Themes(Mutex<Vec<String>>);

    impl Themes {
        pub fn push(&self, theme: &str) {
            self.0.lock().push(theme.to_string());
        }

        pub fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.0.lock())
        }
    }
}
