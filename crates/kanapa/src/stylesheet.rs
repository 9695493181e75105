//! Visibility rules for the mode containers.
//!
//! Every rendered block carries one stylesheet with exactly two rules: hide the
//! dark container while light mode is active, hide the light container while
//! dark mode is active. The strategy decides what "active" means:
//!
//! ```css
//! /* Selectors::System */
//! @media(prefers-color-scheme:light){.kanapa-dark{display:none;}}
//! @media(prefers-color-scheme:dark){.kanapa-light{display:none;}}
//!
//! /* Selectors::Explicit { light: "html.light", dark: "html.dark" } */
//! html.light .kanapa-dark{display:none;}
//! html.dark .kanapa-light{display:none;}
//! ```
//!
//! The output has no line breaks. Caller-provided selectors are tokenized with
//! `cssparser` so that insignificant whitespace and comments are dropped while
//! descendant combinators survive.

use cssparser::{ParseError, Parser, ParserInput, ToCss, Token};

use crate::config::{Appearance, Selectors};

/// Key of the `system` stylesheet, and the prefix of every explicit one.
pub const STYLE_KEY: &str = "kanapa-styles";

const HIDE: &str = "{display:none;}";

/// Builds the visibility stylesheet for `selectors`.
pub fn stylesheet(selectors: &Selectors) -> String {
    let mut css = String::new();
    for active in Appearance::ALL {
        let hidden = active.opposite().class_name();
        match selectors {
            Selectors::System => {
                css.push_str("@media");
                css.push_str(active.media_feature());
                css.push('{');
                css.push('.');
                css.push_str(hidden);
                css.push_str(HIDE);
                css.push('}');
            }
            Selectors::Explicit { light, dark } => {
                let scope = match active {
                    Appearance::Light => light,
                    Appearance::Dark => dark,
                };
                css.push_str(&scoped_rule_selector(scope, hidden));
                css.push_str(HIDE);
            }
        }
    }
    css
}

/// Key identifying the stylesheet built for `selectors`.
///
/// Renders with the same strategy share a key, so a page keeps a single copy.
/// Explicit selectors append a hash of the CSS: blocks rendered with different
/// selectors on one page keep their own rules.
pub fn style_key(selectors: &Selectors, css: &str) -> String {
    match selectors {
        Selectors::System => STYLE_KEY.to_string(),
        Selectors::Explicit { .. } => format!("{}-{:016x}", STYLE_KEY, fnv1a(css.as_bytes())),
    }
}

/// 64-bit FNV-1a. Stable across builds, unlike `DefaultHasher`.
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

/// `.{class}` under every entry of the selector list `scope`.
///
/// An empty scope yields the bare class selector.
fn scoped_rule_selector(scope: &str, class: &str) -> String {
    let entries = selector_entries(scope);
    if entries.is_empty() {
        return format!(".{}", class);
    }
    entries
        .iter()
        .map(|entry| format!("{} .{}", entry, class))
        .collect::<Vec<_>>()
        .join(",")
}

/// Splits a selector list at top-level commas, normalizing each entry.
pub fn selector_entries(list: &str) -> Vec<String> {
    let mut input = ParserInput::new(list);
    let mut parser = Parser::new(&mut input);
    let mut writer = CssWriter::default();
    let mut entries = Vec::new();

    while let Ok(token) = parser.next_including_whitespace_and_comments() {
        let token = token.clone();
        if token == Token::Comma {
            entries.push(writer.finish());
            continue;
        }
        writer.write_token(&token, &mut parser);
    }
    entries.push(writer.finish());
    entries.retain(|entry| !entry.is_empty());
    entries
}

/// Removes comments and insignificant whitespace from a CSS fragment.
///
/// Whitespace runs collapse to one space between tokens that would otherwise
/// merge or change meaning (`html.dark .x`), and disappear next to braces,
/// parentheses, commas, semicolons, child/sibling combinators and after a
/// colon.
#[cfg(test)]
fn collapse_whitespace(css: &str) -> String {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut writer = CssWriter::default();
    writer.write_all(&mut parser);
    writer.finish()
}

#[derive(Default)]
struct CssWriter {
    out: String,
    pending_space: bool,
}

impl CssWriter {
    fn write_all(&mut self, parser: &mut Parser<'_, '_>) {
        while let Ok(token) = parser.next_including_whitespace_and_comments() {
            let token = token.clone();
            self.write_token(&token, parser);
        }
    }

    fn write_token<'i>(&mut self, token: &Token<'i>, parser: &mut Parser<'i, '_>) {
        match token {
            Token::WhiteSpace(_) | Token::Comment(_) => {
                self.pending_space = true;
                return;
            }
            _ => {}
        }

        if self.pending_space && !self.out.is_empty() && !ends_tight(&self.out) && !starts_tight(token)
        {
            self.out.push(' ');
        }
        self.pending_space = false;
        self.out.push_str(&token.to_css_string());

        let closing = match token {
            Token::Function(_) | Token::ParenthesisBlock => Some(')'),
            Token::SquareBracketBlock => Some(']'),
            Token::CurlyBracketBlock => Some('}'),
            _ => None,
        };
        if let Some(closing) = closing {
            // The closure never fails; tokenizer errors end the block early.
            parser
                .parse_nested_block(|nested| -> Result<(), ParseError<'i, ()>> {
                    self.write_all(nested);
                    Ok(())
                })
                .ok();
            self.pending_space = false;
            self.out.push(closing);
        }
    }

    fn finish(&mut self) -> String {
        self.pending_space = false;
        std::mem::take(&mut self.out)
    }
}

fn ends_tight(out: &str) -> bool {
    matches!(
        out.chars().last(),
        Some('{' | '}' | '(' | '[' | ';' | ',' | ':' | '>' | '+' | '~')
    )
}

fn starts_tight(token: &Token<'_>) -> bool {
    matches!(
        token,
        Token::Comma
            | Token::Semicolon
            | Token::CurlyBracketBlock
            | Token::CloseCurlyBracket
            | Token::CloseParenthesis
            | Token::CloseSquareBracket
            | Token::Delim('>' | '+' | '~')
    )
}
