//! GIR doc markup → LuaLS documentation comments.
//!
//! GIR docs use gtk-doc conventions: `%NULL`/`%TRUE`/`%FALSE` literals,
//! `@param` and `#Type` cross references, `func()` call references, and
//! `|[ ... ]|` code fences (optionally `|[<!-- language="Python" -->`).
//! None of these functions fail; empty input gives empty output.
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Prefix of every documentation comment line.
pub const DOC_LINE: &str = "--- ";
/// Separator between an annotation and its trailing inline doc.
pub const INLINE_MARKER: &str = " # ";

static CROSS_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(@|#)([a-zA-Z_][a-zA-Z0-9_]*)").unwrap());
static CALL_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z_]+\(\))").unwrap());
static FENCE_WITH_LANGUAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\|\[<!-- language="(.+?)" -->"#).unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Literal and cross-reference rewriting, then trim.
pub fn format_block(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = text
        .replace("%NULL", "`nil`")
        .replace("%TRUE", "`true`")
        .replace("%FALSE", "`false`");
    let text = CROSS_REF.replace_all(&text, "`${2}`");
    let text = CALL_REF.replace_all(&text, "`${1}`");
    text.trim().to_string()
}

/// Long-form doc: code fences converted, every line a `--- ` comment.
pub fn format_multiline(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = FENCE_WITH_LANGUAGE.replace_all(text, |caps: &Captures<'_>| {
        format!("```{}", caps[1].to_lowercase())
    });
    // Unannotated examples in GIR are almost always C.
    let text = text.replace("|[", "```c").replace("]|", "```");
    let text = text.replace('\n', &format!("\n{DOC_LINE}"));
    format!("{DOC_LINE}{}", format_block(&text))
}

/// Collapse every whitespace run (newlines included) to one space.
pub fn fold_spaces(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").into_owned()
}

/// Single-line trailing doc for `@param`, `@return` and `@field` lines.
pub fn format_inline(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    format!("{INLINE_MARKER}{}", format_block(&fold_spaces(text)))
}
