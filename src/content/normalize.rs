//! Markup to comparison text
//!
//! Reduces a raw HTML/JS/CSS document to lowercase plain text. Never fails:
//! unterminated blocks and tags are dropped through end of input.

use regex::Regex;
use std::sync::OnceLock;

static RE_SCRIPT: OnceLock<Regex> = OnceLock::new();
static RE_STYLE: OnceLock<Regex> = OnceLock::new();
static RE_COMMENT: OnceLock<Regex> = OnceLock::new();
static RE_TAG: OnceLock<Regex> = OnceLock::new();

/// Normalize raw markup into comparison-ready text
///
/// - `<script>` and `<style>` blocks are removed with their content
/// - comments are removed
/// - every remaining tag becomes a single space
/// - stray `<` / `>` become spaces
/// - whitespace is collapsed, the result lowercased and trimmed
pub fn normalize_text(raw: &str) -> String {
    let re_script = RE_SCRIPT.get_or_init(|| {
        Regex::new(r"(?is)<script\b[^>]*>.*?(?:</script\s*>|\z)").unwrap()
    });
    let re_style = RE_STYLE.get_or_init(|| {
        Regex::new(r"(?is)<style\b[^>]*>.*?(?:</style\s*>|\z)").unwrap()
    });
    let re_comment = RE_COMMENT.get_or_init(|| Regex::new(r"(?s)<!--.*?(?:-->|\z)").unwrap());
    let re_tag = RE_TAG.get_or_init(|| Regex::new(r"<[/!?]?[A-Za-z][^>]*(?:>|\z)").unwrap());

    let text = re_script.replace_all(raw, " ");
    let text = re_style.replace_all(&text, " ");
    let text = re_comment.replace_all(&text, " ");
    let text = re_tag.replace_all(&text, " ");

    let lower = text.replace(['<', '>'], " ").to_lowercase();
    let mut result = String::with_capacity(lower.len());
    for (i, word) in lower.split_whitespace().enumerate() {
        if i > 0 {
            result.push(' ');
        }
        result.push_str(word);
    }
    result
}
