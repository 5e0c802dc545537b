//! Line splitting and markup stripping.
//!
//! GhettoNet data travels embedded in arbitrary documents (hosts files,
//! emails, web pages), so before any classification each line is stripped
//! of HTML-ish markup fragments and surrounding whitespace.

use regex::Regex;
use std::sync::LazyLock;

/// Line terminator: a lone line feed or a carriage-return-line-feed pair.
static EOL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n").expect("Invalid EOL regex"));

/// A markup fragment: `<` up to the next `>`, no nesting. A lone `<`
/// with no closing `>` is left alone.
static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid markup regex"));

/// Splits raw text into lines. Terminators are not retained.
pub fn split_lines(text: &str) -> Vec<&str> {
    EOL.split(text).collect()
}

/// Removes every `<...>` fragment from a line and trims whitespace.
#[must_use]
pub fn strip_markup(line: &str) -> String {
    MARKUP.replace_all(line, " ").trim().to_string()
}

/// Splits text into lines and markup-normalizes each one.
#[must_use]
pub fn normalize(text: &str) -> Vec<String> {
    split_lines(text).into_iter().map(strip_markup).collect()
}
