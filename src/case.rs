// SPDX-FileCopyrightText: 2025 casewise contributors
// SPDX-License-Identifier: GPL-3.0-or-later
//! Case conversion of text spans.
//!
//! Five operations are supported.  All of them are total: any string is a
//! valid input and the empty string always maps to the empty string.
//!
//! Word characters follow the ASCII class `[A-Za-z0-9_]`, so a token such as
//! `éclair` starts at `c` for the purpose of title and sentence case.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A word character followed by any run of non-whitespace characters.
static TITLE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\w)\S*").expect("title token pattern is valid"));

/// The start of the text or a sentence terminator, up to the next word
/// character.
static SENTENCE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?-u:\w)|[.!?]\s*(?-u:\w)").expect("sentence start pattern is valid")
});

/// A case transformation selectable from a menu, a popup button, or the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum CaseOperation {
    /// `hello World` becomes `HELLO WORLD`.
    Uppercase,
    /// `hello World` becomes `hello world`.
    Lowercase,
    /// `hello wORLD` becomes `Hello World`.
    TitleCase,
    /// `HELLO there. how ARE you?` becomes `Hello there. How are you?`.
    SentenceCase,
    /// `AbC123xYz` becomes `aBc123XyZ`.
    ToggleCase,
}

impl CaseOperation {
    /// Every operation, in menu order.
    pub const ALL: [CaseOperation; 5] = [
        CaseOperation::Uppercase,
        CaseOperation::Lowercase,
        CaseOperation::TitleCase,
        CaseOperation::SentenceCase,
        CaseOperation::ToggleCase,
    ];

    /// The wire tag, also used as the context menu item id.
    pub fn tag(self) -> &'static str {
        match self {
            CaseOperation::Uppercase => "uppercase",
            CaseOperation::Lowercase => "lowercase",
            CaseOperation::TitleCase => "titlecase",
            CaseOperation::SentenceCase => "sentencecase",
            CaseOperation::ToggleCase => "togglecase",
        }
    }

    /// The context menu title.
    pub fn label(self) -> &'static str {
        match self {
            CaseOperation::Uppercase => "모두 대문자로",
            CaseOperation::Lowercase => "모두 소문자로",
            CaseOperation::TitleCase => "각 단어 첫 글자 대문자로",
            CaseOperation::SentenceCase => "문장 첫 글자 대문자로",
            CaseOperation::ToggleCase => "대소문자 반전",
        }
    }
}

impl fmt::Display for CaseOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for CaseOperation {
    type Err = CaseError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        CaseOperation::ALL
            .into_iter()
            .find(|op| op.tag() == tag)
            .ok_or_else(|| CaseError::UnsupportedOperation(tag.to_string()))
    }
}

/// Errors raised by the converter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaseError {
    /// The operation tag names none of the known operations.
    #[error("unsupported case operation: {0:?}")]
    UnsupportedOperation(String),
}

/// An immutable piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextSpan {
    content: String,
}

impl TextSpan {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

impl From<&str> for TextSpan {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

/// Converts `text` with the given operation.
pub fn convert(text: &str, op: CaseOperation) -> String {
    match op {
        CaseOperation::Uppercase => text.to_uppercase(),
        CaseOperation::Lowercase => text.to_lowercase(),
        CaseOperation::TitleCase => title_case(text),
        CaseOperation::SentenceCase => sentence_case(text),
        CaseOperation::ToggleCase => toggle_case(text),
    }
}

/// Converts a span, producing a new one.
pub fn convert_span(span: &TextSpan, op: CaseOperation) -> TextSpan {
    TextSpan::new(convert(span.content(), op))
}

/// Converts `text` with the operation named by `tag`.
///
/// # Errors
///
/// Returns [`CaseError::UnsupportedOperation`] if `tag` is not one of the
/// operation tags.
pub fn convert_tagged(text: &str, tag: &str) -> Result<String, CaseError> {
    let op = tag.parse::<CaseOperation>()?;
    Ok(convert(text, op))
}

fn title_case(text: &str) -> String {
    TITLE_TOKEN
        .replace_all(text, |caps: &Captures| capitalize_first(&caps[0]))
        .into_owned()
}

fn sentence_case(text: &str) -> String {
    let lowered = text.to_lowercase();
    SENTENCE_START
        .replace_all(&lowered, |caps: &Captures| caps[0].to_uppercase())
        .into_owned()
}

/// A character equal to its own uppercase mapping takes the lowercase branch,
/// which leaves caseless characters untouched.
fn toggle_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if c.to_uppercase().eq(std::iter::once(c)) {
            result.extend(c.to_lowercase());
        } else {
            result.extend(c.to_uppercase());
        }
    }
    result
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut result = first.to_uppercase().to_string();
            result.push_str(&chars.as_str().to_lowercase());
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uppercase() {
        assert_eq!(convert("hello World", CaseOperation::Uppercase), "HELLO WORLD");
    }

    #[test]
    fn test_lowercase() {
        assert_eq!(convert("Hello WORLD", CaseOperation::Lowercase), "hello world");
    }

    #[test]
    fn test_uppercase_expands_sharp_s() {
        assert_eq!(convert("straße", CaseOperation::Uppercase), "STRASSE");
    }

    #[test]
    fn test_title_case_basic() {
        assert_eq!(convert("hello world", CaseOperation::TitleCase), "Hello World");
    }

    #[test]
    fn test_title_case_lowercases_rest_of_word() {
        assert_eq!(convert("hELLO wORLD", CaseOperation::TitleCase), "Hello World");
    }

    #[test]
    fn test_title_case_hyphenated_is_one_token() {
        assert_eq!(
            convert("a top-notch idea", CaseOperation::TitleCase),
            "A Top-notch Idea"
        );
    }

    #[test]
    fn test_title_case_keeps_separators() {
        assert_eq!(
            convert("  one,\ttwo  (three)", CaseOperation::TitleCase),
            "  One,\tTwo  (Three)"
        );
    }

    #[test]
    fn test_title_case_token_starts_at_ascii_word_char() {
        assert_eq!(convert("éCLAIR", CaseOperation::TitleCase), "éClair");
    }

    #[test]
    fn test_sentence_case_example() {
        assert_eq!(
            convert("HELLO there. how ARE you?", CaseOperation::SentenceCase),
            "Hello there. How are you?"
        );
    }

    #[test]
    fn test_sentence_case_leading_whitespace() {
        assert_eq!(
            convert("   wow! such TEXT", CaseOperation::SentenceCase),
            "   Wow! Such text"
        );
    }

    #[test]
    fn test_sentence_case_terminator_without_space() {
        assert_eq!(convert("one.two?three", CaseOperation::SentenceCase), "One.Two?Three");
    }

    #[test]
    fn test_sentence_case_only_start_of_text_is_anchored() {
        assert_eq!(
            convert("first line\nsecond line", CaseOperation::SentenceCase),
            "First line\nsecond line"
        );
    }

    #[test]
    fn test_sentence_case_newline_after_terminator() {
        assert_eq!(
            convert("done.\n\nnext", CaseOperation::SentenceCase),
            "Done.\n\nNext"
        );
    }

    #[test]
    fn test_toggle_case_example() {
        assert_eq!(convert("AbC123xYz", CaseOperation::ToggleCase), "aBc123XyZ");
    }

    #[test]
    fn test_toggle_case_caseless_characters_pass_through() {
        assert_eq!(convert("12 -_!? 한글", CaseOperation::ToggleCase), "12 -_!? 한글");
    }

    #[test]
    fn test_toggle_case_sharp_s_takes_uppercase_branch() {
        assert_eq!(convert("ß", CaseOperation::ToggleCase), "SS");
    }

    #[test]
    fn test_empty_input_for_every_operation() {
        for op in CaseOperation::ALL {
            assert_eq!(convert("", op), "", "{op} on empty input");
        }
    }

    #[test]
    fn test_convert_span_returns_new_span() {
        let span = TextSpan::from("abc");
        let upper = convert_span(&span, CaseOperation::Uppercase);
        assert_eq!(upper.content(), "ABC");
        assert_eq!(span.content(), "abc");
        assert_eq!(upper.into_content(), "ABC");
    }

    #[test]
    fn test_parse_tags() {
        for op in CaseOperation::ALL {
            assert_eq!(op.tag().parse::<CaseOperation>(), Ok(op));
        }
    }

    #[test]
    fn test_convert_tagged_unknown_tag() {
        assert_eq!(
            convert_tagged("text", "spongecase"),
            Err(CaseError::UnsupportedOperation("spongecase".to_string()))
        );
    }

    #[test]
    fn test_convert_tagged_known_tag() {
        assert_eq!(convert_tagged("text", "uppercase").unwrap(), "TEXT");
    }

    #[test]
    fn test_serde_uses_tags() {
        #[derive(Deserialize)]
        struct Holder {
            op: CaseOperation,
        }
        let holder: Holder = toml::from_str(r#"op = "sentencecase""#).unwrap();
        assert_eq!(holder.op, CaseOperation::SentenceCase);
    }
}
