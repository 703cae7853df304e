// SPDX-FileCopyrightText: 2025 casewise contributors
// SPDX-License-Identifier: GPL-3.0-or-later
//! Sentence-start detection for live typing.
//!
//! On every single-character insertion the editor looks at the text before
//! the caret and decides whether the character just typed begins a new
//! sentence.  Only that one character is ever considered: earlier characters
//! are not corrected, and a paste that creates a sentence boundary is left as
//! is.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// A sentence terminator followed by optional whitespace, at the end of text.
static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s*$").expect("sentence end pattern is valid"));

/// The text preceding the caret, captured for a single input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaretContext {
    text_before_caret: String,
    last_typed_char: Option<char>,
}

impl CaretContext {
    pub fn new(text_before_caret: impl Into<String>) -> Self {
        let text_before_caret = text_before_caret.into();
        let last_typed_char = text_before_caret.chars().next_back();
        Self {
            text_before_caret,
            last_typed_char,
        }
    }

    pub fn text_before_caret(&self) -> &str {
        &self.text_before_caret
    }

    /// The character just typed, or `None` when the caret is at the start.
    pub fn last_typed_char(&self) -> Option<char> {
        self.last_typed_char
    }

    pub fn evaluate(&self) -> CapitalizeDecision {
        evaluate(&self.text_before_caret)
    }
}

/// The outcome of evaluating one keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapitalizeDecision {
    /// Nothing to do; the usual outcome.
    NoAction,
    /// Replace the bytes at `replace_at` (the typed character) with
    /// `replacement`.
    Capitalize {
        replace_at: Range<usize>,
        replacement: char,
    },
}

impl CapitalizeDecision {
    pub fn should_capitalize(&self) -> bool {
        matches!(self, CapitalizeDecision::Capitalize { .. })
    }

    pub fn replacement_char(&self) -> Option<char> {
        match self {
            CapitalizeDecision::NoAction => None,
            CapitalizeDecision::Capitalize { replacement, .. } => Some(*replacement),
        }
    }

    /// The range and replacement of a capitalization, if the range lies
    /// within the first `limit` bytes of `text` on character boundaries.
    pub(crate) fn target_within(&self, text: &str, limit: usize) -> Option<(Range<usize>, char)> {
        let CapitalizeDecision::Capitalize {
            replace_at,
            replacement,
        } = self
        else {
            return None;
        };
        let fits = replace_at.start < replace_at.end
            && replace_at.end <= limit.min(text.len())
            && text.is_char_boundary(replace_at.start)
            && text.is_char_boundary(replace_at.end);
        if !fits {
            log::debug!("capitalize decision at {replace_at:?} does not fit the text");
            return None;
        }
        Some((replace_at.clone(), *replacement))
    }

    /// Applies the decision to the text it was computed from.  Returns
    /// `false`, leaving `text` unchanged, for [`CapitalizeDecision::NoAction`]
    /// or a range that does not fit `text`.
    ///
    /// The replacement has the same byte length as the typed character, so
    /// offsets after it stay valid.
    pub fn apply(&self, text: &mut String) -> bool {
        let Some((range, replacement)) = self.target_within(text, text.len()) else {
            return false;
        };
        let mut buf = [0; 4];
        text.replace_range(range, replacement.encode_utf8(&mut buf));
        true
    }
}

/// Decides whether the last character of `text_before_caret` starts a new
/// sentence and should be uppercased.
pub fn evaluate(text_before_caret: &str) -> CapitalizeDecision {
    let mut chars = text_before_caret.char_indices();
    let Some((last_at, last)) = chars.next_back() else {
        return CapitalizeDecision::NoAction;
    };
    // At least one character must precede the typed one.
    if chars.next_back().is_none() {
        return CapitalizeDecision::NoAction;
    }
    if !last.is_ascii_alphabetic() {
        return CapitalizeDecision::NoAction;
    }

    let prefix = &text_before_caret[..last_at];
    if !SENTENCE_END.is_match(prefix) {
        return CapitalizeDecision::NoAction;
    }

    CapitalizeDecision::Capitalize {
        replace_at: last_at..text_before_caret.len(),
        replacement: last.to_ascii_uppercase(),
    }
}
