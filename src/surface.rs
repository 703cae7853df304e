// SPDX-FileCopyrightText: 2025 casewise contributors
// SPDX-License-Identifier: GPL-3.0-or-later
//! Editable text surfaces.
//!
//! Two kinds of surface receive converted text and capitalize decisions:
//!
//! - [`PlainField`]: a value-based field (`<input>`, `<textarea>`) with a
//!   selection expressed as byte offsets into its value.
//! - [`RichRegion`]: a rich editable region made of text nodes, with the
//!   caret expressed as a node and an offset inside it.
//!
//! Both report the same logical text before the caret for the same content.

use std::ops::Range;

use thiserror::Error;

use crate::sentence::{CapitalizeDecision, CaretContext};

/// Errors raised when a surface is built from inconsistent positions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The offset is past the end of the text or inside a character.
    #[error("offset {offset} is not a character boundary of a {len}-byte text")]
    InvalidOffset { offset: usize, len: usize },
    /// The node index is out of range.
    #[error("text node {0} does not exist")]
    InvalidNode(usize),
    /// The selection ends before it starts.
    #[error("selection ends before it starts")]
    InvertedSelection,
}

/// A surface that accepts direct text input.
pub trait EditableSurface {
    /// The whole logical text of the surface.
    fn text(&self) -> String;

    /// The logical text from the start of the surface up to the caret.
    fn text_before_caret(&self) -> String;

    fn selected_text(&self) -> String;

    /// Replaces the selection with converted text, as the context menu does.
    fn replace_selection(&mut self, text: &str);

    /// Inserts typed text at the caret, replacing any selection, and places
    /// the caret after it.
    fn insert_text(&mut self, text: &str);

    /// Replaces the character just before the caret in place.  The caret does
    /// not move.  Returns `false` if the decision does not fit the surface.
    fn apply_decision(&mut self, decision: &CapitalizeDecision) -> bool;

    /// Whether the user can edit the surface directly.
    fn is_editable(&self) -> bool {
        true
    }

    fn caret_context(&self) -> CaretContext {
        CaretContext::new(self.text_before_caret())
    }
}

fn check_boundary(text: &str, offset: usize) -> Result<(), SurfaceError> {
    if text.is_char_boundary(offset) {
        Ok(())
    } else {
        Err(SurfaceError::InvalidOffset {
            offset,
            len: text.len(),
        })
    }
}

/// A value-based text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainField {
    value: String,
    selection: Range<usize>,
}

impl PlainField {
    /// Creates a field with the given selection.
    ///
    /// # Errors
    ///
    /// Returns an error if either end of the selection is not a character
    /// boundary of `value`, or if the selection is inverted.
    pub fn new(value: impl Into<String>, selection: Range<usize>) -> Result<Self, SurfaceError> {
        let value = value.into();
        if selection.start > selection.end {
            return Err(SurfaceError::InvertedSelection);
        }
        check_boundary(&value, selection.start)?;
        check_boundary(&value, selection.end)?;
        Ok(Self { value, selection })
    }

    /// Creates a field with the caret at the end of `value`.
    pub fn with_caret_at_end(value: impl Into<String>) -> Self {
        let value = value.into();
        let end = value.len();
        Self {
            value,
            selection: end..end,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    /// The caret sits at the selection start, like `selectionStart`.
    pub fn caret(&self) -> usize {
        self.selection.start
    }

    fn splice(&mut self, text: &str) -> usize {
        let start = self.selection.start;
        self.value.replace_range(self.selection.clone(), text);
        start
    }
}

impl EditableSurface for PlainField {
    fn text(&self) -> String {
        self.value.clone()
    }

    fn text_before_caret(&self) -> String {
        self.value[..self.caret()].to_string()
    }

    fn selected_text(&self) -> String {
        self.value[self.selection.clone()].to_string()
    }

    /// The converted text stays selected.
    fn replace_selection(&mut self, text: &str) {
        let start = self.splice(text);
        self.selection = start..start + text.len();
    }

    fn insert_text(&mut self, text: &str) {
        let start = self.splice(text);
        let caret = start + text.len();
        self.selection = caret..caret;
    }

    fn apply_decision(&mut self, decision: &CapitalizeDecision) -> bool {
        let caret = self.caret();
        if decision.target_within(&self.value, caret).is_none() {
            return false;
        }
        decision.apply(&mut self.value);
        self.selection = caret..caret;
        true
    }
}

/// A position inside a [`RichRegion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodePosition {
    pub node: usize,
    pub offset: usize,
}

impl NodePosition {
    pub fn new(node: usize, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A rich editable region made of text nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichRegion {
    nodes: Vec<String>,
    anchor: NodePosition,
    caret: NodePosition,
    editable: bool,
}

impl RichRegion {
    /// Creates a region with a collapsed caret.
    ///
    /// # Errors
    ///
    /// Returns an error if the caret does not point at a character boundary
    /// of an existing node.
    pub fn new(nodes: Vec<String>, caret: NodePosition) -> Result<Self, SurfaceError> {
        Self::with_selection(nodes, caret, caret)
    }

    /// Creates a region with a selection from `anchor` to `caret`.
    ///
    /// # Errors
    ///
    /// Returns an error if either position is invalid or `caret` precedes
    /// `anchor`.
    pub fn with_selection(
        nodes: Vec<String>,
        anchor: NodePosition,
        caret: NodePosition,
    ) -> Result<Self, SurfaceError> {
        let mut nodes = nodes;
        if nodes.is_empty() {
            nodes.push(String::new());
        }
        for position in [anchor, caret] {
            let node = nodes
                .get(position.node)
                .ok_or(SurfaceError::InvalidNode(position.node))?;
            check_boundary(node, position.offset)?;
        }
        if caret < anchor {
            return Err(SurfaceError::InvertedSelection);
        }
        Ok(Self {
            nodes,
            anchor,
            caret,
            editable: true,
        })
    }

    /// Creates a region with the caret at the end of its last node.
    pub fn with_caret_at_end(nodes: Vec<String>) -> Self {
        let mut nodes = nodes;
        if nodes.is_empty() {
            nodes.push(String::new());
        }
        let last = nodes.len() - 1;
        let caret = NodePosition::new(last, nodes[last].len());
        Self {
            nodes,
            anchor: caret,
            caret,
            editable: true,
        }
    }

    /// Marks the region as not directly editable, like selected page text.
    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn caret(&self) -> NodePosition {
        self.caret
    }

    fn is_collapsed(&self) -> bool {
        self.anchor == self.caret
    }

    fn text_between(&self, from: NodePosition, to: NodePosition) -> String {
        if from.node == to.node {
            return self.nodes[from.node][from.offset..to.offset].to_string();
        }
        let mut text = self.nodes[from.node][from.offset..].to_string();
        for node in &self.nodes[from.node + 1..to.node] {
            text.push_str(node);
        }
        text.push_str(&self.nodes[to.node][..to.offset]);
        text
    }

    /// Maps a byte offset in the logical text to the node holding the byte
    /// at that offset.
    fn locate(&self, logical: usize) -> Option<NodePosition> {
        let mut start = 0;
        for (index, node) in self.nodes.iter().enumerate() {
            let end = start + node.len();
            if logical < end {
                return Some(NodePosition::new(index, logical - start));
            }
            start = end;
        }
        None
    }

    /// Deletes the selection and inserts `text` as a new node in its place.
    /// Returns the index of the new node.
    fn splice_node(&mut self, text: &str) -> usize {
        let (start, end) = (self.anchor, self.caret);
        let tail = self.nodes[end.node][end.offset..].to_string();
        self.nodes[start.node].truncate(start.offset);
        self.nodes.drain(start.node + 1..=end.node);
        let inserted = start.node + 1;
        self.nodes.insert(inserted, text.to_string());
        self.nodes.insert(inserted + 1, tail);
        inserted
    }

    fn collapse_to(&mut self, position: NodePosition) {
        self.anchor = position;
        self.caret = position;
    }
}

impl EditableSurface for RichRegion {
    fn text(&self) -> String {
        self.nodes.concat()
    }

    fn text_before_caret(&self) -> String {
        self.text_between(NodePosition::new(0, 0), self.caret)
    }

    fn selected_text(&self) -> String {
        if self.is_collapsed() {
            return String::new();
        }
        self.text_between(self.anchor, self.caret)
    }

    /// The selection collapses to the end of the inserted text.
    fn replace_selection(&mut self, text: &str) {
        let inserted = self.splice_node(text);
        self.collapse_to(NodePosition::new(inserted, text.len()));
    }

    fn insert_text(&mut self, text: &str) {
        if self.is_collapsed() {
            let caret = self.caret;
            self.nodes[caret.node].insert_str(caret.offset, text);
            self.collapse_to(NodePosition::new(caret.node, caret.offset + text.len()));
        } else {
            self.replace_selection(text);
        }
    }

    fn apply_decision(&mut self, decision: &CapitalizeDecision) -> bool {
        let before = self.text_before_caret();
        let Some((range, replacement)) = decision.target_within(&before, before.len()) else {
            return false;
        };
        // The typed character sits at the end of an earlier node when the
        // caret is at the start of its own.
        let Some(start) = self.locate(range.start) else {
            return false;
        };
        let node = &mut self.nodes[start.node];
        let end = start.offset + range.len();
        if end > node.len() {
            return false;
        }
        let mut buf = [0; 4];
        node.replace_range(start.offset..end, replacement.encode_utf8(&mut buf));
        true
    }

    fn is_editable(&self) -> bool {
        self.editable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence::evaluate;

    fn nodes(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    #[test]
    fn test_plain_field_rejects_bad_offsets() {
        assert_eq!(
            PlainField::new("한", 1..1),
            Err(SurfaceError::InvalidOffset { offset: 1, len: 3 })
        );
        assert_eq!(PlainField::new("abc", 2..1), Err(SurfaceError::InvertedSelection));
        assert!(PlainField::new("abc", 0..4).is_err());
    }

    #[test]
    fn test_plain_field_replace_selection_keeps_it_selected() {
        let mut field = PlainField::new("say hello world", 4..9).unwrap();
        assert_eq!(field.selected_text(), "hello");
        field.replace_selection("HELLO");
        assert_eq!(field.value(), "say HELLO world");
        assert_eq!(field.selection(), 4..9);
    }

    #[test]
    fn test_plain_field_replace_selection_with_longer_text() {
        let mut field = PlainField::new("x straße y", 2..9).unwrap();
        field.replace_selection("STRASSE");
        assert_eq!(field.value(), "x STRASSE y");
        assert_eq!(field.selected_text(), "STRASSE");
    }

    #[test]
    fn test_plain_field_text_before_caret() {
        let field = PlainField::new("Hello. world", 8..8).unwrap();
        assert_eq!(field.text_before_caret(), "Hello. w");
    }

    #[test]
    fn test_plain_field_apply_decision_preserves_caret() {
        let mut field = PlainField::new("Hello. wand more", 8..8).unwrap();
        let decision = evaluate(&field.text_before_caret());
        assert!(field.apply_decision(&decision));
        assert_eq!(field.value(), "Hello. Wand more");
        assert_eq!(field.caret(), 8);
    }

    #[test]
    fn test_plain_field_ignores_no_action() {
        let mut field = PlainField::with_caret_at_end("Hello w");
        assert!(!field.apply_decision(&CapitalizeDecision::NoAction));
        assert_eq!(field.value(), "Hello w");
    }

    #[test]
    fn test_plain_field_rejects_decision_past_caret() {
        let mut field = PlainField::new("Hi. there", 2..2).unwrap();
        let stale = CapitalizeDecision::Capitalize {
            replace_at: 4..5,
            replacement: 'T',
        };
        assert!(!field.apply_decision(&stale));
        assert_eq!(field.value(), "Hi. there");
    }

    #[test]
    fn test_plain_field_insert_text_moves_caret() {
        let mut field = PlainField::with_caret_at_end("ab");
        field.insert_text("c");
        assert_eq!(field.value(), "abc");
        assert_eq!(field.caret(), 3);
    }

    #[test]
    fn test_rich_region_text_before_caret_spans_nodes() {
        let region = RichRegion::new(nodes(&["Hello. ", "wor", "ld"]), NodePosition::new(1, 1)).unwrap();
        assert_eq!(region.text_before_caret(), "Hello. w");
        let field = PlainField::new(region.text(), 8..8).unwrap();
        assert_eq!(region.text_before_caret(), field.text_before_caret());
    }

    #[test]
    fn test_rich_region_rejects_bad_positions() {
        assert_eq!(
            RichRegion::new(nodes(&["a"]), NodePosition::new(3, 0)),
            Err(SurfaceError::InvalidNode(3))
        );
        assert!(RichRegion::new(nodes(&["a"]), NodePosition::new(0, 2)).is_err());
        assert_eq!(
            RichRegion::with_selection(nodes(&["abc"]), NodePosition::new(0, 2), NodePosition::new(0, 1)),
            Err(SurfaceError::InvertedSelection)
        );
    }

    #[test]
    fn test_rich_region_apply_decision_in_caret_node() {
        let mut region = RichRegion::new(nodes(&["Done! ", "n"]), NodePosition::new(1, 1)).unwrap();
        let decision = evaluate(&region.text_before_caret());
        assert!(region.apply_decision(&decision));
        assert_eq!(region.text(), "Done! N");
        assert_eq!(region.caret(), NodePosition::new(1, 1));
    }

    #[test]
    fn test_rich_region_apply_decision_in_earlier_node() {
        let mut region = RichRegion::new(nodes(&["Done. n", "ext"]), NodePosition::new(1, 0)).unwrap();
        let decision = evaluate(&region.text_before_caret());
        assert!(region.apply_decision(&decision));
        assert_eq!(region.nodes(), &["Done. N".to_string(), "ext".to_string()]);
    }

    #[test]
    fn test_rich_region_replace_selection_within_node() {
        let mut region = RichRegion::with_selection(
            nodes(&["one two three"]),
            NodePosition::new(0, 4),
            NodePosition::new(0, 7),
        )
        .unwrap();
        assert_eq!(region.selected_text(), "two");
        region.replace_selection("TWO");
        assert_eq!(region.text(), "one TWO three");
        assert_eq!(region.caret(), NodePosition::new(1, 3));
        assert_eq!(region.selected_text(), "");
    }

    #[test]
    fn test_rich_region_replace_selection_across_nodes() {
        let mut region = RichRegion::with_selection(
            nodes(&["alpha ", "beta ", "gamma"]),
            NodePosition::new(0, 2),
            NodePosition::new(2, 3),
        )
        .unwrap();
        assert_eq!(region.selected_text(), "pha beta gam");
        region.replace_selection("PHA BETA GAM");
        assert_eq!(region.text(), "alPHA BETA GAMma");
        assert_eq!(region.nodes().len(), 3);
    }

    #[test]
    fn test_rich_region_insert_text() {
        let mut region = RichRegion::with_caret_at_end(nodes(&["Hi.", " "]));
        region.insert_text("t");
        assert_eq!(region.text(), "Hi. t");
        assert_eq!(region.text_before_caret(), "Hi. t");
    }

    #[test]
    fn test_rich_region_read_only() {
        let region = RichRegion::with_caret_at_end(nodes(&["page text"])).read_only();
        assert!(!region.is_editable());
    }
}
