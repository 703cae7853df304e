//! WebAssembly bindings for casewise.
//!
//! This module provides JavaScript-friendly bindings for the extension's
//! background script, content scripts, and popup.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::case::CaseOperation;
use crate::sentence::CapitalizeDecision;

/// A capitalize decision as seen from JavaScript.
///
/// Offsets are UTF-16 code unit indexes, matching `String.prototype.length`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsCapitalizeDecision {
    pub should_capitalize: bool,
    pub replacement_char: Option<String>,
    pub replace_at: Option<usize>,
}

impl JsCapitalizeDecision {
    fn from_decision(text_before_caret: &str, decision: &CapitalizeDecision) -> Self {
        match decision {
            CapitalizeDecision::NoAction => Self {
                should_capitalize: false,
                replacement_char: None,
                replace_at: None,
            },
            CapitalizeDecision::Capitalize {
                replace_at,
                replacement,
            } => Self {
                should_capitalize: true,
                replacement_char: Some(replacement.to_string()),
                replace_at: Some(utf16_len(&text_before_caret[..replace_at.start])),
            },
        }
    }
}

/// A context menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsMenuItem {
    pub id: &'static str,
    pub title: &'static str,
}

fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Convert text with the operation named by `operation`, such as
/// `"titlecase"`.
///
/// Throws if the operation is not one of the five known tags.
#[wasm_bindgen]
pub fn convert(text: &str, operation: &str) -> Result<String, JsError> {
    crate::convert_tagged(text, operation).map_err(|e| JsError::new(&e.to_string()))
}

/// Decide whether the last character of `text_before_caret` starts a new
/// sentence.
///
/// # Returns
///
/// An object with `shouldCapitalize`, `replacementChar`, and `replaceAt`.
#[wasm_bindgen]
pub fn evaluate(text_before_caret: &str) -> Result<JsValue, JsError> {
    let decision = crate::evaluate(text_before_caret);
    let js_decision = JsCapitalizeDecision::from_decision(text_before_caret, &decision);
    serde_wasm_bindgen::to_value(&js_decision).map_err(|e| JsError::new(&e.to_string()))
}

/// The context menu entries, in menu order.
#[wasm_bindgen]
pub fn operations() -> Result<js_sys::Array, JsError> {
    let items = js_sys::Array::new();
    for op in CaseOperation::ALL {
        let item = JsMenuItem {
            id: op.tag(),
            title: op.label(),
        };
        items.push(&serde_wasm_bindgen::to_value(&item).map_err(|e| JsError::new(&e.to_string()))?);
    }
    Ok(items)
}
