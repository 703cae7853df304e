// SPDX-FileCopyrightText: 2025 casewise contributors
// SPDX-License-Identifier: GPL-3.0-or-later
//! Per-surface editing contexts.
//!
//! An [`EditingContext`] is owned by whatever handles input for one document.
//! It carries that document's copy of the auto-capitalize flag, applies
//! settings updates addressed to it, and routes input events and conversion
//! requests to the converter and the sentence boundary editor.

use crossbeam::channel::Receiver;
use serde::{Deserialize, Serialize};

use crate::case::{self, CaseError};
use crate::sentence::CapitalizeDecision;
use crate::settings::{SettingsStore, SettingsUpdate};
use crate::surface::EditableSurface;

/// Whether sentence starts are capitalized while typing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AutoCapitalize {
    Enabled,
    #[default]
    Disabled,
}

impl AutoCapitalize {
    pub fn is_enabled(self) -> bool {
        self == AutoCapitalize::Enabled
    }
}

impl From<bool> for AutoCapitalize {
    fn from(enabled: bool) -> Self {
        if enabled {
            AutoCapitalize::Enabled
        } else {
            AutoCapitalize::Disabled
        }
    }
}

/// A request to convert the selected text, as sent by the context menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    /// The text that was selected when the menu was opened.
    pub text: String,
    /// The operation tag, such as `titlecase`.
    pub conversion_type: String,
}

/// What happened to a [`ConversionRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// The selection was replaced with the converted text.
    Replaced(String),
    /// The page selection no longer matches the requested text; nothing was
    /// replaced.
    SelectionChanged,
}

/// The state of one editable-surface handler.
#[derive(Debug)]
pub struct EditingContext {
    auto_capitalize: AutoCapitalize,
    updates: Option<Receiver<SettingsUpdate>>,
}

impl Default for EditingContext {
    fn default() -> Self {
        Self::new(AutoCapitalize::Disabled)
    }
}

impl EditingContext {
    pub fn new(auto_capitalize: AutoCapitalize) -> Self {
        Self {
            auto_capitalize,
            updates: None,
        }
    }

    /// Creates a context initialized from the stored settings.  A store that
    /// fails to load leaves auto-capitalize disabled.
    pub fn from_store(store: &dyn SettingsStore) -> Self {
        let settings = store.load().unwrap_or_else(|e| {
            log::warn!("could not load settings, auto-capitalize stays off: {e}");
            Default::default()
        });
        Self::new(settings.auto_capitalize_enabled.into())
    }

    /// Attaches the queue this context receives broadcast updates on.
    pub fn with_updates(mut self, updates: Receiver<SettingsUpdate>) -> Self {
        self.updates = Some(updates);
        self
    }

    pub fn auto_capitalize(&self) -> AutoCapitalize {
        self.auto_capitalize
    }

    /// The only way to change the auto-capitalize flag after creation.
    pub fn apply_settings_update(&mut self, update: SettingsUpdate) {
        let next = AutoCapitalize::from(update.auto_capitalize_enabled);
        if next != self.auto_capitalize {
            log::debug!("auto-capitalize {:?} -> {:?}", self.auto_capitalize, next);
        }
        self.auto_capitalize = next;
    }

    /// Applies every queued update, oldest first.  Returns how many were
    /// applied.
    pub fn drain_updates(&mut self) -> usize {
        let Some(updates) = self.updates.take() else {
            return 0;
        };
        let mut applied = 0;
        for update in updates.try_iter() {
            self.apply_settings_update(update);
            applied += 1;
        }
        self.updates = Some(updates);
        applied
    }

    /// Handles a single-character insertion that has already landed in
    /// `surface`.  Disabled contexts return without looking at the text.
    pub fn handle_input(&self, surface: &mut dyn EditableSurface) -> CapitalizeDecision {
        if !self.auto_capitalize.is_enabled() {
            return CapitalizeDecision::NoAction;
        }
        let decision = surface.caret_context().evaluate();
        if decision.should_capitalize() && !surface.apply_decision(&decision) {
            return CapitalizeDecision::NoAction;
        }
        decision
    }

    /// Types `text` into `surface` one character at a time, handling each
    /// insertion as an input event.
    pub fn type_text(&self, surface: &mut dyn EditableSurface, text: &str) {
        let mut buf = [0; 4];
        for c in text.chars() {
            surface.insert_text(c.encode_utf8(&mut buf));
            self.handle_input(surface);
        }
    }

    /// Converts the selection as requested by the context menu.
    ///
    /// Editable surfaces are always spliced.  Other surfaces are only
    /// spliced while their selection still equals the requested text.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::UnsupportedOperation`] for an unknown operation
    /// tag; the surface is left untouched.
    pub fn handle_conversion(
        &self,
        surface: &mut dyn EditableSurface,
        request: &ConversionRequest,
    ) -> Result<ConversionOutcome, CaseError> {
        let converted = case::convert_tagged(&request.text, &request.conversion_type)?;
        if !surface.is_editable() && surface.selected_text() != request.text {
            return Ok(ConversionOutcome::SelectionChanged);
        }
        surface.replace_selection(&converted);
        Ok(ConversionOutcome::Replaced(converted))
    }
}
