// SPDX-FileCopyrightText: 2025 casewise contributors
// SPDX-License-Identifier: GPL-3.0-or-later
//! The popup form: a text box, one button per operation, an output area, and
//! the auto-capitalize checkbox.

use crate::broadcast::{BroadcastReport, SettingsHub};
use crate::case::{self, CaseOperation};
use crate::settings::{Settings, SettingsError, SettingsStore, SettingsUpdate};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopupForm {
    pub input: String,
    output: String,
    auto_capitalize: bool,
}

impl PopupForm {
    /// Opens the popup with the checkbox reflecting the stored setting.
    pub fn load(store: &dyn SettingsStore) -> Result<Self, SettingsError> {
        let settings = store.load()?;
        Ok(Self {
            auto_capitalize: settings.auto_capitalize_enabled,
            ..Self::default()
        })
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn auto_capitalize(&self) -> bool {
        self.auto_capitalize
    }

    /// Converts the input into the output area.
    pub fn press(&mut self, op: CaseOperation) -> &str {
        self.output = case::convert(&self.input, op);
        &self.output
    }

    /// Persists the checkbox state, then tells every live context about it.
    /// Nothing is broadcast if persisting fails.
    pub fn set_auto_capitalize(
        &mut self,
        enabled: bool,
        store: &mut dyn SettingsStore,
        hub: &mut SettingsHub,
    ) -> Result<BroadcastReport, SettingsError> {
        let settings = Settings {
            auto_capitalize_enabled: enabled,
        };
        store.save(&settings)?;
        self.auto_capitalize = enabled;
        log::debug!("auto-capitalize setting saved: {enabled}");
        Ok(hub.broadcast(SettingsUpdate::from(settings)))
    }
}
