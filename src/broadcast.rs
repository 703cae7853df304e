// SPDX-FileCopyrightText: 2025 casewise contributors
// SPDX-License-Identifier: GPL-3.0-or-later
//! Best-effort fan-out of settings changes to live execution contexts.
//!
//! Every context registers once and receives its own queue.  A broadcast
//! never blocks and never fails as a whole: a destination whose context has
//! gone away is dropped and counted.

use std::collections::BTreeMap;

use crossbeam::channel::{self, Receiver, Sender};

use crate::settings::SettingsUpdate;

/// Identifies a registered context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContextId(u64);

impl std::fmt::Display for ContextId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "context#{}", self.0)
    }
}

/// The outcome of one broadcast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Destinations that accepted the update.
    pub delivered: usize,
    /// Destinations that no longer exist.
    pub dropped: usize,
}

/// Holds one sender per live context.
#[derive(Debug, Default)]
pub struct SettingsHub {
    next_id: u64,
    destinations: BTreeMap<ContextId, Sender<SettingsUpdate>>,
}

impl SettingsHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new destination and returns its receiving end.
    pub fn register(&mut self) -> (ContextId, Receiver<SettingsUpdate>) {
        let id = ContextId(self.next_id);
        self.next_id += 1;
        let (sender, receiver) = channel::unbounded();
        self.destinations.insert(id, sender);
        (id, receiver)
    }

    pub fn unregister(&mut self, id: ContextId) {
        self.destinations.remove(&id);
    }

    /// Number of registered destinations.  Dead ones are only noticed by a
    /// broadcast.
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Sends `update` to every destination.
    pub fn broadcast(&mut self, update: SettingsUpdate) -> BroadcastReport {
        let mut report = BroadcastReport::default();
        self.destinations.retain(|id, sender| match sender.send(update) {
            Ok(()) => {
                report.delivered += 1;
                true
            }
            Err(_) => {
                // The context was torn down before it could receive updates.
                log::debug!("{id} is gone; dropping it from settings broadcasts");
                report.dropped += 1;
                false
            }
        });
        log::debug!(
            "broadcast {update:?}: {} delivered, {} dropped",
            report.delivered,
            report.dropped
        );
        report
    }
}
