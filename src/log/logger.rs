use crate::{
    graph::Location,
    log::{EventKind, LogMessage},
};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Record of traversal events in the order they happened.
///
/// The engine records flags being raised, variables being captured, silent
/// auto-advances, cross-subsystem handoffs and endings. Callers inspect the
/// record for diagnostics or analytics; the engine itself never reads it.
pub struct Logger {
    events: Vec<LogMessage>,
}

impl Logger {
    pub(crate) fn add(&mut self, event: EventKind, location: &Location) {
        self.events.push(LogMessage::with_kind(event, location));
    }

    /// Create an iterator over the recorded events, oldest first.
    pub fn iter(&self) -> std::slice::Iter<LogMessage> {
        self.events.iter()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
