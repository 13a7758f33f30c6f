//! Mutable state of a play session: raised story flags and captured variables.

use crate::error::RuntimeError;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Every fact accumulated during a play session.
///
/// Flags are write-once booleans: a flag that has never been raised reads as unset,
/// raising it twice is a no-op and nothing ever clears one. Variables are free strings
/// captured from the player, for example their name.
///
/// A store is owned by a single active session. To carry narrative state into
/// a later conversation, recover it with
/// [`into_parts`][crate::DialogueSession::into_parts()] and hand it to the
/// next session.
pub struct FlagStore {
    flags: HashSet<String>,
    variables: HashMap<String, String>,
}

impl FlagStore {
    /// Create an empty store.
    pub fn new() -> Self {
        FlagStore::default()
    }

    /// Whether the flag has ever been raised in this session.
    pub fn is_set(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Raise a flag.
    ///
    /// Idempotent: returns `true` only if the flag was newly raised.
    pub fn set(&mut self, flag: &str) -> bool {
        self.flags.insert(flag.to_string())
    }

    /// Store a variable, replacing any earlier capture.
    pub fn set_variable(&mut self, name: &str, value: &str) {
        self.variables.insert(name.to_string(), value.to_string());
    }

    /// Retrieve a variable captured earlier in the session.
    ///
    /// # Errors
    /// *   [`UnknownVariable`][crate::error::RuntimeError::UnknownVariable]:
    ///     if no value was ever stored under the name.
    pub fn get_variable(&self, name: &str) -> Result<&str, RuntimeError> {
        self.variables
            .get(name)
            .map(|value| value.as_str())
            .ok_or_else(|| RuntimeError::UnknownVariable {
                name: name.to_string(),
            })
    }

    /// Iterate over every raised flag, in no particular order.
    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(|flag| flag.as_str())
    }

    /// Number of raised flags.
    pub fn num_flags(&self) -> usize {
        self.flags.len()
    }
}
