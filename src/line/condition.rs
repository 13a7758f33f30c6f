//! Condition blocks which gate choices on accumulated story flags.

use crate::{consts::NEGATION_MARKER, store::FlagStore};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// A single flag check in a choice's `require` list.
pub enum Requirement {
    /// The flag must have been raised.
    Set(String),
    /// The flag must not have been raised.
    Unset(String),
}

impl Requirement {
    /// Parse a requirement from its token form.
    ///
    /// A bare flag name requires the flag to be set. A name with a trailing
    /// negation marker requires it to be unset. Parsing happens once, when
    /// content is constructed, so that evaluation never inspects strings.
    ///
    /// # Examples
    /// ```
    /// # use parley::Requirement;
    /// assert_eq!(Requirement::from_token("inquiry"), Requirement::Set("inquiry".to_string()));
    /// assert_eq!(Requirement::from_token("spared!"), Requirement::Unset("spared".to_string()));
    /// ```
    pub fn from_token(token: &str) -> Self {
        match token.strip_suffix(NEGATION_MARKER) {
            Some(name) => Requirement::Unset(name.to_string()),
            None => Requirement::Set(token.to_string()),
        }
    }

    /// Whether the requirement holds against the given store.
    pub fn is_satisfied(&self, store: &FlagStore) -> bool {
        match self {
            Requirement::Set(flag) => store.is_set(flag),
            Requirement::Unset(flag) => !store.is_set(flag),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Condition block of a choice: when it may be offered and which flags
/// selecting it raises.
pub struct Gate {
    /// Flag raised on selection which also blocks the choice once raised.
    ///
    /// This is the "offer only the first time" pattern: the flag acts as an
    /// implicit negative requirement.
    pub once: Option<String>,
    /// Requirements which must all hold for the choice to be offered.
    pub require: Vec<Requirement>,
    /// Flags raised unconditionally when the choice is selected.
    ///
    /// Entries are always positive sets, distinct from the negation syntax
    /// of `require` tokens.
    pub apply: Vec<String>,
}

impl Gate {
    /// Evaluate whether a choice guarded by this gate is currently eligible.
    ///
    /// Pure with respect to the store and never cached: flags may change
    /// between visits to the same node, so the caller re-evaluates on every
    /// visit.
    pub fn is_open(&self, store: &FlagStore) -> bool {
        if let Some(flag) = &self.once {
            if store.is_set(flag) {
                return false;
            }
        }

        self.require
            .iter()
            .all(|requirement| requirement.is_satisfied(store))
    }

    /// Raise the `once` flag, then every `apply` flag, in listed order.
    ///
    /// Returns the flags that were newly raised, in the order they were
    /// raised, for the caller to log.
    pub(crate) fn apply(&self, store: &mut FlagStore) -> Vec<String> {
        let mut raised = Vec::new();

        for flag in self.once.iter().chain(self.apply.iter()) {
            if store.set(flag) {
                raised.push(flag.clone());
            }
        }

        raised
    }
}
