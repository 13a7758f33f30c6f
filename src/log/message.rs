use crate::graph::Location;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Traversal event with the location it happened at.
pub struct LogMessage {
    /// Recorded event.
    pub event: EventKind,
    /// Where the session stood when the event happened.
    pub location: Location,
}

impl LogMessage {
    pub(crate) fn with_kind(event: EventKind, location: &Location) -> Self {
        LogMessage {
            event,
            location: location.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Type of traversal event.
pub enum EventKind {
    /// A story flag was raised for the first time.
    FlagRaised(String),
    /// A variable was captured from player input.
    VariableCaptured(String),
    /// A hidden choice was followed without player input.
    AutoAdvance { to: Location },
    /// Control was handed to a graph owned by another subsystem.
    Handoff { to: Location, locked: bool },
    /// The session reached an ending.
    Ended { tag: Option<String> },
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}] {}", self.location, self.event)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use EventKind::*;

        match self {
            FlagRaised(flag) => write!(f, "raised flag '{}'", flag),
            VariableCaptured(name) => write!(f, "captured variable '{}'", name),
            AutoAdvance { to } => write!(f, "auto-advanced to '{}'", to),
            Handoff { to, locked } => {
                write!(f, "handed off to '{}'", to)?;

                if *locked {
                    write!(f, " (locked)")?;
                }

                Ok(())
            }
            Ended { tag: Some(tag) } => write!(f, "ended with tag '{}'", tag),
            Ended { tag: None } => write!(f, "ended"),
        }
    }
}
