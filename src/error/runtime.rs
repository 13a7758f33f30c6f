//! Errors from driving a dialogue session.

use crate::{graph::Location, session::Choice};

use std::{error::Error, fmt};

impl Error for RuntimeError {}

#[derive(Clone, Debug)]
/// Errors from running a dialogue session.
///
/// The content-defect variants — `UnknownNode`, `UnknownVariable`,
/// `NoEligibleChoice` and `MalformedNode` — are fatal to the session: they
/// indicate mistakes in the authored content, the engine does not retry them
/// and no partial turn state is committed when one surfaces. The caller
/// decides whether to abandon the session or move it to a fallback node.
///
/// The remaining variants guard the calling sequence of the API itself, such
/// as making a choice when none was requested.
pub enum RuntimeError {
    /// A jump reference did not resolve to a known node.
    UnknownNode {
        /// The reference as authored.
        reference: String,
        /// Where the session stood when resolving it.
        from: Location,
    },
    /// A substitution or input variable was read before being captured.
    UnknownVariable { name: String },
    /// No branch out of the node satisfies the current flags.
    NoEligibleChoice { at: Location },
    /// The node carries no choices and can never be left.
    MalformedNode { at: Location },
    /// An invalid choice index was given to resume the session with.
    InvalidChoice {
        /// Index input by the player to resume the session with.
        selection: usize,
        /// List of choices that were available for the selection.
        presented_choices: Vec<Choice>,
    },
    /// Called `make_choice` when no choice had been requested.
    MadeChoiceWithoutChoice,
    /// Called `supply_input` when no input capture had been requested.
    SuppliedInputWithoutRequest,
    /// Called `resume` before the `start` method was called on the session.
    ResumeBeforeStart,
    /// Called `start` twice for the same session.
    StartOnSessionInProgress,
    /// Called `resume` after the session ended or retired through a locking
    /// handoff.
    ResumeAfterEnd,
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use RuntimeError::*;

        match self {
            UnknownNode { reference, from } => write!(
                f,
                "Unknown jump target '{}' (resolved from '{}')",
                reference, from
            ),
            UnknownVariable { name } => write!(
                f,
                "Variable '{}' was read before any value was captured for it",
                name
            ),
            NoEligibleChoice { at } => write!(
                f,
                "No choice at node '{}' satisfies the current story flags",
                at
            ),
            MalformedNode { at } => {
                write!(f, "Node '{}' carries no choices and can never be left", at)
            }
            InvalidChoice {
                selection,
                presented_choices,
            } => write!(
                f,
                "Invalid selection of choice: selection was {} but number of choices was {} \
                 (maximum selection index is {})",
                selection,
                presented_choices.len(),
                presented_choices.len().max(1) - 1
            ),
            MadeChoiceWithoutChoice => write!(
                f,
                "Tried to make a choice, but no choice is currently active. Call `resume` \
                 and assert that a choice prompt is returned before calling this again."
            ),
            SuppliedInputWithoutRequest => write!(
                f,
                "Tried to supply input, but no input capture is currently active. Call \
                 `resume` and assert that an input prompt is returned before calling this again."
            ),
            ResumeBeforeStart => write!(f, "Cannot resume a session that has not been started"),
            StartOnSessionInProgress => write!(f, "Cannot start a session that is in progress"),
            ResumeAfterEnd => write!(
                f,
                "Cannot resume a session that has ended or retired through a locking handoff"
            ),
        }
    }
}
