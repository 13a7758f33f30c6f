//! Data handed to the presentation layer at each suspension point.

use crate::{
    graph::Location,
    line::{Line, LineMode},
};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Convenience type to indicate when a buffer of `Line` objects is being
/// manipulated.
pub type LineBuffer = Vec<Line>;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Choice presented to the player.
pub struct Choice {
    /// Response text, ready to display: variables are substituted and the
    /// text carries no trailing newline.
    pub text: String,
    /// Presentation mode of the response.
    pub mode: LineMode,
    /// Opaque label for external consumers.
    pub tag: Option<String>,
    /// Internal index of the choice in its node.
    pub(crate) index: usize,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Request for free text from the player.
pub struct InputRequest {
    /// Variable name the captured text will be stored under.
    pub variable: String,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Reference handed to the component which owns the target graph.
pub struct Handoff {
    /// Target graph and node.
    pub to: Location,
    /// Tag of the choice that triggered the handoff.
    pub tag: Option<String>,
    /// Whether the jump was one-directional. If so, this session is retired
    /// and cannot be resumed.
    pub locked: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Result from resuming a `DialogueSession`.
///
/// # Examples
/// ```
/// # use parley::*;
/// # let graph = Graph::builder()
/// #     .with_node(
/// #         NodeBuilder::new("main")
/// #             .with_line(Line::spoken("A stranger approaches."))
/// #             .with_choice(
/// #                 ChoiceBuilder::ending(vec![Line::spoken("Farewell.")])
/// #                     .with_response(Line::spoken("Goodbye."))
/// #                     .build(),
/// #             )
/// #             .build(),
/// #     )
/// #     .build()
/// #     .unwrap();
/// # let mut graphs = GraphSet::new();
/// # graphs.register("street", graph);
/// # let mut session = DialogueSession::new(graphs, Location::new("street", "main")).unwrap();
/// let mut line_buffer = Vec::new();
///
/// session.start().unwrap();
///
/// match session.resume(&mut line_buffer).unwrap() {
///     Prompt::Choice(choices) => {
///         for (i, choice) in choices.iter().enumerate() {
///             println!("{}. {}", i + 1, choice.text);
///         }
///     }
///     Prompt::Input(request) => { /* ask the player for `request.variable` */ }
///     Prompt::Done { .. } => { /* the conversation reached an ending */ }
///     Prompt::Handoff(handoff) => { /* another subsystem takes over */ }
/// }
/// ```
pub enum Prompt {
    /// Eligible choices to present, awaiting a selection through
    /// [`make_choice`][crate::DialogueSession::make_choice()].
    Choice(Vec<Choice>),
    /// A free-text capture is required through
    /// [`supply_input`][crate::DialogueSession::supply_input()] before the
    /// session can proceed.
    Input(InputRequest),
    /// The conversation reached an ending. Its lines are in the line buffer
    /// and the selecting choice's tag is carried here.
    Done { tag: Option<String> },
    /// Control passed to a graph owned by another subsystem.
    Handoff(Handoff),
}

impl Prompt {
    /// If a set of choices was returned, retrieve them without having to match.
    pub fn get_choices(&self) -> Option<Vec<Choice>> {
        match self {
            Prompt::Choice(choices) => Some(choices.clone()),
            _ => None,
        }
    }
}
