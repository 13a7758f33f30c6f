//! A runtime for flag-gated branching dialogue.
//!
//! `parley` drives conversations authored as graphs of nodes: each node
//! carries prompt lines and a set of choices, and every choice is gated on
//! the boolean story flags the player has accumulated. Selecting a choice
//! raises flags, jumps to another node (possibly in a graph owned by another
//! subsystem, such as combat) or ends the conversation.
//!
//! The crate is a runtime core only. Content arrives already parsed, through
//! the [`Graph`], [`NodeBuilder`] and [`ChoiceBuilder`] construction API or,
//! with the `serde_support` feature, from any serde format. Presentation is
//! the caller's: the session emits lines and structured prompts and suspends
//! until the caller answers them.
//!
//! # Example
//! ```
//! use parley::*;
//!
//! let graph = Graph::builder()
//!     .with_node(
//!         NodeBuilder::new("main")
//!             .with_line(Line::spoken("What can I do for you?"))
//!             .with_choice(
//!                 ChoiceBuilder::jump("main")
//!                     .with_response(Line::spoken("Just browsing."))
//!                     .with_once("browsed")
//!                     .build(),
//!             )
//!             .with_choice(
//!                 ChoiceBuilder::ending(vec![Line::spoken("Safe travels.")])
//!                     .with_response(Line::spoken("Nothing, goodbye."))
//!                     .build(),
//!             )
//!             .build(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let mut graphs = GraphSet::new();
//! graphs.register("shop", graph);
//! graphs.validate().unwrap();
//!
//! let mut session = DialogueSession::new(graphs, Location::new("shop", "main")).unwrap();
//! let mut line_buffer = Vec::new();
//!
//! session.start().unwrap();
//!
//! let choices = session
//!     .resume(&mut line_buffer)
//!     .unwrap()
//!     .get_choices()
//!     .unwrap();
//!
//! assert_eq!(&line_buffer[0].text, "What can I do for you?");
//! assert_eq!(choices.len(), 2);
//!
//! // "Just browsing." loops back; its once flag retires it on the revisit.
//! session.make_choice(0).unwrap();
//! let choices = session
//!     .resume(&mut line_buffer)
//!     .unwrap()
//!     .get_choices()
//!     .unwrap();
//!
//! assert_eq!(choices.len(), 1);
//! assert_eq!(&choices[0].text, "Nothing, goodbye.");
//! ```
//!
//! # Features
//! *   `serde_support`: derives `Serialize` and `Deserialize` for the whole
//!     content model and for [`DialogueSession`] itself, so graphs can be
//!     loaded from serde formats and sessions snapshotted mid-conversation.

mod consts;
pub mod error;
mod graph;
mod line;
mod log;
mod process;
mod session;
mod store;

pub use error::{RuntimeError, ValidationError, ValidationErrorKind};
pub use graph::{Graph, GraphBuilder, GraphSet, Location, Node, NodeBuilder, NodeMap};
pub use line::{
    ChoiceBuilder, ChoiceDef, ChoiceKind, ChoiceTarget, Ending, Gate, Line, LineMode, Requirement,
};
pub use log::{EventKind, LogMessage, Logger};
pub use session::{Choice, DialogueSession, Handoff, InputRequest, LineBuffer, Prompt};
pub use store::FlagStore;
