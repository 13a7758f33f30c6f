//! Dialogue sessions and the prompts they yield to the presentation layer.

mod session;
mod types;

pub use session::DialogueSession;
pub use types::{Choice, Handoff, InputRequest, LineBuffer, Prompt};
