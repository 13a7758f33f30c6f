//! Content of conversation nodes: lines, choices and their condition blocks.

mod choice;
mod condition;
mod line;

pub use choice::{ChoiceBuilder, ChoiceDef, ChoiceKind, ChoiceTarget, Ending};
pub use condition::{Gate, Requirement};
pub use line::{Line, LineMode};
