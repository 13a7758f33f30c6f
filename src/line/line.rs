#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Single line of a conversation, authored and presented in the same shape.
///
/// Lines carry no control flow. Authored text may contain `{variable}` markers
/// which are substituted with captured variables when the line is emitted.
pub struct Line {
    /// Text to display.
    pub text: String,
    /// How the line should be presented.
    pub mode: LineMode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Presentation mode of a line.
pub enum LineMode {
    /// Dialogue spoken aloud by a character.
    Spoken,
    /// Narrated beat, not spoken by anyone.
    Action,
}

impl Default for LineMode {
    fn default() -> Self {
        LineMode::Spoken
    }
}

impl Line {
    /// Create a spoken line.
    pub fn spoken(text: &str) -> Self {
        Line {
            text: text.to_string(),
            mode: LineMode::Spoken,
        }
    }

    /// Create a narrated action line.
    pub fn action(text: &str) -> Self {
        Line {
            text: text.to_string(),
            mode: LineMode::Action,
        }
    }
}
