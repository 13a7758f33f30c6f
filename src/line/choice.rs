//! Choices: the branches out of a conversation node.

use crate::line::{Gate, Line, Requirement};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// A branch out of a node, either player-selectable or automatic.
///
/// Choices are evaluated in authored order: the order is both display order
/// for the player and resolution priority for hidden choices.
pub struct ChoiceDef {
    /// How the choice surfaces to the player.
    pub kind: ChoiceKind,
    /// Where selecting the choice leads.
    pub target: ChoiceTarget,
    /// One-directional jump: the session never returns to this graph afterwards.
    pub lock: bool,
    /// Opaque label passed through to external consumers, such as ending
    /// classification or analytics. Carries no engine semantics.
    pub tag: Option<String>,
    /// Condition block with the flag effects of selecting this choice.
    pub gate: Gate,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// How a choice surfaces to the player.
pub enum ChoiceKind {
    /// Response the player picks from a list.
    Response(Line),
    /// Free-text capture: input is requested from the player and stored
    /// under the variable name before the choice resolves.
    Input {
        /// Name the captured text is stored under.
        variable: String,
    },
    /// Hidden transition, taken automatically when eligible.
    Silent,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// What selecting a choice leads to.
pub enum ChoiceTarget {
    /// Jump to another node.
    ///
    /// References without a path separator name a node in the current graph.
    /// References with separators are resolved from the graph registry root,
    /// splitting off the node name at the last separator.
    Jump(String),
    /// Terminal sequence: reaching it ends the conversation session.
    Ending(Ending),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Lines shown when a conversation reaches a terminal beat.
pub struct Ending {
    /// Lines to display, in order.
    pub lines: Vec<Line>,
}

impl ChoiceDef {
    /// Whether this choice is taken automatically, without player input.
    pub fn is_hidden(&self) -> bool {
        match self.kind {
            ChoiceKind::Silent => true,
            _ => false,
        }
    }
}

/// Builder for a [`ChoiceDef`].
///
/// The starting point is the choice's target; every other part is added with
/// `with_*` methods. A choice without a response or input variable is hidden
/// and will be taken automatically when eligible.
///
/// # Examples
/// ```
/// # use parley::{ChoiceBuilder, Line};
/// let choice = ChoiceBuilder::jump("looking_around")
///     .with_response(Line::spoken("I'm just looking around."))
///     .with_once("looked_around")
///     .build();
///
/// assert!(!choice.is_hidden());
/// ```
pub struct ChoiceBuilder {
    kind: ChoiceKind,
    target: ChoiceTarget,
    lock: bool,
    tag: Option<String>,
    gate: Gate,
}

impl ChoiceBuilder {
    /// Start a choice which jumps to the referenced node.
    pub fn jump(reference: &str) -> Self {
        Self::with_target(ChoiceTarget::Jump(reference.to_string()))
    }

    /// Start a choice which ends the conversation with the given lines.
    pub fn ending(lines: Vec<Line>) -> Self {
        Self::with_target(ChoiceTarget::Ending(Ending { lines }))
    }

    fn with_target(target: ChoiceTarget) -> Self {
        ChoiceBuilder {
            kind: ChoiceKind::Silent,
            target,
            lock: false,
            tag: None,
            gate: Gate::default(),
        }
    }

    /// Set the response line the player selects this choice by.
    pub fn with_response(mut self, line: Line) -> Self {
        self.kind = ChoiceKind::Response(line);
        self
    }

    /// Make this a free-text capture choice storing input under the variable.
    pub fn with_input(mut self, variable: &str) -> Self {
        self.kind = ChoiceKind::Input {
            variable: variable.to_string(),
        };
        self
    }

    /// Set the once flag: offered only until the flag is raised, raised on selection.
    pub fn with_once(mut self, flag: &str) -> Self {
        self.gate.once = Some(flag.to_string());
        self
    }

    /// Add a requirement from its token form (`name` or `name!`).
    pub fn with_require(mut self, token: &str) -> Self {
        self.gate.require.push(Requirement::from_token(token));
        self
    }

    /// Add a flag to raise when the choice is selected.
    pub fn with_apply(mut self, flag: &str) -> Self {
        self.gate.apply.push(flag.to_string());
        self
    }

    /// Attach an opaque tag.
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    /// Mark the jump as one-directional.
    pub fn is_locking(mut self) -> Self {
        self.lock = true;
        self
    }

    /// Finish the choice.
    pub fn build(self) -> ChoiceDef {
        ChoiceDef {
            kind: self.kind,
            target: self.target,
            lock: self.lock,
            tag: self.tag,
            gate: self.gate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_are_hidden_unless_given_a_response_or_input() {
        let hidden = ChoiceBuilder::jump("main").build();
        let visible = ChoiceBuilder::jump("main")
            .with_response(Line::spoken("Onwards."))
            .build();
        let input = ChoiceBuilder::jump("main").with_input("name").build();

        assert!(hidden.is_hidden());
        assert!(!visible.is_hidden());
        assert!(!input.is_hidden());
    }

    #[test]
    fn builder_assembles_the_condition_block() {
        let choice = ChoiceBuilder::jump("death_talk")
            .with_response(Line::spoken("Have you faced death before?"))
            .with_require("inquiry")
            .with_require("spared!")
            .with_apply("asked_about_death")
            .build();

        assert_eq!(
            choice.gate.require,
            vec![
                Requirement::Set("inquiry".to_string()),
                Requirement::Unset("spared".to_string()),
            ]
        );
        assert_eq!(choice.gate.apply, vec!["asked_about_death".to_string()]);
    }

    #[test]
    fn builder_defaults_leave_the_choice_unlocked_and_untagged() {
        let choice = ChoiceBuilder::jump("main").build();

        assert!(!choice.lock);
        assert!(choice.tag.is_none());
    }

    #[test]
    fn locking_and_tagging_are_recorded() {
        let choice = ChoiceBuilder::jump("combat/duel")
            .with_response(Line::spoken("Draw your blade."))
            .with_tag("FIGHT")
            .is_locking()
            .build();

        assert!(choice.lock);
        assert_eq!(choice.tag.as_deref(), Some("FIGHT"));
    }

    #[test]
    fn ending_choices_carry_their_terminal_lines() {
        let choice = ChoiceBuilder::ending(vec![Line::spoken("Farewell.")])
            .with_response(Line::spoken("Goodbye."))
            .build();

        match &choice.target {
            ChoiceTarget::Ending(ending) => assert_eq!(ending.lines.len(), 1),
            other => panic!("expected `ChoiceTarget::Ending` but got {:?}", other),
        }
    }
}
