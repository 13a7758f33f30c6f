//! Sessions which walk conversation graphs against accumulated story flags.

use crate::{
    error::RuntimeError,
    graph::{resolve_reference, GraphSet, Location, ResolvedTarget},
    line::{ChoiceDef, ChoiceTarget},
    log::{EventKind, Logger},
    process::{get_auto_choice, get_input_choice, prepare_choices_for_user, process_line},
    session::{Choice, Handoff, InputRequest, LineBuffer, Prompt},
    store::FlagStore,
};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// A single conversation in progress.
///
/// The session walks its graphs strictly turn by turn, driven by the caller:
/// `resume` follows nodes (taking eligible hidden choices silently) until it
/// has to suspend for a player decision, a free-text capture, an ending or a
/// handoff to another subsystem. The caller answers a suspension with
/// [`make_choice`][DialogueSession::make_choice()] or
/// [`supply_input`][DialogueSession::supply_input()] and calls `resume` again.
///
/// # Examples
/// ```
/// # use parley::*;
/// let graph = Graph::builder()
///     .with_node(
///         NodeBuilder::new("main")
///             .with_line(Line::spoken("Anything else?"))
///             .with_choice(
///                 ChoiceBuilder::ending(vec![Line::spoken("Farewell.")])
///                     .with_response(Line::spoken("No, goodbye."))
///                     .build(),
///             )
///             .build(),
///     )
///     .build()
///     .unwrap();
///
/// let mut graphs = GraphSet::new();
/// graphs.register("shop", graph);
///
/// let mut session = DialogueSession::new(graphs, Location::new("shop", "main")).unwrap();
/// let mut line_buffer = Vec::new();
///
/// session.start().unwrap();
///
/// let choices = session.resume(&mut line_buffer).unwrap().get_choices().unwrap();
/// assert_eq!(&line_buffer[0].text, "Anything else?");
/// assert_eq!(&choices[0].text, "No, goodbye.");
///
/// session.make_choice(0).unwrap();
///
/// match session.resume(&mut line_buffer).unwrap() {
///     Prompt::Done { tag } => assert!(tag.is_none()),
///     other => panic!("expected an ending but got {:?}", other),
/// }
/// ```
pub struct DialogueSession {
    /// Registry of graphs the session can traverse.
    graphs: GraphSet,
    /// Flags and variables accumulated during the session.
    store: FlagStore,
    /// Node the session currently stands at.
    current: Location,
    /// Set of last choices presented to the player.
    last_choices: Option<Vec<Choice>>,
    /// Choice that has been set to resume the session with.
    selected_choice: Option<usize>,
    /// Input capture the session is suspended on.
    pending_input: Option<PendingInput>,
    /// Captured input waiting to be resolved on the next `resume`.
    answered_input: Option<(PendingInput, String)>,
    /// Record of traversal events.
    log: Logger,
    /// Whether the session has been started.
    in_progress: bool,
    /// Whether the session reached an ending or retired through a locking
    /// handoff.
    has_ended: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
struct PendingInput {
    index: usize,
    variable: String,
}

/// What a followed node asks of the engine.
enum NodeAction {
    /// Resolve the hidden choice at the index immediately.
    Auto(usize),
    /// Suspend for free-text capture.
    Input { index: usize, variable: String },
    /// Suspend with the prepared list of player-facing choices.
    Present(Vec<Choice>),
}

impl DialogueSession {
    /// Create a session entering its graphs at the given location.
    ///
    /// The flag store starts empty. To carry narrative state over from an
    /// earlier conversation, use
    /// [`with_store`][DialogueSession::with_store()].
    ///
    /// # Errors
    /// *   [`UnknownNode`][crate::error::RuntimeError::UnknownNode]: if the
    ///     entry location does not exist in the registry.
    pub fn new(graphs: GraphSet, entry: Location) -> Result<Self, RuntimeError> {
        Self::with_store(graphs, entry, FlagStore::new())
    }

    /// Create a session with a pre-seeded flag store.
    ///
    /// # Errors
    /// *   [`UnknownNode`][crate::error::RuntimeError::UnknownNode]: if the
    ///     entry location does not exist in the registry.
    pub fn with_store(
        graphs: GraphSet,
        entry: Location,
        store: FlagStore,
    ) -> Result<Self, RuntimeError> {
        graphs.get_node(&entry)?;

        Ok(DialogueSession {
            graphs,
            store,
            current: entry,
            last_choices: None,
            selected_choice: None,
            pending_input: None,
            answered_input: None,
            log: Logger::default(),
            in_progress: false,
            has_ended: false,
        })
    }

    /// Mark the session as ready to begin following its graphs.
    ///
    /// Must be called before the first call to
    /// [`resume`][DialogueSession::resume()].
    ///
    /// # Errors
    /// *   [`StartOnSessionInProgress`][crate::error::RuntimeError::StartOnSessionInProgress]:
    ///     if called twice for the same session.
    pub fn start(&mut self) -> Result<(), RuntimeError> {
        if self.in_progress {
            return Err(RuntimeError::StartOnSessionInProgress);
        }

        self.in_progress = true;

        Ok(())
    }

    /// Resume the conversation, reading all encountered lines into the buffer.
    ///
    /// Follows the current node's prompt and choices, taking eligible hidden
    /// choices silently, until the session has to suspend. Lines are pushed
    /// in authored order with variables substituted; the buffer is not
    /// cleared first, that is the caller's responsibility.
    ///
    /// Calling `resume` again at a suspension without answering it returns
    /// the same prompt and emits nothing.
    ///
    /// # Errors
    /// *   [`ResumeBeforeStart`][crate::error::RuntimeError::ResumeBeforeStart]:
    ///     if called before `start`.
    /// *   [`ResumeAfterEnd`][crate::error::RuntimeError::ResumeAfterEnd]:
    ///     if the session has ended or retired through a locking handoff.
    /// *   Content defects
    ///     ([`UnknownNode`][crate::error::RuntimeError::UnknownNode],
    ///     [`UnknownVariable`][crate::error::RuntimeError::UnknownVariable],
    ///     [`NoEligibleChoice`][crate::error::RuntimeError::NoEligibleChoice],
    ///     [`MalformedNode`][crate::error::RuntimeError::MalformedNode]):
    ///     fatal to the session; no partial turn state is committed.
    pub fn resume(&mut self, line_buffer: &mut LineBuffer) -> Result<Prompt, RuntimeError> {
        if !self.in_progress {
            return Err(RuntimeError::ResumeBeforeStart);
        }

        if self.has_ended {
            return Err(RuntimeError::ResumeAfterEnd);
        }

        if let Some(index) = self.selected_choice.take() {
            return match self.resolve_choice(index, line_buffer, None)? {
                Some(prompt) => Ok(prompt),
                None => self.follow_from_current(line_buffer),
            };
        }

        if let Some((pending, text)) = self.answered_input.take() {
            let input = Some((pending.variable.as_str(), text.as_str()));

            return match self.resolve_choice(pending.index, line_buffer, input)? {
                Some(prompt) => Ok(prompt),
                None => self.follow_from_current(line_buffer),
            };
        }

        if let Some(choices) = &self.last_choices {
            return Ok(Prompt::Choice(choices.clone()));
        }

        if let Some(pending) = &self.pending_input {
            return Ok(Prompt::Input(InputRequest {
                variable: pending.variable.clone(),
            }));
        }

        self.follow_from_current(line_buffer)
    }

    /// Make a choice from the set most recently presented by `resume`.
    ///
    /// The `selection` index corresponds to the index in the presented list,
    /// which can be retrieved again by calling `resume` before making
    /// a choice. Once a choice has been made, the next `resume` continues
    /// the conversation from that branch.
    ///
    /// # Errors
    /// *   [`MadeChoiceWithoutChoice`][crate::error::RuntimeError::MadeChoiceWithoutChoice]:
    ///     if the session is not suspended at a choice.
    /// *   [`InvalidChoice`][crate::error::RuntimeError::InvalidChoice]:
    ///     if the index is outside the presented list.
    pub fn make_choice(&mut self, selection: usize) -> Result<(), RuntimeError> {
        let index = self
            .last_choices
            .as_ref()
            .ok_or(RuntimeError::MadeChoiceWithoutChoice)
            .and_then(|last_choices| {
                last_choices
                    .get(selection)
                    .ok_or_else(|| RuntimeError::InvalidChoice {
                        selection,
                        presented_choices: last_choices.clone(),
                    })
                    .map(|choice| choice.index)
            })?;

        self.selected_choice.replace(index);
        self.last_choices = None;

        Ok(())
    }

    /// Supply the free text requested by an input prompt.
    ///
    /// The text is stored under the requesting choice's variable name when
    /// the next `resume` resolves the choice.
    ///
    /// # Errors
    /// *   [`SuppliedInputWithoutRequest`][crate::error::RuntimeError::SuppliedInputWithoutRequest]:
    ///     if the session is not suspended at an input capture.
    pub fn supply_input(&mut self, text: &str) -> Result<(), RuntimeError> {
        let pending = self
            .pending_input
            .take()
            .ok_or(RuntimeError::SuppliedInputWithoutRequest)?;

        self.answered_input = Some((pending, text.to_string()));

        Ok(())
    }

    /// Move the session to another node, abandoning any pending suspension.
    ///
    /// This is the fallback hook for callers that recover from a content
    /// defect by moving to a default node. Moving clears an ended state.
    ///
    /// # Errors
    /// *   [`UnknownNode`][crate::error::RuntimeError::UnknownNode]: if the
    ///     location does not exist in the registry.
    pub fn move_to(&mut self, location: &Location) -> Result<(), RuntimeError> {
        self.graphs.get_node(location)?;

        self.current = location.clone();
        self.last_choices = None;
        self.selected_choice = None;
        self.pending_input = None;
        self.answered_input = None;
        self.has_ended = false;

        Ok(())
    }

    /// Get the location the session currently stands at.
    pub fn current_location(&self) -> Location {
        self.current.clone()
    }

    /// Whether the flag has been raised during this session.
    pub fn is_flag_set(&self, flag: &str) -> bool {
        self.store.is_set(flag)
    }

    /// Store a variable, for example a default the content expects.
    pub fn set_variable(&mut self, name: &str, value: &str) {
        self.store.set_variable(name, value);
    }

    /// Read access to the accumulated flags and variables.
    pub fn store(&self) -> &FlagStore {
        &self.store
    }

    /// Record of traversal events so far.
    pub fn log(&self) -> &Logger {
        &self.log
    }

    /// Release the graphs and the flag store, consuming the session.
    ///
    /// The store can seed the next session to share narrative state between
    /// sequential conversations.
    pub fn into_parts(self) -> (GraphSet, FlagStore) {
        (self.graphs, self.store)
    }

    /// Follow nodes from the current location until a suspension is reached.
    ///
    /// Each followed node emits its full prompt, in order, before its
    /// choices are evaluated.
    fn follow_from_current(&mut self, line_buffer: &mut LineBuffer) -> Result<Prompt, RuntimeError> {
        loop {
            let action = {
                let node = self.graphs.get_node(&self.current)?;

                for line in &node.lines {
                    process_line(line, line_buffer, &self.store)?;
                }

                if node.choices.is_empty() {
                    return Err(RuntimeError::MalformedNode {
                        at: self.current.clone(),
                    });
                }

                if let Some(index) = get_auto_choice(&node.choices, &self.store) {
                    NodeAction::Auto(index)
                } else if let Some((index, variable)) =
                    get_input_choice(&node.choices, &self.store)
                {
                    NodeAction::Input { index, variable }
                } else {
                    NodeAction::Present(prepare_choices_for_user(&node.choices, &self.store)?)
                }
            };

            match action {
                NodeAction::Auto(index) => {
                    if let Some(prompt) = self.resolve_choice(index, line_buffer, None)? {
                        return Ok(prompt);
                    }
                }
                NodeAction::Input { index, variable } => {
                    self.pending_input = Some(PendingInput {
                        index,
                        variable: variable.clone(),
                    });

                    return Ok(Prompt::Input(InputRequest { variable }));
                }
                NodeAction::Present(choices) => {
                    if choices.is_empty() {
                        return Err(RuntimeError::NoEligibleChoice {
                            at: self.current.clone(),
                        });
                    }

                    self.last_choices = Some(choices.clone());

                    return Ok(Prompt::Choice(choices));
                }
            }
        }
    }

    /// Resolve a selected choice: effects, then the transition.
    ///
    /// Effect application and jump resolution are one atomic step: the
    /// target is confirmed first and the store is only touched after
    /// everything that can fail has succeeded.
    ///
    /// Returns `None` when the session moved to another owned node and
    /// following should continue.
    fn resolve_choice(
        &mut self,
        index: usize,
        line_buffer: &mut LineBuffer,
        input: Option<(&str, &str)>,
    ) -> Result<Option<Prompt>, RuntimeError> {
        let choice = {
            let node = self.graphs.get_node(&self.current)?;

            node.choices
                .get(index)
                .cloned()
                .ok_or_else(|| RuntimeError::InvalidChoice {
                    selection: index,
                    presented_choices: Vec::new(),
                })?
        };

        match &choice.target {
            ChoiceTarget::Ending(ending) => {
                let mut ending_lines = Vec::new();

                match input {
                    Some((variable, text)) => {
                        let mut store = self.store.clone();
                        store.set_variable(variable, text);

                        for line in &ending.lines {
                            process_line(line, &mut ending_lines, &store)?;
                        }
                    }
                    None => {
                        for line in &ending.lines {
                            process_line(line, &mut ending_lines, &self.store)?;
                        }
                    }
                }

                self.apply_effects(&choice, input);

                line_buffer.append(&mut ending_lines);

                self.log.add(
                    EventKind::Ended {
                        tag: choice.tag.clone(),
                    },
                    &self.current,
                );
                self.has_ended = true;

                Ok(Some(Prompt::Done {
                    tag: choice.tag.clone(),
                }))
            }
            ChoiceTarget::Jump(reference) => {
                match resolve_reference(reference, &self.current, &self.graphs)? {
                    ResolvedTarget::Internal(location) => {
                        self.apply_effects(&choice, input);

                        if choice.is_hidden() {
                            self.log.add(
                                EventKind::AutoAdvance {
                                    to: location.clone(),
                                },
                                &self.current,
                            );
                        }

                        self.current = location;

                        Ok(None)
                    }
                    ResolvedTarget::External(location) => {
                        self.apply_effects(&choice, input);

                        self.log.add(
                            EventKind::Handoff {
                                to: location.clone(),
                                locked: choice.lock,
                            },
                            &self.current,
                        );

                        if choice.lock {
                            self.has_ended = true;
                        }

                        Ok(Some(Prompt::Handoff(Handoff {
                            to: location,
                            tag: choice.tag.clone(),
                            locked: choice.lock,
                        })))
                    }
                }
            }
        }
    }

    /// Commit the effects of a resolved choice to the store.
    fn apply_effects(&mut self, choice: &ChoiceDef, input: Option<(&str, &str)>) {
        if let Some((variable, text)) = input {
            self.store.set_variable(variable, text);
            self.log.add(
                EventKind::VariableCaptured(variable.to_string()),
                &self.current,
            );
        }

        for flag in choice.gate.apply(&mut self.store) {
            self.log.add(EventKind::FlagRaised(flag), &self.current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        graph::{Graph, NodeBuilder},
        line::{ChoiceBuilder, Line, LineMode},
    };

    /// The shopkeeper conversation used throughout these tests.
    fn shop_graph() -> Graph {
        Graph::builder()
            .with_node(
                NodeBuilder::new("ask_for_name")
                    .with_line(Line::spoken("Well now, a new face. What do they call you?"))
                    .with_choice(ChoiceBuilder::jump("welcome").with_input("name").build())
                    .build(),
            )
            .with_node(
                NodeBuilder::new("welcome")
                    .with_line(Line::spoken("Well met, {name}."))
                    .with_choice(ChoiceBuilder::jump("main").build())
                    .build(),
            )
            .with_node(
                NodeBuilder::new("main")
                    .with_line(Line::spoken("What can I do for you?"))
                    .with_choice(
                        ChoiceBuilder::jump("looking_around")
                            .with_response(Line::spoken("I'm just looking around."))
                            .with_once("looked_around")
                            .build(),
                    )
                    .with_choice(
                        ChoiceBuilder::jump("long_enough")
                            .with_response(Line::spoken("I'm just looking around."))
                            .with_require("looked_around")
                            .build(),
                    )
                    .with_choice(
                        ChoiceBuilder::jump("work_to_do")
                            .with_response(Line::spoken("I have work to do."))
                            .with_once("work_to_do")
                            .build(),
                    )
                    .with_choice(
                        ChoiceBuilder::jump("death_talk")
                            .with_response(Line::spoken("Have you faced death before?"))
                            .with_require("inquiry")
                            .with_require("spared!")
                            .build(),
                    )
                    .build(),
            )
            .with_node(
                NodeBuilder::new("looking_around")
                    .with_line(Line::action("You wander between the cramped shelves."))
                    .with_choice(ChoiceBuilder::jump("main").build())
                    .build(),
            )
            .with_node(
                NodeBuilder::new("long_enough")
                    .with_line(Line::spoken("Looked around long enough, have you?"))
                    .with_choice(ChoiceBuilder::jump("main").build())
                    .build(),
            )
            .with_node(
                NodeBuilder::new("work_to_do")
                    .with_line(Line::spoken("Then you'd best get to it."))
                    .with_choice(
                        ChoiceBuilder::jump("main")
                            .with_response(Line::spoken("No, wait! I need to ask you something!"))
                            .with_apply("inquiry")
                            .build(),
                    )
                    .with_choice(
                        ChoiceBuilder::ending(vec![Line::spoken(
                            "Come back when your pockets are heavier.",
                        )])
                        .with_response(Line::spoken("Then I'll be on my way."))
                        .with_tag("LEFT")
                        .build(),
                    )
                    .build(),
            )
            .with_node(
                NodeBuilder::new("death_talk")
                    .with_line(Line::spoken("Death and I are old acquaintances."))
                    .with_choice(
                        ChoiceBuilder::jump("combat/first_blood")
                            .with_response(Line::spoken("Draw your blade."))
                            .with_tag("FIGHT")
                            .is_locking()
                            .build(),
                    )
                    .with_choice(
                        ChoiceBuilder::ending(vec![Line::action(
                            "The shopkeeper bows, just slightly.",
                        )])
                        .with_response(Line::spoken("Today you are spared."))
                        .with_tag("SPARED")
                        .with_apply("spared")
                        .build(),
                    )
                    .with_choice(
                        ChoiceBuilder::jump("main")
                            .with_response(Line::spoken("Forget I asked."))
                            .build(),
                    )
                    .build(),
            )
            .build()
            .unwrap()
    }

    fn mock_session(entry: &str) -> DialogueSession {
        let mut graphs = GraphSet::new();
        graphs.register("shop", shop_graph());
        graphs.register_external("combat");

        let mut session =
            DialogueSession::new(graphs, Location::new("shop", entry)).unwrap();
        session.start().unwrap();

        session
    }

    /// Texts of the presented choices, for terse assertions.
    fn choice_texts(prompt: &Prompt) -> Vec<String> {
        prompt
            .get_choices()
            .unwrap()
            .iter()
            .map(|choice| choice.text.clone())
            .collect()
    }

    #[test]
    fn starting_a_session_sets_in_progress_boolean() {
        let mut graphs = GraphSet::new();
        graphs.register("shop", shop_graph());

        let mut session =
            DialogueSession::new(graphs, Location::new("shop", "main")).unwrap();

        assert!(!session.in_progress);

        session.start().unwrap();

        assert!(session.in_progress);
    }

    #[test]
    fn starting_a_session_can_only_be_done_once() {
        let mut session = mock_session("main");

        match session.start() {
            Err(RuntimeError::StartOnSessionInProgress) => (),
            other => panic!(
                "expected `RuntimeError::StartOnSessionInProgress` but got {:?}",
                other
            ),
        }
    }

    #[test]
    fn cannot_resume_a_session_that_has_not_started() {
        let mut graphs = GraphSet::new();
        graphs.register("shop", shop_graph());

        let mut session =
            DialogueSession::new(graphs, Location::new("shop", "main")).unwrap();
        let mut line_buffer = Vec::new();

        match session.resume(&mut line_buffer) {
            Err(RuntimeError::ResumeBeforeStart) => (),
            other => panic!(
                "expected `RuntimeError::ResumeBeforeStart` but got {:?}",
                other
            ),
        }
    }

    #[test]
    fn creating_a_session_at_an_unknown_entry_yields_an_error() {
        let mut graphs = GraphSet::new();
        graphs.register("shop", shop_graph());

        assert!(DialogueSession::new(graphs, Location::new("shop", "cellar")).is_err());
    }

    #[test]
    fn resuming_emits_the_prompt_before_the_choices() {
        let mut session = mock_session("main");
        let mut line_buffer = Vec::new();

        let prompt = session.resume(&mut line_buffer).unwrap();

        assert_eq!(line_buffer.len(), 1);
        assert_eq!(&line_buffer[0].text, "What can I do for you?");

        assert_eq!(
            choice_texts(&prompt),
            vec!["I'm just looking around.", "I have work to do."]
        );
    }

    #[test]
    fn hidden_choices_are_followed_without_suspending() {
        let mut session = mock_session("main");
        let mut line_buffer = Vec::new();

        session.resume(&mut line_buffer).unwrap();
        session.make_choice(0).unwrap();

        line_buffer.clear();
        let prompt = session.resume(&mut line_buffer).unwrap();

        // The side node's line, then main's prompt again: no suspension between.
        assert_eq!(line_buffer.len(), 2);
        assert_eq!(
            &line_buffer[0].text,
            "You wander between the cramped shelves."
        );
        assert_eq!(line_buffer[0].mode, LineMode::Action);
        assert_eq!(&line_buffer[1].text, "What can I do for you?");

        assert!(prompt.get_choices().is_some());
    }

    #[test]
    fn once_gated_choices_are_replaced_after_being_taken() {
        let mut session = mock_session("main");
        let mut line_buffer = Vec::new();

        session.resume(&mut line_buffer).unwrap();
        session.make_choice(0).unwrap();

        let prompt = session.resume(&mut line_buffer).unwrap();
        let choices = prompt.get_choices().unwrap();

        // Same display texts, but the first now routes through `long_enough`.
        assert_eq!(
            choice_texts(&prompt),
            vec!["I'm just looking around.", "I have work to do."]
        );
        assert_eq!(choices[0].index, 1);
        assert!(session.is_flag_set("looked_around"));
    }

    #[test]
    fn selecting_the_work_branch_opens_the_inquiry_path() {
        let mut session = mock_session("main");
        let mut line_buffer = Vec::new();

        session.resume(&mut line_buffer).unwrap();
        session.make_choice(1).unwrap();

        let prompt = session.resume(&mut line_buffer).unwrap();
        assert_eq!(
            choice_texts(&prompt),
            vec!["No, wait! I need to ask you something!", "Then I'll be on my way."]
        );

        session.make_choice(0).unwrap();
        let prompt = session.resume(&mut line_buffer).unwrap();

        assert!(session.is_flag_set("work_to_do"));
        assert!(session.is_flag_set("inquiry"));

        // The work option is now blocked by its own once flag; the death
        // question has become satisfiable.
        assert_eq!(
            choice_texts(&prompt),
            vec!["I'm just looking around.", "Have you faced death before?"]
        );
    }

    #[test]
    fn resuming_at_a_choice_returns_the_same_choices_without_reemitting() {
        let mut session = mock_session("main");
        let mut line_buffer = Vec::new();

        let choices = session
            .resume(&mut line_buffer)
            .unwrap()
            .get_choices()
            .unwrap();

        line_buffer.clear();
        let resumed_choices = session
            .resume(&mut line_buffer)
            .unwrap()
            .get_choices()
            .unwrap();

        assert_eq!(choices, resumed_choices);
        assert!(line_buffer.is_empty());
    }

    #[test]
    fn make_choice_yields_an_error_if_a_choice_has_not_been_prompted() {
        let mut session = mock_session("main");

        match session.make_choice(0) {
            Err(RuntimeError::MadeChoiceWithoutChoice) => (),
            other => panic!(
                "expected `RuntimeError::MadeChoiceWithoutChoice` but got {:?}",
                other
            ),
        }
    }

    #[test]
    fn make_choice_yields_an_error_if_the_selection_is_out_of_bounds() {
        let mut session = mock_session("main");
        let mut line_buffer = Vec::new();

        session.resume(&mut line_buffer).unwrap();

        match session.make_choice(2) {
            Err(RuntimeError::InvalidChoice {
                selection,
                presented_choices,
            }) => {
                assert_eq!(selection, 2);
                assert_eq!(presented_choices.len(), 2);
            }
            other => panic!("expected `RuntimeError::InvalidChoice` but got {:?}", other),
        }
    }

    #[test]
    fn input_captures_suspend_and_substitute_into_later_lines() {
        let mut session = mock_session("ask_for_name");
        let mut line_buffer = Vec::new();

        match session.resume(&mut line_buffer).unwrap() {
            Prompt::Input(request) => assert_eq!(&request.variable, "name"),
            other => panic!("expected `Prompt::Input` but got {:?}", other),
        }

        session.supply_input("Rask").unwrap();

        line_buffer.clear();
        session.resume(&mut line_buffer).unwrap();

        assert_eq!(&line_buffer[0].text, "Well met, Rask.");
        assert_eq!(session.store().get_variable("name").unwrap(), "Rask");
    }

    #[test]
    fn resuming_at_an_input_capture_returns_the_request_again() {
        let mut session = mock_session("ask_for_name");
        let mut line_buffer = Vec::new();

        session.resume(&mut line_buffer).unwrap();

        line_buffer.clear();
        match session.resume(&mut line_buffer).unwrap() {
            Prompt::Input(request) => assert_eq!(&request.variable, "name"),
            other => panic!("expected `Prompt::Input` but got {:?}", other),
        }

        assert!(line_buffer.is_empty());
    }

    #[test]
    fn supplying_input_without_a_request_yields_an_error() {
        let mut session = mock_session("main");

        match session.supply_input("Rask") {
            Err(RuntimeError::SuppliedInputWithoutRequest) => (),
            other => panic!(
                "expected `RuntimeError::SuppliedInputWithoutRequest` but got {:?}",
                other
            ),
        }
    }

    #[test]
    fn endings_terminate_the_session_with_their_lines_and_tag() {
        let mut session = mock_session("work_to_do");
        let mut line_buffer = Vec::new();

        session.resume(&mut line_buffer).unwrap();
        session.make_choice(1).unwrap();

        line_buffer.clear();
        match session.resume(&mut line_buffer).unwrap() {
            Prompt::Done { tag } => assert_eq!(tag.as_deref(), Some("LEFT")),
            other => panic!("expected `Prompt::Done` but got {:?}", other),
        }

        assert_eq!(line_buffer.len(), 1);
        assert_eq!(
            &line_buffer[0].text,
            "Come back when your pockets are heavier."
        );

        match session.resume(&mut line_buffer) {
            Err(RuntimeError::ResumeAfterEnd) => (),
            other => panic!("expected `RuntimeError::ResumeAfterEnd` but got {:?}", other),
        }
    }

    #[test]
    fn locking_jumps_into_external_graphs_retire_the_session() {
        let mut session = mock_session("death_talk");
        let mut line_buffer = Vec::new();

        session.resume(&mut line_buffer).unwrap();
        session.make_choice(0).unwrap();

        match session.resume(&mut line_buffer).unwrap() {
            Prompt::Handoff(handoff) => {
                assert_eq!(handoff.to, Location::new("combat", "first_blood"));
                assert_eq!(handoff.tag.as_deref(), Some("FIGHT"));
                assert!(handoff.locked);
            }
            other => panic!("expected `Prompt::Handoff` but got {:?}", other),
        }

        match session.resume(&mut line_buffer) {
            Err(RuntimeError::ResumeAfterEnd) => (),
            other => panic!("expected `RuntimeError::ResumeAfterEnd` but got {:?}", other),
        }
    }

    #[test]
    fn choices_with_no_satisfiable_branch_yield_no_eligible_choice() {
        let graph = Graph::builder()
            .with_node(
                NodeBuilder::new("stuck")
                    .with_choice(
                        ChoiceBuilder::jump("stuck")
                            .with_response(Line::spoken("Never offered"))
                            .with_require("never_set")
                            .build(),
                    )
                    .build(),
            )
            .build()
            .unwrap();

        let mut graphs = GraphSet::new();
        graphs.register("shop", graph);

        let mut session =
            DialogueSession::new(graphs, Location::new("shop", "stuck")).unwrap();
        let mut line_buffer = Vec::new();

        session.start().unwrap();

        match session.resume(&mut line_buffer) {
            Err(RuntimeError::NoEligibleChoice { at }) => {
                assert_eq!(at, Location::new("shop", "stuck"));
            }
            other => panic!(
                "expected `RuntimeError::NoEligibleChoice` but got {:?}",
                other
            ),
        }
    }

    #[test]
    fn nodes_without_choices_yield_malformed_node() {
        let graph = Graph::builder()
            .with_node(NodeBuilder::new("dead_end").build())
            .build()
            .unwrap();

        let mut graphs = GraphSet::new();
        graphs.register("shop", graph);

        let mut session =
            DialogueSession::new(graphs, Location::new("shop", "dead_end")).unwrap();
        let mut line_buffer = Vec::new();

        session.start().unwrap();

        match session.resume(&mut line_buffer) {
            Err(RuntimeError::MalformedNode { at }) => {
                assert_eq!(at, Location::new("shop", "dead_end"));
            }
            other => panic!("expected `RuntimeError::MalformedNode` but got {:?}", other),
        }
    }

    #[test]
    fn effects_are_not_committed_when_jump_resolution_fails() {
        let graph = Graph::builder()
            .with_node(
                NodeBuilder::new("main")
                    .with_choice(
                        ChoiceBuilder::jump("missing")
                            .with_response(Line::spoken("Into the void"))
                            .with_once("stepped")
                            .with_apply("void_touched")
                            .build(),
                    )
                    .build(),
            )
            .build()
            .unwrap();

        let mut graphs = GraphSet::new();
        graphs.register("shop", graph);

        let mut session =
            DialogueSession::new(graphs, Location::new("shop", "main")).unwrap();
        let mut line_buffer = Vec::new();

        session.start().unwrap();
        session.resume(&mut line_buffer).unwrap();
        session.make_choice(0).unwrap();

        match session.resume(&mut line_buffer) {
            Err(RuntimeError::UnknownNode { reference, .. }) => {
                assert_eq!(&reference, "missing");
            }
            other => panic!("expected `RuntimeError::UnknownNode` but got {:?}", other),
        }

        assert!(!session.is_flag_set("stepped"));
        assert!(!session.is_flag_set("void_touched"));
        assert_eq!(session.store().num_flags(), 0);
    }

    #[test]
    fn sessions_can_be_moved_to_a_fallback_node_after_an_ending() {
        let mut session = mock_session("work_to_do");
        let mut line_buffer = Vec::new();

        session.resume(&mut line_buffer).unwrap();
        session.make_choice(1).unwrap();
        session.resume(&mut line_buffer).unwrap();

        session.move_to(&Location::new("shop", "main")).unwrap();

        line_buffer.clear();
        let prompt = session.resume(&mut line_buffer).unwrap();

        assert_eq!(&line_buffer[0].text, "What can I do for you?");
        assert!(prompt.get_choices().is_some());
    }

    #[test]
    fn moving_to_an_unknown_location_yields_an_error() {
        let mut session = mock_session("main");

        assert!(session.move_to(&Location::new("shop", "cellar")).is_err());
        assert!(session.move_to(&Location::new("village", "main")).is_err());
    }

    #[test]
    fn the_store_is_recovered_with_its_accumulated_flags() {
        let mut session = mock_session("main");
        let mut line_buffer = Vec::new();

        session.resume(&mut line_buffer).unwrap();
        session.make_choice(0).unwrap();
        session.resume(&mut line_buffer).unwrap();

        let (graphs, store) = session.into_parts();

        assert!(store.is_set("looked_around"));

        // A later conversation picks the narrative state back up.
        let mut next =
            DialogueSession::with_store(graphs, Location::new("shop", "main"), store).unwrap();
        next.start().unwrap();

        line_buffer.clear();
        let prompt = next.resume(&mut line_buffer).unwrap();

        assert_eq!(
            prompt.get_choices().unwrap()[0].index,
            1,
            "the once-gated branch must stay blocked in the next session"
        );
    }

    #[test]
    fn traversal_events_are_recorded_in_order() {
        let mut session = mock_session("main");
        let mut line_buffer = Vec::new();

        session.resume(&mut line_buffer).unwrap();
        session.make_choice(0).unwrap();
        session.resume(&mut line_buffer).unwrap();

        let events = session
            .log()
            .iter()
            .map(|message| message.event.clone())
            .collect::<Vec<_>>();

        assert_eq!(
            events,
            vec![
                EventKind::FlagRaised("looked_around".to_string()),
                EventKind::AutoAdvance {
                    to: Location::new("shop", "main"),
                },
            ]
        );
    }

    #[test]
    fn eligibility_is_reevaluated_on_every_visit() {
        let mut session = mock_session("main");
        let mut line_buffer = Vec::new();

        // First visit: the once-gated branch is offered.
        let first = session.resume(&mut line_buffer).unwrap();
        assert_eq!(first.get_choices().unwrap()[0].index, 0);

        session.make_choice(0).unwrap();

        // Second visit to the same node, new flag state, new eligible set.
        let second = session.resume(&mut line_buffer).unwrap();
        assert_eq!(second.get_choices().unwrap()[0].index, 1);
    }
}
