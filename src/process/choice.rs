//! Filter a node's choices against the current flag state.

use crate::{
    error::RuntimeError,
    line::{ChoiceDef, ChoiceKind},
    process::fill_in_text,
    session::Choice,
    store::FlagStore,
};

/// Prepare the list of player-facing choices to present, in authored order.
///
/// Eligibility is evaluated fresh against the store on every call: it is a
/// pure function of the store's current contents and is never cached.
///
/// Response text is substituted before presentation, so an uncaptured
/// variable in a response surfaces here.
pub(crate) fn prepare_choices_for_user(
    choices: &[ChoiceDef],
    store: &FlagStore,
) -> Result<Vec<Choice>, RuntimeError> {
    choices
        .iter()
        .enumerate()
        .filter_map(|(index, choice)| match &choice.kind {
            ChoiceKind::Response(line) if choice.gate.is_open(store) => {
                Some((index, choice, line))
            }
            _ => None,
        })
        .map(|(index, choice, line)| {
            Ok(Choice {
                text: fill_in_text(&line.text, store)?,
                mode: line.mode,
                tag: choice.tag.clone(),
                index,
            })
        })
        .collect()
}

/// First eligible hidden choice, which the engine follows without suspending.
///
/// Hidden choices carry no player decision, so authored order is their
/// resolution priority.
pub(crate) fn get_auto_choice(choices: &[ChoiceDef], store: &FlagStore) -> Option<usize> {
    choices
        .iter()
        .position(|choice| choice.is_hidden() && choice.gate.is_open(store))
}

/// First eligible input-capture choice, with the variable it captures into.
pub(crate) fn get_input_choice(choices: &[ChoiceDef], store: &FlagStore) -> Option<(usize, String)> {
    choices
        .iter()
        .enumerate()
        .find_map(|(index, choice)| match &choice.kind {
            ChoiceKind::Input { variable } if choice.gate.is_open(store) => {
                Some((index, variable.clone()))
            }
            _ => None,
        })
}
