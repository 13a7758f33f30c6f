//! Substitution of captured variables into authored text.

use crate::{
    consts::{VARIABLE_CLOSE_MARKER, VARIABLE_OPEN_MARKER},
    error::RuntimeError,
    line::Line,
    session::LineBuffer,
    store::FlagStore,
};

/// Fill every `{variable}` marker in the text with its captured value.
///
/// Text without markers passes through untouched. An opening marker without
/// a matching closing marker is treated as literal text.
///
/// # Errors
/// *   [`UnknownVariable`][crate::error::RuntimeError::UnknownVariable]:
///     if a referenced variable was never captured.
pub(crate) fn fill_in_text(text: &str, store: &FlagStore) -> Result<String, RuntimeError> {
    let mut buffer = String::with_capacity(text.len());
    let mut remainder = text;

    while let Some(open) = remainder.find(VARIABLE_OPEN_MARKER) {
        let close = match remainder[open..].find(VARIABLE_CLOSE_MARKER) {
            Some(close) => close,
            None => break,
        };

        let name = &remainder[open + 1..open + close];

        buffer.push_str(&remainder[..open]);
        buffer.push_str(store.get_variable(name)?);

        remainder = &remainder[open + close + 1..];
    }

    buffer.push_str(remainder);

    Ok(buffer)
}

/// Process an authored line into its display form and add it to the buffer.
pub(crate) fn process_line(
    line: &Line,
    buffer: &mut LineBuffer,
    store: &FlagStore,
) -> Result<(), RuntimeError> {
    let text = fill_in_text(&line.text, store)?;

    buffer.push(Line {
        text,
        mode: line.mode,
    });

    Ok(())
}
