mod choice;
mod line;

pub(crate) use choice::{get_auto_choice, get_input_choice, prepare_choices_for_user};
pub(crate) use line::{fill_in_text, process_line};
