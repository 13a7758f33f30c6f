//! Errors from registering content or driving a session.

mod runtime;
mod validate;

pub use runtime::RuntimeError;
pub use validate::{ValidationError, ValidationErrorKind};
