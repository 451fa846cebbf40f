//! Domain models with validation at construction
//!
//! Request input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod question;
pub mod validation;

pub use question::{Question, QuestionId};
pub use validation::ValidationError;
