//! Request validation against entity contracts.

mod validation;
pub use validation::{RequestValidator, ValidatedInput};
