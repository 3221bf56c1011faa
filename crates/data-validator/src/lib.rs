//! Data Validation
//!
//! Presence checks on numeric entries and membership checks on selections,
//! run before the model is invoked.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{Validator, ValidationConfig, ValidationResult};
