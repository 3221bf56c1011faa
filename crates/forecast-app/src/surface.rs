//! Form surface abstraction

use std::io;
use thiserror::Error;

/// Errors raised by a form surface
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("I/O error on form surface: {0}")]
    Io(#[from] io::Error),
    #[error("Form input closed")]
    Closed,
    #[error("No options available for {0}")]
    NoOptions(String),
}

/// How a rendered message should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    Result,
}

/// Constraints of a numeric input; the default value is always 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberInput {
    pub min: f64,
    pub step: f64,
    /// Only whole numbers accepted
    pub integer: bool,
}

impl NumberInput {
    pub fn integer(step: f64) -> Self {
        Self { min: 0.0, step, integer: true }
    }

    pub fn decimal(step: f64) -> Self {
        Self { min: 0.0, step, integer: false }
    }

    /// Whether `value` is acceptable for this input
    pub fn accepts(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && (!self.integer || value.fract() == 0.0)
    }
}

/// Capabilities the form needs from whatever renders it
pub trait FormSurface {
    /// Render a selection input and return the chosen option
    fn select(&mut self, label: &str, options: &[String]) -> Result<String, SurfaceError>;

    /// Render a numeric input and return the entered value
    fn number(&mut self, label: &str, input: NumberInput) -> Result<f64, SurfaceError>;

    fn message(&mut self, kind: MessageKind, text: &str) -> Result<(), SurfaceError>;

    /// Render a button; `false` means the user declined it
    fn button(&mut self, label: &str) -> Result<bool, SurfaceError>;
}
