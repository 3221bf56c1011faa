//! ONNX Inference Engine
//!
//! Wraps the trained forecast model behind the [`Predictor`] trait.

mod engine;

pub use engine::{InferenceEngine, Prediction, Predictor};

use std::path::PathBuf;
use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model file not found: {}", .0.display())]
    ModelNotFound(PathBuf),
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Feature row does not match model schema: expected {expected}, got {actual}")]
    SchemaMismatch { expected: String, actual: String },
    #[error("Model returned no usable output: {0}")]
    InvalidOutput(String),
}
