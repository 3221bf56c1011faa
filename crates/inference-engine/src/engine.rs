//! Inference Engine Implementation

use crate::InferenceError;
use feature_engine::{ColumnSchema, FeatureRow, CONTAMINATION_INDEX, HEAVY_METALS, INHABITANTS};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use tract_onnx::prelude::*;

/// Prediction returned by the model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Raw model output
    pub value: f64,
    /// Inference latency in milliseconds
    pub latency_ms: u64,
}

impl Prediction {
    /// Forecast shown to the user: the raw output truncated toward zero
    pub fn forecast(&self) -> i64 {
        self.value.trunc() as i64
    }
}

/// Anything that turns a feature row into a prediction
pub trait Predictor {
    fn predict(&self, row: &FeatureRow) -> Result<Prediction, InferenceError>;
}

enum Backend {
    Onnx(TypedRunnableModel<TypedModel>),
    Mock,
}

/// Trained model handle bound to the schema it was trained on
pub struct InferenceEngine {
    /// Model path
    model_path: String,
    /// Columns the model expects, in order
    schema: Arc<ColumnSchema>,
    backend: Backend,
}

impl InferenceEngine {
    /// Load and optimize an ONNX model taking a `[1, schema.len()]` f32 input
    pub fn load(model_path: impl AsRef<Path>, schema: Arc<ColumnSchema>) -> Result<Self, InferenceError> {
        let path = model_path.as_ref();
        if !path.is_file() {
            return Err(InferenceError::ModelNotFound(path.to_path_buf()));
        }

        info!("Loading ONNX model from {} ({} input columns)", path.display(), schema.len());
        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, schema.len()]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| InferenceError::ModelLoadError(format!("{e:#}")))?;

        info!("Model loaded successfully");
        Ok(Self {
            model_path: path.display().to_string(),
            schema,
            backend: Backend::Onnx(plan),
        })
    }

    /// Create a mock inference engine for testing
    pub fn mock(schema: Arc<ColumnSchema>) -> Self {
        info!("Creating mock inference engine");
        Self {
            model_path: "mock".to_string(),
            schema,
            backend: Backend::Mock,
        }
    }

    fn check_schema(&self, row: &FeatureRow) -> Result<(), InferenceError> {
        if row.conforms_to(&self.schema) {
            return Ok(());
        }

        let mismatch = self
            .schema
            .columns()
            .iter()
            .zip(row.columns())
            .position(|(expected, actual)| expected != actual);
        let (expected, actual) = match mismatch {
            Some(i) => (
                format!("column {} = {:?}", i, self.schema.columns()[i]),
                format!("{:?}", row.columns()[i]),
            ),
            None => (
                format!("{} columns", self.schema.len()),
                format!("{} columns", row.len()),
            ),
        };
        Err(InferenceError::SchemaMismatch { expected, actual })
    }

    fn run_onnx(plan: &TypedRunnableModel<TypedModel>, row: &FeatureRow) -> Result<f64, InferenceError> {
        let values: Vec<f32> = row.values().iter().map(|v| *v as f32).collect();
        let input = Tensor::from_shape(&[1, values.len()], &values)
            .map_err(|e| InferenceError::InferenceFailed(format!("{e:#}")))?;

        let outputs = plan
            .run(tvec!(input.into()))
            .map_err(|e| InferenceError::InferenceFailed(format!("{e:#}")))?;

        let output = outputs
            .first()
            .ok_or_else(|| InferenceError::InvalidOutput("model produced no outputs".to_string()))?;
        let output = output
            .cast_to::<f64>()
            .map_err(|e| InferenceError::InvalidOutput(format!("{e:#}")))?;
        let value = output
            .as_slice::<f64>()
            .map_err(|e| InferenceError::InvalidOutput(format!("{e:#}")))?
            .first()
            .copied()
            .ok_or_else(|| InferenceError::InvalidOutput("empty output tensor".to_string()))?;

        Ok(value)
    }

    /// Simple rule-based mock prediction
    fn mock_predict(row: &FeatureRow) -> f64 {
        let inhabitants = row.get(INHABITANTS).unwrap_or(0.0);
        let heavy_metals = row.get(HEAVY_METALS).unwrap_or(0.0);
        let contamination = row.get(CONTAMINATION_INDEX).unwrap_or(0.0);

        inhabitants / 1000.0 * (1.0 + contamination) + heavy_metals * 100.0
    }

    /// Get model path
    pub fn model_path(&self) -> &str {
        &self.model_path
    }
}

impl Predictor for InferenceEngine {
    fn predict(&self, row: &FeatureRow) -> Result<Prediction, InferenceError> {
        let start = Instant::now();
        self.check_schema(row)?;

        let value = match &self.backend {
            Backend::Onnx(plan) => Self::run_onnx(plan, row)?,
            Backend::Mock => Self::mock_predict(row),
        };

        if !value.is_finite() {
            return Err(InferenceError::InvalidOutput(format!("non-finite prediction {value}")));
        }

        let latency_ms = start.elapsed().as_millis() as u64;
        debug!("Inference completed in {}ms: {}", latency_ms, value);

        Ok(Prediction { value, latency_ms })
    }
}
