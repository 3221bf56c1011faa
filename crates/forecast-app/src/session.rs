//! Startup context and the form-to-prediction cycle

use crate::config::AppConfig;
use crate::surface::{FormSurface, MessageKind, NumberInput, SurfaceError};
use catalog::{CatalogError, ReferenceCatalog};
use data_validator::{ValidationError, Validator};
use feature_engine::{ColumnSchema, FeatureAssembler, FeatureError, Sex, UserInput};
use inference_engine::{InferenceEngine, InferenceError, Predictor};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Shown when a required numeric field is missing
pub const INCOMPLETE_MESSAGE: &str = "COMPLETAR TODOS LOS CAMPOS";

const PREDICT_BUTTON: &str = "Predecir";

/// Startup artifact could not be loaded; the form never starts
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Model file not found: {}", .0.display())]
    MissingModel(PathBuf),
    #[error("Column schema file not found: {}", .0.display())]
    MissingSchema(PathBuf),
    #[error("Reference catalog not found: {}", .0.display())]
    MissingCatalog(PathBuf),
    #[error(transparent)]
    Model(InferenceError),
    #[error(transparent)]
    Schema(FeatureError),
    #[error(transparent)]
    Catalog(CatalogError),
}

impl StartupError {
    /// Whether a startup artifact is absent, as opposed to present but unusable
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            StartupError::MissingModel(_) | StartupError::MissingSchema(_) | StartupError::MissingCatalog(_)
        )
    }

    /// Blocking message rendered in place of the form
    pub fn user_message(&self) -> String {
        if self.is_missing() {
            format!("No se encontraron los archivos necesarios: {self}")
        } else {
            format!("No se pudieron cargar los archivos necesarios: {self}")
        }
    }
}

impl From<InferenceError> for StartupError {
    fn from(e: InferenceError) -> Self {
        match e {
            InferenceError::ModelNotFound(path) => StartupError::MissingModel(path),
            other => StartupError::Model(other),
        }
    }
}

impl From<FeatureError> for StartupError {
    fn from(e: FeatureError) -> Self {
        match e {
            FeatureError::NotFound(path) => StartupError::MissingSchema(path),
            other => StartupError::Schema(other),
        }
    }
}

impl From<CatalogError> for StartupError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(path) => StartupError::MissingCatalog(path),
            other => StartupError::Catalog(other),
        }
    }
}

/// Top-level application error
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Result of one form cycle
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Prediction shown to the user
    Forecast(i64),
    /// Required fields missing; no prediction made
    Incomplete(Vec<ValidationError>),
    /// Model evaluation failed
    PredictionFailed(String),
    /// User declined the predict button
    Dismissed,
}

/// Everything loaded once at startup, immutable for the session
pub struct AppContext {
    catalog: ReferenceCatalog,
    assembler: FeatureAssembler,
    validator: Validator,
    predictor: Box<dyn Predictor>,
}

impl AppContext {
    pub fn new(
        catalog: ReferenceCatalog,
        schema: Arc<ColumnSchema>,
        validator: Validator,
        predictor: Box<dyn Predictor>,
    ) -> Self {
        Self {
            catalog,
            assembler: FeatureAssembler::new(schema),
            validator,
            predictor,
        }
    }

    /// Load the model, its column schema and the reference catalog
    pub fn load(config: &AppConfig) -> Result<Self, StartupError> {
        if !config.model_path.is_file() {
            return Err(StartupError::MissingModel(config.model_path.clone()));
        }

        let schema = Arc::new(ColumnSchema::load(&config.schema_path)?);
        let engine = InferenceEngine::load(&config.model_path, Arc::clone(&schema))?;
        let catalog = ReferenceCatalog::load(&config.catalog.path, &config.catalog.columns())?;

        info!(
            "Startup complete: model={}, {} columns",
            engine.model_path(),
            schema.len()
        );
        Ok(Self::new(
            catalog,
            schema,
            Validator::new(config.validation.clone()),
            Box::new(engine),
        ))
    }

    /// Render the input widgets and collect one input record
    pub fn read_input(&self, surface: &mut dyn FormSurface) -> Result<UserInput, SurfaceError> {
        let province = surface.select("Selecciona la Provincia", self.catalog.provinces())?;
        let diagnosis = surface.select("Selecciona el Diagnóstico", self.catalog.diagnoses())?;

        let sexes: Vec<String> = Sex::ALL.iter().map(|s| s.as_str().to_string()).collect();
        let sex = surface.select("Selecciona el Sexo", &sexes)?;

        let inhabitants = surface.number("Número de Habitantes", NumberInput::integer(100.0))?;
        let heavy_metals = surface.number(
            "Metales Pesados (As + Cd + Ni + Pb)",
            NumberInput::decimal(0.0001),
        )?;
        let contamination_index = surface.number("Índice de Contaminación", NumberInput::decimal(0.1))?;

        Ok(UserInput {
            province,
            diagnosis,
            sex,
            inhabitants,
            heavy_metals,
            contamination_index,
        })
    }

    /// Validate, assemble and predict; the model is only called on valid input
    pub fn evaluate(&self, input: &UserInput) -> CycleOutcome {
        let validation = self.validator.validate(
            input,
            self.catalog.provinces(),
            self.catalog.diagnoses(),
        );
        if !validation.valid {
            return CycleOutcome::Incomplete(validation.errors);
        }

        let row = self.assembler.assemble(&input.to_feature_input());
        match self.predictor.predict(&row) {
            Ok(prediction) => CycleOutcome::Forecast(prediction.forecast()),
            Err(e) => {
                warn!("Prediction failed: {}", e);
                CycleOutcome::PredictionFailed(e.to_string())
            }
        }
    }

    /// One render cycle: inputs, button, then message or result
    pub fn run_cycle(&self, surface: &mut dyn FormSurface) -> Result<CycleOutcome, SurfaceError> {
        let input = self.read_input(surface)?;
        if !surface.button(PREDICT_BUTTON)? {
            return Ok(CycleOutcome::Dismissed);
        }

        let outcome = self.evaluate(&input);
        match &outcome {
            CycleOutcome::Forecast(n) => {
                surface.message(MessageKind::Result, &format!("PRONÓSTICO DE HOSPITALIZACIONES: {n}"))?
            }
            CycleOutcome::Incomplete(errors) => {
                debug!("Incomplete input: {:?}", errors);
                surface.message(MessageKind::Error, INCOMPLETE_MESSAGE)?
            }
            CycleOutcome::PredictionFailed(detail) => surface.message(
                MessageKind::Error,
                &format!("Ocurrió un error durante la predicción: {detail}"),
            )?,
            CycleOutcome::Dismissed => {}
        }
        Ok(outcome)
    }

    /// Repeat cycles until the user declines the button or input closes.
    /// Returns the number of completed cycles.
    pub fn run(&self, surface: &mut dyn FormSurface) -> Result<usize, SurfaceError> {
        let mut cycles = 0;
        loop {
            match self.run_cycle(surface) {
                Ok(CycleOutcome::Dismissed) => break,
                Ok(_) => cycles += 1,
                Err(SurfaceError::Closed) => {
                    debug!("Form input closed");
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        info!("Session ended after {} cycle(s)", cycles);
        Ok(cycles)
    }
}

/// Load everything, then run the form; a startup failure is rendered as a
/// blocking message and no input widgets are shown.
pub fn run_app(config: &AppConfig, surface: &mut dyn FormSurface) -> Result<(), AppError> {
    let context = match AppContext::load(config) {
        Ok(context) => context,
        Err(e) => {
            surface.message(MessageKind::Error, &e.user_message())?;
            return Err(e.into());
        }
    };

    context.run(surface)?;
    Ok(())
}
