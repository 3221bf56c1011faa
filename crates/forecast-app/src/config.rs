//! Application configuration

use catalog::CatalogColumns;
use config::{Config, ConfigError, Environment, File, FileFormat};
use data_validator::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "forecast";

/// Reference catalog location and column names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub path: PathBuf,
    pub province_column: String,
    pub diagnosis_column: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let columns = CatalogColumns::default();
        Self {
            path: PathBuf::from("datos").join("Tabla_Final.csv"),
            province_column: columns.province,
            diagnosis_column: columns.diagnosis,
        }
    }
}

impl CatalogConfig {
    pub fn columns(&self) -> CatalogColumns {
        CatalogColumns {
            province: self.province_column.clone(),
            diagnosis: self.diagnosis_column.clone(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Trained model (ONNX)
    pub model_path: PathBuf,
    /// JSON array of the columns the model expects
    pub schema_path: PathBuf,
    pub catalog: CatalogConfig,
    pub validation: ValidationConfig,
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("modelo_random_forest.onnx"),
            schema_path: PathBuf::from("columnas_modelo.json"),
            catalog: CatalogConfig::default(),
            validation: ValidationConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `forecast.toml` (optional) and `FORECAST_*` environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load from the named config file (extension optional) and the environment
    pub fn load_from(name: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(name).required(false))
            .add_source(
                Environment::with_prefix("FORECAST")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Apply an explicit config source on top of the defaults
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
