//! Feature Engineering Engine
//!
//! Aligns form inputs to the column schema the forecast model was trained on.

mod features;
mod input;
mod schema;

pub use features::{one_hot_column, FeatureAssembler, FeatureInput, FeatureRow};
pub use input::{Sex, UserInput, CONTAMINATION_INDEX, DIAGNOSIS, HEAVY_METALS, INHABITANTS, PROVINCE, SEX};
pub use schema::ColumnSchema;

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading or building a column schema
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("Schema file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read schema: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed schema: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Schema has no columns")]
    EmptySchema,
    #[error("Duplicate column in schema: {0}")]
    DuplicateColumn(String),
}
