//! Reference Catalog
//!
//! Loads the historical records table once and exposes the distinct,
//! sorted province and diagnosis names used to populate form selections.

mod reference;

pub use reference::{CatalogColumns, ReferenceCatalog};

use std::path::PathBuf;
use thiserror::Error;

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read catalog: {0}")]
    Csv(#[from] csv::Error),
    #[error("Catalog has no column named {0:?}")]
    MissingColumn(String),
    #[error("Catalog has no values in column {0:?}")]
    EmptyColumn(String),
}
