//! Expected Column Schema

use crate::FeatureError;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;
use tracing::info;

/// Ordered list of column names the model requires at evaluation time
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSchema {
    columns: Vec<String>,
    /// Column name -> position
    index: HashMap<String, usize>,
}

impl ColumnSchema {
    /// Build a schema from an ordered list of column names
    pub fn from_columns<I, S>(columns: I) -> Result<Self, FeatureError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(FeatureError::EmptySchema);
        }

        let mut index = HashMap::with_capacity(columns.len());
        for (position, name) in columns.iter().enumerate() {
            if index.insert(name.clone(), position).is_some() {
                return Err(FeatureError::DuplicateColumn(name.clone()));
            }
        }

        Ok(Self { columns, index })
    }

    /// Parse a JSON array of column names
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FeatureError> {
        let columns: Vec<String> = serde_json::from_reader(reader)?;
        Self::from_columns(columns)
    }

    /// Load the schema artifact from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FeatureError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => FeatureError::NotFound(path.to_path_buf()),
            _ => FeatureError::Io(e),
        })?;

        let schema = Self::from_reader(BufReader::new(file))?;
        info!("Loaded column schema from {}: {} columns", path.display(), schema.len());
        Ok(schema)
    }

    /// Position of a column, if present
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Column names in model order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
