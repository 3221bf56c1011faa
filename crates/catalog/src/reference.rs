//! Catalog Loading

use crate::CatalogError;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::{info, warn};

/// Header names of the columns the catalog reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogColumns {
    pub province: String,
    pub diagnosis: String,
}

impl Default for CatalogColumns {
    fn default() -> Self {
        Self {
            province: "Provincia".to_string(),
            diagnosis: "Diagnóstico".to_string(),
        }
    }
}

/// Distinct valid selection values, sorted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceCatalog {
    provinces: Vec<String>,
    diagnoses: Vec<String>,
}

impl ReferenceCatalog {
    /// Build a catalog from raw values, deduplicating and sorting them
    pub fn from_values<P, D>(provinces: P, diagnoses: D) -> Self
    where
        P: IntoIterator<Item = String>,
        D: IntoIterator<Item = String>,
    {
        Self {
            provinces: provinces.into_iter().collect::<BTreeSet<_>>().into_iter().collect(),
            diagnoses: diagnoses.into_iter().collect::<BTreeSet<_>>().into_iter().collect(),
        }
    }

    /// Read a CSV table with a header row
    pub fn from_reader<R: Read>(reader: R, columns: &CatalogColumns) -> Result<Self, CatalogError> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = reader.headers()?.clone();
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == name)
                .ok_or_else(|| CatalogError::MissingColumn(name.to_string()))
        };
        let province_idx = find(&columns.province)?;
        let diagnosis_idx = find(&columns.diagnosis)?;

        let mut provinces = BTreeSet::new();
        let mut diagnoses = BTreeSet::new();
        let mut skipped = 0usize;
        let mut rows = 0usize;

        for record in reader.records() {
            let record = record?;
            rows += 1;
            for (idx, set) in [(province_idx, &mut provinces), (diagnosis_idx, &mut diagnoses)] {
                match record.get(idx) {
                    Some(value) if !value.is_empty() => {
                        set.insert(value.to_string());
                    }
                    _ => skipped += 1,
                }
            }
        }

        if skipped > 0 {
            warn!("Skipped {} empty catalog cells in {} rows", skipped, rows);
        }
        if provinces.is_empty() {
            return Err(CatalogError::EmptyColumn(columns.province.clone()));
        }
        if diagnoses.is_empty() {
            return Err(CatalogError::EmptyColumn(columns.diagnosis.clone()));
        }

        Ok(Self {
            provinces: provinces.into_iter().collect(),
            diagnoses: diagnoses.into_iter().collect(),
        })
    }

    /// Load the catalog from a CSV file
    pub fn load(path: impl AsRef<Path>, columns: &CatalogColumns) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CatalogError::NotFound(path.to_path_buf()),
            _ => CatalogError::Csv(e.into()),
        })?;

        let catalog = Self::from_reader(file, columns)?;
        info!(
            "Loaded reference catalog from {}: {} provinces, {} diagnoses",
            path.display(),
            catalog.provinces.len(),
            catalog.diagnoses.len()
        );
        Ok(catalog)
    }

    /// Valid province names, sorted
    pub fn provinces(&self) -> &[String] {
        &self.provinces
    }

    /// Valid diagnosis names, sorted
    pub fn diagnoses(&self) -> &[String] {
        &self.diagnoses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
Año,Provincia,Diagnóstico,Sexo,Habitantes
2019,Lima,Asma,Hombres,9000000
2019,Callao,Asma,Mujeres,1000000
2020,Lima,Bronquitis,Hombres,9100000
2020,Arequipa,,Mujeres,1400000
";

    #[test]
    fn test_distinct_sorted_values() {
        let catalog = ReferenceCatalog::from_reader(TABLE.as_bytes(), &CatalogColumns::default()).unwrap();
        assert_eq!(catalog.provinces(), &["Arequipa", "Callao", "Lima"]);
        assert_eq!(catalog.diagnoses(), &["Asma", "Bronquitis"]);
    }

    #[test]
    fn test_custom_columns() {
        let data = "Province,Diagnosis\nB,d2\nA,d1\nB,d1\n";
        let columns = CatalogColumns {
            province: "Province".to_string(),
            diagnosis: "Diagnosis".to_string(),
        };
        let catalog = ReferenceCatalog::from_reader(data.as_bytes(), &columns).unwrap();
        assert_eq!(catalog.provinces(), &["A", "B"]);
        assert_eq!(catalog.diagnoses(), &["d1", "d2"]);
    }

    #[test]
    fn test_missing_column() {
        let data = "Provincia,Sexo\nLima,Hombres\n";
        let err = ReferenceCatalog::from_reader(data.as_bytes(), &CatalogColumns::default()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn(name) if name == "Diagnóstico"));
    }

    #[test]
    fn test_empty_table() {
        let data = "Provincia,Diagnóstico\n";
        let err = ReferenceCatalog::from_reader(data.as_bytes(), &CatalogColumns::default()).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyColumn(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ReferenceCatalog::load("/nonexistent/Tabla_Final.csv", &CatalogColumns::default()).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[test]
    fn test_from_values() {
        let catalog = ReferenceCatalog::from_values(
            ["Y".to_string(), "A".to_string(), "Y".to_string()],
            ["X".to_string()],
        );
        assert_eq!(catalog.provinces(), &["A", "Y"]);
        assert_eq!(catalog.diagnoses(), &["X"]);
    }
}
