//! Feature Row Assembly

use crate::schema::ColumnSchema;
use std::sync::Arc;
use tracing::debug;

/// Derived one-hot column name for a categorical selection
pub fn one_hot_column(field: &str, value: &str) -> String {
    format!("{field}_{value}")
}

/// Raw inputs keyed by model field name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureInput {
    numeric: Vec<(String, f64)>,
    categorical: Vec<(String, String)>,
}

impl FeatureInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a numeric field, placed verbatim under its own column name
    pub fn with_numeric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.numeric.push((name.into(), value));
        self
    }

    /// Add a categorical selection, encoded as `<field>_<value>`
    pub fn with_category(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.categorical.push((field.into(), value.into()));
        self
    }

    pub fn numeric(&self) -> &[(String, f64)] {
        &self.numeric
    }

    pub fn categorical(&self) -> &[(String, String)] {
        &self.categorical
    }
}

/// Single feature row aligned to a column schema
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    schema: Arc<ColumnSchema>,
    values: Vec<f64>,
}

impl FeatureRow {
    pub fn columns(&self) -> &[String] {
        self.schema.columns()
    }

    /// Values in schema order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a named column
    pub fn get(&self, column: &str) -> Option<f64> {
        self.schema.position(column).map(|i| self.values[i])
    }

    /// True when columns and their order equal `schema`
    pub fn conforms_to(&self, schema: &ColumnSchema) -> bool {
        self.values.len() == schema.len() && self.columns() == schema.columns()
    }
}

/// Builds feature rows for a fixed schema
#[derive(Debug, Clone)]
pub struct FeatureAssembler {
    schema: Arc<ColumnSchema>,
}

impl FeatureAssembler {
    pub fn new(schema: Arc<ColumnSchema>) -> Self {
        Self { schema }
    }

    /// Assemble one row: numeric values at their columns, 1 for matching
    /// one-hot columns, 0 everywhere else.
    pub fn assemble(&self, input: &FeatureInput) -> FeatureRow {
        let mut values = vec![0.0; self.schema.len()];

        for (name, value) in input.numeric() {
            match self.schema.position(name) {
                Some(i) => values[i] = *value,
                None => debug!("Numeric field {} not in schema, ignored", name),
            }
        }

        for (field, value) in input.categorical() {
            let column = one_hot_column(field, value);
            match self.schema.position(&column) {
                Some(i) => values[i] = 1.0,
                None => debug!("One-hot column {} not in schema, ignored", column),
            }
        }

        FeatureRow {
            schema: Arc::clone(&self.schema),
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Sex, UserInput};

    fn test_schema() -> Arc<ColumnSchema> {
        Arc::new(
            ColumnSchema::from_columns([
                "Habitantes",
                "Metales Pesados",
                "Indice_Contaminación",
                "Diagnóstico_X",
                "Provincia_Y",
                "Sexo_Hombres",
            ])
            .unwrap(),
        )
    }

    fn test_input(diagnosis: &str) -> UserInput {
        UserInput {
            province: "Y".to_string(),
            diagnosis: diagnosis.to_string(),
            sex: Sex::Men.as_str().to_string(),
            inhabitants: 100.0,
            heavy_metals: 0.5,
            contamination_index: 2.0,
        }
    }

    #[test]
    fn test_full_match() {
        let assembler = FeatureAssembler::new(test_schema());
        let row = assembler.assemble(&test_input("X").to_feature_input());
        assert_eq!(row.values(), &[100.0, 0.5, 2.0, 1.0, 1.0, 1.0]);
        assert!(row.conforms_to(&test_schema()));
    }

    #[test]
    fn test_unknown_category_stays_zero() {
        let assembler = FeatureAssembler::new(test_schema());
        let row = assembler.assemble(&test_input("Z").to_feature_input());
        assert_eq!(row.values(), &[100.0, 0.5, 2.0, 0.0, 1.0, 1.0]);
        assert_eq!(row.get("Diagnóstico_X"), Some(0.0));
        assert_eq!(row.get("Diagnóstico_Z"), None);
    }

    #[test]
    fn test_untouched_columns_are_zero() {
        let schema = Arc::new(
            ColumnSchema::from_columns([
                "Provincia_A",
                "Habitantes",
                "Sexo_Mujeres",
                "Provincia_Y",
                "Sexo_Hombres",
            ])
            .unwrap(),
        );
        let row = FeatureAssembler::new(schema).assemble(&test_input("X").to_feature_input());
        assert_eq!(row.values(), &[0.0, 100.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_conforms_to_checks_order() {
        let row = FeatureAssembler::new(test_schema()).assemble(&FeatureInput::new());
        let reordered = ColumnSchema::from_columns([
            "Metales Pesados",
            "Habitantes",
            "Indice_Contaminación",
            "Diagnóstico_X",
            "Provincia_Y",
            "Sexo_Hombres",
        ])
        .unwrap();
        assert!(!row.conforms_to(&reordered));
        assert!(row.values().iter().all(|v| *v == 0.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            #[test]
            fn prop_row_matches_schema(
                columns in prop::collection::hash_set("[A-Za-z_ ]{1,12}", 1..40),
                inhabitants in 1u64..10_000_000,
                heavy_metals in 0.0001f64..100.0,
                contamination_index in 0.1f64..100.0,
                province in "[A-Z][a-z]{0,8}",
                diagnosis in "[A-Z][a-z]{0,8}",
            ) {
                let schema = Arc::new(ColumnSchema::from_columns(columns).unwrap());
                let input = UserInput {
                    province,
                    diagnosis,
                    sex: Sex::Women.as_str().to_string(),
                    inhabitants: inhabitants as f64,
                    heavy_metals,
                    contamination_index,
                };
                let features = input.to_feature_input();
                let row = FeatureAssembler::new(Arc::clone(&schema)).assemble(&features);

                prop_assert_eq!(row.len(), schema.len());
                prop_assert!(row.conforms_to(&schema));

                let numeric: Vec<&str> = features.numeric().iter().map(|(n, _)| n.as_str()).collect();
                let one_hot: Vec<String> = features
                    .categorical()
                    .iter()
                    .map(|(f, v)| one_hot_column(f, v))
                    .collect();
                for (column, value) in row.columns().iter().zip(row.values()) {
                    if !numeric.contains(&column.as_str()) && !one_hot.contains(column) {
                        prop_assert_eq!(*value, 0.0);
                    }
                }
            }
        }
    }
}
