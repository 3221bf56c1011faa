//! Form Input Validator

use crate::error::ValidationError;
use feature_engine::{
    Sex, UserInput, CONTAMINATION_INDEX, DIAGNOSIS, HEAVY_METALS, INHABITANTS, PROVINCE, SEX,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration
///
/// Each flag marks a numeric field as required: its default value (zero)
/// counts as "not filled in" and blocks prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub require_inhabitants: bool,
    pub require_heavy_metals: bool,
    pub require_contamination_index: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            require_inhabitants: true,
            require_heavy_metals: true,
            require_contamination_index: true,
        }
    }
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    fn from_errors(errors: Vec<ValidationError>, fields_checked: usize) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            fields_checked,
        }
    }
}

/// Validator for one form submission
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Check a numeric entry: finite, non-negative, and positive when required
    pub fn validate_number(
        &self,
        field: &'static str,
        value: f64,
        required: bool,
    ) -> Result<(), ValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::InvalidValue { field, value });
        }
        if required && value <= 0.0 {
            return Err(ValidationError::MissingField(field));
        }
        Ok(())
    }

    /// Check a count: like [`Self::validate_number`], and a whole number
    pub fn validate_count(
        &self,
        field: &'static str,
        value: f64,
        required: bool,
    ) -> Result<(), ValidationError> {
        self.validate_number(field, value, required)?;
        if value.fract() != 0.0 {
            return Err(ValidationError::InvalidValue { field, value });
        }
        Ok(())
    }

    /// Check that a selection is one of the allowed values
    pub fn validate_selection(
        &self,
        field: &'static str,
        value: &str,
        allowed: &[String],
    ) -> Result<(), ValidationError> {
        if allowed.iter().any(|v| v == value) {
            Ok(())
        } else {
            Err(ValidationError::UnknownSelection {
                field,
                value: value.to_string(),
            })
        }
    }

    /// Completeness check of the three numeric fields
    pub fn validate_numbers(&self, input: &UserInput) -> ValidationResult {
        let checks = [
            (HEAVY_METALS, input.heavy_metals, self.config.require_heavy_metals),
            (
                CONTAMINATION_INDEX,
                input.contamination_index,
                self.config.require_contamination_index,
            ),
        ];

        let errors: Vec<ValidationError> = self
            .validate_count(INHABITANTS, input.inhabitants, self.config.require_inhabitants)
            .err()
            .into_iter()
            .chain(
                checks
                    .iter()
                    .filter_map(|&(field, value, required)| self.validate_number(field, value, required).err()),
            )
            .collect();

        ValidationResult::from_errors(errors, checks.len() + 1)
    }

    /// Full check: numeric completeness plus province, diagnosis and sex membership
    pub fn validate(
        &self,
        input: &UserInput,
        provinces: &[String],
        diagnoses: &[String],
    ) -> ValidationResult {
        let numbers = self.validate_numbers(input);
        let mut errors = numbers.errors;

        if let Err(e) = self.validate_selection(PROVINCE, &input.province, provinces) {
            errors.push(e);
        }
        if let Err(e) = self.validate_selection(DIAGNOSIS, &input.diagnosis, diagnoses) {
            errors.push(e);
        }
        if Sex::from_label(&input.sex).is_none() {
            errors.push(ValidationError::UnknownSelection {
                field: SEX,
                value: input.sex.clone(),
            });
        }

        if !errors.is_empty() {
            debug!("Input rejected: {} error(s)", errors.len());
        }
        ValidationResult::from_errors(errors, numbers.fields_checked + 3)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
