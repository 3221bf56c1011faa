//! User Input Record

use crate::features::FeatureInput;

/// Numeric column: population count
pub const INHABITANTS: &str = "Habitantes";
/// Numeric column: heavy metals composite (As + Cd + Ni + Pb)
pub const HEAVY_METALS: &str = "Metales Pesados";
/// Numeric column: contamination index
pub const CONTAMINATION_INDEX: &str = "Indice_Contaminación";

/// Categorical field: diagnosis
pub const DIAGNOSIS: &str = "Diagnóstico";
/// Categorical field: province
pub const PROVINCE: &str = "Provincia";
/// Categorical field: sex
pub const SEX: &str = "Sexo";

/// Sex category as encoded in the training data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sex {
    #[default]
    Men,
    Women,
}

impl Sex {
    /// All values, in form order
    pub const ALL: [Sex; 2] = [Sex::Men, Sex::Women];

    /// Label used in the one-hot column names
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Men => "Hombres",
            Sex::Women => "Mujeres",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sex| sex.as_str() == label)
    }
}

/// Selections and numeric entries for one interaction, as entered.
/// Values are checked by the validator, not here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserInput {
    pub province: String,
    pub diagnosis: String,
    /// Sex label, one of [`Sex::as_str`] when valid
    pub sex: String,
    /// Population count; a whole number when valid
    pub inhabitants: f64,
    pub heavy_metals: f64,
    pub contamination_index: f64,
}

impl UserInput {
    /// Map the record onto model field names
    pub fn to_feature_input(&self) -> FeatureInput {
        FeatureInput::new()
            .with_numeric(INHABITANTS, self.inhabitants)
            .with_numeric(HEAVY_METALS, self.heavy_metals)
            .with_numeric(CONTAMINATION_INDEX, self.contamination_index)
            .with_category(DIAGNOSIS, &self.diagnosis)
            .with_category(PROVINCE, &self.province)
            .with_category(SEX, &self.sex)
    }
}
