//! Descriptor Submission Form

use crate::validator::{ValidationReport, Validator};
use material_descriptors::MaterialDescriptors;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A form value as typed by the user.
///
/// Accepts a JSON string, a JSON number, or `null` (empty).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormText(String);

impl FormText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the value is empty or whitespace
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// The value as a finite number, if it is one
    pub fn number(&self) -> Option<f64> {
        let text = self.0.trim();
        if text.is_empty() {
            return None;
        }
        text.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl From<&str> for FormText {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for FormText {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for FormText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Text(text)) => Self(text),
            Some(Raw::Number(number)) => Self(number.to_string()),
            None => Self::default(),
        })
    }
}

/// Descriptor submission before validation.
///
/// Numeric fields hold the text typed into the form. `elements` is either
/// the JSON text of the element counts or the counts object itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptorForm {
    pub energy_per_atom: FormText,
    pub density_atomic: FormText,
    pub efermi: FormText,
    pub volume: FormText,
    pub density: FormText,
    pub band_gap: FormText,
    pub chemsys: String,
    pub is_magnetic: bool,
    pub ordering: String,
    pub types_of_magnetic_species: String,
    pub is_metal: bool,
    pub total_magnetization: FormText,
    pub total_magnetization_normalized_vol: FormText,
    pub total_magnetization_normalized_formula_units: FormText,
    pub num_magnetic_sites: FormText,
    pub num_unique_magnetic_sites: FormText,
    pub formation_energy_per_atom: FormText,
    pub elements: Value,
}

impl DescriptorForm {
    /// The form as first presented: zeroed numbers and a silver telluride
    /// composition.
    pub fn initial() -> Self {
        let zero = || FormText::from("0");
        Self {
            energy_per_atom: zero(),
            density_atomic: zero(),
            efermi: zero(),
            volume: zero(),
            density: zero(),
            band_gap: zero(),
            total_magnetization: zero(),
            total_magnetization_normalized_vol: zero(),
            total_magnetization_normalized_formula_units: zero(),
            num_magnetic_sites: zero(),
            num_unique_magnetic_sites: zero(),
            formation_energy_per_atom: zero(),
            elements: Value::String(r#"{"Ag":1,"Te":1}"#.to_string()),
            ..Default::default()
        }
    }

    /// Parse with the default validator, dropping warnings
    pub fn parse(&self) -> Result<MaterialDescriptors, ValidationReport> {
        Validator::default()
            .parse(self)
            .map(|validated| validated.descriptors)
    }
}
