//! Descriptor Validator

use crate::error::ValidationError;
use crate::form::{DescriptorForm, FormText};
use material_descriptors::{CategoricalProfile, MagneticOrdering, MaterialDescriptors};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Energy per atom magnitude above which a warning is raised (eV)
    pub energy_warn_abs: f64,
    /// Atomic density magnitude above which a warning is raised
    pub density_atomic_warn_abs: f64,
    /// Volume magnitude above which a warning is raised
    pub volume_warn_abs: f64,
    /// Density magnitude above which a warning is raised
    pub density_warn_abs: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            energy_warn_abs: 1e3,
            density_atomic_warn_abs: 1e3,
            volume_warn_abs: 1e6,
            density_warn_abs: 1e3,
        }
    }
}

/// Non-blocking notice about a suspicious but accepted value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremeWarning {
    pub field: &'static str,
    pub message: &'static str,
}

/// Result of validating a submission
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// Errors keyed by field name
    pub errors: BTreeMap<String, ValidationError>,
    pub warnings: Vec<ExtremeWarning>,
}

impl ValidationReport {
    /// Whether the submission can be forwarded
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, error: ValidationError) {
        self.errors.insert(error.field().to_string(), error);
    }

    /// Field name to error message
    pub fn messages(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|(field, error)| (field.clone(), error.to_string()))
            .collect()
    }
}

/// A submission that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    pub descriptors: MaterialDescriptors,
    pub warnings: Vec<ExtremeWarning>,
}

/// Validator for descriptor submissions and categorical profiles
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a submission without parsing it
    pub fn validate(&self, form: &DescriptorForm) -> ValidationReport {
        self.check(form).0
    }

    /// Validate a submission and parse it into descriptors
    pub fn parse(&self, form: &DescriptorForm) -> Result<Validated, ValidationReport> {
        let (report, descriptors) = self.check(form);
        if !report.is_valid() {
            debug!("Submission rejected: {} field errors", report.errors.len());
            return Err(report);
        }
        Ok(Validated {
            descriptors,
            warnings: report.warnings,
        })
    }

    fn check(&self, form: &DescriptorForm) -> (ValidationReport, MaterialDescriptors) {
        let mut report = ValidationReport::default();

        let mut numeric = |field, reason, text: &FormText| {
            let value = text.number();
            if value.is_none() {
                report.push(ValidationError::NotNumeric { field, reason });
            }
            value
        };
        let energy_per_atom = numeric(
            "energy_per_atom",
            "negative energy per atom is physically valid",
            &form.energy_per_atom,
        );
        let efermi = numeric(
            "efermi",
            "Fermi energy may be above or below 0 eV",
            &form.efermi,
        );
        let formation_energy_per_atom = numeric(
            "formation_energy_per_atom",
            "negative indicates stability; positive may indicate metastability",
            &form.formation_energy_per_atom,
        );

        let mut positive = |field, reason, text: &FormText| {
            let value = text.number().filter(|v| *v > 0.0);
            if value.is_none() {
                report.push(ValidationError::NotPositive { field, reason });
            }
            value
        };
        let density_atomic = positive(
            "density_atomic",
            "density cannot be zero or negative",
            &form.density_atomic,
        );
        let volume = positive(
            "volume",
            "volume cannot be zero or negative",
            &form.volume,
        );
        let density = positive("density", "physically meaningful density", &form.density);

        let mut non_negative = |field, reason, text: &FormText| {
            let value = text.number().filter(|v| *v >= 0.0);
            if value.is_none() {
                report.push(ValidationError::Negative { field, reason });
            }
            value
        };
        let band_gap = non_negative(
            "band_gap",
            "negative band gap is unphysical",
            &form.band_gap,
        );
        let total_magnetization = non_negative(
            "total_magnetization",
            "magnetization is zero or positive",
            &form.total_magnetization,
        );
        let total_magnetization_normalized_vol = non_negative(
            "total_magnetization_normalized_vol",
            "normalized magnetization cannot be negative",
            &form.total_magnetization_normalized_vol,
        );
        let total_magnetization_normalized_formula_units = non_negative(
            "total_magnetization_normalized_formula_units",
            "normalized per formula unit cannot be negative",
            &form.total_magnetization_normalized_formula_units,
        );

        let mut count = |field, reason, text: &FormText| {
            let value = text
                .number()
                .filter(|v| *v >= 0.0 && v.fract() == 0.0 && *v <= i64::MAX as f64)
                .map(|v| v as i64);
            if value.is_none() {
                report.push(ValidationError::NotCount { field, reason });
            }
            value
        };
        let num_magnetic_sites = count(
            "num_magnetic_sites",
            "negative sites are invalid",
            &form.num_magnetic_sites,
        );
        let num_unique_magnetic_sites = count(
            "num_unique_magnetic_sites",
            "cannot be negative",
            &form.num_unique_magnetic_sites,
        );

        if form.chemsys.trim().is_empty() {
            report.push(ValidationError::Required {
                field: "chemsys",
                reason: "prediction requires chemical system",
            });
        }

        if !form.types_of_magnetic_species.trim().is_empty() {
            let invalid: Vec<String> = form
                .types_of_magnetic_species
                .split(',')
                .map(str::trim)
                .filter(|s| !is_element_symbol(s))
                .map(str::to_string)
                .collect();
            if !invalid.is_empty() {
                report.push(ValidationError::InvalidElementSymbols { invalid });
            }
        }

        if !MagneticOrdering::is_valid(&form.ordering) {
            report.push(ValidationError::InvalidOrdering {
                value: form.ordering.clone(),
            });
        }

        let elements = match parse_elements(&form.elements) {
            Ok(elements) => Some(elements),
            Err(detail) => {
                report.push(ValidationError::InvalidElements { detail });
                None
            }
        };

        report.warnings = self.extreme_warnings(form);

        let descriptors = MaterialDescriptors {
            energy_per_atom,
            density_atomic,
            efermi,
            volume,
            density,
            band_gap,
            chemsys: form.chemsys.trim().to_string(),
            is_magnetic: form.is_magnetic,
            ordering: form.ordering.clone(),
            types_of_magnetic_species: form.types_of_magnetic_species.trim().to_string(),
            is_metal: form.is_metal,
            total_magnetization,
            total_magnetization_normalized_vol,
            total_magnetization_normalized_formula_units,
            num_magnetic_sites,
            num_unique_magnetic_sites,
            formation_energy_per_atom,
            elements,
        };

        (report, descriptors)
    }

    /// Warnings for accepted values of implausible magnitude
    pub fn extreme_warnings(&self, form: &DescriptorForm) -> Vec<ExtremeWarning> {
        let checks = [
            (
                "energy_per_atom",
                &form.energy_per_atom,
                self.config.energy_warn_abs,
                "Unusually large magnitude (>|1000| eV)",
            ),
            (
                "density_atomic",
                &form.density_atomic,
                self.config.density_atomic_warn_abs,
                "Suspiciously large atomic density",
            ),
            (
                "volume",
                &form.volume,
                self.config.volume_warn_abs,
                "Volume looks extremely large",
            ),
            (
                "density",
                &form.density,
                self.config.density_warn_abs,
                "Density seems extremely high",
            ),
        ];

        checks
            .into_iter()
            .filter(|(_, text, limit, _)| text.number().is_some_and(|v| v.abs() > *limit))
            .map(|(field, _, _, message)| ExtremeWarning { field, message })
            .collect()
    }

    /// Validate a categorical profile against the feature catalogue
    pub fn validate_profile(&self, profile: &CategoricalProfile) -> ValidationReport {
        let mut report = ValidationReport::default();

        for (key, value) in profile.iter() {
            match CategoricalProfile::field(key) {
                None => report.push(ValidationError::UnknownProfileField {
                    key: key.to_string(),
                }),
                Some(field) if !field.options.iter().any(|o| *o == value) => {
                    report.push(ValidationError::InvalidProfileOption {
                        key: key.to_string(),
                        value: value.to_string(),
                        allowed: field.options.join(", "),
                    })
                }
                Some(_) => {}
            }
        }

        report
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

/// One uppercase letter, optionally followed by one lowercase letter
fn is_element_symbol(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(first), None, _) => first.is_ascii_uppercase(),
        (Some(first), Some(second), None) => {
            first.is_ascii_uppercase() && second.is_ascii_lowercase()
        }
        _ => false,
    }
}

fn parse_elements(value: &Value) -> Result<BTreeMap<String, Number>, String> {
    let parsed = match value {
        Value::String(text) => serde_json::from_str::<Value>(text).map_err(|e| e.to_string())?,
        other => other.clone(),
    };
    if !parsed.is_object() {
        return Err("Elements must be an object map of counts".to_string());
    }
    serde_json::from_value(parsed).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn valid_form() -> DescriptorForm {
        DescriptorForm {
            energy_per_atom: "-3.2".into(),
            density_atomic: "0.05".into(),
            efermi: "4.1".into(),
            volume: "120.5".into(),
            density: "7.8".into(),
            band_gap: "1.2".into(),
            chemsys: "Ag-Te".to_string(),
            total_magnetization: "0".into(),
            total_magnetization_normalized_vol: "0".into(),
            total_magnetization_normalized_formula_units: "0".into(),
            num_magnetic_sites: "0".into(),
            num_unique_magnetic_sites: "0".into(),
            formation_energy_per_atom: "-0.4".into(),
            elements: Value::String(r#"{"Ag":1,"Te":1}"#.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_form_parses() {
        let validated = Validator::default().parse(&valid_form()).unwrap();
        let d = validated.descriptors;

        assert_eq!(d.energy_per_atom, Some(-3.2));
        assert_eq!(d.num_magnetic_sites, Some(0));
        assert_eq!(d.elements.unwrap().get("Te"), Some(&Number::from(1)));
        assert!(validated.warnings.is_empty());
    }

    #[test]
    fn test_initial_form_rejects_zero_positives() {
        let report = Validator::default().validate(&DescriptorForm::initial());

        for field in ["density_atomic", "volume", "density", "chemsys"] {
            assert!(report.errors.contains_key(field), "missing error for {field}");
        }
        assert!(!report.errors.contains_key("energy_per_atom"));
        assert!(!report.errors.contains_key("elements"));
    }

    #[test]
    fn test_empty_numeric_fields() {
        let form = DescriptorForm {
            energy_per_atom: "".into(),
            efermi: "abc".into(),
            ..valid_form()
        };
        let report = Validator::default().validate(&form);

        assert_eq!(
            report.messages().get("energy_per_atom").map(String::as_str),
            Some("Must be numeric (can be negative). Reason: negative energy per atom is physically valid")
        );
        assert!(matches!(
            report.errors.get("efermi"),
            Some(ValidationError::NotNumeric { .. })
        ));
    }

    #[test]
    fn test_non_negative_and_counts() {
        let form = DescriptorForm {
            band_gap: "-0.1".into(),
            num_magnetic_sites: "1.5".into(),
            num_unique_magnetic_sites: "-1".into(),
            ..valid_form()
        };
        let report = Validator::default().validate(&form);

        assert!(matches!(report.errors.get("band_gap"), Some(ValidationError::Negative { .. })));
        assert!(matches!(
            report.errors.get("num_magnetic_sites"),
            Some(ValidationError::NotCount { .. })
        ));
        assert!(matches!(
            report.errors.get("num_unique_magnetic_sites"),
            Some(ValidationError::NotCount { .. })
        ));
    }

    #[test]
    fn test_integral_float_is_a_count() {
        let form = DescriptorForm {
            num_magnetic_sites: "3.0".into(),
            ..valid_form()
        };
        let validated = Validator::default().parse(&form).unwrap();
        assert_eq!(validated.descriptors.num_magnetic_sites, Some(3));
    }

    #[test]
    fn test_magnetic_species_symbols() {
        let validator = Validator::default();

        let ok = DescriptorForm {
            types_of_magnetic_species: "Fe, Co,Ni".to_string(),
            ..valid_form()
        };
        assert!(validator.validate(&ok).is_valid());

        let bad = DescriptorForm {
            types_of_magnetic_species: "Fe, iron, CO".to_string(),
            ..valid_form()
        };
        let report = validator.validate(&bad);
        assert_eq!(
            report.errors.get("types_of_magnetic_species"),
            Some(&ValidationError::InvalidElementSymbols {
                invalid: vec!["iron".to_string(), "CO".to_string()],
            })
        );
    }

    #[test]
    fn test_invalid_ordering() {
        let form = DescriptorForm {
            ordering: "Diamagnetic".to_string(),
            ..valid_form()
        };
        let report = Validator::default().validate(&form);
        assert_eq!(
            report.messages().get("ordering").map(String::as_str),
            Some("Invalid selection. Choose a valid ordering")
        );
    }

    #[test]
    fn test_elements_forms() {
        let validator = Validator::default();

        let object = DescriptorForm {
            elements: serde_json::json!({"Fe": 2, "O": 3}),
            ..valid_form()
        };
        assert!(validator.validate(&object).is_valid());

        for bad in [
            Value::String("not json".to_string()),
            Value::String("[1, 2]".to_string()),
            serde_json::json!({"Fe": "two"}),
            Value::Null,
        ] {
            let form = DescriptorForm {
                elements: bad,
                ..valid_form()
            };
            assert!(matches!(
                validator.validate(&form).errors.get("elements"),
                Some(ValidationError::InvalidElements { .. })
            ));
        }
    }

    #[test]
    fn test_extreme_warnings() {
        let form = DescriptorForm {
            energy_per_atom: "-2500".into(),
            volume: "2e6".into(),
            density: "1500".into(),
            ..valid_form()
        };
        let validated = Validator::default().parse(&form).unwrap();
        let fields: Vec<_> = validated.warnings.iter().map(|w| w.field).collect();

        assert_eq!(fields, vec!["energy_per_atom", "volume", "density"]);
    }

    #[test]
    fn test_profile_validation() {
        let validator = Validator::default();
        assert!(validator
            .validate_profile(&CategoricalProfile::with_defaults())
            .is_valid());

        let mut profile = CategoricalProfile::new();
        profile.set("Brittleness", "Extreme");
        profile.set("Sparkliness", "High");
        let report = validator.validate_profile(&profile);

        assert!(matches!(
            report.errors.get("Brittleness"),
            Some(ValidationError::InvalidProfileOption { .. })
        ));
        assert!(matches!(
            report.errors.get("Sparkliness"),
            Some(ValidationError::UnknownProfileField { .. })
        ));
    }

    #[test]
    fn test_element_symbol() {
        assert!(is_element_symbol("O"));
        assert!(is_element_symbol("Fe"));
        assert!(!is_element_symbol("fe"));
        assert!(!is_element_symbol("FE"));
        assert!(!is_element_symbol("Fex"));
        assert!(!is_element_symbol(""));
    }

    proptest! {
        #[test]
        fn prop_positive_fields_accept_positive_numbers(v in 1e-6f64..1e3) {
            let form = DescriptorForm {
                volume: v.to_string().into(),
                density: v.to_string().into(),
                density_atomic: v.to_string().into(),
                ..valid_form()
            };
            prop_assert!(Validator::default().validate(&form).is_valid());
        }
    }
}
