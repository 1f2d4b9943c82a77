//! Numeric Descriptor Record

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeMap;

/// Descriptor record submitted for stability prediction.
///
/// Numeric fields are optional: a record decoded from a partially filled
/// request keeps absent values as `None` rather than coercing them to zero.
/// Range expectations are documented per field but are not enforced here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialDescriptors {
    /// Energy per atom (eV), expected in [-5, 5]
    pub energy_per_atom: Option<f64>,
    /// Atomic density, expected > 0
    pub density_atomic: Option<f64>,
    /// Fermi energy (eV), expected in [0, 20]
    pub efermi: Option<f64>,
    /// Cell volume, expected > 0
    pub volume: Option<f64>,
    /// Mass density, expected > 0
    pub density: Option<f64>,
    /// Band gap (eV), [0, 10] for non-metals, at most 0.5 for metals
    pub band_gap: Option<f64>,
    /// Dash-separated chemical system, e.g. "Ag-Te"
    pub chemsys: String,
    pub is_magnetic: bool,
    /// Magnetic ordering as submitted (see [`crate::MagneticOrdering`])
    pub ordering: String,
    /// Comma-separated element symbols, required when magnetic
    pub types_of_magnetic_species: String,
    pub is_metal: bool,
    pub total_magnetization: Option<f64>,
    pub total_magnetization_normalized_vol: Option<f64>,
    pub total_magnetization_normalized_formula_units: Option<f64>,
    pub num_magnetic_sites: Option<i64>,
    pub num_unique_magnetic_sites: Option<i64>,
    /// Formation energy per atom (eV), expected at most 2
    pub formation_energy_per_atom: Option<f64>,
    /// Element symbol to count, kept as submitted (`1` stays `1`)
    pub elements: Option<BTreeMap<String, Number>>,
}

impl MaterialDescriptors {
    /// Tokens of the chemical system, in submission order
    pub fn chemsys_elements(&self) -> Vec<&str> {
        if self.chemsys.is_empty() {
            return Vec::new();
        }
        self.chemsys.split('-').collect()
    }

    /// Whether at least one element count is present
    pub fn has_elements(&self) -> bool {
        self.elements.as_ref().is_some_and(|e| !e.is_empty())
    }
}
