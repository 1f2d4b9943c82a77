//! Descriptor Stability Heuristics
//!
//! Threshold checks over a [`MaterialDescriptors`] record. A numeric
//! descriptor that is absent or NaN never satisfies its expectation, so the
//! rule owning that field reports it.

use crate::engine::{Rule, RuleSet};
use crate::report::AnalysisReport;
use material_descriptors::{MagneticOrdering, MaterialDescriptors};

const NON_NEGATIVE: &str = "Provide a non-negative value";

fn outside(value: Option<f64>, min: f64, max: f64) -> bool {
    !value.is_some_and(|v| (min..=max).contains(&v))
}

fn not_positive(value: Option<f64>) -> bool {
    !value.is_some_and(|v| v > 0.0)
}

fn negative(value: Option<f64>) -> bool {
    !value.is_some_and(|v| v >= 0.0)
}

fn negative_count(value: Option<i64>) -> bool {
    !value.is_some_and(|v| v >= 0)
}

fn above(value: Option<f64>, max: f64) -> bool {
    !value.is_some_and(|v| v <= max)
}

fn duplicate_chemsys(d: &MaterialDescriptors) -> bool {
    match d.chemsys_elements().as_slice() {
        [first, second] => first == second,
        _ => false,
    }
}

/// Descriptor heuristics, in report order
pub static DESCRIPTOR_RULES: &[Rule<MaterialDescriptors>] = &[
    Rule {
        check: |d| outside(d.energy_per_atom, -5.0, 5.0),
        issue: "Energy per atom is unusually high or low",
        suggestion: "Keep energy per atom in a reasonable range (-5 to 5 eV)",
    },
    Rule {
        check: |d| not_positive(d.density_atomic),
        issue: "Atomic density must be positive",
        suggestion: "Set atomic density to a positive value",
    },
    Rule {
        check: |d| outside(d.efermi, 0.0, 20.0),
        issue: "Fermi energy is outside normal range",
        suggestion: "Typical Fermi energy: 0 - 20 eV",
    },
    Rule {
        check: |d| not_positive(d.volume),
        issue: "Volume must be positive",
        suggestion: "Provide a positive volume",
    },
    Rule {
        check: |d| not_positive(d.density),
        issue: "Density must be positive",
        suggestion: "Provide a positive density",
    },
    Rule {
        check: |d| !d.is_metal && outside(d.band_gap, 0.0, 10.0),
        issue: "Band gap is outside typical range for non-metals",
        suggestion: "Set band gap between 0 and 10 eV",
    },
    Rule {
        check: |d| d.is_metal && above(d.band_gap, 0.5),
        issue: "Metals should have small/zero band gap",
        suggestion: "Set band gap to 0.0-0.3 eV for metals",
    },
    Rule {
        check: duplicate_chemsys,
        issue: "Chemical system has duplicate elements",
        suggestion: "Choose different elements (e.g. Ag-O, Fe-Ni, Al-Mg)",
    },
    Rule {
        check: |d| d.is_magnetic && d.num_magnetic_sites == Some(0),
        issue: "Magnetic sites should be > 0 for magnetic materials",
        suggestion: "Set num_magnetic_sites to at least 1",
    },
    Rule {
        check: |d| !MagneticOrdering::is_valid(&d.ordering),
        issue: "Invalid ordering type",
        suggestion: "Choose a valid ordering: Ferromagnetic, Antiferromagnetic, Paramagnetic, Ferrimagnetic, Non-magnetic",
    },
    Rule {
        check: |d| d.is_magnetic && d.types_of_magnetic_species.trim().is_empty(),
        issue: "Magnetic species not provided for magnetic material",
        suggestion: "Specify types of magnetic species, e.g. Fe, Co, Ni",
    },
    Rule {
        check: |d| negative(d.total_magnetization),
        issue: "Total magnetization cannot be negative",
        suggestion: NON_NEGATIVE,
    },
    Rule {
        check: |d| negative(d.total_magnetization_normalized_vol),
        issue: "Magnetization per volume cannot be negative",
        suggestion: NON_NEGATIVE,
    },
    Rule {
        check: |d| negative(d.total_magnetization_normalized_formula_units),
        issue: "Magnetization per formula unit cannot be negative",
        suggestion: NON_NEGATIVE,
    },
    Rule {
        check: |d| negative_count(d.num_magnetic_sites),
        issue: "Number of magnetic sites cannot be negative",
        suggestion: NON_NEGATIVE,
    },
    Rule {
        check: |d| negative_count(d.num_unique_magnetic_sites),
        issue: "Number of unique magnetic sites cannot be negative",
        suggestion: NON_NEGATIVE,
    },
    Rule {
        check: |d| above(d.formation_energy_per_atom, 2.0),
        issue: "Formation energy too high for stability",
        suggestion: "Try negative formation energy (-0.1 to -2 eV) for stable materials",
    },
    Rule {
        check: |d| !d.has_elements(),
        issue: "No elements provided",
        suggestion: "Provide at least one element with its count",
    },
];

static DESCRIPTOR_RULESET: RuleSet<MaterialDescriptors> =
    RuleSet::new("descriptors", DESCRIPTOR_RULES);

/// Judge a descriptor record against the stability heuristics
pub fn analyze(descriptors: &MaterialDescriptors) -> AnalysisReport {
    DESCRIPTOR_RULESET.evaluate(descriptors)
}
