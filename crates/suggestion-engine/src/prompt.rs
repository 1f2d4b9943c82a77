//! Prompt Templates

use material_descriptors::{CategoricalProfile, MaterialDescriptors};
use std::fmt::Display;

const RESPONSE_FORMAT: &str = "Respond EXACTLY in this format:
1. First line: \"Material likely stable\" or \"Material likely unstable\"
2. Next lines (optional if unstable): reasons or suggested value ranges
3. Max 5 lines. Do NOT add extra explanation.";

const NOT_PROVIDED: &str = "not provided";

fn value<T: Display>(v: &Option<T>) -> String {
    v.as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| NOT_PROVIDED.to_string())
}

/// Prompt asking for a stability judgment over all 18 descriptors
pub fn descriptor_prompt(d: &MaterialDescriptors) -> String {
    let elements = d
        .elements
        .as_ref()
        .and_then(|e| serde_json::to_string(e).ok())
        .unwrap_or_else(|| NOT_PROVIDED.to_string());

    format!(
        "Analyze the following 18 properties of a material:

Energy per Atom: {} eV
Density (Atomic): {}
Fermi Energy: {} eV
Volume: {}
Density: {}
Band Gap: {} eV
Chemical System: {}
Is Magnetic: {}
Ordering: {}
Types of Magnetic Species: {}
Is Metal: {}
Total Magnetization: {}
Magnetization / Volume: {}
Magnetization / Formula Units: {}
Number of Magnetic Sites: {}
Number of Unique Magnetic Sites: {}
Formation Energy per Atom: {} eV
Elements: {}

{RESPONSE_FORMAT}
",
        value(&d.energy_per_atom),
        value(&d.density_atomic),
        value(&d.efermi),
        value(&d.volume),
        value(&d.density),
        value(&d.band_gap),
        d.chemsys,
        d.is_magnetic,
        d.ordering,
        d.types_of_magnetic_species,
        d.is_metal,
        value(&d.total_magnetization),
        value(&d.total_magnetization_normalized_vol),
        value(&d.total_magnetization_normalized_formula_units),
        value(&d.num_magnetic_sites),
        value(&d.num_unique_magnetic_sites),
        value(&d.formation_energy_per_atom),
        elements,
    )
}

/// Prompt asking for a stability judgment over a categorical profile
pub fn profile_prompt(profile: &CategoricalProfile) -> String {
    let mut prompt = format!(
        "Analyze the following {} qualitative properties of a material:\n\n",
        profile.len()
    );
    for (key, value) in profile.iter() {
        prompt.push_str(&format!("{key}: {value}\n"));
    }
    prompt.push('\n');
    prompt.push_str(RESPONSE_FORMAT);
    prompt.push('\n');
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Number;
    use std::collections::BTreeMap;

    #[test]
    fn test_descriptor_prompt_interpolates_fields() {
        let d = MaterialDescriptors {
            energy_per_atom: Some(-1.25),
            chemsys: "Ag-Te".to_string(),
            is_metal: true,
            num_magnetic_sites: Some(2),
            elements: Some(BTreeMap::from([("Ag".to_string(), Number::from(1))])),
            ..Default::default()
        };
        let prompt = descriptor_prompt(&d);

        assert!(prompt.starts_with("Analyze the following 18 properties of a material:"));
        assert!(prompt.contains("Energy per Atom: -1.25 eV\n"));
        assert!(prompt.contains("Volume: not provided\n"));
        assert!(prompt.contains("Chemical System: Ag-Te\n"));
        assert!(prompt.contains("Is Metal: true\n"));
        assert!(prompt.contains("Number of Magnetic Sites: 2\n"));
        assert!(prompt.contains(r#"Elements: {"Ag":1}"#));
        assert!(prompt.contains("Max 5 lines. Do NOT add extra explanation."));
    }

    #[test]
    fn test_profile_prompt_lists_features() {
        let mut profile = CategoricalProfile::new();
        profile.set("Brittleness", "High");
        profile.set("Reactivity", "Low");
        let prompt = profile_prompt(&profile);

        assert!(prompt.starts_with("Analyze the following 2 qualitative properties"));
        assert!(prompt.contains("Brittleness: High\nReactivity: Low\n"));
        assert!(prompt.contains("\"Material likely stable\""));
    }
}
