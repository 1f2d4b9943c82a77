//! Categorical Material Profile
//!
//! Qualitative (Low/Medium/High style) description of a material, submitted
//! to the unified predictor as its `user_input`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const SCALE: &[&str] = &["Low", "Medium", "High"];

/// Three-step qualitative scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value outside the Low/Medium/High scale
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown level: {0:?}")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Level::Low),
            "Medium" => Ok(Level::Medium),
            "High" => Ok(Level::High),
            other => Err(ParseLevelError(other.to_string())),
        }
    }
}

/// A known profile feature and its allowed values
#[derive(Debug, Clone, Copy)]
pub struct ProfileField {
    pub key: &'static str,
    pub options: &'static [&'static str],
}

/// Related profile features
#[derive(Debug, Clone, Copy)]
pub struct FieldGroup {
    pub title: &'static str,
    pub fields: &'static [ProfileField],
}

const fn scaled(key: &'static str) -> ProfileField {
    ProfileField { key, options: SCALE }
}

/// Catalogue of the known profile features, grouped
pub static PROFILE_GROUPS: &[FieldGroup] = &[
    FieldGroup {
        title: "Electrical Properties",
        fields: &[
            scaled("Conductivity"),
            scaled("Resistivity"),
            scaled("Dielectric Constant"),
            ProfileField { key: "Semiconductor Type", options: &["n-type", "p-type"] },
            scaled("Electrical Breakdown Strength"),
        ],
    },
    FieldGroup {
        title: "Mechanical Properties",
        fields: &[
            scaled("Elasticity"),
            scaled("Plasticity"),
            scaled("Ductility"),
            scaled("Toughness"),
            scaled("Brittleness"),
            scaled("Hardness"),
            scaled("Strength"),
            scaled("Flexibility"),
            ProfileField { key: "Weight Type", options: &["Light", "Medium", "Heavy"] },
        ],
    },
    FieldGroup {
        title: "Thermal Properties",
        fields: &[
            scaled("Thermal Conductivity"),
            scaled("Specific Heat"),
            scaled("Thermal Expansion"),
        ],
    },
    FieldGroup {
        title: "Chemical Properties",
        fields: &[
            scaled("Corrosion Resistance"),
            scaled("Reactivity"),
            scaled("pH Stability"),
            scaled("Oxidation Potential"),
        ],
    },
    FieldGroup {
        title: "Magnetic Properties",
        fields: &[
            ProfileField {
                key: "Magnetic Type",
                options: &["Ferromagnetic", "Paramagnetic", "Diamagnetic"],
            },
            scaled("Magnetization Strength"),
            scaled("Magnetic Susceptibility"),
        ],
    },
    FieldGroup {
        title: "Optical Properties",
        fields: &[
            scaled("Refractive Index"),
            scaled("Transparency"),
            scaled("Absorption Coefficient"),
            ProfileField {
                key: "Color Appearance",
                options: &["Silvery", "Gray", "Copper", "Transparent"],
            },
        ],
    },
    FieldGroup {
        title: "Material Classification",
        fields: &[
            ProfileField { key: "Chemical System", options: &["Fe-O", "Al-O", "Si-C", "Cu-Zn"] },
            ProfileField { key: "Material Type", options: &["Metal", "Ceramic", "Polymer"] },
            ProfileField {
                key: "Processing Type",
                options: &["Forged", "Cast", "Rolled", "3D Printed"],
            },
        ],
    },
];

/// Feature name to categorical value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoricalProfile(BTreeMap<String, String>);

impl CategoricalProfile {
    /// Empty profile
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Profile with every known feature set to its first option
    pub fn with_defaults() -> Self {
        let values = Self::known_fields()
            .filter_map(|f| f.options.first().map(|o| (f.key.to_string(), o.to_string())))
            .collect();
        Self(values)
    }

    /// Iterate over every catalogued feature
    pub fn known_fields() -> impl Iterator<Item = &'static ProfileField> {
        PROFILE_GROUPS.iter().flat_map(|g| g.fields.iter())
    }

    /// Look up a catalogued feature by key
    pub fn field(key: &str) -> Option<&'static ProfileField> {
        Self::known_fields().find(|f| f.key == key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value of `key` on the Low/Medium/High scale, if it parses as one
    pub fn level(&self, key: &str) -> Option<Level> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for CategoricalProfile {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
