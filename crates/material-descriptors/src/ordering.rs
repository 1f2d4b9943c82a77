//! Magnetic Ordering

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Magnetic ordering of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MagneticOrdering {
    Ferromagnetic,
    Antiferromagnetic,
    Paramagnetic,
    Ferrimagnetic,
    #[serde(rename = "Non-magnetic")]
    NonMagnetic,
    /// No ordering given (empty string)
    #[serde(rename = "")]
    Unspecified,
}

impl MagneticOrdering {
    /// All allowed orderings
    pub const ALL: [MagneticOrdering; 6] = [
        MagneticOrdering::Ferromagnetic,
        MagneticOrdering::Antiferromagnetic,
        MagneticOrdering::Paramagnetic,
        MagneticOrdering::Ferrimagnetic,
        MagneticOrdering::NonMagnetic,
        MagneticOrdering::Unspecified,
    ];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MagneticOrdering::Ferromagnetic => "Ferromagnetic",
            MagneticOrdering::Antiferromagnetic => "Antiferromagnetic",
            MagneticOrdering::Paramagnetic => "Paramagnetic",
            MagneticOrdering::Ferrimagnetic => "Ferrimagnetic",
            MagneticOrdering::NonMagnetic => "Non-magnetic",
            MagneticOrdering::Unspecified => "",
        }
    }

    /// Whether `value` names an allowed ordering
    pub fn is_valid(value: &str) -> bool {
        value.parse::<MagneticOrdering>().is_ok()
    }
}

impl fmt::Display for MagneticOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown magnetic ordering
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown magnetic ordering: {0:?}")]
pub struct ParseOrderingError(pub String);

impl FromStr for MagneticOrdering {
    type Err = ParseOrderingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| ParseOrderingError(s.to_string()))
    }
}
