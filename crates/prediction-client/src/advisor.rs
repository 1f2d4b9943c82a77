//! Recommendation Advisor
//!
//! Remembers the latest quick and accurate property predictions and turns
//! the pair into a single optimisation hint.

use crate::client::{PredictionMode, UnifiedPrediction};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

/// Density gap between modes that warrants a hint
const DENSITY_TOLERANCE: f64 = 0.5;

const DENSITY_KEY: &str = "density";
const CONDUCTIVITY_KEY: &str = "Thermal Conductivity";

/// Optimisation hint for a unified prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    ImproveStability,
    MatchDensity,
    AdjustConductivity,
    Optimized,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::ImproveStability => {
                "Reduce brittleness and reactivity to improve stability."
            }
            Recommendation::MatchDensity => "Match density closer to accurate mode predictions.",
            Recommendation::AdjustConductivity => {
                "Adjust conductivity values closer to accurate prediction."
            }
            Recommendation::Optimized => "Material appears stable and optimized.",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Cache of the last run per mode
#[derive(Debug, Clone, Default)]
pub struct RecommendationAdvisor {
    quick: Option<Map<String, Value>>,
    accurate: Option<Map<String, Value>>,
}

impl RecommendationAdvisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `prediction` as the latest `mode` run and recommend
    pub fn recommend(
        &mut self,
        mode: PredictionMode,
        prediction: &UnifiedPrediction,
    ) -> Recommendation {
        let properties = Some(prediction.predicted_properties.clone());
        match mode {
            PredictionMode::Quick => self.quick = properties,
            PredictionMode::Accurate => self.accurate = properties,
        }

        let recommendation = self.evaluate(prediction);
        debug!("{} run: {:?}", mode, recommendation);
        recommendation
    }

    fn evaluate(&self, prediction: &UnifiedPrediction) -> Recommendation {
        if prediction.is_unstable() {
            return Recommendation::ImproveStability;
        }

        let (Some(quick), Some(accurate)) = (&self.quick, &self.accurate) else {
            return Recommendation::Optimized;
        };

        let densities = (
            quick.get(DENSITY_KEY).and_then(numeric),
            accurate.get(DENSITY_KEY).and_then(numeric),
        );
        if let (Some(q), Some(a)) = densities {
            if (q - a).abs() > DENSITY_TOLERANCE {
                return Recommendation::MatchDensity;
            }
        }

        match (quick.get(CONDUCTIVITY_KEY), accurate.get(CONDUCTIVITY_KEY)) {
            (Some(q), Some(a)) if present(q) && present(a) && q != a => {
                Recommendation::AdjustConductivity
            }
            _ => Recommendation::Optimized,
        }
    }

    /// Last cached properties for `mode`
    pub fn cached(&self, mode: PredictionMode) -> Option<&Map<String, Value>> {
        match mode {
            PredictionMode::Quick => self.quick.as_ref(),
            PredictionMode::Accurate => self.accurate.as_ref(),
        }
    }

    pub fn clear(&mut self) {
        self.quick = None;
        self.accurate = None;
    }
}

/// A number, or a string holding one
fn numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

fn present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
