//! Prediction Client
//!
//! Talks to the stability prediction backend:
//! - `/predict`: energy above hull from numeric descriptors
//! - `/predict/unified`: property predictions from a categorical profile
//!
//! The recommendation advisor compares the latest quick and accurate runs.

mod advisor;
mod client;
mod error;

pub use advisor::{Recommendation, RecommendationAdvisor};
pub use client::{
    EnergyAboveHull, PredictionClient, PredictionConfig, PredictionMode, StabilityPrediction,
    UnifiedPrediction, UnifiedRequest,
};
pub use error::PredictionError;
