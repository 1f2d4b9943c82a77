//! Rule-Based Fallback System
//!
//! Provides rule-based stability heuristics when remote suggestion
//! providers are unavailable. Both analyzers are lists of independent
//! rules evaluated by the same [`RuleSet`] engine.

mod engine;
mod profile_rules;
mod report;
mod rules;

pub use engine::{Rule, RuleSet};
pub use profile_rules::{analyze_profile, PROFILE_RULES};
pub use report::{AnalysisReport, Finding};
pub use rules::{analyze, DESCRIPTOR_RULES};
