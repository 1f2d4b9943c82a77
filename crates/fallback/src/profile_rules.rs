//! Categorical Profile Heuristics

use crate::engine::{Rule, RuleSet};
use crate::report::AnalysisReport;
use material_descriptors::{CategoricalProfile, Level};

/// Profile heuristics, in report order. Values that are absent or off the
/// Low/Medium/High scale never trigger a rule.
pub static PROFILE_RULES: &[Rule<CategoricalProfile>] = &[
    Rule {
        check: |p| p.level("Brittleness") == Some(Level::High),
        issue: "High brittleness lowers mechanical stability",
        suggestion: "Reduce brittleness to Low or Medium (e.g. through alloying or heat treatment)",
    },
    Rule {
        check: |p| p.level("Reactivity") == Some(Level::High),
        issue: "High reactivity suggests chemical instability",
        suggestion: "Lower reactivity by choosing more inert constituents",
    },
    Rule {
        check: |p| p.level("Corrosion Resistance") == Some(Level::Low),
        issue: "Low corrosion resistance limits long-term stability",
        suggestion: "Improve corrosion resistance with protective coatings or passivating elements",
    },
];

static PROFILE_RULESET: RuleSet<CategoricalProfile> = RuleSet::new("profile", PROFILE_RULES);

/// Judge a categorical profile against the stability heuristics
pub fn analyze_profile(profile: &CategoricalProfile) -> AnalysisReport {
    PROFILE_RULESET.evaluate(profile)
}
