//! Rule Evaluation Engine

use crate::report::{AnalysisReport, Finding};
use tracing::debug;

/// A single heuristic: when `check` holds for the input, the rule reports
/// `issue` and recommends `suggestion`.
pub struct Rule<T> {
    pub check: fn(&T) -> bool,
    pub issue: &'static str,
    pub suggestion: &'static str,
}

impl<T> Rule<T> {
    /// Whether this rule reports an issue for `input`
    pub fn applies(&self, input: &T) -> bool {
        (self.check)(input)
    }

    fn finding(&self) -> Finding {
        Finding {
            issue: self.issue,
            suggestion: self.suggestion,
        }
    }
}

/// An ordered list of independent rules.
///
/// Every rule is evaluated; the report lists findings in rule order.
pub struct RuleSet<T: 'static> {
    name: &'static str,
    rules: &'static [Rule<T>],
}

impl<T: 'static> RuleSet<T> {
    /// Create a rule set over a static rule list
    pub const fn new(name: &'static str, rules: &'static [Rule<T>]) -> Self {
        Self { name, rules }
    }

    /// Evaluate every rule against `input`
    pub fn evaluate(&self, input: &T) -> AnalysisReport {
        let findings: Vec<Finding> = self
            .rules
            .iter()
            .filter(|rule| rule.applies(input))
            .map(Rule::finding)
            .collect();

        debug!(
            "Rule set '{}': {} of {} rules reported issues",
            self.name,
            findings.len(),
            self.rules.len()
        );

        AnalysisReport::new(findings)
    }
}
