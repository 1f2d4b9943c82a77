//! Analysis Report

use serde::Serialize;
use std::fmt;

const HEADER: &str = "Analysis:";
const STABLE_LINE: &str = "✅ Values appear reasonable for a stable material.";
const ISSUES_HEADER: &str = "⚠️ Issues found:";
const SUGGESTIONS_HEADER: &str = "Suggestions:";
const BULLET: &str = "• ";

/// An issue reported by a rule and the fix it recommends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub issue: &'static str,
    pub suggestion: &'static str,
}

/// Result of a heuristic analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    findings: Vec<Finding>,
}

impl AnalysisReport {
    pub fn new(findings: Vec<Finding>) -> Self {
        Self { findings }
    }

    /// Whether no rule reported an issue
    pub fn is_stable(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn issues(&self) -> Vec<&'static str> {
        self.findings.iter().map(|f| f.issue).collect()
    }

    pub fn suggestions(&self) -> Vec<&'static str> {
        self.findings.iter().map(|f| f.suggestion).collect()
    }

    /// Report as human-readable lines.
    ///
    /// Issues and suggestions are listed in two blocks separated by a blank
    /// line; the suggestion at index `i` answers the issue at index `i`.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![HEADER.to_string()];

        if self.findings.is_empty() {
            lines.push(STABLE_LINE.to_string());
            return lines;
        }

        lines.push(ISSUES_HEADER.to_string());
        lines.extend(self.findings.iter().map(|f| format!("{BULLET}{}", f.issue)));
        lines.push(String::new());
        lines.push(SUGGESTIONS_HEADER.to_string());
        lines.extend(self.findings.iter().map(|f| format!("{BULLET}{}", f.suggestion)));
        lines
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
