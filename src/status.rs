//! Check result model and run-level aggregation.
//!
//! The policy layer produces one [`CheckResult`] per (subject, rule) pair
//! and appends them to a [`RunOutcome`]. Nothing here prints; rendering is
//! a separate pass over the outcome (see [`crate::ui`]).

use serde::Serialize;
use serde_json::json;

/// Outcome of one rule applied to one subject.
///
/// `Skipped` is informational: it marks a rule that was not configured and
/// never affects the run verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    Passed,
    Failed,
    Skipped,
}

impl From<bool> for CheckState {
    fn from(ok: bool) -> Self {
        if ok {
            CheckState::Passed
        } else {
            CheckState::Failed
        }
    }
}

impl std::fmt::Display for CheckState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "Passed"),
            Self::Failed => write!(f, "Failed"),
            Self::Skipped => write!(f, "Skipped"),
        }
    }
}

/// One evaluated (or skipped) check with its printable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub state: CheckState,
    pub message: String,
}

impl CheckResult {
    /// Create a new check result.
    pub fn new(state: CheckState, message: impl Into<String>) -> Self {
        Self {
            state,
            message: message.into(),
        }
    }
}

/// Counts by state for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }
}

/// The ordered sequence of all check results for one run.
///
/// Results are appended in evaluation order: the title's four checks first,
/// then four per commit. The overall verdict is derived, never stored, so
/// it cannot drift from the sequence.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunOutcome {
    pub checks: Vec<CheckResult>,
}

impl RunOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single check result.
    pub fn push(&mut self, result: CheckResult) {
        self.checks.push(result);
    }

    /// Append a batch of check results, preserving their order.
    pub fn extend(&mut self, results: Vec<CheckResult>) {
        self.checks.extend(results);
    }

    /// True iff at least one check failed. Skipped checks never count.
    pub fn failed(&self) -> bool {
        self.checks.iter().any(|c| c.state == CheckState::Failed)
    }

    /// Counts by state.
    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for check in &self.checks {
            match check.state {
                CheckState::Passed => summary.passed += 1,
                CheckState::Failed => summary.failed += 1,
                CheckState::Skipped => summary.skipped += 1,
            }
        }
        summary
    }

    /// Structured report document for `--json` output.
    pub fn report_json(&self) -> serde_json::Value {
        json!({
            "generated": crate::utc_now_iso(),
            "failed": self.failed(),
            "summary": self.summary(),
            "checks": self.checks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_bool() {
        assert_eq!(CheckState::from(true), CheckState::Passed);
        assert_eq!(CheckState::from(false), CheckState::Failed);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(CheckState::Passed.to_string(), "Passed");
        assert_eq!(CheckState::Failed.to_string(), "Failed");
        assert_eq!(CheckState::Skipped.to_string(), "Skipped");
    }

    #[test]
    fn test_empty_outcome_does_not_fail() {
        let outcome = RunOutcome::new();
        assert!(!outcome.failed());
        assert_eq!(outcome.summary().total(), 0);
    }

    #[test]
    fn test_failed_iff_any_failed() {
        let mut outcome = RunOutcome::new();
        outcome.push(CheckResult::new(CheckState::Passed, "a: Passed"));
        outcome.push(CheckResult::new(CheckState::Skipped, "b: Skipped"));
        assert!(!outcome.failed());

        outcome.push(CheckResult::new(CheckState::Failed, "c: Failed"));
        assert!(outcome.failed());

        // More passes afterwards do not clear the verdict
        outcome.push(CheckResult::new(CheckState::Passed, "d: Passed"));
        assert!(outcome.failed());
    }

    #[test]
    fn test_skipped_never_affects_verdict() {
        let mut outcome = RunOutcome::new();
        for i in 0..12 {
            outcome.push(CheckResult::new(CheckState::Skipped, format!("s{}", i)));
        }
        assert!(!outcome.failed());
        assert_eq!(outcome.summary().skipped, 12);
    }

    #[test]
    fn test_summary_counts() {
        let mut outcome = RunOutcome::new();
        outcome.push(CheckResult::new(CheckState::Passed, "a"));
        outcome.push(CheckResult::new(CheckState::Passed, "b"));
        outcome.push(CheckResult::new(CheckState::Failed, "c"));
        outcome.push(CheckResult::new(CheckState::Skipped, "d"));

        let summary = outcome.summary();
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn test_report_json_shape() {
        let mut outcome = RunOutcome::new();
        outcome.push(CheckResult::new(CheckState::Failed, "Title Prefix: Failed"));

        let report = outcome.report_json();
        assert_eq!(report["failed"], true);
        assert_eq!(report["checks"][0]["state"], "failed");
        assert_eq!(report["checks"][0]["message"], "Title Prefix: Failed");
        assert!(report["generated"].as_str().unwrap().ends_with('Z'));
    }
}
