//! Rule-application policy: which checks run against which subjects.
//!
//! Every subject gets exactly four results in a fixed order (RegExp,
//! Prefix, Min Length, Max Length) so output stays stable across runs.
//! Rules are independent: a failure never stops later checks, for the
//! title or for any commit, so the report always carries the complete
//! diagnostics.

use crate::rules::{self, RuleSet};
use crate::status::{CheckResult, CheckState, RunOutcome};

/// A piece of text under validation, with the label used in messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub label: String,
    pub text: String,
}

impl Subject {
    /// The pull request title subject.
    pub fn title(text: impl Into<String>) -> Self {
        Self {
            label: "Pull Request Title".to_string(),
            text: text.into(),
        }
    }

    /// A commit message subject, labeled with its abbreviated hash.
    pub fn commit(short_sha: &str, text: impl Into<String>) -> Self {
        Self {
            label: format!("Commit ({}) Message", short_sha),
            text: text.into(),
        }
    }
}

const RULE_REGEX: &str = "RegExp";
const RULE_PREFIX: &str = "Prefix";
const RULE_MIN_LENGTH: &str = "Min Length";
const RULE_MAX_LENGTH: &str = "Max Length";

/// Build the result for one rule: `None` means the rule was not configured
/// and is reported as skipped; otherwise the predicate's boolean decides.
fn apply(label: &str, rule: &str, evaluated: Option<bool>) -> CheckResult {
    let state = match evaluated {
        None => CheckState::Skipped,
        Some(ok) => CheckState::from(ok),
    };
    CheckResult::new(state, format!("{} {}: {}", label, rule, state))
}

/// Evaluate all four rules against one subject, in the fixed order.
///
/// Always returns exactly four results, one per rule, configured or not.
pub fn evaluate_subject(subject: &Subject, rules: &RuleSet) -> Vec<CheckResult> {
    vec![
        apply(
            &subject.label,
            RULE_REGEX,
            rules
                .regex
                .as_ref()
                .map(|pattern| rules::validate_regex(&subject.text, pattern)),
        ),
        apply(
            &subject.label,
            RULE_PREFIX,
            rules
                .prefix
                .as_deref()
                .map(|prefix| rules::validate_prefix(&subject.text, prefix)),
        ),
        apply(
            &subject.label,
            RULE_MIN_LENGTH,
            rules
                .min_length
                .map(|min| rules::validate_min_length(&subject.text, min)),
        ),
        apply(
            &subject.label,
            RULE_MAX_LENGTH,
            rules
                .max_length
                .map(|max| rules::validate_max_length(&subject.text, max)),
        ),
    ]
}

/// Evaluate the whole run: the title's four checks first, then four per
/// commit in commit order.
///
/// Never short-circuits. Every rule for every subject is evaluated and
/// recorded even when earlier checks failed; callers decide the process
/// exit from [`RunOutcome::failed`] only after the full report exists.
pub fn evaluate_run(
    title: &Subject,
    commits: &[Subject],
    title_rules: &RuleSet,
    commit_rules: &RuleSet,
) -> RunOutcome {
    let mut outcome = RunOutcome::new();
    outcome.extend(evaluate_subject(title, title_rules));
    for commit in commits {
        outcome.extend(evaluate_subject(commit, commit_rules));
    }
    outcome
}
