//! Validation predicates and compiled rule sets.
//!
//! The four validators are pure functions over `(text, constraint)`. They
//! never read configuration or ambient state; callers decide which rules
//! apply and in what order (see [`crate::policy`]).

use anyhow::{Context, Result};
use regex::Regex;

/// Returns true iff `pattern` matches somewhere in `text`.
///
/// Matching is unanchored: a pattern that must match the start of the text
/// has to say so itself (e.g. `^feat:`). Patterns are compiled ahead of
/// time by [`RuleSet::compile`], so a malformed pattern is rejected before
/// any subject is evaluated.
pub fn validate_regex(text: &str, pattern: &Regex) -> bool {
    pattern.is_match(text)
}

/// Returns true iff `text` starts with any of the comma-separated
/// alternatives in `prefix`.
///
/// Alternatives are matched exactly, case-sensitive, with no whitespace
/// trimming: `"feat: ,fix: "` requires the space. Empty alternatives
/// (from a leading/trailing/doubled comma) never match; a value with no
/// non-empty alternative matches nothing. An entirely empty prefix option
/// is normalized to "not configured" by [`RuleSet::compile`] and never
/// reaches this function through the rule pipeline.
pub fn validate_prefix(text: &str, prefix: &str) -> bool {
    prefix
        .split(',')
        .filter(|alt| !alt.is_empty())
        .any(|alt| text.starts_with(alt))
}

/// Returns true iff `text` is at most `max` characters long (inclusive).
///
/// Length is counted in Unicode scalar values (`str::chars`), not bytes,
/// so `"héllo"` has length 5.
pub fn validate_max_length(text: &str, max: usize) -> bool {
    text.chars().count() <= max
}

/// Returns true iff `text` is at least `min` characters long (inclusive).
///
/// Length is counted in Unicode scalar values (`str::chars`), not bytes.
pub fn validate_min_length(text: &str, min: usize) -> bool {
    text.chars().count() >= min
}

/// The compiled, optional constraints applied to one kind of subject
/// (PR title or commit message).
///
/// A `None` field means the rule is not configured and the corresponding
/// check is reported as skipped. Built once at the configuration boundary;
/// immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    /// Pattern the subject must match somewhere
    pub regex: Option<Regex>,
    /// Comma-separated prefix alternatives the subject must start with
    pub prefix: Option<String>,
    /// Inclusive minimum length in characters
    pub min_length: Option<usize>,
    /// Inclusive maximum length in characters
    pub max_length: Option<usize>,
}

impl RuleSet {
    /// Compile raw option values into a rule set.
    ///
    /// Empty strings are treated as "not configured", matching the
    /// behavior of unset options. A regex that fails to compile is a fatal
    /// configuration error and aborts the run before anything is fetched
    /// or evaluated.
    pub fn compile(
        regex: Option<&str>,
        prefix: Option<&str>,
        min_length: Option<usize>,
        max_length: Option<usize>,
    ) -> Result<Self> {
        let regex = regex
            .filter(|src| !src.is_empty())
            .map(|src| {
                Regex::new(src).with_context(|| format!("Invalid regex pattern: {}", src))
            })
            .transpose()?;

        let prefix = prefix
            .filter(|p| !p.is_empty())
            .map(|p| p.to_string());

        Ok(RuleSet {
            regex,
            prefix,
            min_length,
            max_length,
        })
    }

    /// True when no rule is configured at all.
    pub fn is_empty(&self) -> bool {
        self.regex.is_none()
            && self.prefix.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_regex_unanchored() {
        let pattern = Regex::new(r"\d{4}").unwrap();
        assert!(validate_regex("release 2024 notes", &pattern));
        assert!(!validate_regex("no digits here", &pattern));
    }

    #[test]
    fn test_validate_regex_anchored() {
        let pattern = Regex::new(r"^AB#\d{4,6}:\s").unwrap();
        assert!(validate_regex("AB#1234: This is a test message", &pattern));
        // Same token later in the text does not satisfy an anchored pattern
        assert!(!validate_regex("prefix AB#1234: message", &pattern));
    }

    #[test]
    fn test_validate_prefix_single() {
        assert!(validate_prefix("feat: add parser", "feat: "));
        assert!(!validate_prefix("fix: typo", "feat: "));
    }

    #[test]
    fn test_validate_prefix_alternatives() {
        assert!(validate_prefix("a change", "a,b,c"));
        assert!(validate_prefix("b change", "a,b,c"));
        assert!(validate_prefix("c change", "a,b,c"));
        assert!(!validate_prefix("d change", "a,b,c"));
    }

    #[test]
    fn test_validate_prefix_no_trimming() {
        // Alternatives are taken verbatim, including spaces
        assert!(!validate_prefix("feat:x", "feat: ,fix: "));
        assert!(validate_prefix("feat: x", "feat: ,fix: "));
    }

    #[test]
    fn test_validate_prefix_case_sensitive() {
        assert!(!validate_prefix("Feat: add parser", "feat:"));
    }

    #[test]
    fn test_validate_prefix_empty_alternatives_never_match() {
        assert!(!validate_prefix("anything", ""));
        assert!(!validate_prefix("anything", ","));
        // Empty slots are ignored, real ones still match
        assert!(validate_prefix("fix: typo", ",fix:,"));
    }

    #[test]
    fn test_validate_max_length_boundaries() {
        let text = "exactly twelve"; // 14 chars
        let len = text.chars().count();
        assert!(validate_max_length(text, len));
        assert!(!validate_max_length(text, len - 1));
    }

    #[test]
    fn test_validate_min_length_boundaries() {
        let text = "short";
        let len = text.chars().count();
        assert!(validate_min_length(text, len));
        assert!(!validate_min_length(text, len + 1));
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        // "héllo" is 6 bytes but 5 chars
        assert!(validate_max_length("héllo", 5));
        assert!(validate_min_length("héllo", 5));
        assert!(!validate_min_length("héllo", 6));
    }

    #[test]
    fn test_validators_are_idempotent() {
        let pattern = Regex::new(r"^fix").unwrap();
        let first = validate_regex("fix: bug", &pattern);
        assert_eq!(first, validate_regex("fix: bug", &pattern));

        let first = validate_prefix("fix: bug", "fix:,feat:");
        assert_eq!(first, validate_prefix("fix: bug", "fix:,feat:"));

        assert_eq!(
            validate_min_length("fix: bug", 3),
            validate_min_length("fix: bug", 3)
        );
        assert_eq!(
            validate_max_length("fix: bug", 3),
            validate_max_length("fix: bug", 3)
        );
    }

    #[test]
    fn test_compile_full_rule_set() {
        let rules = RuleSet::compile(Some(r"^AB#\d+"), Some("AB#"), Some(10), Some(72)).unwrap();
        assert!(rules.regex.is_some());
        assert_eq!(rules.prefix.as_deref(), Some("AB#"));
        assert_eq!(rules.min_length, Some(10));
        assert_eq!(rules.max_length, Some(72));
        assert!(!rules.is_empty());
    }

    #[test]
    fn test_compile_empty_strings_mean_unconfigured() {
        let rules = RuleSet::compile(Some(""), Some(""), None, None).unwrap();
        assert!(rules.regex.is_none());
        assert!(rules.prefix.is_none());
        assert!(rules.is_empty());
    }

    #[test]
    fn test_compile_invalid_pattern_is_fatal() {
        let err = RuleSet::compile(Some("("), None, None, None).unwrap_err();
        assert!(err.to_string().contains("Invalid regex pattern"));
    }
}
