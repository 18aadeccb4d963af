//! # prvet - Pull Request Standards Checker
//!
//! prvet validates a pull request's title and commit messages against
//! configurable standards: a regular expression, a required prefix, and
//! minimum/maximum lengths. Every configured rule is evaluated for every
//! subject and reported individually; the run fails if any rule failed.
//!
//! ## Overview
//!
//! Rules come from config files and CLI flags, merged at the command
//! boundary into a single [`config::Config`]. The GitHub API collaborator
//! ([`github`]) fetches the title and commit messages; the core
//! ([`rules`], [`policy`], [`status`]) is pure computation over those
//! strings and never touches the network or the environment.
//!
//! ## Core Concepts
//!
//! - **Subject**: a string being validated (the PR title, or one commit
//!   message per commit)
//! - **RuleSet**: the compiled optional constraints for one subject kind
//! - **CheckResult**: one rule applied to one subject: Passed, Failed, or
//!   Skipped, with a printable message
//! - **RunOutcome**: the ordered list of all check results plus the overall
//!   verdict
//!
//! ## Example
//!
//! ```
//! use prvet::policy::{evaluate_run, Subject};
//! use prvet::rules::RuleSet;
//!
//! let title_rules = RuleSet::compile(
//!     Some(r"^AB#\d+"), // regex
//!     None,             // prefix
//!     Some(10),         // min length
//!     Some(72),         // max length
//! )
//! .expect("valid rules");
//!
//! let title = Subject::title("AB#1234: Add retry logic");
//! let commits = vec![Subject::commit("d6cd1e2", "AB#1234: add retry loop")];
//!
//! let outcome = evaluate_run(&title, &commits, &title_rules, &RuleSet::default());
//! assert!(!outcome.failed());
//! ```

// Re-export all public modules
pub mod config;
pub mod github;
pub mod policy;
pub mod rules;
pub mod status;
pub mod ui;

/// Generate a UTC timestamp in ISO 8601 format: `YYYY-MM-DDTHH:MM:SSZ`
///
/// This function uses `chrono::Utc::now()` to ensure the timestamp is truly in UTC,
/// not local time with a misleading `Z` suffix.
pub fn utc_now_iso() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
