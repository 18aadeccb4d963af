//! Centralized UI formatting and color utilities
//!
//! The core returns a [`RunOutcome`] value; everything here is the
//! presentation pass over that value. Nothing in this module changes
//! what a run reports, only how it looks.

use colored::{ColoredString, Colorize};

use crate::status::{CheckResult, CheckState, RunOutcome};

/// Check if quiet mode is enabled via environment variable or --quiet flag
pub fn is_quiet() -> bool {
    std::env::var("PRVET_QUIET")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Disable colors when stdout is not a terminal (CI logs, pipes).
pub fn init_colors() {
    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }
}

/// Returns a colored icon for the given check state.
///
/// Icons:
/// - Passed: ✓ (green)
/// - Failed: ✗ (red)
/// - Skipped: ○ (dimmed)
pub fn state_icon(state: &CheckState) -> ColoredString {
    match state {
        CheckState::Passed => "✓".green(),
        CheckState::Failed => "✗".red(),
        CheckState::Skipped => "○".dimmed(),
    }
}

/// Format one check as a report line.
pub fn format_check_line(result: &CheckResult) -> String {
    let message = match result.state {
        CheckState::Passed => result.message.as_str().normal(),
        CheckState::Failed => result.message.as_str().red(),
        CheckState::Skipped => result.message.as_str().dimmed(),
    };
    format!("{} {}", state_icon(&result.state), message)
}

/// Print every check, one line each, in evaluation order.
///
/// In quiet mode only failures are printed; the summary still reports
/// the full counts.
pub fn print_report(outcome: &RunOutcome, quiet: bool) {
    for check in &outcome.checks {
        if quiet && check.state != CheckState::Failed {
            continue;
        }
        println!("{}", format_check_line(check));
    }
}

/// Print the counts line and the overall verdict.
pub fn print_summary(outcome: &RunOutcome) {
    let summary = outcome.summary();
    println!(
        "{} passed, {} failed, {} skipped",
        summary.passed.to_string().green(),
        summary.failed.to_string().red(),
        summary.skipped.to_string().dimmed(),
    );

    if outcome.failed() {
        println!("{}", "Pull request does not meet the standards".red().bold());
    } else {
        println!("{}", "Pull request meets the standards".green().bold());
    }
}
