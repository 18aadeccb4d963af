//! The `check` command: fetch a pull request and run the standards checks.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use prvet::config::Config;
use prvet::github::{self, GithubClient, PullRequestLocator};
use prvet::policy::{evaluate_run, Subject};
use prvet::ui;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Repository slug (owner/name); defaults to the Actions event context
    #[arg(long, env = "GITHUB_REPOSITORY", value_name = "OWNER/NAME")]
    pub repo: Option<String>,

    /// Pull request number; defaults to the Actions event context
    #[arg(long, value_name = "NUMBER")]
    pub pr: Option<u64>,

    /// GitHub token used for API requests
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub API base URL (for GitHub Enterprise)
    #[arg(long, env = "PRVET_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Regex the PR title must match
    #[arg(long, env = "PRVET_PR_TITLE_REGEX", value_name = "PATTERN")]
    pub pr_title_regex: Option<String>,

    /// Prefix (or comma-separated alternatives) the PR title must start with
    #[arg(long, env = "PRVET_PR_TITLE_PREFIX", value_name = "PREFIX")]
    pub pr_title_prefix: Option<String>,

    /// Minimum PR title length in characters (inclusive)
    #[arg(long, env = "PRVET_PR_TITLE_MIN_LENGTH", value_name = "N")]
    pub pr_title_min_length: Option<usize>,

    /// Maximum PR title length in characters (inclusive)
    #[arg(long, env = "PRVET_PR_TITLE_MAX_LENGTH", value_name = "N")]
    pub pr_title_max_length: Option<usize>,

    /// Regex every commit message must match
    #[arg(long, env = "PRVET_COMMIT_MESSAGE_REGEX", value_name = "PATTERN")]
    pub commit_message_regex: Option<String>,

    /// Prefix alternatives every commit message must start with
    #[arg(long, env = "PRVET_COMMIT_MESSAGE_PREFIX", value_name = "PREFIX")]
    pub commit_message_prefix: Option<String>,

    /// Minimum commit message length in characters (inclusive)
    #[arg(long, env = "PRVET_COMMIT_MESSAGE_MIN_LENGTH", value_name = "N")]
    pub commit_message_min_length: Option<usize>,

    /// Maximum commit message length in characters (inclusive)
    #[arg(long, env = "PRVET_COMMIT_MESSAGE_MAX_LENGTH", value_name = "N")]
    pub commit_message_max_length: Option<usize>,

    /// Emit the report as a JSON document instead of text
    #[arg(long)]
    pub json: bool,

    /// Print failing checks only
    #[arg(long, short)]
    pub quiet: bool,
}

impl CheckArgs {
    /// The rule options carried by flags/env, as a config layer that
    /// overrides the config files.
    fn to_config(&self) -> Config {
        Config {
            pr_title_regex: self.pr_title_regex.clone(),
            pr_title_prefix: self.pr_title_prefix.clone(),
            pr_title_min_length: self.pr_title_min_length,
            pr_title_max_length: self.pr_title_max_length,
            commit_message_regex: self.commit_message_regex.clone(),
            commit_message_prefix: self.commit_message_prefix.clone(),
            commit_message_min_length: self.commit_message_min_length,
            commit_message_max_length: self.commit_message_max_length,
            api_url: self.api_url.clone(),
        }
    }
}

/// Run the standards check. Returns whether any check failed; the caller
/// owns the process exit status.
pub fn cmd_check(args: &CheckArgs) -> Result<bool> {
    ui::init_colors();
    let quiet = args.quiet || ui::is_quiet();

    // Config files first, flags/env on top
    let config = Config::load()?.merge_with(args.to_config());

    // Compile rules before touching the network; a malformed pattern
    // aborts here as a configuration error
    let (title_rules, commit_rules) = config.rule_sets()?;

    if title_rules.is_empty() && commit_rules.is_empty() {
        eprintln!(
            "{}",
            "Warning: no rules configured, every check will be skipped".yellow()
        );
    }

    let token = match args.token.as_deref() {
        Some(token) if !token.is_empty() => token,
        _ => bail!("No GitHub token provided. Pass --token or set GITHUB_TOKEN."),
    };

    let locator = resolve_locator(args)?;

    let client = GithubClient::new(token, config.api_url.as_deref())?;
    let pull_request = client
        .fetch_pull_request(&locator)
        .with_context(|| format!("Failed to fetch pull request {}", locator))?;
    let commits = client
        .fetch_commits(&locator)
        .with_context(|| format!("Failed to fetch commits for {}", locator))?;

    let title = Subject::title(pull_request.title);
    let commit_subjects: Vec<Subject> = commits
        .iter()
        .map(|commit| Subject::commit(&commit.short_sha, commit.message.as_str()))
        .collect();

    let outcome = evaluate_run(&title, &commit_subjects, &title_rules, &commit_rules);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.report_json())?);
    } else {
        if !quiet {
            println!(
                "Checking {} ({} commit{})",
                locator.to_string().cyan(),
                commits.len(),
                if commits.len() == 1 { "" } else { "s" }
            );
            println!();
        }
        ui::print_report(&outcome, quiet);
        println!();
        ui::print_summary(&outcome);
    }

    Ok(outcome.failed())
}

/// Resolve which pull request to check: explicit flags win, otherwise the
/// GitHub Actions event context supplies the coordinates.
fn resolve_locator(args: &CheckArgs) -> Result<PullRequestLocator> {
    match (args.repo.as_deref(), args.pr) {
        (Some(slug), Some(number)) => PullRequestLocator::from_slug(slug, number),
        (None, Some(_)) => bail!("--pr requires --repo (or the GITHUB_REPOSITORY variable)"),
        (_, None) => github::locator_from_actions_env()
            .context("No pull request specified. Pass --repo and --pr, or run on GitHub Actions"),
    }
}
