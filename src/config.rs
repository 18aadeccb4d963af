//! Configuration management for prvet.
//!
//! All eight rule options are optional; an absent or empty option means
//! the corresponding check is skipped. Configuration is assembled once at
//! the command boundary and handed to the core by value - the validators
//! and the policy layer never read files or environment themselves.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::rules::RuleSet;

/// Name of the per-project config file, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".prvet.yml";

/// The flat option set recognized by prvet.
///
/// Keys are kebab-case in YAML, mirroring the CLI flag names:
///
/// ```yaml
/// pr-title-regex: '^AB#\d{4,6}:\s'
/// pr-title-max-length: 72
/// commit-message-prefix: 'feat:,fix:,chore:'
/// ```
///
/// Unknown keys are rejected so typos fail loudly instead of silently
/// skipping a check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct Config {
    pub pr_title_regex: Option<String>,
    pub pr_title_prefix: Option<String>,
    pub pr_title_min_length: Option<usize>,
    pub pr_title_max_length: Option<usize>,
    pub commit_message_regex: Option<String>,
    pub commit_message_prefix: Option<String>,
    pub commit_message_min_length: Option<usize>,
    pub commit_message_max_length: Option<usize>,
    /// GitHub API base URL, for GitHub Enterprise installs
    pub api_url: Option<String>,
}

impl Config {
    /// Load configuration with full merge semantics.
    /// Merge order (later overrides earlier):
    /// 1. Global config (~/.config/prvet/config.yml)
    /// 2. Project config (.prvet.yml)
    ///
    /// CLI flags are merged on top by the command layer via [`Config::merge_with`].
    pub fn load() -> Result<Self> {
        Self::load_merged_from(
            global_config_path().as_deref(),
            Path::new(PROJECT_CONFIG_FILE),
        )
    }

    /// Load a single config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Parse a YAML config document. An empty document is an empty config.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).context("Failed to parse config YAML")
    }

    /// Load and merge the global and project config files. Either may be
    /// missing; a missing file contributes nothing.
    pub fn load_merged_from(global_path: Option<&Path>, project_path: &Path) -> Result<Self> {
        let global_config = global_path
            .filter(|p| p.exists())
            .map(Self::load_from)
            .transpose()?
            .unwrap_or_default();

        let project_config = if project_path.exists() {
            Self::load_from(project_path)?
        } else {
            Self::default()
        };

        Ok(global_config.merge_with(project_config))
    }

    /// Merge another config over this one: any option set in `other` wins.
    pub fn merge_with(self, other: Config) -> Config {
        Config {
            pr_title_regex: other.pr_title_regex.or(self.pr_title_regex),
            pr_title_prefix: other.pr_title_prefix.or(self.pr_title_prefix),
            pr_title_min_length: other.pr_title_min_length.or(self.pr_title_min_length),
            pr_title_max_length: other.pr_title_max_length.or(self.pr_title_max_length),
            commit_message_regex: other.commit_message_regex.or(self.commit_message_regex),
            commit_message_prefix: other.commit_message_prefix.or(self.commit_message_prefix),
            commit_message_min_length: other
                .commit_message_min_length
                .or(self.commit_message_min_length),
            commit_message_max_length: other
                .commit_message_max_length
                .or(self.commit_message_max_length),
            api_url: other.api_url.or(self.api_url),
        }
    }

    /// Compile the title and commit rule sets.
    ///
    /// This is where a malformed regex surfaces, before any network
    /// request is made, with the offending option named.
    pub fn rule_sets(&self) -> Result<(RuleSet, RuleSet)> {
        let title_rules = RuleSet::compile(
            self.pr_title_regex.as_deref(),
            self.pr_title_prefix.as_deref(),
            self.pr_title_min_length,
            self.pr_title_max_length,
        )
        .context("Invalid `pr-title-regex` option")?;

        let commit_rules = RuleSet::compile(
            self.commit_message_regex.as_deref(),
            self.commit_message_prefix.as_deref(),
            self.commit_message_min_length,
            self.commit_message_max_length,
        )
        .context("Invalid `commit-message-regex` option")?;

        Ok((title_rules, commit_rules))
    }
}

/// Returns the path to the global config file at ~/.config/prvet/config.yml
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("prvet/config.yml"))
}
