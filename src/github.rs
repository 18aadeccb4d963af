//! GitHub API collaborator: pull request and commit fetching.
//!
//! This is the host-side boundary the core never crosses. It resolves
//! which pull request to check (from CLI flags or from a GitHub Actions
//! event payload), fetches the title and the commit list, and hands plain
//! strings to the policy layer.

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use ureq::Agent;
use url::Url;

/// Default API base for github.com. Overridable for GitHub Enterprise via
/// the `api-url` option.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// The only webhook event a standards run accepts.
pub const PULL_REQUEST_EVENT: &str = "pull_request";

const USER_AGENT: &str = concat!("prvet/", env!("CARGO_PKG_VERSION"));
const COMMITS_PER_PAGE: usize = 100;

/// Coordinates of the pull request under check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestLocator {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl PullRequestLocator {
    /// Build a locator from an `owner/name` slug and a PR number.
    pub fn from_slug(slug: &str, number: u64) -> Result<Self> {
        let (owner, repo) = slug
            .split_once('/')
            .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty() && !repo.contains('/'))
            .ok_or_else(|| anyhow!("Invalid repository '{}', expected owner/name", slug))?;

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            number,
        })
    }
}

impl std::fmt::Display for PullRequestLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// Pull request metadata, trimmed to what the checks consume.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub title: String,
}

/// One commit of the pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Abbreviated hash (first 7 characters), used in report labels
    pub short_sha: String,
    pub message: String,
    pub author: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommitEntry {
    sha: String,
    commit: CommitDetail,
    author: Option<AccountRef>,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
}

#[derive(Debug, Deserialize)]
struct AccountRef {
    login: String,
}

impl From<CommitEntry> for CommitInfo {
    fn from(entry: CommitEntry) -> Self {
        let short_sha = entry.sha.get(..7).unwrap_or(&entry.sha).to_string();
        CommitInfo {
            short_sha,
            message: entry.commit.message,
            author: entry.author.map(|a| a.login),
        }
    }
}

/// Thin authenticated client for the two fetches a run needs.
pub struct GithubClient {
    agent: Agent,
    token: String,
    api_base: Url,
}

impl GithubClient {
    /// Create a client for the given token and API base. `None` uses
    /// github.com; GitHub Enterprise installs pass their `/api/v3` base.
    pub fn new(token: &str, api_url: Option<&str>) -> Result<Self> {
        let base = api_url.unwrap_or(DEFAULT_API_URL);
        let mut api_base =
            Url::parse(base).with_context(|| format!("Invalid API URL: {}", base))?;

        if api_base.scheme() != "http" && api_base.scheme() != "https" {
            bail!("Invalid API URL: {} (expected http or https)", base);
        }

        // Url::join drops the last path segment unless the base ends with
        // a slash, which would break enterprise bases like /api/v3
        if !api_base.path().ends_with('/') {
            api_base.set_path(&format!("{}/", api_base.path()));
        }

        Ok(Self {
            agent: Agent::new(),
            token: token.to_string(),
            api_base,
        })
    }

    /// Fetch the pull request metadata (`GET /repos/{owner}/{repo}/pulls/{n}`).
    pub fn fetch_pull_request(&self, locator: &PullRequestLocator) -> Result<PullRequest> {
        let url = self.pull_url(locator, None)?;
        let response = self.get(&url, &[])?;

        response
            .into_json()
            .with_context(|| format!("Malformed pull request response for {}", locator))
    }

    /// Fetch every commit of the pull request, following pagination
    /// (`GET /repos/{owner}/{repo}/pulls/{n}/commits`).
    pub fn fetch_commits(&self, locator: &PullRequestLocator) -> Result<Vec<CommitInfo>> {
        let url = self.pull_url(locator, Some("commits"))?;
        let mut commits = Vec::new();
        let mut page = 1usize;

        loop {
            let response = self.get(
                &url,
                &[
                    ("per_page", &COMMITS_PER_PAGE.to_string()),
                    ("page", &page.to_string()),
                ],
            )?;

            let entries: Vec<CommitEntry> = response
                .into_json()
                .with_context(|| format!("Malformed commit list response for {}", locator))?;

            let full_page = entries.len() == COMMITS_PER_PAGE;
            commits.extend(entries.into_iter().map(CommitInfo::from));

            if !full_page {
                return Ok(commits);
            }
            page += 1;
        }
    }

    fn pull_url(&self, locator: &PullRequestLocator, tail: Option<&str>) -> Result<Url> {
        let mut path = format!(
            "repos/{}/{}/pulls/{}",
            locator.owner, locator.repo, locator.number
        );
        if let Some(tail) = tail {
            path.push('/');
            path.push_str(tail);
        }

        self.api_base
            .join(&path)
            .with_context(|| format!("Failed to build API URL for {}", locator))
    }

    fn get(&self, url: &Url, query: &[(&str, &str)]) -> Result<ureq::Response> {
        let mut request = self
            .agent
            .get(url.as_str())
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", USER_AGENT);

        for (key, value) in query {
            request = request.query(key, value);
        }

        match request.call() {
            Ok(response) => Ok(response),
            Err(ureq::Error::Status(401, _)) | Err(ureq::Error::Status(403, _)) => Err(anyhow!(
                "GitHub rejected the token (HTTP 401/403). Check that GITHUB_TOKEN is set and \
                 has read access to the repository."
            )),
            Err(ureq::Error::Status(404, _)) => Err(anyhow!(
                "GitHub returned 404 for {}. Check the repository slug and PR number, and that \
                 the token can see the repository.",
                url
            )),
            Err(ureq::Error::Status(code, response)) => Err(anyhow!(
                "GitHub API returned HTTP {}: {}",
                code,
                response.status_text()
            )),
            Err(e) => Err(anyhow!("GitHub API request failed: {}", e)),
        }
    }
}

/// The fields prvet reads from a `pull_request` webhook payload.
#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: u64,
    base: BasePayload,
}

#[derive(Debug, Deserialize)]
struct BasePayload {
    repo: RepoPayload,
    user: AccountRef,
}

#[derive(Debug, Deserialize)]
struct RepoPayload {
    name: String,
}

/// Resolve the pull request coordinates from a webhook event.
///
/// Only `pull_request` events are valid; anything else is a configuration
/// error (the checker has nothing to validate on pushes, issues, etc).
pub fn locator_from_event(event_name: &str, payload_json: &str) -> Result<PullRequestLocator> {
    if event_name != PULL_REQUEST_EVENT {
        bail!("Invalid event: {} (prvet only runs on pull_request events)", event_name);
    }

    let payload: EventPayload =
        serde_json::from_str(payload_json).context("Failed to parse event payload JSON")?;

    let pr = payload
        .pull_request
        .ok_or_else(|| anyhow!("Event payload has no pull_request object"))?;

    Ok(PullRequestLocator {
        owner: pr.base.user.login,
        repo: pr.base.repo.name,
        number: pr.number,
    })
}

/// Resolve the pull request coordinates from the GitHub Actions
/// environment (`GITHUB_EVENT_NAME` + `GITHUB_EVENT_PATH`).
pub fn locator_from_actions_env() -> Result<PullRequestLocator> {
    let event_name = std::env::var("GITHUB_EVENT_NAME")
        .context("GITHUB_EVENT_NAME is not set; pass --repo and --pr when running outside CI")?;

    let event_path = std::env::var("GITHUB_EVENT_PATH")
        .context("GITHUB_EVENT_PATH is not set; pass --repo and --pr when running outside CI")?;

    let payload = std::fs::read_to_string(&event_path)
        .with_context(|| format!("Failed to read event payload from {}", event_path))?;

    locator_from_event(&event_name, &payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "action": "opened",
        "pull_request": {
            "number": 42,
            "title": "AB#1234: This is a test message",
            "base": {
                "ref": "main",
                "user": { "login": "octocat" },
                "repo": { "name": "hello-world" }
            }
        }
    }"#;

    #[test]
    fn test_locator_from_slug() {
        let locator = PullRequestLocator::from_slug("octocat/hello-world", 7).unwrap();
        assert_eq!(locator.owner, "octocat");
        assert_eq!(locator.repo, "hello-world");
        assert_eq!(locator.number, 7);
        assert_eq!(locator.to_string(), "octocat/hello-world#7");
    }

    #[test]
    fn test_locator_from_bad_slug() {
        assert!(PullRequestLocator::from_slug("no-slash", 1).is_err());
        assert!(PullRequestLocator::from_slug("/name", 1).is_err());
        assert!(PullRequestLocator::from_slug("owner/", 1).is_err());
        assert!(PullRequestLocator::from_slug("a/b/c", 1).is_err());
    }

    #[test]
    fn test_locator_from_event_payload() {
        let locator = locator_from_event("pull_request", PAYLOAD).unwrap();
        assert_eq!(
            locator,
            PullRequestLocator {
                owner: "octocat".to_string(),
                repo: "hello-world".to_string(),
                number: 42,
            }
        );
    }

    #[test]
    fn test_locator_rejects_other_events() {
        let err = locator_from_event("push", PAYLOAD).unwrap_err();
        assert!(err.to_string().contains("Invalid event: push"));
    }

    #[test]
    fn test_locator_requires_pull_request_object() {
        let err = locator_from_event("pull_request", r#"{"action": "opened"}"#).unwrap_err();
        assert!(err.to_string().contains("no pull_request"));
    }

    #[test]
    fn test_commit_entry_conversion_truncates_sha() {
        let entry: CommitEntry = serde_json::from_str(
            r#"{
                "sha": "d6cd1e2bd19e03a81132a23b2025920577f84e37",
                "commit": { "message": "fix: handle empty input" },
                "author": { "login": "octocat" }
            }"#,
        )
        .unwrap();

        let info = CommitInfo::from(entry);
        assert_eq!(info.short_sha, "d6cd1e2");
        assert_eq!(info.message, "fix: handle empty input");
        assert_eq!(info.author.as_deref(), Some("octocat"));
    }

    #[test]
    fn test_commit_entry_short_sha_survives() {
        let entry: CommitEntry = serde_json::from_str(
            r#"{ "sha": "d6cd", "commit": { "message": "m" }, "author": null }"#,
        )
        .unwrap();

        let info = CommitInfo::from(entry);
        assert_eq!(info.short_sha, "d6cd");
        assert_eq!(info.author, None);
    }

    #[test]
    fn test_pull_request_deserializes_title_only() {
        let pr: PullRequest = serde_json::from_str(
            r#"{ "number": 42, "title": "feat: add parser", "state": "open" }"#,
        )
        .unwrap();
        assert_eq!(pr.title, "feat: add parser");
    }

    #[test]
    fn test_client_rejects_bad_api_url() {
        assert!(GithubClient::new("token", Some("not a url")).is_err());
        assert!(GithubClient::new("token", Some("ftp://example.com")).is_err());
        assert!(GithubClient::new("token", Some("https://github.example.com/api/v3")).is_ok());
        assert!(GithubClient::new("token", None).is_ok());
    }

    #[test]
    fn test_pull_url_shapes() {
        let client = GithubClient::new("token", None).unwrap();
        let locator = PullRequestLocator::from_slug("octocat/hello-world", 42).unwrap();

        let url = client.pull_url(&locator, None).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/octocat/hello-world/pulls/42"
        );

        let url = client.pull_url(&locator, Some("commits")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/octocat/hello-world/pulls/42/commits"
        );
    }

    #[test]
    fn test_pull_url_enterprise_base_keeps_path() {
        let client =
            GithubClient::new("token", Some("https://github.example.com/api/v3")).unwrap();
        let locator = PullRequestLocator::from_slug("octocat/hello-world", 42).unwrap();

        let url = client.pull_url(&locator, None).unwrap();
        assert_eq!(
            url.as_str(),
            "https://github.example.com/api/v3/repos/octocat/hello-world/pulls/42"
        );
    }
}
