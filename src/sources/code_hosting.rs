//! Code-hosting source — public GitHub profile and repository data.
//!
//! Uses the unauthenticated GitHub REST API. A resolved profile yields
//! one finding; the user's most recently updated public repositories
//! yield a second. The repository half failing still leaves the
//! profile finding in place (partial contribution).

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::http;
use crate::source::{courtesy_pause, Source};
use crate::types::{Confidence, Finding, Query, QueryType, SourceKind};
use serde_json::{json, Map, Value};

/// How many recently updated repositories to record.
const RECENT_REPO_LIMIT: usize = 5;

/// Public code-hosting profile source.
///
/// Accepts username and email queries; only usernames are resolvable
/// against the profile API, email queries contribute nothing.
pub struct CodeHostingSource {
    base_url: String,
}

impl Default for CodeHostingSource {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".into(),
        }
    }
}

impl CodeHostingSource {
    /// Override the upstream base URL (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Source for CodeHostingSource {
    async fn collect(
        &self,
        query: &Query,
        config: &EngineConfig,
    ) -> Result<Vec<Finding>, EngineError> {
        if !matches!(query.query_type, QueryType::Username | QueryType::Email) {
            return Ok(vec![]);
        }
        if query.query_type != QueryType::Username {
            // Email-to-account resolution needs authenticated search.
            return Ok(vec![]);
        }

        courtesy_pause(self.kind(), config).await;
        tracing::trace!("code hosting profile lookup");

        let client = http::build_client(config, self.kind().timeout_secs())?;
        let profile_url = format!(
            "{}/users/{}",
            self.base_url,
            urlencoding::encode(&query.value)
        );

        let profile = match client
            .get(&profile_url)
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                match response.json::<Value>().await {
                    Ok(body) => body,
                    Err(err) => {
                        tracing::debug!(error = %err, "profile body unreadable");
                        return Ok(vec![]);
                    }
                }
            }
            Ok(response) => {
                tracing::debug!(status = %response.status(), "profile lookup non-success");
                return Ok(vec![]);
            }
            Err(err) => {
                tracing::debug!(error = %err, "profile lookup failed");
                return Ok(vec![]);
            }
        };

        let mut findings = vec![profile_finding(&profile)];

        // Follow the API-provided repos URL rather than rebuilding it.
        if let Some(repos_url) = profile.get("repos_url").and_then(Value::as_str) {
            match client
                .get(repos_url)
                .header("Accept", "application/vnd.github.v3+json")
                .query(&[("per_page", "5"), ("sort", "updated")])
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => {
                    if let Ok(body) = response.json::<Value>().await {
                        findings.push(repos_finding(&body, &profile, &query.value));
                    }
                }
                Ok(response) => {
                    tracing::debug!(status = %response.status(), "repo listing non-success");
                }
                Err(err) => tracing::debug!(error = %err, "repo listing failed"),
            }
        }

        tracing::debug!(count = findings.len(), "code hosting source findings");
        Ok(findings)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::CodeHosting
    }
}

/// Profile payload → HIGH-confidence account finding.
pub(crate) fn profile_finding(profile: &Value) -> Finding {
    let mut data = Map::new();
    for (key, source_key) in [
        ("username", "login"),
        ("name", "name"),
        ("bio", "bio"),
        ("created_at", "created_at"),
        ("profile_url", "html_url"),
    ] {
        data.insert(
            key.into(),
            profile.get(source_key).cloned().unwrap_or(Value::Null),
        );
    }
    for key in ["public_repos", "followers", "following"] {
        data.insert(key.into(), profile.get(key).cloned().unwrap_or(json!(0)));
    }

    let mut finding = Finding::new("github", data, Confidence::High);
    if let Some(html_url) = profile.get("html_url").and_then(Value::as_str) {
        finding = finding.with_url(html_url);
    }
    finding
}

/// Repo listing payload → HIGH-confidence repositories finding.
pub(crate) fn repos_finding(repos: &Value, profile: &Value, username: &str) -> Finding {
    let recent: Vec<String> = repos
        .as_array()
        .map(|repos| {
            repos
                .iter()
                .take(RECENT_REPO_LIMIT)
                .filter_map(|r| r.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let mut data = Map::new();
    data.insert("type".into(), json!("repositories"));
    data.insert("username".into(), json!(username));
    data.insert("recent_repos".into(), json!(recent));
    data.insert(
        "total_repos".into(),
        profile.get("public_repos").cloned().unwrap_or(json!(0)),
    );
    Finding::new("github", data, Confidence::High)
}
