//! Social media source — public profile existence probes.
//!
//! Issues HEAD requests against a fixed set of public profile URLs.
//! Only existence is checked (HTTP 200 after redirects); no profile
//! content is fetched and nothing behind a login is touched.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::http;
use crate::source::{courtesy_pause, Source};
use crate::types::{Confidence, Finding, Query, QueryType, SourceKind};
use serde_json::{json, Map};
use std::time::Duration;

/// One probed platform: a display name and the profile URL prefix the
/// query value is appended to.
#[derive(Debug, Clone)]
pub struct Platform {
    pub name: String,
    pub profile_base: String,
}

impl Platform {
    fn new(name: &str, profile_base: &str) -> Self {
        Self {
            name: name.into(),
            profile_base: profile_base.into(),
        }
    }
}

/// Public profile probe source.
///
/// Contributes one MEDIUM finding per platform where the profile URL
/// answers 200. Pauses briefly between platform probes.
pub struct SocialSource {
    platforms: Vec<Platform>,
}

impl Default for SocialSource {
    fn default() -> Self {
        Self {
            platforms: vec![
                Platform::new("GitHub", "https://github.com"),
                Platform::new("Twitter", "https://twitter.com"),
                Platform::new("LinkedIn", "https://www.linkedin.com/in"),
                Platform::new("Instagram", "https://www.instagram.com"),
            ],
        }
    }
}

impl SocialSource {
    /// Replace the probed platform set (used by tests to point at a
    /// mock server).
    pub fn with_platforms(mut self, platforms: Vec<Platform>) -> Self {
        self.platforms = platforms;
        self
    }
}

impl Source for SocialSource {
    async fn collect(
        &self,
        query: &Query,
        config: &EngineConfig,
    ) -> Result<Vec<Finding>, EngineError> {
        if !matches!(query.query_type, QueryType::Username | QueryType::Email) {
            return Ok(vec![]);
        }

        courtesy_pause(self.kind(), config).await;
        tracing::trace!(platforms = self.platforms.len(), "social source probes");

        let client = http::build_client(config, self.kind().timeout_secs())?;
        let mut findings = Vec::new();

        for (i, platform) in self.platforms.iter().enumerate() {
            if i > 0 {
                // Pause between platform probes, not a per-source delay.
                tokio::time::sleep(Duration::from_millis(200)).await;
            }

            let profile_url = format!(
                "{}/{}",
                platform.profile_base,
                urlencoding::encode(&query.value)
            );

            match client.head(&profile_url).send().await {
                Ok(response) if response.status().is_success() => {
                    let mut data = Map::new();
                    data.insert("platform".into(), json!(platform.name));
                    data.insert("username".into(), json!(query.value));
                    data.insert("profile_url".into(), json!(profile_url));
                    data.insert("status".into(), json!("profile exists (public probe)"));
                    findings.push(
                        Finding::new("social_media", data, Confidence::Medium)
                            .with_url(profile_url),
                    );
                }
                Ok(response) => {
                    tracing::trace!(
                        platform = %platform.name,
                        status = %response.status(),
                        "profile probe negative"
                    );
                }
                Err(err) => {
                    tracing::debug!(platform = %platform.name, error = %err, "profile probe failed");
                }
            }
        }

        tracing::debug!(count = findings.len(), "social source findings");
        Ok(findings)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Social
    }
}
