//! Breach database source — public breach metadata, no credential data.
//!
//! Queries Have I Been Pwned for breach names only. A 404 is a
//! meaningful answer (no breaches recorded) and still produces a
//! finding; anything else degrades to an empty contribution.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::http;
use crate::source::{courtesy_pause, Source};
use crate::types::{Confidence, Finding, Query, QueryType, SourceKind};
use serde_json::{json, Map, Value};

/// Breach-metadata lookup source.
///
/// Accepts email and username queries; only emails are resolvable
/// against the upstream, username queries contribute nothing.
pub struct BreachSource {
    base_url: String,
}

impl Default for BreachSource {
    fn default() -> Self {
        Self {
            base_url: "https://haveibeenpwned.com".into(),
        }
    }
}

impl BreachSource {
    /// Override the upstream base URL (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Source for BreachSource {
    async fn collect(
        &self,
        query: &Query,
        config: &EngineConfig,
    ) -> Result<Vec<Finding>, EngineError> {
        if !matches!(query.query_type, QueryType::Email | QueryType::Username) {
            return Ok(vec![]);
        }
        if query.query_type != QueryType::Email {
            // The breach index is keyed by account email.
            return Ok(vec![]);
        }

        courtesy_pause(self.kind(), config).await;
        tracing::trace!("breach source lookup");

        let client = http::build_client(config, self.kind().timeout_secs())?;
        let encoded = urlencoding::encode(&query.value);
        let lookup_url = format!("{}/api/v3/breachedaccount/{}", self.base_url, encoded);

        let mut request = client.get(&lookup_url);
        if let Some(ref key) = config.hibp_api_key {
            request = request.header("hibp-api-key", key);
        }

        let findings = match request.send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<Value>().await {
                    Ok(body) => {
                        let breach_names = parse_breach_names(&body);
                        let mut data = Map::new();
                        data.insert("email".into(), json!(query.value));
                        data.insert("breaches_found".into(), json!(breach_names.len()));
                        data.insert("breach_names".into(), json!(breach_names));
                        vec![Finding::new("breach_database", data, Confidence::High)
                            .with_url(format!("{}/account/{}", self.base_url, encoded))]
                    }
                    Err(err) => {
                        tracing::debug!(error = %err, "breach body unreadable");
                        vec![]
                    }
                }
            }
            Ok(response) if response.status() == reqwest::StatusCode::NOT_FOUND => {
                let mut data = Map::new();
                data.insert("email".into(), json!(query.value));
                data.insert("breaches_found".into(), json!(0));
                data.insert("status".into(), json!("no breaches recorded"));
                vec![Finding::new("breach_database", data, Confidence::High)]
            }
            Ok(response) => {
                tracing::debug!(status = %response.status(), "breach lookup non-success");
                vec![]
            }
            Err(err) => {
                tracing::debug!(error = %err, "breach lookup failed");
                vec![]
            }
        };

        tracing::debug!(count = findings.len(), "breach source findings");
        Ok(findings)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Breach
    }
}

/// Breach names from a `breachedaccount` response array.
pub(crate) fn parse_breach_names(body: &Value) -> Vec<String> {
    body.as_array()
        .map(|breaches| {
            breaches
                .iter()
                .filter_map(|b| b.get("Name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
