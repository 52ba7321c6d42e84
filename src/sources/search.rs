//! Search engine source — public instant-answer lookups.
//!
//! Queries the DuckDuckGo Instant Answer JSON API, which requires no
//! key and tolerates automated requests. Accepts every query type; the
//! query is composed as `"{type}:{value}"` so upstream answers stay
//! scoped to the identifier kind.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::http;
use crate::source::{courtesy_pause, Source};
use crate::types::{Confidence, Finding, Query, SourceKind};
use serde_json::{json, Map, Value};

/// Instant-answer search source.
///
/// Contributes at most two findings per query: a MEDIUM-confidence
/// abstract when the upstream has one, and always a LOW-confidence
/// search pointer recording the composed query as an analyst lead.
pub struct SearchSource {
    base_url: String,
}

impl Default for SearchSource {
    fn default() -> Self {
        Self {
            base_url: "https://api.duckduckgo.com".into(),
        }
    }
}

impl SearchSource {
    /// Override the upstream base URL (used by tests to point at a
    /// mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Source for SearchSource {
    async fn collect(
        &self,
        query: &Query,
        config: &EngineConfig,
    ) -> Result<Vec<Finding>, EngineError> {
        courtesy_pause(self.kind(), config).await;

        let composed = format!("{}:{}", query.query_type, query.value);
        tracing::trace!(query = %composed, "search source lookup");

        let client = http::build_client(config, self.kind().timeout_secs())?;
        let url = format!(
            "{}/?q={}&format=json&no_html=1",
            self.base_url,
            urlencoding::encode(&composed)
        );

        let mut findings = Vec::new();

        match client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<Value>().await {
                    Ok(body) => {
                        if let Some(finding) = parse_instant_answer(&body) {
                            findings.push(finding);
                        }
                    }
                    Err(err) => {
                        tracing::debug!(error = %err, "instant answer body unreadable");
                    }
                }
            }
            Ok(response) => {
                tracing::debug!(status = %response.status(), "instant answer non-success");
            }
            Err(err) => {
                tracing::debug!(error = %err, "instant answer request failed");
            }
        }

        // The pointer lead survives upstream failure.
        let mut data = Map::new();
        data.insert(
            "description".into(),
            json!(format!(
                "Public search results for {}: {}",
                query.query_type, query.value
            )),
        );
        data.insert("query".into(), json!(composed));
        findings.push(Finding::new("search_engine", data, Confidence::Low));

        tracing::debug!(count = findings.len(), "search source findings");
        Ok(findings)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Search
    }
}

/// Parse an instant-answer payload into a finding.
///
/// Returns `None` when the upstream has no abstract for the query.
/// Extracted as a separate function for testability with mock JSON.
pub(crate) fn parse_instant_answer(body: &Value) -> Option<Finding> {
    let abstract_text = body.get("AbstractText").and_then(Value::as_str)?;
    if abstract_text.is_empty() {
        return None;
    }
    let heading = body
        .get("Heading")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let abstract_url = body
        .get("AbstractURL")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let mut data = Map::new();
    data.insert("description".into(), json!(abstract_text));
    data.insert("title".into(), json!(heading));
    data.insert("url".into(), json!(abstract_url));

    let mut finding = Finding::new("search_engine", data, Confidence::Medium);
    if !abstract_url.is_empty() {
        finding = finding.with_url(abstract_url);
    }
    Some(finding)
}
