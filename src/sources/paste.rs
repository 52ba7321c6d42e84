//! Paste site source — public paste search leads.
//!
//! Paste indexes have no stable public search API, so this source
//! records the search intent as a LOW-confidence lead pointing at a
//! public dork URL an analyst can follow. Only public pastes are ever
//! in scope.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::source::{courtesy_pause, Source};
use crate::types::{Confidence, Finding, Query, QueryType, SourceKind};
use serde_json::{json, Map};

/// Paste search lead source.
pub struct PasteSource;

impl Default for PasteSource {
    fn default() -> Self {
        Self
    }
}

impl Source for PasteSource {
    async fn collect(
        &self,
        query: &Query,
        config: &EngineConfig,
    ) -> Result<Vec<Finding>, EngineError> {
        if !matches!(
            query.query_type,
            QueryType::Email | QueryType::Username | QueryType::Domain
        ) {
            return Ok(vec![]);
        }

        courtesy_pause(self.kind(), config).await;

        let search_url = format!(
            "https://www.google.com/search?q=site:pastebin.com+{}",
            urlencoding::encode(&query.value)
        );

        let mut data = Map::new();
        data.insert("query".into(), json!(query.value));
        data.insert("query_type".into(), json!(query.query_type.name()));
        data.insert(
            "description".into(),
            json!(format!(
                "Public paste search lead for {}: {}",
                query.query_type, query.value
            )),
        );

        tracing::debug!(count = 1, "paste source findings");
        Ok(vec![
            Finding::new("paste_sites", data, Confidence::Low).with_url(search_url)
        ])
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Paste
    }
}
