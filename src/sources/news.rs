//! News and forum source — public mention search leads.
//!
//! News APIs require keys and per-vendor contracts, so this source
//! records the search intent as a LOW-confidence lead pointing at a
//! public news search URL. Accepts every query type.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::source::{courtesy_pause, Source};
use crate::types::{Confidence, Finding, Query, SourceKind};
use serde_json::{json, Map};

/// News/forum search lead source.
pub struct NewsSource;

impl Default for NewsSource {
    fn default() -> Self {
        Self
    }
}

impl Source for NewsSource {
    async fn collect(
        &self,
        query: &Query,
        config: &EngineConfig,
    ) -> Result<Vec<Finding>, EngineError> {
        courtesy_pause(self.kind(), config).await;

        let search_url = format!(
            "https://news.google.com/search?q={}",
            urlencoding::encode(&query.value)
        );

        let mut data = Map::new();
        data.insert("query".into(), json!(query.value));
        data.insert("query_type".into(), json!(query.query_type.name()));
        data.insert(
            "description".into(),
            json!(format!(
                "Public news and forum search lead for {}: {}",
                query.query_type, query.value
            )),
        );

        tracing::debug!(count = 1, "news source findings");
        Ok(vec![
            Finding::new("news_forum", data, Confidence::Low).with_url(search_url)
        ])
    }

    fn kind(&self) -> SourceKind {
        SourceKind::News
    }
}
