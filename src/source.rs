//! Trait definition for pluggable data source adapters.
//!
//! Each data source (search, social, whois/dns, breach, code hosting,
//! paste, news) implements [`Source`] to provide a uniform interface
//! for querying one upstream and normalising its output into findings.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::types::{Finding, Query, SourceKind};
use rand::Rng;
use std::time::Duration;

/// A pluggable data source adapter.
///
/// Implementors query one public upstream and normalise its responses
/// into [`Finding`] values. Each source handles its own:
///
/// - Query type acceptance (unsupported types yield an empty set, no error)
/// - Courtesy delay before the first outbound request
/// - URL construction with query encoding
/// - Degradation: third-party unavailability becomes an empty or
///   partial contribution, never a panic
///
/// A residual `Err` is a tagged failure the fan-out coordinator folds
/// into an empty contribution. Sources hold no cross-call state: same
/// inputs may yield different findings run-to-run as external data
/// changes, but nothing persists inside the adapter.
///
/// All implementations must be `Send + Sync` for concurrent fan-out.
pub trait Source: Send + Sync {
    /// Collect findings for one query.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] only for faults the source cannot degrade
    /// from internally (e.g. HTTP client construction). Upstream
    /// unavailability is absorbed and surfaces as fewer findings.
    fn collect(
        &self,
        query: &Query,
        config: &EngineConfig,
    ) -> impl std::future::Future<Output = Result<Vec<Finding>, EngineError>> + Send;

    /// Returns which [`SourceKind`] this implementation represents.
    fn kind(&self) -> SourceKind;
}

/// Sleep this source's fixed courtesy delay plus configured jitter.
///
/// Called by each source before its first outbound request. The fixed
/// component is per-source ([`SourceKind::courtesy_delay_ms`]); the
/// jitter range comes from [`EngineConfig::request_delay_ms`].
pub(crate) async fn courtesy_pause(kind: SourceKind, config: &EngineConfig) {
    let (min, max) = config.request_delay_ms;
    let jitter = if max > min {
        rand::thread_rng().gen_range(min..=max)
    } else {
        min
    };
    let total = kind.courtesy_delay_ms() + jitter;
    if total > 0 {
        tokio::time::sleep(Duration::from_millis(total)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Confidence, QueryType};
    use serde_json::Map;

    /// A mock source for testing trait bounds and async execution.
    struct MockSource {
        kind: SourceKind,
        findings: Vec<Finding>,
    }

    impl MockSource {
        fn new(kind: SourceKind, findings: Vec<Finding>) -> Self {
            Self { kind, findings }
        }

        fn failing(kind: SourceKind) -> Self {
            Self {
                kind,
                findings: vec![],
            }
        }
    }

    impl Source for MockSource {
        async fn collect(
            &self,
            _query: &Query,
            _config: &EngineConfig,
        ) -> Result<Vec<Finding>, EngineError> {
            if self.findings.is_empty() {
                return Err(EngineError::Http("mock source failure".into()));
            }
            Ok(self.findings.clone())
        }

        fn kind(&self) -> SourceKind {
            self.kind
        }
    }

    #[test]
    fn mock_source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockSource>();
    }

    #[tokio::test]
    async fn mock_source_returns_findings() {
        let finding = Finding::new("search_engine", Map::new(), Confidence::Low);
        let source = MockSource::new(SourceKind::Search, vec![finding]);
        let config = EngineConfig::default();
        let query = Query::new(QueryType::Username, "alice");

        let findings = source.collect(&query, &config).await;
        assert!(findings.is_ok());

        let findings = findings.expect("should succeed");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].source, "search_engine");
    }

    #[tokio::test]
    async fn mock_source_surfaces_tagged_failure() {
        let source = MockSource::failing(SourceKind::Breach);
        let config = EngineConfig::default();
        let query = Query::new(QueryType::Email, "a@b.com");

        let result = source.collect(&query, &config).await;
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("mock source failure"));
    }

    #[test]
    fn kind_returns_correct_variant() {
        let source = MockSource::new(SourceKind::Paste, vec![]);
        assert_eq!(source.kind(), SourceKind::Paste);
    }

    #[tokio::test]
    async fn courtesy_pause_zero_delay_returns_immediately() {
        let config = EngineConfig {
            request_delay_ms: (0, 0),
            ..Default::default()
        };
        let start = std::time::Instant::now();
        courtesy_pause(SourceKind::WhoisDns, &config).await;
        // WhoisDns has no fixed delay and jitter is zero.
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn courtesy_pause_sleeps_fixed_component() {
        let config = EngineConfig {
            request_delay_ms: (0, 0),
            ..Default::default()
        };
        let start = tokio::time::Instant::now();
        courtesy_pause(SourceKind::Search, &config).await;
        assert!(start.elapsed() >= Duration::from_millis(500));
    }
}
