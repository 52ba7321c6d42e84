//! Concurrent source fan-out with per-source fault isolation.
//!
//! Every configured source runs exactly once per query as its own
//! supervised task. A source that fails, whether by returning a tagged
//! error or by panicking outright, costs only its own contribution;
//! the join barrier always completes and the coordinator never fails.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::source::Source;
use crate::sources::{
    BreachSource, CodeHostingSource, NewsSource, PasteSource, SearchSource, SocialSource,
    WhoisDnsSource,
};
use crate::types::{Finding, Query, SourceKind};

/// Fan one query out to all configured sources and collect the union
/// of their findings.
///
/// Infallible by contract: degraded sources shrink the result, the
/// shape always comes back. Cross-source ordering follows the
/// configured source order; within one source's contribution the
/// source's own order is preserved. Slow sources are never cancelled:
/// the full cohort is awaited, bounded only by each source's own HTTP
/// timeout.
pub async fn fan_out(query: &Query, config: &EngineConfig) -> Vec<Finding> {
    let tasks: Vec<_> = config
        .sources
        .iter()
        .map(|&kind| {
            let q = query.clone();
            let cfg = config.clone();
            (kind, async move { collect_from(kind, &q, &cfg).await })
        })
        .collect();

    supervised(tasks).await
}

/// Query a single source, dispatching to the concrete implementation.
async fn collect_from(
    kind: SourceKind,
    query: &Query,
    config: &EngineConfig,
) -> Result<Vec<Finding>, EngineError> {
    match kind {
        SourceKind::Search => SearchSource::default().collect(query, config).await,
        SourceKind::Social => SocialSource::default().collect(query, config).await,
        SourceKind::WhoisDns => WhoisDnsSource::default().collect(query, config).await,
        SourceKind::Breach => BreachSource::default().collect(query, config).await,
        SourceKind::CodeHosting => CodeHostingSource::default().collect(query, config).await,
        SourceKind::Paste => PasteSource::default().collect(query, config).await,
        SourceKind::News => NewsSource::default().collect(query, config).await,
    }
}

/// Run the given collection tasks under supervision and fold the
/// outcomes.
///
/// Each task is spawned so that a panic is captured by its
/// [`tokio::task::JoinHandle`] instead of propagating into the join.
/// Tagged errors and aborted tasks are logged at warn level and
/// contribute nothing. Exposed so callers with custom source sets can
/// reuse the isolation barrier.
pub async fn supervised<F>(tasks: Vec<(SourceKind, F)>) -> Vec<Finding>
where
    F: std::future::Future<Output = Result<Vec<Finding>, EngineError>> + Send + 'static,
{
    let (kinds, handles): (Vec<_>, Vec<_>) = tasks
        .into_iter()
        .map(|(kind, task)| (kind, tokio::spawn(task)))
        .unzip();

    let outcomes = futures::future::join_all(handles).await;

    let mut findings = Vec::new();
    for (kind, outcome) in kinds.into_iter().zip(outcomes) {
        match outcome {
            Ok(Ok(contribution)) => {
                tracing::debug!(source = %kind, count = contribution.len(), "source returned findings");
                findings.extend(contribution);
            }
            Ok(Err(err)) => {
                tracing::warn!(source = %kind, error = %err, "source query failed");
            }
            Err(err) => {
                tracing::warn!(source = %kind, error = %err, "source task aborted");
            }
        }
    }
    findings
}
