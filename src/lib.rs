//! # osprey
//!
//! Concurrent open-source intelligence aggregation for identity-related
//! queries.
//!
//! Given one identifier (a username, email, phone number, domain, IP,
//! or company name), osprey fans the query out to independent public
//! data sources, collects their findings with per-source fault
//! isolation, correlates cross-source identity-reuse patterns, and
//! derives a qualitative risk classification.
//!
//! ## Design
//!
//! - Seven source adapters (search, social, whois/dns, breach,
//!   code hosting, paste, news) behind one capability trait
//! - Concurrent fan-out: sources run as supervised tasks; a failing or
//!   panicking source costs only its own contribution
//! - Degradation over failure: unreachable upstreams shrink the result,
//!   the caller always receives a complete, well-formed analysis
//! - Per-source courtesy delays and timeouts: polite to upstreams,
//!   no system-wide rate limiter
//!
//! ## Scope
//!
//! - Public data only: profile existence probes, breach metadata,
//!   registration records, nothing behind a login
//! - No persistence and no network listeners; this is a library
//! - Queries are logged at trace level only
//! - The risk score is informational, never a security verdict

pub mod aggregator;
pub mod config;
pub mod error;
pub mod http;
pub mod source;
pub mod sources;
pub mod types;

pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use source::Source;
pub use types::{
    Analysis, AnalysisResult, Confidence, Finding, Pattern, Query, QueryType, RiskScore,
    SourceKind, TimelineEntry,
};

/// Analyse one identifier using every source enabled in `config`.
///
/// Fans the query out to all configured sources concurrently, folds
/// per-source failures into empty contributions, and returns the
/// assembled [`AnalysisResult`]. Degraded sources reduce completeness,
/// never the shape of the result: even with every source down the
/// caller gets an empty finding set and a LOW risk score.
///
/// # Errors
///
/// Returns [`EngineError::Config`] if `config` is invalid. No other
/// error escapes the engine.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> osprey::Result<()> {
/// let config = osprey::EngineConfig::default();
/// let result = osprey::analyze(osprey::QueryType::Username, "alice", &config).await?;
/// println!("{} findings, risk {}", result.results.len(), result.risk_score);
/// # Ok(())
/// # }
/// ```
pub async fn analyze(
    query_type: QueryType,
    query_value: &str,
    config: &EngineConfig,
) -> Result<AnalysisResult> {
    config.validate()?;
    let query = Query::new(query_type, query_value);
    Ok(aggregator::analyze::run_analysis(&query, config).await)
}

/// Analyse one identifier with sensible default configuration.
///
/// Convenience wrapper around [`analyze`] using
/// [`EngineConfig::default()`].
///
/// # Errors
///
/// Same as [`analyze`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> osprey::Result<()> {
/// let result = osprey::analyze_default(osprey::QueryType::Domain, "example.com").await?;
/// println!("risk: {}", result.risk_score);
/// # Ok(())
/// # }
/// ```
pub async fn analyze_default(query_type: QueryType, query_value: &str) -> Result<AnalysisResult> {
    analyze(query_type, query_value, &EngineConfig::default()).await
}
