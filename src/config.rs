//! Engine configuration with sensible defaults.
//!
//! [`EngineConfig`] controls which sources are fanned out to, request
//! pacing, and upstream credentials. It is constructed once by the
//! caller and passed down explicitly; the engine keeps no process-wide
//! state between queries.

use crate::error::EngineError;
use crate::types::SourceKind;

/// Configuration for one or more analysis runs.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Which sources to fan out to. Each listed source is invoked
    /// exactly once per query, concurrently.
    pub sources: Vec<SourceKind>,
    /// Random jitter range in milliseconds `(min, max)` added to each
    /// source's fixed courtesy delay. Spreads concurrent first requests
    /// over time.
    pub request_delay_ms: (u64, u64),
    /// Custom User-Agent string. If `None`, rotates through a built-in
    /// list of realistic browser User-Agents.
    pub user_agent: Option<String>,
    /// Optional Have I Been Pwned API key, forwarded by the breach
    /// source. Lookups work without one at stricter rate limits.
    pub hibp_api_key: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sources: SourceKind::all().to_vec(),
            request_delay_ms: (0, 250),
            user_agent: None,
            hibp_api_key: None,
        }
    }
}

impl EngineConfig {
    /// Validates this configuration, returning an error if any field is
    /// invalid.
    ///
    /// Checks:
    /// - `sources` must not be empty
    /// - `sources` must not contain duplicates (each source runs exactly once)
    /// - `request_delay_ms.0` must be <= `request_delay_ms.1`
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.sources.is_empty() {
            return Err(EngineError::Config(
                "at least one source must be enabled".into(),
            ));
        }
        for (i, kind) in self.sources.iter().enumerate() {
            if self.sources[..i].contains(kind) {
                return Err(EngineError::Config(format!(
                    "source {kind} listed more than once"
                )));
            }
        }
        if self.request_delay_ms.0 > self.request_delay_ms.1 {
            return Err(EngineError::Config(
                "request_delay_ms min must be <= max".into(),
            ));
        }
        Ok(())
    }
}
