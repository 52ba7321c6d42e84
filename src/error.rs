//! Error types for the osprey crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. Query values never appear in error
//! messages, only at trace-level logging.

/// Errors that can occur while collecting and aggregating findings.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid engine configuration.
    #[error("config error: {0}")]
    Config(String),

    /// An HTTP request to an upstream data source failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse an upstream response.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Convenience type alias for osprey results.
pub type Result<T> = std::result::Result<T, EngineError>;
