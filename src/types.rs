//! Core types for OSINT queries, findings, and assembled analyses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;

/// The kind of identifier being investigated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    /// A handle used on social or code-hosting platforms.
    Username,
    /// An email address.
    Email,
    /// A phone number.
    Phone,
    /// A registered domain name.
    Domain,
    /// An IPv4 address.
    Ip,
    /// A company or organisation name.
    Company,
}

impl QueryType {
    /// Returns the wire name of this query type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Domain => "domain",
            Self::Ip => "ip",
            Self::Company => "company",
        }
    }

    /// Returns all query type variants.
    pub fn all() -> &'static [QueryType] {
        &[
            Self::Username,
            Self::Email,
            Self::Phone,
            Self::Domain,
            Self::Ip,
            Self::Company,
        ]
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One immutable analysis input: what to look for, and where the value
/// came from semantically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    /// Constrains which sources run and how they interpret `value`.
    pub query_type: QueryType,
    /// The identifier itself. Free-form; validity is source-specific.
    pub value: String,
}

impl Query {
    /// Build a query from a type and a raw value.
    pub fn new(query_type: QueryType, value: impl Into<String>) -> Self {
        Self {
            query_type,
            value: value.into(),
        }
    }
}

/// The closed set of data source adapters osprey can fan out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Public search engine instant answers.
    Search,
    /// Public social media profile existence probes.
    Social,
    /// WHOIS (RDAP) and DNS lookups for domains and IPs.
    WhoisDns,
    /// Public breach-metadata lookups (no credential data).
    Breach,
    /// Public code-hosting profile and repository data.
    CodeHosting,
    /// Public paste site search leads.
    Paste,
    /// Public news and forum search leads.
    News,
}

impl SourceKind {
    /// Returns the short name of this source kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Social => "social",
            Self::WhoisDns => "whois_dns",
            Self::Breach => "breach",
            Self::CodeHosting => "code_hosting",
            Self::Paste => "paste",
            Self::News => "news",
        }
    }

    /// Returns all available source kinds.
    pub fn all() -> &'static [SourceKind] {
        &[
            Self::Search,
            Self::Social,
            Self::WhoisDns,
            Self::Breach,
            Self::CodeHosting,
            Self::Paste,
            Self::News,
        ]
    }

    /// Whether this source handles the given query type at all.
    ///
    /// A source asked about a type it does not accept contributes an
    /// empty finding set without touching the network.
    pub fn accepts(&self, query_type: QueryType) -> bool {
        match self {
            Self::Search | Self::News => true,
            Self::Social | Self::CodeHosting => {
                matches!(query_type, QueryType::Username | QueryType::Email)
            }
            Self::WhoisDns => matches!(query_type, QueryType::Domain | QueryType::Ip),
            Self::Breach => matches!(query_type, QueryType::Email | QueryType::Username),
            Self::Paste => matches!(
                query_type,
                QueryType::Email | QueryType::Username | QueryType::Domain
            ),
        }
    }

    /// Per-source upstream HTTP timeout in seconds.
    ///
    /// The values are deliberately asymmetric: the social probe issues
    /// several cheap HEAD requests and fails fast, while the JSON API
    /// sources tolerate slower upstreams.
    pub fn timeout_secs(&self) -> u64 {
        match self {
            Self::Social | Self::Paste | Self::News => 5,
            Self::Search | Self::WhoisDns | Self::Breach | Self::CodeHosting => 10,
        }
    }

    /// Fixed courtesy delay before this source's first outbound request,
    /// in milliseconds. Keeps request pacing polite per upstream, not a
    /// system-wide rate limiter.
    pub fn courtesy_delay_ms(&self) -> u64 {
        match self {
            Self::Search | Self::Breach | Self::Paste => 500,
            Self::News => 400,
            Self::Social | Self::CodeHosting => 300,
            Self::WhoisDns => 0,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How much weight a finding deserves, as reported by its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        };
        f.write_str(name)
    }
}

/// Qualitative exposure classification for a whole finding set.
///
/// Informational only — a coarse heuristic, never a security verdict.
/// Ordered: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskScore {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        };
        f.write_str(name)
    }
}

/// One atomic piece of information returned by a single source for a
/// single query. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Source label. Usually the adapter name, but one adapter may emit
    /// several labels (the whois/dns adapter labels findings `"whois"`
    /// and `"dns"` separately).
    pub source: String,
    /// Extracted fields, schema-free. Keys like `username`, `email` and
    /// `domain` participate in correlation and risk scoring.
    pub data: Map<String, Value>,
    /// Source-reported confidence in this finding.
    pub confidence: Confidence,
    /// When the finding was produced.
    pub timestamp: DateTime<Utc>,
    /// Where a human can verify the finding, if anywhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Finding {
    /// Build a finding stamped with the current time.
    pub fn new(source: impl Into<String>, data: Map<String, Value>, confidence: Confidence) -> Self {
        Self {
            source: source.into(),
            data,
            confidence,
            timestamp: Utc::now(),
            url: None,
        }
    }

    /// Attach a verification URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// A cross-source pattern detected over one finding set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pattern {
    /// Pattern identifier, e.g. `"username_reuse"`.
    #[serde(rename = "type")]
    pub pattern_type: String,
    /// Human-readable summary of the pattern.
    pub description: String,
    /// The distinct values that triggered the pattern.
    pub evidence: BTreeSet<String>,
}

/// One dated event derived from a finding, for chronological display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// When the underlying activity was observed.
    pub date: DateTime<Utc>,
    /// Which source observed it.
    pub source: String,
    /// Short description of the event.
    pub event: String,
}

/// Aggregated statistics, patterns, and risk for one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    /// Number of distinct source labels across all findings.
    pub total_sources: usize,
    /// Number of findings collected.
    pub total_findings: usize,
    /// Detected cross-source patterns.
    pub patterns: Vec<Pattern>,
    /// Findings as dated events, ascending by date.
    pub timeline: Vec<TimelineEntry>,
    /// Qualitative risk classification of the finding set.
    pub risk_score: RiskScore,
}

/// The engine's sole output: every finding plus the derived analysis.
///
/// All fields are computed fresh per invocation; nothing is shared
/// between queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Every finding collected from the surviving sources.
    pub results: Vec<Finding>,
    /// Derived statistics, patterns, timeline, and risk.
    pub analysis: Analysis,
    /// Mirror of `analysis.risk_score` for callers that only need the
    /// headline classification.
    pub risk_score: RiskScore,
    /// Capture time for the whole result.
    pub timestamp: DateTime<Utc>,
}
