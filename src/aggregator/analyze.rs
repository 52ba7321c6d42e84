//! Analysis pipeline driver: fan-out, correlate, score, assemble.

use crate::config::EngineConfig;
use crate::types::{Analysis, AnalysisResult, Finding, Query, RiskScore};
use chrono::Utc;
use std::collections::HashSet;

use super::correlate::{correlate, Correlation};
use super::fanout::fan_out;
use super::risk::score;

/// Run one full analysis.
///
/// # Pipeline
///
/// 1. Fan the query out to every configured source concurrently
/// 2. Fold failed sources into empty contributions
/// 3. Correlate the surviving findings into patterns and a timeline
/// 4. Derive the qualitative risk score
/// 5. Assemble everything into a single timestamped result
///
/// Infallible past config validation: every degradation path upstream
/// shrinks the finding set, so a well-formed result always comes back,
/// with empty `results` and a LOW score when every source failed.
pub async fn run_analysis(query: &Query, config: &EngineConfig) -> AnalysisResult {
    let findings = fan_out(query, config).await;
    tracing::debug!(
        query_type = %query.query_type,
        total = findings.len(),
        "fan-out complete"
    );

    let correlation = correlate(&findings);
    let risk = score(&findings);

    assemble(findings, correlation, risk)
}

/// Package findings, correlation output, and a risk score into the
/// final result. Pure aggregation; stamps one capture time for the
/// whole result.
pub fn assemble(
    findings: Vec<Finding>,
    correlation: Correlation,
    risk: RiskScore,
) -> AnalysisResult {
    let total_sources = findings
        .iter()
        .map(|f| f.source.as_str())
        .collect::<HashSet<_>>()
        .len();

    let analysis = Analysis {
        total_sources,
        total_findings: findings.len(),
        patterns: correlation.patterns,
        timeline: correlation.timeline,
        risk_score: risk,
    };

    AnalysisResult {
        results: findings,
        analysis,
        risk_score: risk,
        timestamp: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Confidence;
    use serde_json::{json, Map};

    fn finding_from(source: &str) -> Finding {
        Finding::new(source, Map::new(), Confidence::Low)
    }

    #[test]
    fn assemble_counts_findings_and_distinct_sources() {
        let findings = vec![
            finding_from("github"),
            finding_from("github"),
            finding_from("whois"),
            finding_from("dns"),
        ];
        let result = assemble(findings, Correlation::default(), RiskScore::Low);

        assert_eq!(result.analysis.total_findings, 4);
        assert_eq!(result.analysis.total_sources, 3);
        assert_eq!(result.results.len(), 4);
    }

    #[test]
    fn assemble_empty_set() {
        let result = assemble(vec![], Correlation::default(), RiskScore::Low);

        assert!(result.results.is_empty());
        assert_eq!(result.analysis.total_findings, 0);
        assert_eq!(result.analysis.total_sources, 0);
        assert_eq!(result.risk_score, RiskScore::Low);
    }

    #[test]
    fn assemble_mirrors_risk_score() {
        let result = assemble(
            vec![finding_from("search_engine")],
            Correlation::default(),
            RiskScore::High,
        );
        assert_eq!(result.risk_score, RiskScore::High);
        assert_eq!(result.analysis.risk_score, RiskScore::High);
    }

    #[test]
    fn assemble_carries_correlation_output() {
        let mut data = Map::new();
        data.insert("username".into(), json!("alice"));
        let findings = vec![Finding::new("github", data, Confidence::High)];
        let correlation = correlate(&findings);

        let result = assemble(findings, correlation, RiskScore::Low);
        assert_eq!(result.analysis.timeline.len(), 1);
        assert!(result.analysis.patterns.is_empty());
    }
}
