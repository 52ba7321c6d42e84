//! Integration tests for the analysis pipeline.
//!
//! These tests exercise the full fan-out → correlate → score →
//! assemble pipeline using synthetic findings (no network calls).
//! Live end-to-end tests are marked `#[ignore]` for manual/periodic
//! validation.

use chrono::{Duration, Utc};
use osprey::aggregator::analyze::assemble;
use osprey::aggregator::correlate::correlate;
use osprey::aggregator::fanout::supervised;
use osprey::aggregator::risk::score;
use osprey::{Confidence, EngineError, Finding, RiskScore, SourceKind};
use serde_json::{json, Map, Value};

fn make_finding(source: &str, pairs: &[(&str, &str)]) -> Finding {
    let mut data = Map::new();
    for (key, value) in pairs {
        data.insert((*key).into(), json!(value));
    }
    Finding::new(source, data, Confidence::Medium)
}

/// Run the synthetic pipeline exactly the way the engine assembles a
/// real analysis.
fn run_pipeline(findings: Vec<Finding>) -> osprey::AnalysisResult {
    let correlation = correlate(&findings);
    let risk = score(&findings);
    assemble(findings, correlation, risk)
}

#[test]
fn zero_findings_yield_empty_low_risk_result() {
    let result = run_pipeline(vec![]);

    assert!(result.results.is_empty());
    assert_eq!(result.risk_score, RiskScore::Low);
    assert_eq!(result.analysis.total_sources, 0);
    assert_eq!(result.analysis.total_findings, 0);
    assert!(result.analysis.patterns.is_empty());
    assert!(result.analysis.timeline.is_empty());
}

#[test]
fn totals_invariants_hold_for_any_finding_set() {
    let findings = vec![
        make_finding("github", &[("username", "alice")]),
        make_finding("github", &[("username", "alice")]),
        make_finding("whois", &[("domain", "example.com")]),
        make_finding("dns", &[("domain", "example.com")]),
        make_finding("breach_database", &[("email", "a@b.com")]),
    ];
    let result = run_pipeline(findings);

    assert_eq!(result.analysis.total_findings, result.results.len());
    let distinct: std::collections::HashSet<&str> =
        result.results.iter().map(|f| f.source.as_str()).collect();
    assert_eq!(result.analysis.total_sources, distinct.len());
    assert_eq!(result.analysis.total_sources, 4);
}

#[test]
fn eleven_findings_with_email_and_two_domains_score_high() {
    // 11 findings from 3 distinct sources, one email, two distinct
    // domains: all three risk factors fire.
    let mut findings: Vec<Finding> = (0..8)
        .map(|_| make_finding("search_engine", &[]))
        .collect();
    findings.push(make_finding("breach_database", &[("email", "a@b.com")]));
    findings.push(make_finding("whois", &[("domain", "example.com")]));
    findings.push(make_finding("whois", &[("domain", "example.org")]));
    assert_eq!(findings.len(), 11);

    let result = run_pipeline(findings);

    assert_eq!(result.analysis.total_sources, 3);
    assert_eq!(result.risk_score, RiskScore::High);
    assert_eq!(result.analysis.risk_score, RiskScore::High);
}

#[test]
fn same_username_everywhere_is_not_reuse() {
    let findings = vec![
        make_finding("github", &[("username", "alice")]),
        make_finding("social_media", &[("username", "alice")]),
    ];
    let result = run_pipeline(findings);
    assert!(result.analysis.patterns.is_empty());
}

#[test]
fn two_distinct_usernames_are_reported_as_reuse() {
    let findings = vec![
        make_finding("github", &[("username", "alice")]),
        make_finding("social_media", &[("username", "alice99")]),
    ];
    let result = run_pipeline(findings);

    assert_eq!(result.analysis.patterns.len(), 1);
    let pattern = &result.analysis.patterns[0];
    assert_eq!(pattern.pattern_type, "username_reuse");
    assert!(pattern.evidence.contains("alice"));
    assert!(pattern.evidence.contains("alice99"));
}

#[test]
fn timeline_sorted_ascending_regardless_of_input_order() {
    let now = Utc::now();
    let mut findings = vec![
        make_finding("whois", &[]),
        make_finding("github", &[]),
        make_finding("breach_database", &[]),
    ];
    findings[0].timestamp = now;
    findings[1].timestamp = now - Duration::hours(3);
    findings[2].timestamp = now - Duration::hours(1);

    let result = run_pipeline(findings);

    let timeline = &result.analysis.timeline;
    assert_eq!(timeline.len(), 3);
    for i in 1..timeline.len() {
        assert!(
            timeline[i - 1].date <= timeline[i].date,
            "timeline not sorted at position {i}"
        );
    }
    assert_eq!(timeline[0].source, "github");
    assert_eq!(timeline[2].source, "whois");
}

#[test]
fn risk_scoring_is_pure_over_repeated_runs() {
    let findings = vec![
        make_finding("breach_database", &[("email", "a@b.com")]),
        make_finding("whois", &[("domain", "example.com")]),
    ];
    let first = score(&findings);
    let second = score(&findings);
    assert_eq!(first, second);
    assert_eq!(first, RiskScore::Medium);
}

#[tokio::test]
async fn one_failing_source_costs_only_its_own_contribution() {
    // Seven sources, one fails; the other six contributions all land.
    let tasks: Vec<_> = SourceKind::all()
        .iter()
        .map(|&kind| {
            (kind, async move {
                if kind == SourceKind::Breach {
                    return Err(EngineError::Http("upstream unreachable".into()));
                }
                Ok(vec![make_finding(kind.name(), &[])])
            })
        })
        .collect();

    let findings = supervised(tasks).await;

    assert_eq!(findings.len(), 6);
    assert!(findings.iter().all(|f| f.source != "breach"));

    let result = run_pipeline(findings);
    assert_eq!(result.analysis.total_findings, 6);
    assert_eq!(result.analysis.total_sources, 6);
}

#[tokio::test]
async fn fully_degraded_fan_out_still_assembles_low_risk_result() {
    let tasks: Vec<_> = SourceKind::all()
        .iter()
        .map(|&kind| {
            (kind, async move {
                Err::<Vec<Finding>, _>(EngineError::Http("upstream unreachable".into()))
            })
        })
        .collect();

    let findings = supervised(tasks).await;
    assert!(findings.is_empty());

    let result = run_pipeline(findings);
    assert!(result.results.is_empty());
    assert_eq!(result.risk_score, RiskScore::Low);
}

#[test]
fn analysis_result_serializes_with_wire_names() {
    let findings = vec![make_finding("github", &[("username", "alice")])];
    let result = run_pipeline(findings);

    let json = serde_json::to_value(&result).expect("serialize");
    assert_eq!(json["risk_score"], json!("LOW"));
    assert_eq!(json["analysis"]["total_findings"], json!(1));
    assert!(json["results"][0]["timestamp"].is_string());
    assert_eq!(json["results"][0]["confidence"], json!("MEDIUM"));
}

#[test]
fn pattern_evidence_survives_serialization() {
    let findings = vec![
        make_finding("github", &[("username", "alice")]),
        make_finding("paste_sites", &[("username", "al1ce")]),
    ];
    let result = run_pipeline(findings);

    let json = serde_json::to_value(&result).expect("serialize");
    let evidence = json["analysis"]["patterns"][0]["evidence"]
        .as_array()
        .expect("evidence array");
    let values: Vec<&str> = evidence.iter().filter_map(Value::as_str).collect();
    assert_eq!(values, vec!["al1ce", "alice"]);
}

// ── Live end-to-end tests (require network) ───────────────────────────
// Run with: cargo test --test engine_integration live_ -- --ignored

#[tokio::test]
#[ignore]
async fn live_username_analysis_is_well_formed() {
    let result = osprey::analyze_default(osprey::QueryType::Username, "torvalds").await;
    match result {
        Ok(result) => {
            assert_eq!(result.analysis.total_findings, result.results.len());
            assert_eq!(result.risk_score, result.analysis.risk_score);
            for i in 1..result.analysis.timeline.len() {
                assert!(result.analysis.timeline[i - 1].date <= result.analysis.timeline[i].date);
            }
        }
        Err(e) => {
            // Network failures are acceptable in CI; just log.
            eprintln!("Live analysis failed (acceptable in CI): {e}");
        }
    }
}

#[tokio::test]
#[ignore]
async fn live_domain_analysis_collects_whois_and_dns() {
    match osprey::analyze_default(osprey::QueryType::Domain, "example.com").await {
        Ok(result) => {
            assert!(!result.results.is_empty(), "domain analysis should find data");
        }
        Err(e) => {
            eprintln!("Live domain analysis failed (acceptable): {e}");
        }
    }
}
