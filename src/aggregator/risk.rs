//! Qualitative risk scoring over a finding set.
//!
//! A coarse, informational heuristic: three countable exposure
//! signals, each worth one point. The score is reproducible from the
//! finding set alone and carries no external state or randomness.

use super::correlate::data_string;
use crate::types::{Finding, RiskScore};
use std::collections::BTreeSet;

/// Score a finding set.
///
/// Factors, one point each:
/// 1. more than ten findings
/// 2. at least one non-empty `email` data value
/// 3. more than one distinct `domain` data value
///
/// Two or more points → HIGH, one → MEDIUM, none → LOW. Pure function:
/// the same finding set always scores the same.
pub fn score(findings: &[Finding]) -> RiskScore {
    let mut factors = 0u8;

    if findings.len() > 10 {
        factors += 1;
    }

    let has_email = findings
        .iter()
        .filter_map(|f| f.data.get("email"))
        .any(|v| !data_string(v).is_empty());
    if has_email {
        factors += 1;
    }

    let domains: BTreeSet<String> = findings
        .iter()
        .filter_map(|f| f.data.get("domain"))
        .map(data_string)
        .collect();
    if domains.len() > 1 {
        factors += 1;
    }

    match factors {
        0 => RiskScore::Low,
        1 => RiskScore::Medium,
        _ => RiskScore::High,
    }
}
