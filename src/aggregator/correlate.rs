//! Cross-source pattern detection and timeline assembly.
//!
//! Patterns are simple set-membership checks over finding data, not
//! identity resolution: the engine reports what recurs, it does not
//! claim two findings describe the same person.

use crate::types::{Finding, Pattern, TimelineEntry};
use serde_json::Value;
use std::collections::BTreeSet;

/// Derived correlation output for one finding set.
#[derive(Debug, Clone, Default)]
pub struct Correlation {
    /// Detected cross-source patterns.
    pub patterns: Vec<Pattern>,
    /// Findings as dated events, ascending by date.
    pub timeline: Vec<TimelineEntry>,
}

/// Correlate a finding set into patterns and a timeline.
pub fn correlate(findings: &[Finding]) -> Correlation {
    Correlation {
        patterns: detect_patterns(findings),
        timeline: build_timeline(findings),
    }
}

/// Scan findings for identity-reuse patterns.
///
/// The reuse check is keyed on the literal `username` data key: two or
/// more distinct values across the set yield a single `username_reuse`
/// pattern carrying every distinct value as evidence. Email and domain
/// recurrence feed the risk score instead, not a pattern.
pub fn detect_patterns(findings: &[Finding]) -> Vec<Pattern> {
    let usernames: BTreeSet<String> = findings
        .iter()
        .filter_map(|f| f.data.get("username"))
        .map(data_string)
        .collect();

    let mut patterns = Vec::new();
    if usernames.len() > 1 {
        patterns.push(Pattern {
            pattern_type: "username_reuse".into(),
            description: format!(
                "Username found across {} different platforms",
                usernames.len()
            ),
            evidence: usernames,
        });
    }
    patterns
}

/// Build the chronological event timeline for a finding set.
///
/// Every finding contributes one entry; the event text is the
/// finding's own `description` when it has one. The sort is stable, so
/// same-instant findings keep their input order.
pub fn build_timeline(findings: &[Finding]) -> Vec<TimelineEntry> {
    let mut timeline: Vec<TimelineEntry> = findings
        .iter()
        .map(|f| TimelineEntry {
            date: f.timestamp,
            source: f.source.clone(),
            event: f
                .data
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("Activity detected")
                .to_string(),
        })
        .collect();
    timeline.sort_by(|a, b| a.date.cmp(&b.date));
    timeline
}

/// Render a data value for set-membership comparison.
///
/// Strings compare by content, null collapses to empty, everything
/// else by its JSON rendering.
pub(crate) fn data_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
