//! Analysis aggregator: concurrent fan-out, correlation, risk scoring.
//!
//! This module fans one query out to every configured data source
//! concurrently, folds per-source failures into empty contributions,
//! correlates the surviving findings into patterns and a timeline,
//! derives a qualitative risk score, and assembles the final result.

pub mod analyze;
pub mod correlate;
pub mod fanout;
pub mod risk;
