//! Per-transcript metrics records

use serde::{Deserialize, Serialize};

use super::step::StepLog;

/// Outcome correctness
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Track1 {
    pub success: f64,
}

/// Protocol validity
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Track2 {
    pub ast_valid_rate: f64,
    pub invalid_call_rate: f64,
    pub constraint_violations: usize,
    pub num_steps: usize,
}

impl Track2 {
    /// Aggregate step logs; rates use `max(1, steps)` as denominator
    pub fn from_steps(steps: &[StepLog]) -> Self {
        let num_steps = steps.len();
        let valid = steps.iter().filter(|s| s.is_valid()).count();
        let invalid = num_steps - valid;
        let denominator = num_steps.max(1) as f64;

        Self {
            ast_valid_rate: valid as f64 / denominator,
            invalid_call_rate: invalid as f64 / denominator,
            constraint_violations: steps.iter().filter(|s| s.is_range_violation()).count(),
            num_steps,
        }
    }
}

/// Both tracks for one replayed transcript
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptMetrics {
    pub track1: Track1,
    pub track2: Track2,

    /// Step logs in execution order, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<StepLog>>,
}

/// Metrics for one transcript plus its identity, as written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub id: Option<String>,
    pub source: Option<String>,

    #[serde(flatten)]
    pub metrics: TranscriptMetrics,
}
