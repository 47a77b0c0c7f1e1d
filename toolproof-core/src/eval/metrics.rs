//! Scoring primitives

/// Tolerance used by [`numeric_close`] callers that have no scenario default
pub const DEFAULT_NUMERIC_TOLERANCE: f64 = 1e-6;

/// Collapse whitespace runs, trim, and lowercase
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Exact match after [`normalize_text`]; 1.0 or 0.0
pub fn outcome_em(pred: &str, gold: &str) -> f64 {
    if normalize_text(pred) == normalize_text(gold) {
        1.0
    } else {
        0.0
    }
}

/// 1.0 when `pred` parses as a float within `tol` of `gold`.
///
/// Unparseable predictions score 0.0 instead of failing.
pub fn numeric_close(pred: &str, gold: f64, tol: f64) -> f64 {
    match pred.trim().parse::<f64>() {
        Ok(value) if (value - gold).abs() <= tol => 1.0,
        _ => 0.0,
    }
}
