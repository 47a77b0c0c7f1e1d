//! Final-answer scoring against a gold specification

use serde::{Deserialize, Deserializer, Serialize};

use super::metrics::{numeric_close, outcome_em};

/// Expected final answer for a transcript.
///
/// `numeric` wins when both targets are present; with neither the answer
/// is unscorable and counts as a failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoldSpec {
    /// Numeric target. A `numeric` key holding `null` still makes the gold
    /// numeric; it is read as NaN, which no answer matches.
    #[serde(
        default,
        deserialize_with = "numeric_key",
        skip_serializing_if = "Option::is_none"
    )]
    pub numeric: Option<f64>,

    /// Tolerance for `numeric`; the scorer's default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tol: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

fn numeric_key<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(Some(value.unwrap_or(f64::NAN)))
}

impl GoldSpec {
    /// Numeric target with an explicit tolerance
    pub fn numeric(value: f64, tol: f64) -> Self {
        Self {
            numeric: Some(value),
            tol: Some(tol),
            text: None,
        }
    }

    /// Text target compared after normalization
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            numeric: None,
            tol: None,
            text: Some(text.into()),
        }
    }

    /// Gold applied to records that carry none
    pub fn empty_text() -> Self {
        Self::text("")
    }

    pub fn is_scorable(&self) -> bool {
        self.numeric.is_some() || self.text.is_some()
    }
}

/// Scores final answers; 1.0 on match, 0.0 otherwise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scorer {
    default_tolerance: f64,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(0.01)
    }
}

impl Scorer {
    /// Scorer whose numeric comparisons fall back to `default_tolerance`
    pub fn new(default_tolerance: f64) -> Self {
        Self { default_tolerance }
    }

    pub fn default_tolerance(&self) -> f64 {
        self.default_tolerance
    }

    pub fn score(&self, final_text: &str, gold: &GoldSpec) -> f64 {
        if let Some(target) = gold.numeric {
            let tol = gold.tol.unwrap_or(self.default_tolerance);
            return numeric_close(final_text, target, tol);
        }
        if let Some(ref text) = gold.text {
            return outcome_em(final_text, text);
        }
        0.0
    }
}
