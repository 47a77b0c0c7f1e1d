//! Per-action step logs and their error taxonomy

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::parsing::ActionError;
use crate::tools::{CanonicalizeError, ConstraintRule};

/// Coarse classification of a failed action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepErrorKind {
    MalformedJson,
    /// Action-level structure (shape, field presence, field types)
    SchemaError,
    UnknownTool,
    /// Canonical arguments failed the capability's base schema
    SchemaViolation,
    ConstraintViolation,
}

/// Any failure while processing a single action
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StepError {
    #[error(transparent)]
    Action(#[from] ActionError),

    #[error("schema/constraints: {0}")]
    Canonicalize(#[from] CanonicalizeError),
}

impl StepError {
    pub fn kind(&self) -> StepErrorKind {
        match self {
            StepError::Action(e) if e.is_structural() => StepErrorKind::SchemaError,
            StepError::Action(_) => StepErrorKind::MalformedJson,
            StepError::Canonicalize(CanonicalizeError::UnknownTool(_)) => {
                StepErrorKind::UnknownTool
            }
            StepError::Canonicalize(CanonicalizeError::SchemaViolation(_)) => {
                StepErrorKind::SchemaViolation
            }
            StepError::Canonicalize(CanonicalizeError::ConstraintViolation(_)) => {
                StepErrorKind::ConstraintViolation
            }
        }
    }

    /// Rule broken, when this is a constraint violation
    pub fn constraint_rule(&self) -> Option<ConstraintRule> {
        match self {
            StepError::Canonicalize(CanonicalizeError::ConstraintViolation(v)) => Some(v.rule),
            _ => None,
        }
    }
}

/// Record of one processed action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepLog {
    /// 1 when the action went through the whole pipeline, else 0
    pub ast_valid: u8,
    pub err: Option<String>,
    pub err_kind: Option<StepErrorKind>,
    pub capability: Option<String>,
    pub observation: Option<Value>,

    /// Rule behind a constraint failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint_rule: Option<ConstraintRule>,
}

impl StepLog {
    /// Log for an action that failed before dispatch
    pub fn failed(error: &StepError) -> Self {
        Self {
            ast_valid: 0,
            err: Some(error.to_string()),
            err_kind: Some(error.kind()),
            capability: None,
            observation: None,
            constraint_rule: error.constraint_rule(),
        }
    }

    /// Log for an action that reached a simulator (or its sentinel)
    pub fn dispatched(capability: impl Into<String>, observation: Value) -> Self {
        Self {
            ast_valid: 1,
            err: None,
            err_kind: None,
            capability: Some(capability.into()),
            observation: Some(observation),
            constraint_rule: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.ast_valid == 1
    }

    /// True for the zero-length date range violation tracked in track 2
    pub fn is_range_violation(&self) -> bool {
        self.constraint_rule == Some(ConstraintRule::DistinctRangeBounds)
    }
}
