//! Action records and the strict action parser

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::parser::OutputParser;

/// One tool invocation emitted by the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Tool alias the agent called
    pub tool: String,

    /// Raw arguments, exactly as the agent supplied them
    pub arguments: Map<String, Value>,
}

impl Action {
    /// Create an action from its parts
    pub fn new(tool: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            tool: tool.into(),
            arguments,
        }
    }
}

/// Reasons an action is rejected before canonicalization
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ActionError {
    /// Text is not JSON at all
    #[error("invalid JSON: {0}")]
    MalformedJson(String),

    #[error("action must be a JSON object")]
    NotAnObject,

    #[error("action requires 'tool' and 'arguments'")]
    MissingFields,

    #[error("'arguments' must be an object")]
    ArgumentsNotObject,

    #[error("'tool' must be a string")]
    ToolNotString,

    /// Empty tool name, caught by the well-formedness gate
    #[error("invalid tool name")]
    InvalidToolName,
}

impl ActionError {
    /// True for every structural rejection (everything but malformed JSON)
    pub fn is_structural(&self) -> bool {
        !matches!(self, ActionError::MalformedJson(_))
    }
}

/// Parse the raw text of an action.
///
/// Checks run in a fixed order so the reported error is stable: JSON syntax,
/// object shape, field presence, `arguments` type, `tool` type.
pub fn parse_action(raw: &str) -> Result<Action, ActionError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ActionError::MalformedJson(e.to_string()))?;

    let Value::Object(mut obj) = value else {
        return Err(ActionError::NotAnObject);
    };

    if !obj.contains_key("tool") || !obj.contains_key("arguments") {
        return Err(ActionError::MissingFields);
    }

    let arguments = match obj.remove("arguments") {
        Some(Value::Object(arguments)) => arguments,
        _ => return Err(ActionError::ArgumentsNotObject),
    };

    let tool = match obj.remove("tool") {
        Some(Value::String(tool)) => tool,
        _ => return Err(ActionError::ToolNotString),
    };

    Ok(Action { tool, arguments })
}

/// Pre-condition gate ahead of canonicalization.
///
/// The parser already guarantees the field types; this rejects the
/// remaining degenerate case of an empty tool name.
pub fn is_well_formed(action: &Action) -> Result<(), ActionError> {
    if action.tool.is_empty() {
        return Err(ActionError::InvalidToolName);
    }
    Ok(())
}

/// [`OutputParser`] adapter that also applies the well-formedness gate
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionParser;

impl ActionParser {
    pub fn new() -> Self {
        Self
    }
}

impl OutputParser for ActionParser {
    type Output = Action;
    type Error = ActionError;

    fn parse(&self, raw: &str) -> Result<Action, ActionError> {
        let action = parse_action(raw)?;
        is_well_formed(&action)?;
        Ok(action)
    }

    fn name(&self) -> &'static str {
        "action"
    }
}
