//! Parameter schemas for canonical arguments
//!
//! A small JSON-Schema subset: `type`, `required` and nested `properties`.
//! That is all a capability's base contract needs; semantic rules live in
//! the capability's constraint checker instead.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single schema failure, addressed by dotted field path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field path (e.g., "date_range.start")
    pub field: String,

    /// Error message
    pub message: String,

    /// Error code
    pub code: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: None,
        }
    }

    /// Add an error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    fn missing(field: String) -> Self {
        let message = format!("missing required field '{}'", field);
        Self::new(field, message).with_code("MISSING_FIELD")
    }

    fn type_mismatch(field: String, expected: &str, actual: &Value) -> Self {
        let message = format!(
            "field '{}' expected {}, got {}",
            field,
            expected,
            json_type_name(actual)
        );
        Self::new(field, message).with_code("TYPE_MISMATCH")
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// JSON Schema describing a capability's canonical arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSchema {
    schema: Value,
}

impl ParameterSchema {
    /// Wrap a JSON Schema value
    pub fn new(schema: Value) -> Self {
        Self { schema }
    }

    /// The raw schema document
    pub fn as_value(&self) -> &Value {
        &self.schema
    }

    /// Validate `value` against the schema.
    ///
    /// Collects every failure rather than stopping at the first one. A field
    /// holding `null` is treated as absent for `required` purposes, since
    /// alias mappers emit `null` for keys the agent left out.
    pub fn validate(&self, value: &Value) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        validate_node(&self.schema, value, "", &mut errors);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn validate_node(schema: &Value, value: &Value, path: &str, errors: &mut Vec<ValidationError>) {
    if let Some(expected) = schema.get("type").and_then(Value::as_str) {
        if !type_matches(expected, value) {
            let field = if path.is_empty() { "$".to_string() } else { path.to_string() };
            errors.push(ValidationError::type_mismatch(field, expected, value));
            return;
        }
    }

    let Some(obj) = value.as_object() else {
        return;
    };

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for name in required.iter().filter_map(Value::as_str) {
            if is_absent(obj, name) {
                errors.push(ValidationError::missing(join_path(path, name)));
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (name, child_schema) in properties {
            match obj.get(name) {
                Some(Value::Null) | None => {}
                Some(child) => validate_node(child_schema, child, &join_path(path, name), errors),
            }
        }
    }
}

fn is_absent(obj: &Map<String, Value>, name: &str) -> bool {
    matches!(obj.get(name), None | Some(Value::Null))
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

fn type_matches(expected: &str, value: &Value) -> bool {
    match expected {
        "object" => value.is_object(),
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        // Unknown type keywords are not enforced
        _ => true,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
