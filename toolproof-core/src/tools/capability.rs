//! Capabilities and their alias adapters
//!
//! A capability is one semantic operation (price lookup) reachable through
//! several differently-shaped tool aliases. Each alias contributes an
//! [`AliasAdapter`]: it renames the agent's fields into the canonical shape
//! and runs the capability's shared semantic checks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use super::schema::ParameterSchema;

/// Identifies which semantic rule a constraint violation broke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintRule {
    /// A value passed the schema but is empty
    RequiredValue,

    /// A range's start and end must not be equal
    DistinctRangeBounds,
}

impl ConstraintRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintRule::RequiredValue => "required_value",
            ConstraintRule::DistinctRangeBounds => "distinct_range_bounds",
        }
    }
}

impl std::fmt::Display for ConstraintRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A semantic rule failure with a human-readable reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    pub rule: ConstraintRule,
    pub reason: String,
}

impl ConstraintViolation {
    pub fn new(rule: ConstraintRule, reason: impl Into<String>) -> Self {
        Self {
            rule,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Per-alias behavior: field mapping plus the capability's semantic checks
pub trait AliasAdapter: Send + Sync {
    /// Map raw agent arguments into the canonical shape.
    ///
    /// Must not fail: absent keys become `null` so schema validation can
    /// name them.
    fn map_arguments(&self, raw: &Map<String, Value>) -> Value;

    /// Check semantic rules on already schema-valid canonical arguments
    fn check_constraints(&self, canonical: &Value) -> Result<(), ConstraintViolation>;
}

/// A semantic operation and every alias that implements it
#[derive(Clone)]
pub struct Capability {
    name: String,
    description: String,
    schema: ParameterSchema,
    implementations: HashMap<String, Arc<dyn AliasAdapter>>,
}

impl std::fmt::Debug for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capability")
            .field("name", &self.name)
            .field("aliases", &self.aliases())
            .finish()
    }
}

impl Capability {
    /// Create a capability with no aliases yet
    pub fn new(name: impl Into<String>, schema: ParameterSchema) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            schema,
            implementations: HashMap::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add an alias implementation
    pub fn with_alias(mut self, alias: impl Into<String>, adapter: Arc<dyn AliasAdapter>) -> Self {
        self.implementations.insert(alias.into(), adapter);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Base schema every alias must map into
    pub fn parameter_schema(&self) -> &ParameterSchema {
        &self.schema
    }

    /// Adapter registered for `alias`
    pub fn implementation(&self, alias: &str) -> Option<&Arc<dyn AliasAdapter>> {
        self.implementations.get(alias)
    }

    /// Aliases in sorted order
    pub fn aliases(&self) -> Vec<&str> {
        let mut aliases: Vec<&str> = self.implementations.keys().map(String::as_str).collect();
        aliases.sort_unstable();
        aliases
    }
}
