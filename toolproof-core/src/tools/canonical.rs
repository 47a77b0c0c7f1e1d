//! Canonicalization: alias arguments to validated capability arguments

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::capability::ConstraintViolation;
use super::registry::CapabilityRegistry;
use super::schema::ValidationError;

/// Arguments normalized to a capability's canonical shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalArgs {
    /// Capability the arguments belong to
    pub capability: String,

    /// Canonical argument document
    pub arguments: Value,
}

/// Why an action's arguments could not be canonicalized
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CanonicalizeError {
    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    /// Base schema failures, in discovery order
    #[error("{}", join_errors(.0))]
    SchemaViolation(Vec<ValidationError>),

    #[error("{0}")]
    ConstraintViolation(ConstraintViolation),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl CapabilityRegistry {
    /// Canonicalize raw arguments for `alias`.
    ///
    /// Steps short-circuit in order: alias resolution, field mapping, base
    /// schema, capability constraints.
    pub fn canonicalize(
        &self,
        alias: &str,
        raw: &Map<String, Value>,
    ) -> Result<CanonicalArgs, CanonicalizeError> {
        let capability = self
            .resolve_capability(alias)
            .ok_or_else(|| CanonicalizeError::UnknownTool(alias.to_string()))?;
        let adapter = capability
            .implementation(alias)
            .ok_or_else(|| CanonicalizeError::UnknownTool(alias.to_string()))?;

        let mapped = adapter.map_arguments(raw);

        capability
            .parameter_schema()
            .validate(&mapped)
            .map_err(CanonicalizeError::SchemaViolation)?;

        adapter
            .check_constraints(&mapped)
            .map_err(CanonicalizeError::ConstraintViolation)?;

        Ok(CanonicalArgs {
            capability: capability.name().to_string(),
            arguments: mapped,
        })
    }
}
