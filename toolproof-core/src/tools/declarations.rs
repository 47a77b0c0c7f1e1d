//! Per-transcript tool declarations
//!
//! Transcripts may carry the tool specs the agent was shown. They are passed
//! through untouched for now; this is the hook where per-sample schema
//! overrides would be applied to the registry.

use serde_json::Value;
use std::collections::BTreeMap;

/// Declared tool specs keyed by tool alias
pub type ToolDeclarations = BTreeMap<String, Value>;

/// Build the per-sample spec registry from declared tools
pub fn schema_from_inputs(declared: &ToolDeclarations) -> &ToolDeclarations {
    declared
}
