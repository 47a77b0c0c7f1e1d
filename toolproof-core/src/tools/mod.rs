//! Tool contracts: capabilities, aliases and canonical arguments
//!
//! Agents may reach one capability through several tool aliases with
//! different argument shapes. This module owns the mapping from alias to
//! capability and the pipeline that turns an alias's raw arguments into a
//! validated canonical document:
//!
//! 1. resolve the alias ([`CapabilityRegistry::resolve_capability`])
//! 2. map fields ([`AliasAdapter::map_arguments`])
//! 3. check the base schema ([`ParameterSchema::validate`])
//! 4. check semantic rules ([`AliasAdapter::check_constraints`])
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use toolproof_core::tools::default_registry;
//!
//! let raw = json!({"symbol": "IBM", "start": "2020-01-01", "end": "2020-06-30"});
//! let canon = default_registry()
//!     .canonicalize("get_price_yahoo", raw.as_object().unwrap())
//!     .unwrap();
//! assert_eq!(canon.arguments["date_range"]["end"], "2020-06-30");
//! ```

mod canonical;
mod capability;
mod declarations;
pub mod price;
mod registry;
mod schema;

pub use canonical::{CanonicalArgs, CanonicalizeError};
pub use capability::{AliasAdapter, Capability, ConstraintRule, ConstraintViolation};
pub use declarations::{ToolDeclarations, schema_from_inputs};
pub use registry::{
    CapabilityRegistry, CapabilitySummary, RegistryError, default_registry,
    shared_registry,
};
pub use schema::{ParameterSchema, ValidationError};
