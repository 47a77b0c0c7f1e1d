//! Capability registry: tool alias to capability lookup
//!
//! The registry is built once at start-up and read-only afterwards. Agents
//! that call syntactically different tools for the same capability resolve
//! to the same [`Capability`], which is what lets them be scored alike.
//!
//! # Example
//!
//! ```rust
//! use toolproof_core::tools::default_registry;
//!
//! let cap = default_registry().resolve_capability("get_price_yahoo").unwrap();
//! assert_eq!(cap.name(), "price_lookup");
//! assert!(default_registry().resolve_capability("get_weather").is_none());
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use super::capability::Capability;
use super::price;

/// Error type for registry operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    /// Capability with this name already exists
    #[error("Capability '{0}' is already registered")]
    DuplicateCapability(String),

    /// Alias already claimed by another capability
    #[error("Tool alias '{alias}' is already mapped to capability '{capability}'")]
    DuplicateAlias { alias: String, capability: String },

    /// Capability declares no aliases and could never be reached
    #[error("Capability '{0}' has no tool aliases")]
    NoAliases(String),
}

/// Summary of a capability for listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilitySummary {
    pub name: String,
    pub description: String,
    pub aliases: Vec<String>,
    pub parameters: Value,
}

impl From<&Capability> for CapabilitySummary {
    fn from(cap: &Capability) -> Self {
        Self {
            name: cap.name().to_string(),
            description: cap.description().to_string(),
            aliases: cap.aliases().into_iter().map(String::from).collect(),
            parameters: cap.parameter_schema().as_value().clone(),
        }
    }
}

/// Registry of capabilities keyed by name, with an alias index
#[derive(Default)]
pub struct CapabilityRegistry {
    capabilities: HashMap<String, Capability>,
    alias_index: HashMap<String, String>,
}

impl std::fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityRegistry")
            .field("capability_count", &self.capabilities.len())
            .field("aliases", &self.alias_index.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CapabilityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with every built-in capability
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register(price::price_lookup_capability())
            .expect("built-in capabilities have disjoint aliases");
        registry
    }

    /// Register a capability and index its aliases.
    ///
    /// Nothing is inserted if any check fails.
    pub fn register(&mut self, capability: Capability) -> Result<(), RegistryError> {
        let name = capability.name().to_string();
        if self.capabilities.contains_key(&name) {
            return Err(RegistryError::DuplicateCapability(name));
        }

        let aliases = capability.aliases();
        if aliases.is_empty() {
            return Err(RegistryError::NoAliases(name));
        }
        for alias in &aliases {
            if let Some(owner) = self.alias_index.get(*alias) {
                return Err(RegistryError::DuplicateAlias {
                    alias: alias.to_string(),
                    capability: owner.clone(),
                });
            }
        }

        for alias in aliases {
            self.alias_index.insert(alias.to_string(), name.clone());
        }
        tracing::debug!(capability = %name, "Registered capability");
        self.capabilities.insert(name, capability);
        Ok(())
    }

    /// Resolve a tool alias to its capability (exact match)
    pub fn resolve_capability(&self, alias: &str) -> Option<&Capability> {
        self.alias_index
            .get(alias)
            .and_then(|name| self.capabilities.get(name))
    }

    /// Get a capability by its canonical name
    pub fn capability(&self, name: &str) -> Option<&Capability> {
        self.capabilities.get(name)
    }

    /// All known aliases, sorted
    pub fn aliases(&self) -> Vec<&str> {
        let mut aliases: Vec<&str> = self.alias_index.keys().map(String::as_str).collect();
        aliases.sort_unstable();
        aliases
    }

    /// Get the number of registered capabilities
    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    /// List all capabilities, sorted by name
    pub fn list(&self) -> Vec<CapabilitySummary> {
        let mut summaries: Vec<CapabilitySummary> =
            self.capabilities.values().map(CapabilitySummary::from).collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        summaries
    }
}

static DEFAULT_REGISTRY: LazyLock<Arc<CapabilityRegistry>> =
    LazyLock::new(|| Arc::new(CapabilityRegistry::builtin()));

/// Process-wide registry of the built-in capabilities
pub fn default_registry() -> &'static CapabilityRegistry {
    &DEFAULT_REGISTRY
}

/// Shared handle to the process-wide registry
pub fn shared_registry() -> Arc<CapabilityRegistry> {
    Arc::clone(&DEFAULT_REGISTRY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{AliasAdapter, ConstraintViolation, ParameterSchema};
    use serde_json::{Map, json};

    struct PassThrough;

    impl AliasAdapter for PassThrough {
        fn map_arguments(&self, raw: &Map<String, Value>) -> Value {
            Value::Object(raw.clone())
        }

        fn check_constraints(&self, _canonical: &Value) -> Result<(), ConstraintViolation> {
            Ok(())
        }
    }

    fn weather(aliases: &[&str]) -> Capability {
        let mut cap = Capability::new(
            "weather_lookup",
            ParameterSchema::new(json!({"type": "object", "required": ["city"]})),
        )
        .with_description("Current weather for a city");
        for alias in aliases {
            cap = cap.with_alias(*alias, Arc::new(PassThrough));
        }
        cap
    }

    #[test]
    fn test_builtin_has_price_lookup() {
        let registry = CapabilityRegistry::builtin();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.aliases(), vec!["get_price_alpha", "get_price_yahoo"]);

        let yahoo = registry.resolve_capability("get_price_yahoo").unwrap();
        let alpha = registry.resolve_capability("get_price_alpha").unwrap();
        assert_eq!(yahoo.name(), "price_lookup");
        assert_eq!(alpha.name(), "price_lookup");
    }

    #[test]
    fn test_unknown_alias_is_none() {
        let registry = CapabilityRegistry::builtin();
        assert!(registry.resolve_capability("price_lookup").is_none());
        assert!(registry.resolve_capability("GET_PRICE_YAHOO").is_none());
        assert!(registry.resolve_capability("").is_none());
    }

    #[test]
    fn test_register_new_capability() {
        let mut registry = CapabilityRegistry::builtin();
        registry.register(weather(&["get_weather", "owm_current"])).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.resolve_capability("owm_current").unwrap().name(),
            "weather_lookup"
        );
        assert!(registry.capability("weather_lookup").is_some());
    }

    #[test]
    fn test_duplicate_capability() {
        let mut registry = CapabilityRegistry::new();
        registry.register(weather(&["get_weather"])).unwrap();
        assert!(matches!(
            registry.register(weather(&["other_weather"])),
            Err(RegistryError::DuplicateCapability(_))
        ));
    }

    #[test]
    fn test_alias_collision_leaves_registry_untouched() {
        let mut registry = CapabilityRegistry::builtin();
        let err = registry
            .register(weather(&["get_weather", "get_price_alpha"]))
            .unwrap_err();

        assert_eq!(
            err,
            RegistryError::DuplicateAlias {
                alias: "get_price_alpha".to_string(),
                capability: "price_lookup".to_string(),
            }
        );
        assert!(registry.resolve_capability("get_weather").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_capability_without_aliases_rejected() {
        let mut registry = CapabilityRegistry::new();
        assert!(matches!(
            registry.register(weather(&[])),
            Err(RegistryError::NoAliases(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_shared_registry_is_process_wide() {
        let a = shared_registry();
        let b = shared_registry();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(std::ptr::eq(a.as_ref(), default_registry()));
    }

    #[test]
    fn test_list_summaries() {
        let summaries = default_registry().list();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "price_lookup");
        assert_eq!(summaries[0].aliases, vec!["get_price_alpha", "get_price_yahoo"]);
        assert!(summaries[0].parameters.is_object());
    }
}
