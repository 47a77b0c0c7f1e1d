//! Custom capabilities and simulators plugged into the replayer

use serde_json::{Map, Value, json};
use std::sync::Arc;
use toolproof_core::prelude::*;

const UNIT_CONVERT: &str = "unit_convert";

/// `convert(value, from, to)` and `to_unit(amount, source, target)`
struct Rename(&'static [(&'static str, &'static str)]);

impl AliasAdapter for Rename {
    fn map_arguments(&self, raw: &Map<String, Value>) -> Value {
        let mapped = self
            .0
            .iter()
            .map(|(from, to)| (to.to_string(), raw.get(*from).cloned().unwrap_or(Value::Null)))
            .collect();
        Value::Object(mapped)
    }

    fn check_constraints(&self, canonical: &Value) -> std::result::Result<(), ConstraintViolation> {
        if canonical["from"] == canonical["to"] {
            return Err(ConstraintViolation::new(
                ConstraintRule::DistinctRangeBounds,
                "from and to units must differ",
            ));
        }
        Ok(())
    }
}

struct MetersToFeet;

impl Simulator for MetersToFeet {
    fn capability(&self) -> &str {
        UNIT_CONVERT
    }

    fn call(&self, args: &CanonicalArgs) -> Observation {
        let value = args.arguments["value"].as_f64().unwrap_or_default();
        Arc::new(json!({"result": (value * 3.28084 * 100.0).round() / 100.0}))
    }
}

fn registry() -> Arc<CapabilityRegistry> {
    let schema = ParameterSchema::new(json!({
        "type": "object",
        "required": ["value", "from", "to"],
        "properties": {
            "value": {"type": "number"},
            "from": {"type": "string"},
            "to": {"type": "string"}
        }
    }));
    let capability = Capability::new(UNIT_CONVERT, schema)
        .with_alias(
            "convert",
            Arc::new(Rename(&[("value", "value"), ("from", "from"), ("to", "to")])),
        )
        .with_alias(
            "to_unit",
            Arc::new(Rename(&[("amount", "value"), ("source", "from"), ("target", "to")])),
        );

    let mut registry = CapabilityRegistry::builtin();
    registry.register(capability).unwrap();
    Arc::new(registry)
}

#[test]
fn test_custom_capability_end_to_end() {
    let simulators = SimulatorSet::builtin().with_simulator(Arc::new(MetersToFeet));
    let replayer = Replayer::default()
        .with_registry(registry())
        .with_simulators(simulators);

    let convert = replayer
        .run_step_action(r#"{"tool":"convert","arguments":{"value":10,"from":"m","to":"ft"}}"#);
    let to_unit = replayer
        .run_step_action(r#"{"tool":"to_unit","arguments":{"amount":10,"source":"m","target":"ft"}}"#);

    assert!(convert.is_valid());
    assert_eq!(convert, to_unit);
    assert_eq!(convert.observation, Some(json!({"result": 32.81})));
}

#[test]
fn test_custom_capability_violations() {
    let replayer = Replayer::default().with_registry(registry());

    let type_error = replayer
        .run_step_action(r#"{"tool":"convert","arguments":{"value":"ten","from":"m","to":"ft"}}"#);
    assert_eq!(type_error.err_kind, Some(StepErrorKind::SchemaViolation));

    let same_units = replayer
        .run_step_action(r#"{"tool":"to_unit","arguments":{"amount":1,"source":"m","target":"m"}}"#);
    assert_eq!(same_units.err_kind, Some(StepErrorKind::ConstraintViolation));
    assert!(same_units.is_range_violation());
}

#[test]
fn test_registered_capability_without_simulator() {
    let replayer = Replayer::default().with_registry(registry());
    let log =
        replayer.run_step_action(r#"{"tool":"convert","arguments":{"value":1,"from":"m","to":"ft"}}"#);

    assert!(log.is_valid());
    assert_eq!(log.capability.as_deref(), Some(UNIT_CONVERT));
    assert_eq!(log.observation, Some(json!({"error": "no simulator"})));
}
