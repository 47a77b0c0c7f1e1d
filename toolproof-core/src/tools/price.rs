//! The `price_lookup` capability
//!
//! Canonical shape: `{ticker, date_range: {start, end}}`.

use serde_json::{Map, Value, json};
use std::sync::Arc;

use super::capability::{AliasAdapter, Capability, ConstraintRule, ConstraintViolation};
use super::schema::ParameterSchema;

/// Canonical capability name
pub const PRICE_LOOKUP: &str = "price_lookup";

/// Tool aliases that implement price lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceAlias {
    /// `get_price_yahoo`: `{symbol, start, end}`
    Yahoo,
    /// `get_price_alpha`: `{ticker, from, to}`
    Alpha,
}

impl PriceAlias {
    pub fn all() -> &'static [PriceAlias] {
        &[PriceAlias::Yahoo, PriceAlias::Alpha]
    }

    pub fn tool_name(&self) -> &'static str {
        match self {
            PriceAlias::Yahoo => "get_price_yahoo",
            PriceAlias::Alpha => "get_price_alpha",
        }
    }

    /// Agent-side field names for ticker, range start and range end
    fn field_names(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            PriceAlias::Yahoo => ("symbol", "start", "end"),
            PriceAlias::Alpha => ("ticker", "from", "to"),
        }
    }
}

impl AliasAdapter for PriceAlias {
    fn map_arguments(&self, raw: &Map<String, Value>) -> Value {
        let (ticker, start, end) = self.field_names();
        let field = |name: &str| raw.get(name).cloned().unwrap_or(Value::Null);
        json!({
            "ticker": field(ticker),
            "date_range": {"start": field(start), "end": field(end)},
        })
    }

    fn check_constraints(&self, canonical: &Value) -> Result<(), ConstraintViolation> {
        check_price_constraints(canonical)
    }
}

/// Semantic rules shared by every price alias.
///
/// Ticker casing is irrelevant here; only emptiness and range bounds matter.
pub fn check_price_constraints(canonical: &Value) -> Result<(), ConstraintViolation> {
    let non_empty = |v: Option<&Value>| v.and_then(Value::as_str).is_some_and(|s| !s.is_empty());

    if !non_empty(canonical.get("ticker")) {
        return Err(ConstraintViolation::new(
            ConstraintRule::RequiredValue,
            "ticker is required",
        ));
    }

    let start = canonical.pointer("/date_range/start");
    let end = canonical.pointer("/date_range/end");
    if !non_empty(start) || !non_empty(end) {
        return Err(ConstraintViolation::new(
            ConstraintRule::RequiredValue,
            "date_range.start and end are required",
        ));
    }

    if start == end {
        return Err(ConstraintViolation::new(
            ConstraintRule::DistinctRangeBounds,
            "date_range.start must differ from date_range.end",
        ));
    }
    Ok(())
}

/// Base schema for canonical price lookup arguments
pub fn price_lookup_schema() -> ParameterSchema {
    ParameterSchema::new(json!({
        "type": "object",
        "required": ["ticker", "date_range"],
        "properties": {
            "ticker": {"type": "string"},
            "date_range": {
                "type": "object",
                "required": ["start", "end"],
                "properties": {
                    "start": {"type": "string"},
                    "end": {"type": "string"}
                }
            }
        }
    }))
}

/// The capability record with every known alias attached
pub fn price_lookup_capability() -> Capability {
    PriceAlias::all().iter().fold(
        Capability::new(PRICE_LOOKUP, price_lookup_schema())
            .with_description("Historical price summary for a ticker over a date range"),
        |cap, alias| cap.with_alias(alias.tool_name(), Arc::new(*alias)),
    )
}
