//! Deterministic price lookup simulator

use serde::Deserialize;
use serde_json::json;
use blake2::Blake2b;
use blake2::digest::Digest;
use blake2::digest::consts::U8;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::{Observation, Simulator};
use crate::tools::CanonicalArgs;
use crate::tools::price::PRICE_LOOKUP;

#[derive(Debug, Deserialize)]
struct PriceQuery {
    ticker: String,
    date_range: DateRange,
}

#[derive(Debug, Deserialize)]
struct DateRange {
    start: String,
    end: String,
}

/// Cache key: upper-cased ticker, start, end
type PriceKey = (String, String, String);

/// BLAKE2b with an 8-byte digest
type Blake2b64 = Blake2b<U8>;

/// Mock OHLC summaries derived from a hash of `(ticker, start, end)`.
///
/// Observations are cached per instance, so a repeated query returns the
/// very same [`Observation`] allocation.
#[derive(Debug, Default)]
pub struct PriceSimulator {
    cache: Mutex<HashMap<PriceKey, Observation>>,
}

impl PriceSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached observations
    pub fn cache_len(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Drop every cached observation
    pub fn clear_cache(&self) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Close price in `[5.00, 1004.99]`, stable across processes
    pub fn deterministic_close(ticker: &str, start: &str, end: &str) -> f64 {
        let mut hasher = Blake2b64::new();
        hasher.update(format!("{}|{}|{}", ticker.to_uppercase(), start, end).as_bytes());
        let digest = hasher.finalize();

        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest);
        let bucket = u64::from_be_bytes(bytes) % 100_000;
        round_cents(bucket as f64 / 100.0 + 5.0)
    }

    fn observe(key: &PriceKey) -> Observation {
        let (ticker, start, end) = key;
        let close = Self::deterministic_close(ticker, start, end);
        Arc::new(json!({
            "ticker": ticker,
            "start": start,
            "end": end,
            "close": close,
            "ohlc": {
                "open": round_cents(close - 0.7),
                "high": round_cents(close + 1.2),
                "low": round_cents(close - 1.5),
                "close": close,
            }
        }))
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Simulator for PriceSimulator {
    fn capability(&self) -> &str {
        PRICE_LOOKUP
    }

    fn call(&self, args: &CanonicalArgs) -> Observation {
        let query: PriceQuery = match serde_json::from_value(args.arguments.clone()) {
            Ok(query) => query,
            Err(e) => {
                return Arc::new(json!({"error": format!("invalid price_lookup arguments: {}", e)}));
            }
        };
        let key = (
            query.ticker.to_uppercase(),
            query.date_range.start,
            query.date_range.end,
        );

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cache.entry(key).or_insert_with_key(Self::observe))
    }
}
