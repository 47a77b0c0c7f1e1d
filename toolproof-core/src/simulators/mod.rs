//! Deterministic simulated backends
//!
//! Each capability is served by a [`Simulator`] whose output is a pure
//! function of the canonical arguments: no clock, no randomness, no I/O.
//! [`SimulatorSet`] routes canonical arguments by capability name and
//! reports a missing backend as a distinct [`Dispatch::NoSimulator`]
//! outcome rather than an error, so replay carries on.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use toolproof_core::simulators::SimulatorSet;
//! use toolproof_core::tools::CanonicalArgs;
//!
//! let simulators = SimulatorSet::builtin();
//! let args = CanonicalArgs {
//!     capability: "price_lookup".to_string(),
//!     arguments: json!({"ticker": "ibm", "date_range": {"start": "2020-01-01", "end": "2020-02-01"}}),
//! };
//! let observation = simulators.dispatch(&args).observation();
//! assert_eq!(observation["ticker"], "IBM");
//! ```

mod price;

pub use price::PriceSimulator;

use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

use crate::tools::CanonicalArgs;

/// Simulator output, shared so cached results are handed out by identity
pub type Observation = Arc<Value>;

/// A deterministic backend for one capability
pub trait Simulator: Send + Sync {
    /// Capability this simulator serves
    fn capability(&self) -> &str;

    /// Simulate a call; must be a pure function of `args`
    fn call(&self, args: &CanonicalArgs) -> Observation;
}

/// Outcome of routing canonical arguments to a simulator
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// The capability's simulator produced an observation
    Observed(Observation),

    /// No simulator is registered for the capability
    NoSimulator,
}

impl Dispatch {
    /// Observation to record in the step log.
    ///
    /// A missing simulator renders as `{"error": "no simulator"}`.
    pub fn observation(&self) -> Observation {
        match self {
            Dispatch::Observed(obs) => Arc::clone(obs),
            Dispatch::NoSimulator => Arc::new(json!({"error": "no simulator"})),
        }
    }

    pub fn is_observed(&self) -> bool {
        matches!(self, Dispatch::Observed(_))
    }
}

/// Simulators keyed by capability name
#[derive(Default, Clone)]
pub struct SimulatorSet {
    simulators: HashMap<String, Arc<dyn Simulator>>,
}

impl std::fmt::Debug for SimulatorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatorSet")
            .field("capabilities", &self.simulators.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SimulatorSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set with every built-in simulator, each with a fresh cache
    pub fn builtin() -> Self {
        let mut set = Self::new();
        set.register(Arc::new(PriceSimulator::new()));
        set
    }

    /// Register a simulator, replacing any previous one for its capability
    pub fn register(&mut self, simulator: Arc<dyn Simulator>) -> Option<Arc<dyn Simulator>> {
        self.simulators
            .insert(simulator.capability().to_string(), simulator)
    }

    /// Builder-style registration
    pub fn with_simulator(mut self, simulator: Arc<dyn Simulator>) -> Self {
        self.register(simulator);
        self
    }

    pub fn contains(&self, capability: &str) -> bool {
        self.simulators.contains_key(capability)
    }

    pub fn get(&self, capability: &str) -> Option<&Arc<dyn Simulator>> {
        self.simulators.get(capability)
    }

    /// Route canonical arguments to their capability's simulator
    pub fn dispatch(&self, args: &CanonicalArgs) -> Dispatch {
        match self.simulators.get(&args.capability) {
            Some(simulator) => Dispatch::Observed(simulator.call(args)),
            None => {
                tracing::warn!(capability = %args.capability, "No simulator registered");
                Dispatch::NoSimulator
            }
        }
    }
}
