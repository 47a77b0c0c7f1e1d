//! # Toolproof - Replay evaluation for tool-using agents
//!
//! Toolproof replays recorded agent transcripts against deterministic tool
//! simulators and scores them on two independent tracks:
//! - **Track 1**: was the final answer correct?
//! - **Track 2**: were the tool calls well-formed, known, schema-valid and
//!   semantically sound?
//!
//! Agents may call the same capability through differently named tools with
//! different argument shapes. Every call is canonicalized before it is
//! validated or simulated, so equivalent calls are treated alike.
//!
//! ## Quick Start
//!
//! ```rust
//! use toolproof_core::prelude::*;
//!
//! let transcript = Transcript::new("demo", GoldSpec::numeric(910.26, 0.01))
//!     .with_action(r#"{"tool":"get_price_yahoo","arguments":{"symbol":"IBM","start":"2020-01-01","end":"2020-02-01"}}"#)
//!     .with_final("910.26");
//!
//! let record = Replayer::default().replay_transcript(&transcript);
//! assert_eq!(record.metrics.track1.success, 1.0);
//! assert_eq!(record.metrics.track2.invalid_call_rate, 0.0);
//! ```
//!
//! ## Architecture
//!
//! - **parsing**: raw action text to [`parsing::Action`]
//! - **tools**: capability registry, alias adapters, canonicalization
//! - **simulators**: deterministic, cached backends per capability
//! - **replay**: per-transcript state machine and step logs
//! - **eval**: gold answers, scoring, transcript I/O and batch runs

pub mod config;
pub mod error;
pub mod eval;
pub mod parsing;
pub mod replay;
pub mod simulators;
pub mod tools;

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{OutputConfig, ReplayConfig, ToolproofConfig};
    pub use crate::error::{Result, ToolproofError};
    pub use crate::eval::{
        DialogueEvent, EvalHarness, EvalSummary, GoldSpec, Scorer, Transcript, TranscriptMeta,
        load_transcripts, read_transcripts, save_metrics,
    };
    pub use crate::parsing::{Action, ActionError, is_well_formed, parse_action};
    pub use crate::replay::{
        MetricsRecord, ReplaySession, ReplayState, Replayer, StepErrorKind, StepLog,
        TerminationReason, Track1, Track2, TranscriptMetrics,
    };
    pub use crate::simulators::{Dispatch, Observation, PriceSimulator, Simulator, SimulatorSet};
    pub use crate::tools::{
        AliasAdapter, CanonicalArgs, CanonicalizeError, Capability, CapabilityRegistry,
        ConstraintRule, ConstraintViolation, ParameterSchema, default_registry,
    };
}
