//! Deterministic transcript replay
//!
//! Drives a dialogue through the action pipeline one event at a time:
//!
//! - `action` events: parse, well-formedness gate, canonicalize, simulate;
//!   each produces a [`StepLog`] whether it succeeds or not
//! - `final` events: scored immediately; replay stops there
//! - `max_steps` actions without a final answer: replay stops silently
//!
//! Failures never abort replay; they are recorded as `ast_valid = 0` and
//! feed the track 2 protocol metrics.
//!
//! # Example
//!
//! ```rust
//! use toolproof_core::eval::{DialogueEvent, GoldSpec};
//! use toolproof_core::replay::Replayer;
//!
//! let replayer = Replayer::default();
//! let dialogue = vec![
//!     DialogueEvent::action(r#"{"tool":"get_price_alpha","arguments":{"ticker":"IBM","from":"2020-01-01","to":"2020-02-01"}}"#),
//!     DialogueEvent::final_answer("910.26"),
//! ];
//! let metrics = replayer.replay_dialogue(&dialogue, &GoldSpec::numeric(910.26, 0.01));
//! assert_eq!(metrics.track1.success, 1.0);
//! assert_eq!(metrics.track2.ast_valid_rate, 1.0);
//! ```

mod record;
mod replayer;
mod session;
mod step;

pub use record::{MetricsRecord, Track1, Track2, TranscriptMetrics};
pub use replayer::Replayer;
pub use session::{ReplaySession, ReplayState, TerminationReason};
pub use step::{StepError, StepErrorKind, StepLog};

#[cfg(test)]
mod tests;
