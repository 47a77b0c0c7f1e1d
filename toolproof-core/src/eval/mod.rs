//! Evaluation: transcripts, gold answers, scoring and batch runs
//!
//! Track 1 (outcome correctness) lives here; track 2 (protocol validity) is
//! accumulated by the replayer from step logs.
//!
//! # Example
//!
//! ```rust
//! use toolproof_core::eval::{GoldSpec, Scorer};
//!
//! let scorer = Scorer::default();
//! assert_eq!(scorer.score("  PARIS ", &GoldSpec::text("paris")), 1.0);
//! assert_eq!(scorer.score("10.005", &GoldSpec::numeric(10.0, 0.01)), 1.0);
//! assert_eq!(scorer.score("abc", &GoldSpec::numeric(10.0, 0.01)), 0.0);
//! ```

mod harness;
mod metrics;
mod scorer;
mod transcript;

pub use harness::{EvalHarness, EvalSummary, save_metrics};
pub use metrics::{DEFAULT_NUMERIC_TOLERANCE, normalize_text, numeric_close, outcome_em};
pub use scorer::{GoldSpec, Scorer};
pub use transcript::{DialogueEvent, Transcript, TranscriptMeta, load_transcripts, read_transcripts};
