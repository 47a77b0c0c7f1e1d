//! Tests for the replay module

use super::*;
use crate::config::ReplayConfig;
use crate::eval::{DialogueEvent, GoldSpec, Transcript};
use crate::parsing::{ActionParser, OutputParser};
use crate::simulators::{PriceSimulator, SimulatorSet};
use crate::tools::{ConstraintRule, shared_registry};
use serde_json::json;
use std::sync::Arc;

const VALID_YAHOO: &str = r#"{"tool":"get_price_yahoo","arguments":{"symbol":"ibm","start":"2020-01-01","end":"2020-02-01"}}"#;
const ZERO_RANGE: &str = r#"{"tool":"get_price_yahoo","arguments":{"symbol":"ibm","start":"2020-01-01","end":"2020-01-01"}}"#;

#[test]
fn test_run_step_action_success() {
    let log = Replayer::default().run_step_action(VALID_YAHOO);

    assert!(log.is_valid());
    assert!(log.err.is_none());
    assert_eq!(log.capability.as_deref(), Some("price_lookup"));
    let observation = log.observation.unwrap();
    assert_eq!(observation["ticker"], json!("IBM"));
    assert_eq!(observation["close"], json!(910.26));
}

#[test]
fn test_run_step_action_error_kinds() {
    let replayer = Replayer::default();
    let cases = [
        ("not json", StepErrorKind::MalformedJson),
        ("[]", StepErrorKind::SchemaError),
        (r#"{"tool":"","arguments":{}}"#, StepErrorKind::SchemaError),
        (r#"{"tool":"get_weather","arguments":{}}"#, StepErrorKind::UnknownTool),
        (r#"{"tool":"get_price_alpha","arguments":{}}"#, StepErrorKind::SchemaViolation),
        (ZERO_RANGE, StepErrorKind::ConstraintViolation),
    ];

    for (raw, kind) in cases {
        let log = replayer.run_step_action(raw);
        assert_eq!(log.ast_valid, 0, "{raw}");
        assert_eq!(log.err_kind, Some(kind), "{raw}");
        assert!(log.capability.is_none());
        assert!(log.observation.is_none());
    }
}

#[test]
fn test_step_errors_match_action_parser() {
    let parser = ActionParser::new();
    for raw in ["not json", "[]", r#"{"tool":"x"}"#, r#"{"tool":"","arguments":{}}"#] {
        let expected = parser.parse(raw).unwrap_err();
        let log = Replayer::default().run_step_action(raw);

        assert_eq!(log.err, Some(expected.to_string()), "{raw}");
        let kind = if expected.is_structural() {
            StepErrorKind::SchemaError
        } else {
            StepErrorKind::MalformedJson
        };
        assert_eq!(log.err_kind, Some(kind), "{raw}");
    }
}

#[test]
fn test_zero_range_error_message() {
    let log = Replayer::default().run_step_action(ZERO_RANGE);
    let err = log.err.as_deref().unwrap();

    assert!(err.starts_with("schema/constraints: "));
    assert!(err.contains("start must differ"));
    assert_eq!(log.constraint_rule, Some(ConstraintRule::DistinctRangeBounds));
}

#[test]
fn test_no_simulator_is_soft() {
    let replayer = Replayer::default().with_simulators(SimulatorSet::new());
    let log = replayer.run_step_action(VALID_YAHOO);

    assert!(log.is_valid());
    assert!(log.err.is_none());
    assert_eq!(log.capability.as_deref(), Some("price_lookup"));
    assert_eq!(log.observation, Some(json!({"error": "no simulator"})));
}

/// Invalid action followed by a correct final answer: both tracks are
/// computed independently
#[test]
fn test_invalid_action_then_correct_final() {
    let dialogue = vec![
        DialogueEvent::action(ZERO_RANGE),
        DialogueEvent::final_answer("50.0"),
    ];
    let metrics =
        Replayer::default().replay_dialogue(&dialogue, &GoldSpec::numeric(50.0, 0.01));

    assert_eq!(metrics.track2.invalid_call_rate, 1.0);
    assert_eq!(metrics.track2.ast_valid_rate, 0.0);
    assert_eq!(metrics.track2.constraint_violations, 1);
    assert_eq!(metrics.track2.num_steps, 1);
    assert_eq!(metrics.track1.success, 1.0);
}

#[test]
fn test_step_bound_without_final() {
    let dialogue: Vec<DialogueEvent> = (0..10).map(|_| DialogueEvent::action(VALID_YAHOO)).collect();
    let replayer = Replayer::new(ReplayConfig::default().with_max_steps(8));
    let metrics = replayer.replay_dialogue(&dialogue, &GoldSpec::numeric(910.26, 0.01));

    assert_eq!(metrics.track2.num_steps, 8);
    assert_eq!(metrics.track1.success, 0.0);
}

#[test]
fn test_final_after_step_bound_is_ignored() {
    let mut dialogue: Vec<DialogueEvent> =
        (0..3).map(|_| DialogueEvent::action(VALID_YAHOO)).collect();
    dialogue.push(DialogueEvent::final_answer("910.26"));

    let replayer = Replayer::new(ReplayConfig::default().with_max_steps(3));
    let metrics = replayer.replay_dialogue(&dialogue, &GoldSpec::numeric(910.26, 0.01));

    assert_eq!(metrics.track2.num_steps, 3);
    assert_eq!(metrics.track1.success, 0.0);
}

#[test]
fn test_events_after_final_are_ignored() {
    let dialogue = vec![
        DialogueEvent::action(VALID_YAHOO),
        DialogueEvent::final_answer("Paris"),
        DialogueEvent::action(ZERO_RANGE),
        DialogueEvent::final_answer("London"),
    ];
    let metrics = Replayer::default().replay_dialogue(&dialogue, &GoldSpec::text("paris"));

    assert_eq!(metrics.track2.num_steps, 1);
    assert_eq!(metrics.track2.constraint_violations, 0);
    assert_eq!(metrics.track1.success, 1.0);
}

#[test]
fn test_other_events_do_not_count() {
    let dialogue = vec![
        DialogueEvent::Other,
        DialogueEvent::action(VALID_YAHOO),
        DialogueEvent::Other,
    ];
    let replayer = Replayer::new(ReplayConfig::default().with_max_steps(1));
    let metrics = replayer.replay_dialogue(&dialogue, &GoldSpec::default());

    assert_eq!(metrics.track2.num_steps, 1);
}

#[test]
fn test_empty_dialogue() {
    let metrics = Replayer::default().replay_dialogue(&[], &GoldSpec::text(""));
    assert_eq!(metrics, TranscriptMetrics::default());
}

#[test]
fn test_only_range_violations_are_counted() {
    let empty_ticker =
        r#"{"tool":"get_price_alpha","arguments":{"ticker":"","from":"2020-01-01","to":"2020-02-01"}}"#;
    let dialogue = vec![
        DialogueEvent::action(empty_ticker),
        DialogueEvent::action(ZERO_RANGE),
        DialogueEvent::action("{"),
    ];
    let metrics = Replayer::default().replay_dialogue(&dialogue, &GoldSpec::default());

    assert_eq!(metrics.track2.invalid_call_rate, 1.0);
    assert_eq!(metrics.track2.constraint_violations, 1);
}

#[test]
fn test_session_state_machine() {
    let replayer = Replayer::new(ReplayConfig::default().with_max_steps(2));
    let gold = GoldSpec::text("done");
    let mut session = replayer.session(&gold);

    assert_eq!(session.state(), ReplayState::Running);
    assert_eq!(session.feed(&DialogueEvent::action(VALID_YAHOO)), ReplayState::Running);
    assert_eq!(
        session.feed(&DialogueEvent::action(VALID_YAHOO)),
        ReplayState::Terminated(TerminationReason::StepLimit)
    );
    // Terminated sessions ignore further input
    assert_eq!(
        session.feed(&DialogueEvent::final_answer("done")),
        ReplayState::Terminated(TerminationReason::StepLimit)
    );
    assert_eq!(session.steps().len(), 2);

    let metrics = session.finish();
    assert_eq!(metrics.track1.success, 0.0);
}

#[test]
fn test_session_out_of_events() {
    let replayer = Replayer::default();
    let gold = GoldSpec::text("done");
    let mut session = replayer.session(&gold);

    assert_eq!(session.feed(&DialogueEvent::action(VALID_YAHOO)), ReplayState::Running);
    assert!(session.is_running());

    let metrics = session.finish();
    assert_eq!(metrics.track1.success, 0.0);
    assert_eq!(metrics.track2.num_steps, 1);
}

#[test]
fn test_session_final_answer() {
    let replayer = Replayer::default();
    let gold = GoldSpec::text("done");
    let mut session = replayer.session(&gold);

    assert_eq!(
        session.feed(&DialogueEvent::final_answer(" DONE ")),
        ReplayState::Terminated(TerminationReason::FinalAnswer)
    );
    assert_eq!(session.finish().track1.success, 1.0);
}

#[test]
fn test_include_steps() {
    let dialogue = vec![DialogueEvent::action(VALID_YAHOO), DialogueEvent::action(ZERO_RANGE)];

    let without = Replayer::default().replay_dialogue(&dialogue, &GoldSpec::default());
    assert!(without.steps.is_none());

    let replayer = Replayer::new(ReplayConfig::default().with_include_steps(true));
    let with = replayer.replay_dialogue(&dialogue, &GoldSpec::default());
    let steps = with.steps.unwrap();
    assert_eq!(steps.len(), 2);
    assert!(steps[0].is_valid());
    assert!(!steps[1].is_valid());
}

#[test]
fn test_repeated_calls_hit_simulator_cache() {
    let simulator = Arc::new(PriceSimulator::new());
    let replayer = Replayer::default()
        .with_simulators(SimulatorSet::new().with_simulator(simulator.clone()));
    let alpha =
        r#"{"tool":"get_price_alpha","arguments":{"ticker":"IBM","from":"2020-01-01","to":"2020-02-01"}}"#;
    let dialogue = vec![
        DialogueEvent::action(VALID_YAHOO),
        DialogueEvent::action(alpha),
        DialogueEvent::action(VALID_YAHOO),
    ];

    let replayer = replayer.with_registry(shared_registry());
    let metrics = replayer.replay_dialogue(&dialogue, &GoldSpec::default());

    assert_eq!(metrics.track2.ast_valid_rate, 1.0);
    assert_eq!(simulator.cache_len(), 1);
}

#[test]
fn test_default_tolerance_from_config() {
    let dialogue = vec![DialogueEvent::final_answer("10.3")];
    let gold: GoldSpec = serde_json::from_value(json!({"numeric": 10.0})).unwrap();

    let strict = Replayer::default().replay_dialogue(&dialogue, &gold);
    assert_eq!(strict.track1.success, 0.0);

    let loose = Replayer::new(ReplayConfig::default().with_numeric_tolerance(0.5))
        .replay_dialogue(&dialogue, &gold);
    assert_eq!(loose.track1.success, 1.0);
}

#[test]
fn test_replay_transcript_carries_identity() {
    let transcript = Transcript::new("t-42", GoldSpec::text("ok"))
        .with_source("unit")
        .with_action(VALID_YAHOO)
        .with_final("ok");
    let record = Replayer::default().replay_transcript(&transcript);

    assert_eq!(record.id.as_deref(), Some("t-42"));
    assert_eq!(record.source.as_deref(), Some("unit"));
    assert_eq!(record.metrics.track1.success, 1.0);
    assert_eq!(record.metrics.track2.num_steps, 1);
}
