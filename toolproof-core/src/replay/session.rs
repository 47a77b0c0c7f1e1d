//! Replay state machine for a single transcript

use serde::{Deserialize, Serialize};

use super::record::{Track1, Track2, TranscriptMetrics};
use super::replayer::Replayer;
use super::step::StepLog;
use crate::eval::{DialogueEvent, GoldSpec};

/// Why a session stopped accepting events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// A final answer was scored
    FinalAnswer,
    /// `max_steps` actions were processed
    StepLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayState {
    Running,
    Terminated(TerminationReason),
}

/// Incremental replay of one transcript.
///
/// Events can be fed as they are produced, which is how a live agent is
/// evaluated; [`Replayer::replay_dialogue`] drives the same machine over a
/// recorded dialogue.
#[derive(Debug)]
pub struct ReplaySession<'a> {
    replayer: &'a Replayer,
    gold: &'a GoldSpec,
    steps: Vec<StepLog>,
    success: f64,
    state: ReplayState,
}

impl<'a> ReplaySession<'a> {
    pub(crate) fn new(replayer: &'a Replayer, gold: &'a GoldSpec) -> Self {
        Self {
            replayer,
            gold,
            steps: Vec::new(),
            success: 0.0,
            state: ReplayState::Running,
        }
    }

    pub fn state(&self) -> ReplayState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ReplayState::Running
    }

    /// Step logs so far, in execution order
    pub fn steps(&self) -> &[StepLog] {
        &self.steps
    }

    /// Process one event. Events after termination are ignored.
    pub fn feed(&mut self, event: &DialogueEvent) -> ReplayState {
        if !self.is_running() {
            return self.state;
        }

        let max_steps = self.replayer.config().max_steps;
        if self.steps.len() >= max_steps {
            self.state = ReplayState::Terminated(TerminationReason::StepLimit);
            return self.state;
        }

        match event {
            DialogueEvent::Action { content } => {
                let log = self.replayer.run_step_action(content);
                tracing::debug!(
                    step = self.steps.len(),
                    ast_valid = log.ast_valid,
                    err_kind = ?log.err_kind,
                    "Processed action"
                );
                self.steps.push(log);
                if self.steps.len() >= max_steps {
                    self.state = ReplayState::Terminated(TerminationReason::StepLimit);
                }
            }
            DialogueEvent::Final { content } => {
                self.success = self.replayer.scorer().score(content, self.gold);
                self.state = ReplayState::Terminated(TerminationReason::FinalAnswer);
            }
            DialogueEvent::Other => {}
        }
        self.state
    }

    /// Close the session and aggregate its metrics.
    ///
    /// A session still running here ran out of events; it keeps a success
    /// of 0.0.
    pub fn finish(self) -> TranscriptMetrics {
        let track2 = Track2::from_steps(&self.steps);
        let steps = self.replayer.config().include_steps.then_some(self.steps);
        TranscriptMetrics {
            track1: Track1 {
                success: self.success,
            },
            track2,
            steps,
        }
    }
}
