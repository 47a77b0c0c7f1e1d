//! Transcript replayer: parse, canonicalize, simulate, score

use std::sync::Arc;

use super::record::{MetricsRecord, TranscriptMetrics};
use super::session::ReplaySession;
use super::step::{StepError, StepLog};
use crate::config::ReplayConfig;
use crate::eval::{DialogueEvent, GoldSpec, Scorer, Transcript};
use crate::parsing::{ActionParser, OutputParser};
use crate::simulators::{Dispatch, SimulatorSet};
use crate::tools::{CapabilityRegistry, shared_registry};

/// Replays transcripts against a capability registry and simulator set
#[derive(Debug, Clone)]
pub struct Replayer {
    parser: ActionParser,
    registry: Arc<CapabilityRegistry>,
    simulators: SimulatorSet,
    config: ReplayConfig,
    scorer: Scorer,
}

impl Default for Replayer {
    fn default() -> Self {
        Self::new(ReplayConfig::default())
    }
}

impl Replayer {
    /// Replayer over the built-in registry and simulators
    pub fn new(config: ReplayConfig) -> Self {
        Self {
            parser: ActionParser::new(),
            registry: shared_registry(),
            simulators: SimulatorSet::builtin(),
            scorer: Scorer::new(config.numeric_tolerance),
            config,
        }
    }

    /// Use a custom registry
    pub fn with_registry(mut self, registry: Arc<CapabilityRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Use a custom simulator set
    pub fn with_simulators(mut self, simulators: SimulatorSet) -> Self {
        self.simulators = simulators;
        self
    }

    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    pub fn simulators(&self) -> &SimulatorSet {
        &self.simulators
    }

    /// Start an incremental session scored against `gold`
    pub fn session<'a>(&'a self, gold: &'a GoldSpec) -> ReplaySession<'a> {
        ReplaySession::new(self, gold)
    }

    fn process_action(&self, raw: &str) -> Result<(String, Dispatch), StepError> {
        let action = self.parser.parse(raw)?;
        let canonical = self.registry.canonicalize(&action.tool, &action.arguments)?;
        let dispatch = self.simulators.dispatch(&canonical);
        Ok((canonical.capability, dispatch))
    }

    /// Run one raw action through the whole pipeline.
    ///
    /// Never fails: every error is folded into the returned log.
    pub fn run_step_action(&self, raw: &str) -> StepLog {
        match self.process_action(raw) {
            Ok((capability, dispatch)) => {
                StepLog::dispatched(capability, dispatch.observation().as_ref().clone())
            }
            Err(error) => StepLog::failed(&error),
        }
    }

    /// Replay a recorded dialogue to completion
    pub fn replay_dialogue(&self, events: &[DialogueEvent], gold: &GoldSpec) -> TranscriptMetrics {
        let mut session = self.session(gold);
        for event in events {
            if !session.is_running() {
                break;
            }
            session.feed(event);
        }
        session.finish()
    }

    /// Replay a transcript record and attach its identity
    pub fn replay_transcript(&self, transcript: &Transcript) -> MetricsRecord {
        let metrics = self.replay_dialogue(&transcript.dialogue, &transcript.gold_final);
        MetricsRecord {
            id: transcript.id.clone(),
            source: transcript.meta.source.clone(),
            metrics,
        }
    }
}
