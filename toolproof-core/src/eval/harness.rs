//! Batch evaluation over a transcript set

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use uuid::Uuid;

use super::transcript::Transcript;
use crate::config::ReplayConfig;
use crate::error::Result;
use crate::replay::{MetricsRecord, Replayer};
use crate::tools::schema_from_inputs;

/// Replays a set of transcripts with one shared [`Replayer`]
#[derive(Debug, Clone, Default)]
pub struct EvalHarness {
    replayer: Replayer,
}

impl EvalHarness {
    pub fn new(config: ReplayConfig) -> Self {
        Self {
            replayer: Replayer::new(config),
        }
    }

    /// Use a preconfigured replayer (custom registry or simulators)
    pub fn with_replayer(replayer: Replayer) -> Self {
        Self { replayer }
    }

    pub fn replayer(&self) -> &Replayer {
        &self.replayer
    }

    /// Replay every transcript, preserving input order
    pub fn run_all(&self, transcripts: &[Transcript]) -> Vec<MetricsRecord> {
        tracing::info!(count = transcripts.len(), "Replaying transcripts");

        transcripts
            .iter()
            .map(|transcript| {
                let declared = schema_from_inputs(&transcript.tools);
                if !declared.is_empty() {
                    tracing::debug!(
                        id = ?transcript.id,
                        tools = declared.len(),
                        "Transcript declares tool specs"
                    );
                }

                let record = self.replayer.replay_transcript(transcript);
                tracing::info!(
                    id = ?record.id,
                    success = record.metrics.track1.success,
                    ast_valid_rate = record.metrics.track2.ast_valid_rate,
                    num_steps = record.metrics.track2.num_steps,
                    "Replayed transcript"
                );
                record
            })
            .collect()
    }

    /// Replay every transcript and summarize the run
    pub fn run(&self, transcripts: &[Transcript]) -> (Vec<MetricsRecord>, EvalSummary) {
        let started_at = Utc::now();
        let records = self.run_all(transcripts);
        let summary = EvalSummary::summarize(&records, started_at, Utc::now());
        tracing::info!(
            run_id = %summary.run_id,
            transcripts = summary.transcripts,
            mean_success = summary.mean_success,
            "Evaluation run complete"
        );
        (records, summary)
    }
}

/// Aggregate over one evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub transcripts: usize,
    pub mean_success: f64,
    pub mean_ast_valid_rate: f64,
    pub mean_invalid_call_rate: f64,
    pub total_constraint_violations: usize,
    pub total_steps: usize,
}

impl EvalSummary {
    /// Summarize records; means over an empty set are 0.0
    pub fn summarize(
        records: &[MetricsRecord],
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at,
            finished_at,
            transcripts: records.len(),
            mean_success: mean(records, |r| r.metrics.track1.success),
            mean_ast_valid_rate: mean(records, |r| r.metrics.track2.ast_valid_rate),
            mean_invalid_call_rate: mean(records, |r| r.metrics.track2.invalid_call_rate),
            total_constraint_violations: records
                .iter()
                .map(|r| r.metrics.track2.constraint_violations)
                .sum(),
            total_steps: records.iter().map(|r| r.metrics.track2.num_steps).sum(),
        }
    }

    /// Write the summary as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(path.as_ref(), self, true)
    }
}

fn mean(records: &[MetricsRecord], metric: impl Fn(&MetricsRecord) -> f64) -> f64 {
    let n = records.len().max(1) as f64;
    records.iter().map(metric).sum::<f64>() / n
}

/// Write metrics records as a JSON array
pub fn save_metrics(path: impl AsRef<Path>, records: &[MetricsRecord], pretty: bool) -> Result<()> {
    write_json(path.as_ref(), records, pretty)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
