//! Transcript records and JSON Lines loading

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::scorer::GoldSpec;
use crate::error::{Result, ToolproofError};
use crate::tools::ToolDeclarations;

/// One evaluation unit: a dialogue plus its gold answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub meta: TranscriptMeta,

    #[serde(default = "GoldSpec::empty_text")]
    pub gold_final: GoldSpec,

    #[serde(default)]
    pub dialogue: Vec<DialogueEvent>,

    /// Tool specs the agent was shown, if recorded
    #[serde(default, skip_serializing_if = "ToolDeclarations::is_empty")]
    pub tools: ToolDeclarations,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new(id: impl Into<String>, gold_final: GoldSpec) -> Self {
        Self {
            id: Some(id.into()),
            meta: TranscriptMeta::default(),
            gold_final,
            dialogue: Vec::new(),
            tools: ToolDeclarations::new(),
        }
    }

    /// Set the source label
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.meta.source = Some(source.into());
        self
    }

    /// Append an action event
    pub fn with_action(mut self, content: impl Into<String>) -> Self {
        self.dialogue.push(DialogueEvent::action(content));
        self
    }

    /// Append a final-answer event
    pub fn with_final(mut self, content: impl Into<String>) -> Self {
        self.dialogue.push(DialogueEvent::final_answer(content));
        self
    }
}

/// Provenance of a transcript
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptMeta {
    #[serde(default)]
    pub source: Option<String>,

    /// Any other metadata, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single dialogue event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DialogueEvent {
    /// Tool call as raw JSON text
    Action { content: String },

    /// The agent's final answer
    Final { content: String },

    /// Any other event type; skipped during replay
    #[serde(other)]
    Other,
}

impl DialogueEvent {
    pub fn action(content: impl Into<String>) -> Self {
        DialogueEvent::Action {
            content: content.into(),
        }
    }

    pub fn final_answer(content: impl Into<String>) -> Self {
        DialogueEvent::Final {
            content: content.into(),
        }
    }
}

/// Parse transcripts from JSON Lines; blank lines are skipped.
///
/// # Errors
///
/// Fails on the first line that is not a valid transcript, reporting its
/// 1-based line number.
pub fn read_transcripts(reader: impl BufRead) -> Result<Vec<Transcript>> {
    let mut transcripts = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let transcript = serde_json::from_str(&line).map_err(|e| ToolproofError::Transcript {
            line: index + 1,
            message: e.to_string(),
        })?;
        transcripts.push(transcript);
    }
    Ok(transcripts)
}

/// Load transcripts from a JSON Lines file
pub fn load_transcripts(path: impl AsRef<Path>) -> Result<Vec<Transcript>> {
    let file = std::fs::File::open(path)?;
    read_transcripts(BufReader::new(file))
}
