use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::Phase;
use crate::player::PlayerId;

/// An accepted engine action as it appears in the match history.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchAction {
    Join,
    Leave,
    Ready,
    Start,
    /// Card drawn while cutting for dealer
    CutForDealer { card: Card },
    /// New hand dealt by `dealer`
    NewHand { dealer: PlayerId },
    ThrowToCrib { card: Card },
    /// Starter card turned up
    CutForHand { card: Card },
}

/// Records a single accepted action.
/// Associates the action with the acting player and the phase it was taken in.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// 1-based position in the match history
    pub seq: u32,
    /// Acting player; `None` for table-level actions (start, new hand)
    pub player: Option<PlayerId>,
    /// Phase the action was accepted in
    pub phase: Phase,
    pub action: MatchAction,
}

/// Complete record of a match up to the hand-off to pegging.
/// Serialized to JSONL format, one match per line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Identifier for this match (format: YYYYMMDD-NNNNNN when produced by [`MatchLogger`])
    pub match_id: String,
    /// Deck seed (enables deterministic replay)
    pub seed: Option<u64>,
    /// Chronological list of accepted actions
    pub actions: Vec<ActionRecord>,
    /// Dealer of the last dealt hand
    pub dealer: Option<PlayerId>,
    /// Starter card, once cut
    pub starter: Option<Card>,
    pub crib: Vec<Card>,
    /// Timestamp when the record was written (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    /// Additional metadata (extensible JSON object)
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

pub fn format_match_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct MatchLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl MatchLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_match_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &MatchRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
