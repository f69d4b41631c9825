//! Match logging
//!
//! Records hits, deaths, timer ticks and match events for the results
//! printout and post-match analysis. A finished log can be saved as a JSON
//! report.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::states::play_match::FighterSide;

/// Directory match reports are written to when no path is given
pub const MATCH_LOG_DIR: &str = "match_logs";

/// A single entry in the match log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchLogEntry {
    /// Timestamp in match time (seconds since match start)
    pub timestamp: f32,
    /// The type of event
    pub event_type: MatchLogEventType,
    /// Human-readable description of the event
    pub message: String,
    /// Structured data for hits, used by the damage queries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit: Option<HitRecord>,
}

/// Types of match log events for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchLogEventType {
    /// An attack connected
    Hit,
    /// A fighter's health reached zero
    Death,
    /// The match timer ticked down
    Timer,
    /// Match event (start, end, etc.)
    MatchEvent,
}

/// Who hit whom, for how much
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitRecord {
    pub attacker: FighterSide,
    pub defender: FighterSide,
    pub damage: u32,
}

/// Per-fighter summary written into a saved report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FighterMetadata {
    pub name: String,
    pub final_health: u32,
    pub damage_dealt: u32,
    pub damage_taken: u32,
    pub final_position: (f32, f32),
}

/// Header of a saved report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchMetadata {
    /// Result banner text ("Tie", "Player 1 Wins", "Enemy Wins")
    pub result: String,
    /// Match time when the match ended, in seconds
    pub match_time: f32,
    pub random_seed: Option<u64>,
    pub player: FighterMetadata,
    pub enemy: FighterMetadata,
}

#[derive(Serialize)]
struct MatchReport<'a> {
    metadata: &'a MatchMetadata,
    entries: &'a [MatchLogEntry],
}

/// The match log resource storing all events
#[derive(Resource, Default)]
pub struct MatchLog {
    /// All log entries in chronological order
    pub entries: Vec<MatchLogEntry>,
    /// Current match time
    pub match_time: f32,
}

impl MatchLog {
    /// Clear the log for a new match
    pub fn clear(&mut self) {
        self.entries.clear();
        self.match_time = 0.0;
    }

    /// Add a new entry to the log
    pub fn log(&mut self, event_type: MatchLogEventType, message: String) {
        self.entries.push(MatchLogEntry {
            timestamp: self.match_time,
            event_type,
            message,
            hit: None,
        });
    }

    /// Record a landed attack
    pub fn log_hit(&mut self, attacker: FighterSide, defender: FighterSide, damage: u32) {
        self.entries.push(MatchLogEntry {
            timestamp: self.match_time,
            event_type: MatchLogEventType::Hit,
            message: format!("{} hits {} for {}", attacker.name(), defender.name(), damage),
            hit: Some(HitRecord {
                attacker,
                defender,
                damage,
            }),
        });
    }

    /// Get entries filtered by event type
    pub fn filter_by_type(&self, event_type: MatchLogEventType) -> Vec<&MatchLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Get the last N entries
    pub fn recent(&self, count: usize) -> Vec<&MatchLogEntry> {
        self.entries.iter().rev().take(count).rev().collect()
    }

    fn hits(&self) -> impl Iterator<Item = &HitRecord> {
        self.entries.iter().filter_map(|e| e.hit.as_ref())
    }

    /// Total damage `side` landed
    pub fn total_damage_dealt(&self, side: FighterSide) -> u32 {
        self.hits()
            .filter(|hit| hit.attacker == side)
            .map(|hit| hit.damage)
            .sum()
    }

    /// Total damage `side` received
    pub fn total_damage_taken(&self, side: FighterSide) -> u32 {
        self.hits()
            .filter(|hit| hit.defender == side)
            .map(|hit| hit.damage)
            .sum()
    }

    /// Number of attacks `side` landed
    pub fn hits_landed(&self, side: FighterSide) -> usize {
        self.hits().filter(|hit| hit.attacker == side).count()
    }

    /// Save the log as a JSON report.
    ///
    /// Writes to `output_path` if given, otherwise to a timestamped file in
    /// `MATCH_LOG_DIR`. Returns the path written.
    pub fn save_to_file(
        &self,
        metadata: &MatchMetadata,
        output_path: Option<&str>,
    ) -> Result<String, String> {
        let path = match output_path {
            Some(path) => path.to_string(),
            None => {
                let secs = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0);
                default_log_path(secs)
            }
        };

        if let Some(parent) = Path::new(&path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create log directory: {}", e))?;
            }
        }

        let report = MatchReport {
            metadata,
            entries: &self.entries,
        };
        let contents = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize match log: {}", e))?;
        std::fs::write(&path, contents)
            .map_err(|e| format!("Failed to write match log: {}", e))?;

        Ok(path)
    }
}

/// Default report path for a match finished at `unix_secs`
pub fn default_log_path(unix_secs: u64) -> String {
    format!("{}/match_{}.json", MATCH_LOG_DIR, unix_secs)
}
