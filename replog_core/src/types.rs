//! Core domain types for the workout log.
//!
//! This module defines the fundamental types used throughout the system:
//! - Workout entries (one logged exercise instance)
//! - Session records (a timestamped group of entries)
//! - Persistence policies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One logged exercise instance within a session.
///
/// Immutable once appended to a session; entries are only ever removed
/// in bulk via a history clear.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub exercise: String,
    pub sets: Option<u32>,
    pub reps: u32,
    pub weight: f64,
    pub calories: Option<u32>,
    pub one_rep_max: Option<u32>,
}

impl WorkoutEntry {
    /// Render one summary line in the log's display format,
    /// e.g. `Bench Press: 8 reps @ 135 lbs [3 sets] [1RM 171]`.
    pub fn summary_line(&self) -> String {
        let mut line = format!(
            "{}: {} reps @ {} lbs",
            self.exercise, self.reps, self.weight
        );
        if let Some(sets) = self.sets {
            line.push_str(&format!(" [{} sets]", sets));
        }
        if let Some(cal) = self.calories {
            line.push_str(&format!(" [{} cal]", cal));
        }
        if let Some(one_rm) = self.one_rep_max {
            line.push_str(&format!(" [1RM {}]", one_rm));
        }
        line
    }
}

/// A timestamped group of entries logged together.
///
/// Records are append-only: created at save time and never mutated
/// afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: Uuid,
    pub saved_at: DateTime<Utc>,
    pub entries: Vec<WorkoutEntry>,
}

impl SessionRecord {
    /// Build a new record stamped with the current time.
    pub fn seal(entries: Vec<WorkoutEntry>) -> Self {
        Self {
            id: Uuid::new_v4(),
            saved_at: Utc::now(),
            entries,
        }
    }

    /// Render the record as a human-readable summary block:
    ///
    /// ```text
    /// Session Date: 2026-08-25 17:30
    /// Bench Press: 8 reps @ 135 lbs [1RM 171]
    /// ```
    pub fn render_summary(&self) -> String {
        let mut lines = vec![format!(
            "Session Date: {}",
            self.saved_at.format("%Y-%m-%d %H:%M")
        )];
        for entry in &self.entries {
            lines.push(entry.summary_line());
        }
        lines.join("\n")
    }
}

/// Persistence policy for the session store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistPolicy {
    /// Append each record to the log, preserving all prior records.
    Accumulate,
    /// Keep only the most recent record, overwriting on each save.
    ReplaceLatest,
}

impl Default for PersistPolicy {
    fn default() -> Self {
        PersistPolicy::Accumulate
    }
}
