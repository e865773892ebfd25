//! Progressive overload analysis.
//!
//! Compares the most recent one-rep-max estimate in the history against
//! the one before it and reports the direction of change.

use crate::SessionRecord;

/// Outcome of a progressive overload comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverloadReport {
    /// The latest estimate beats the previous one by `delta`.
    Improved { delta: u32 },
    /// The latest estimate is below the previous one by `delta`.
    Declined { delta: u32 },
    /// The latest two estimates are equal.
    Unchanged,
    /// Fewer than two estimates exist in the history.
    InsufficientData,
}

/// Compare the last two one-rep-max estimates across the full history.
///
/// Entries are flattened across records in logged order; entries without
/// a computed one-rep-max are skipped. Pure function, no side effects.
pub fn compare(history: &[SessionRecord]) -> OverloadReport {
    let metrics: Vec<u32> = history
        .iter()
        .flat_map(|record| record.entries.iter())
        .filter_map(|entry| entry.one_rep_max)
        .collect();

    let &[.., prev, last] = &metrics[..] else {
        return OverloadReport::InsufficientData;
    };

    if last > prev {
        OverloadReport::Improved { delta: last - prev }
    } else if last < prev {
        OverloadReport::Declined { delta: prev - last }
    } else {
        OverloadReport::Unchanged
    }
}

impl OverloadReport {
    /// Render the report the way the menu displays it.
    pub fn describe(&self) -> String {
        match self {
            OverloadReport::Improved { delta } => {
                format!("Improvement detected: +{} 1RM", delta)
            }
            OverloadReport::Declined { delta } => {
                format!("Performance decreased: -{} 1RM", delta)
            }
            OverloadReport::Unchanged => "No change".into(),
            OverloadReport::InsufficientData => "Not enough data.".into(),
        }
    }
}
