//! CSV export of the session history.
//!
//! Writes one row per logged entry so the history can be opened in a
//! spreadsheet; the file is flushed and synced before returning.

use crate::{Result, SessionRecord};
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    session_id: String,
    saved_at: String,
    exercise: &'a str,
    sets: Option<u32>,
    reps: u32,
    weight: f64,
    calories: Option<u32>,
    one_rep_max: Option<u32>,
}

/// Export the full history to a CSV file, returning the row count.
///
/// The file is created (or truncated) with a header row. An empty
/// history produces a header-only file.
pub fn export_csv(records: &[SessionRecord], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;

    let mut count = 0;
    for record in records {
        for entry in &record.entries {
            writer.serialize(CsvRow {
                session_id: record.id.to_string(),
                saved_at: record.saved_at.to_rfc3339(),
                exercise: &entry.exercise,
                sets: entry.sets,
                reps: entry.reps,
                weight: entry.weight,
                calories: entry.calories,
                one_rep_max: entry.one_rep_max,
            })?;
            count += 1;
        }
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Exported {} entries to {:?}", count, path);
    Ok(count)
}
