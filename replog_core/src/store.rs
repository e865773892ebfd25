//! Session persistence backends and the entry store facade.
//!
//! Two backing media are supported, selected by [`PersistPolicy`]:
//! - [`JsonlStore`]: an append-only JSONL log with file locking, where
//!   every saved session accumulates.
//! - [`LatestSlotStore`]: a single JSON slot holding only the newest
//!   record, overwritten atomically on each save.

use crate::{Error, PersistPolicy, Result, SessionRecord, WorkoutEntry};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Backing medium for session records.
///
/// Absence of prior data is never an error: `load` returns an empty
/// history and `clear` is idempotent.
pub trait SessionStore {
    /// Read all retrievable records, oldest first.
    fn load(&self) -> Result<Vec<SessionRecord>>;

    /// Write one record according to the backend's policy.
    fn persist(&mut self, record: &SessionRecord) -> Result<()>;

    /// Empty the backing medium.
    fn clear(&mut self) -> Result<()>;
}

/// Append-only JSONL log with file locking (accumulate policy).
pub struct JsonlStore {
    path: PathBuf,
}

impl JsonlStore {
    /// Create a new JSONL store for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl SessionStore for JsonlStore {
    fn load(&self) -> Result<Vec<SessionRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        // Shared lock for reading
        file.lock_shared()?;

        let reader = BufReader::new(&file);
        let mut records = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<SessionRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!("Failed to parse record at line {}: {}", line_num + 1, e);
                    // Continue reading, don't fail completely
                }
            }
        }

        file.unlock()?;
        tracing::debug!("Read {} records from log", records.len());
        Ok(records)
    }

    fn persist(&mut self, record: &SessionRecord) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // Exclusive lock while appending
        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(record)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        file.unlock()?;

        tracing::debug!("Appended session {} to log", record.id);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            tracing::info!("Cleared session log at {:?}", self.path);
        }
        Ok(())
    }
}

/// Single-slot store retaining only the newest record (replace-latest policy).
pub struct LatestSlotStore {
    path: PathBuf,
}

impl LatestSlotStore {
    /// Create a new single-slot store for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for LatestSlotStore {
    fn load(&self) -> Result<Vec<SessionRecord>> {
        if !self.path.exists() {
            tracing::info!("No previous workout found");
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str::<SessionRecord>(&contents) {
            Ok(record) => Ok(vec![record]),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse latest-session slot {:?}: {}. Treating as empty.",
                    self.path,
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Atomically overwrite the slot:
    /// 1. Write to a temp file in the same directory
    /// 2. Sync to disk
    /// 3. Rename over the original
    fn persist(&mut self, record: &SessionRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = NamedTempFile::new_in(self.path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "slot path missing parent")
        })?)?;

        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(record)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved latest session {} to {:?}", record.id, self.path);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            tracing::info!("Cleared latest-session slot at {:?}", self.path);
        }
        Ok(())
    }
}

/// Open the backend for a policy under the given data directory.
pub fn open_store(policy: PersistPolicy, data_dir: &Path) -> Box<dyn SessionStore> {
    match policy {
        PersistPolicy::Accumulate => Box::new(JsonlStore::new(data_dir.join("sessions.jsonl"))),
        PersistPolicy::ReplaceLatest => {
            Box::new(LatestSlotStore::new(data_dir.join("latest_session.json")))
        }
    }
}

/// Owns the in-memory entry list and exactly one backing store.
pub struct EntryStore {
    backend: Box<dyn SessionStore>,
    entries: Vec<WorkoutEntry>,
}

impl EntryStore {
    pub fn new(backend: Box<dyn SessionStore>) -> Self {
        Self {
            backend,
            entries: Vec::new(),
        }
    }

    /// Convenience constructor from a policy and data directory.
    pub fn open(policy: PersistPolicy, data_dir: &Path) -> Self {
        Self::new(open_store(policy, data_dir))
    }

    /// Read prior records from the backing medium, oldest first.
    pub fn load(&self) -> Result<Vec<SessionRecord>> {
        self.backend.load()
    }

    /// Add one entry to the in-memory collection.
    pub fn append(&mut self, entry: WorkoutEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[WorkoutEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stamp the collected entries into a [`SessionRecord`] and write it
    /// to the backing medium, draining the in-memory collection.
    pub fn persist_session(&mut self) -> Result<SessionRecord> {
        if self.entries.is_empty() {
            return Err(Error::Store("no entries to persist".into()));
        }
        let record = SessionRecord::seal(std::mem::take(&mut self.entries));
        self.backend.persist(&record)?;
        tracing::info!(
            "Persisted session {} with {} entries",
            record.id,
            record.entries.len()
        );
        Ok(record)
    }

    /// Empty the in-memory collection and the backing medium.
    ///
    /// Confirmation is the caller's responsibility.
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.backend.clear()
    }
}
