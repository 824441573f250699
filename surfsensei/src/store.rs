//! Feedback history storage.
//!
//! The history is a single slot holding a JSON array of records. Appends
//! are read-modify-write of the whole slot. Reads never fail: a missing or
//! corrupt slot is an empty history.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use crate::error::SurfError;
use crate::models::FeedbackRecord;

/// Append-only feedback log.
pub trait FeedbackStore: Send + Sync {
    /// Append one record after all existing ones.
    fn append(&self, record: FeedbackRecord) -> Result<(), SurfError>;

    /// Full history in submission order. Empty on absence or corruption.
    fn all(&self) -> Vec<FeedbackRecord>;
}

/// Store backed by a JSON file.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the slot. `Ok(None)` when it does not exist yet.
    fn read_slot(&self) -> Result<Option<Vec<FeedbackRecord>>, SurfError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            SurfError::PersistenceDegraded(format!("read {}: {e}", self.path.display()))
        })?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&content).map(Some).map_err(|e| {
            SurfError::PersistenceDegraded(format!("parse {}: {e}", self.path.display()))
        })
    }

    fn write_slot(&self, records: &[FeedbackRecord]) -> Result<(), SurfError> {
        let degraded = |e: &dyn std::fmt::Display| {
            SurfError::PersistenceDegraded(format!("write {}: {e}", self.path.display()))
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| degraded(&e))?;
        }
        let json = serde_json::to_string_pretty(records).map_err(|e| degraded(&e))?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| degraded(&e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| degraded(&e))
    }
}

impl FeedbackStore for JsonFileStore {
    fn append(&self, record: FeedbackRecord) -> Result<(), SurfError> {
        let _guard = self.lock.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        // A corrupt slot is left untouched rather than overwritten.
        let mut history = self.read_slot()?.unwrap_or_default();
        history.push(record);
        self.write_slot(&history)
    }

    fn all(&self) -> Vec<FeedbackRecord> {
        let _guard = self.lock.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        match self.read_slot() {
            Ok(history) => history.unwrap_or_default(),
            Err(e) => {
                warn!("Failed to read feedback history: {e}");
                Vec::new()
            }
        }
    }
}

/// In-memory store, used with `--no-persist` and in tests.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<FeedbackRecord>>,
}

impl FeedbackStore for MemoryStore {
    fn append(&self, record: FeedbackRecord) -> Result<(), SurfError> {
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(record);
        Ok(())
    }

    fn all(&self) -> Vec<FeedbackRecord> {
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}
