//! In-memory SaveRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::repository::{RepositoryError, Result, SaveRecord, SaveRepository, validate_slot};

/// In-memory implementation of SaveRepository.
///
/// Records are kept as-is, so tests can seed tampered records to exercise the
/// checksum path.
pub struct InMemorySaveRepository {
    records: RwLock<HashMap<String, SaveRecord>>,
}

impl InMemorySaveRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Create with a record already stored in `slot`, bypassing validation.
    pub fn with_record(slot: impl Into<String>, record: SaveRecord) -> Self {
        let mut records = HashMap::new();
        records.insert(slot.into(), record);
        Self {
            records: RwLock::new(records),
        }
    }
}

impl Default for InMemorySaveRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, slot: &str, record: &SaveRecord) -> Result<()> {
        validate_slot(slot)?;
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.insert(slot.to_string(), record.clone());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SaveRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        match records.get(slot) {
            Some(record) => {
                record.verify()?;
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut slots: Vec<String> = records.keys().cloned().collect();
        slots.sort_unstable();
        Ok(slots)
    }

    fn exists(&self, slot: &str) -> bool {
        self.records
            .read()
            .map(|records| records.contains_key(slot))
            .unwrap_or(false)
    }
}
