//! Repository contracts for saving and loading session progress.

use super::error::Result;
use super::record::SaveRecord;

/// Repository for save records, one per named slot.
///
/// `load` verifies the record checksum; a tampered or unparsable record is
/// reported as [`super::RepositoryError::Snapshot`].
pub trait SaveRepository: Send + Sync {
    /// Save (or overwrite) the record for a slot
    fn save(&self, slot: &str, record: &SaveRecord) -> Result<()>;

    /// Load the record for a slot
    fn load(&self, slot: &str) -> Result<Option<SaveRecord>>;

    /// Delete the record for a slot. Deleting a missing slot is not an error.
    fn delete(&self, slot: &str) -> Result<()>;

    /// List all slots that hold a record, sorted
    fn list_slots(&self) -> Result<Vec<String>>;

    /// Check if a slot holds a record
    fn exists(&self, slot: &str) -> bool {
        self.list_slots()
            .map(|slots| slots.iter().any(|s| s == slot))
            .unwrap_or(false)
    }
}

/// Slot names double as file names: ASCII letters, digits, `-` and `_` only.
pub fn validate_slot(slot: &str) -> Result<()> {
    let valid = !slot.is_empty()
        && slot.len() <= 64
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(super::RepositoryError::InvalidSlot(slot.to_string()))
    }
}
