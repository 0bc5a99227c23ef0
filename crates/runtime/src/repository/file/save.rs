//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::SnapshotError;

use crate::repository::{RepositoryError, Result, SaveRecord, SaveRepository, validate_slot};

/// File-based implementation of SaveRepository.
///
/// # File Format
///
/// Each slot is stored as `{slot}.json`, a pretty-printed [`SaveRecord`].
/// Writes go to a temp file first and are renamed into place.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    /// Create a new file-based save repository, creating the directory if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a slot file.
    fn slot_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", slot))
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: &str, record: &SaveRecord) -> Result<()> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(record)?;
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved slot '{}' to {}", slot, path.display());

        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SaveRecord>> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let record: SaveRecord = serde_json::from_slice(&bytes).map_err(|e| {
            SnapshotError::malformed(format!("unreadable save {}: {}", path.display(), e))
        })?;
        record.verify()?;

        tracing::debug!("Loaded slot '{}' from {}", slot, path.display());

        Ok(Some(record))
    }

    fn delete(&self, slot: &str) -> Result<()> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted slot '{}'", slot);
        }

        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(slot) = filename.strip_suffix(".json")
                && validate_slot(slot).is_ok()
            {
                slots.push(slot.to_string());
            }
        }

        slots.sort_unstable();
        Ok(slots)
    }

    fn exists(&self, slot: &str) -> bool {
        validate_slot(slot).is_ok() && self.slot_path(slot).exists()
    }
}
