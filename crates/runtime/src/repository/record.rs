//! Save record: a session snapshot plus bookkeeping and an integrity digest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use game_core::{SaveSnapshot, SnapshotError};

use super::error::Result;

/// One persisted session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub snapshot: SaveSnapshot,
    pub created_at: DateTime<Utc>,
    pub last_played: DateTime<Utc>,
    pub play_time_seconds: u64,
    /// SHA-256 hex digest of the snapshot's JSON encoding.
    pub checksum: String,
}

impl SaveRecord {
    /// Creates a record for a brand new save.
    pub fn new(snapshot: SaveSnapshot, play_time_seconds: u64) -> Result<Self> {
        let now = Utc::now();
        Self::with_times(snapshot, now, now, play_time_seconds)
    }

    pub fn with_times(
        snapshot: SaveSnapshot,
        created_at: DateTime<Utc>,
        last_played: DateTime<Utc>,
        play_time_seconds: u64,
    ) -> Result<Self> {
        let checksum = checksum(&snapshot)?;
        Ok(Self {
            snapshot,
            created_at,
            last_played,
            play_time_seconds,
            checksum,
        })
    }

    /// Recomputes the digest and compares it with the stored one.
    pub fn verify(&self) -> std::result::Result<(), SnapshotError> {
        let actual = checksum(&self.snapshot)
            .map_err(|e| SnapshotError::malformed(format!("cannot encode snapshot: {e}")))?;
        if actual != self.checksum {
            return Err(SnapshotError::malformed(format!(
                "checksum mismatch: stored {}, computed {}",
                self.checksum, actual
            )));
        }
        Ok(())
    }
}

/// SHA-256 over the JSON encoding of a snapshot, hex encoded.
pub fn checksum(snapshot: &SaveSnapshot) -> Result<String> {
    let bytes = serde_json::to_vec(snapshot)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}
