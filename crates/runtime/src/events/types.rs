//! Runtime-level event payloads that sit next to the engine's own events.

use serde::{Deserialize, Serialize};

/// Save/restore bookkeeping for the session's slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PersistenceEvent {
    /// A saved session was resumed.
    Restored {
        slot: String,
        battle_number: u32,
        level: u32,
    },
    /// The saved session could not be used; a new game was started instead.
    RestoreFailed { slot: String, reason: String },
    Saved { slot: String, battle_number: u32 },
    SaveFailed { slot: String, reason: String },
}

/// A command the engine refused. The session is unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRejected {
    pub command: String,
    pub code: String,
    pub reason: String,
}
