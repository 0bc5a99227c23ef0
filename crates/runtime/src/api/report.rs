//! End-of-session summary handed to the completion callback.

use serde::{Deserialize, Serialize};

/// Delivered exactly once per session, on victory or defeat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionReport {
    pub victory: bool,
    pub final_score: u32,
    pub achievements: Vec<String>,
    /// Wall-clock seconds since the session was started.
    pub elapsed_seconds: u64,
}

/// Callback fired when the session completes.
pub type CompletionCallback = Box<dyn FnOnce(CompletionReport) + Send + 'static>;
