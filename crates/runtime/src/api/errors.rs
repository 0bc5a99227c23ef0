//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, content loading and
//! engine rejections so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{CommandError, ErrorSeverity, GameError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("command rejected: {0}")]
    Rejected(#[source] CommandError),

    #[error("failed to load game content: {0}")]
    Content(String),

    #[error("persistence enabled but no save directory could be determined")]
    MissingSaveDir,
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Rejected(error) => error.severity(),
            Self::Content(_) | Self::MissingSaveDir => ErrorSeverity::Validation,
            Self::Repository(RepositoryError::Snapshot(_)) => ErrorSeverity::Validation,
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CommandChannelClosed => "COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "WORKER_JOIN",
            Self::Repository(_) => "REPOSITORY",
            Self::Rejected(error) => error.error_code(),
            Self::Content(_) => "CONTENT",
            Self::MissingSaveDir => "MISSING_SAVE_DIR",
        }
    }
}
