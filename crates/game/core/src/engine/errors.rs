//! Errors surfaced by the battle engine.

use crate::error::{ErrorContext, ErrorSeverity, GameError};

/// A command or lifecycle call the engine refused.
///
/// Rejections never change session state; the host may log them and carry on.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Command received in a state that does not accept it.
    #[error("'{command}' is not accepted in state {state}", state = display_state(.context))]
    InvalidCommand {
        command: &'static str,
        context: ErrorContext,
    },

    /// `purchase-item` named an id the shop does not stock.
    #[error("no shop item with id '{id}'")]
    UnknownItem { id: String, context: ErrorContext },

    /// `start` called on a session that is already running or finished.
    #[error("session already started")]
    AlreadyStarted { context: ErrorContext },

    /// The session reached a state its own transitions should never produce.
    #[error("inconsistent session: {}", .context.message.unwrap_or("unknown"))]
    Inconsistent { context: ErrorContext },
}

fn display_state(context: &ErrorContext) -> &'static str {
    context.state.map(|state| state.into()).unwrap_or("unknown")
}

impl CommandError {
    pub(crate) fn invalid(command: &'static str, context: ErrorContext) -> Self {
        Self::InvalidCommand { command, context }
    }

    pub(crate) fn inconsistent(context: ErrorContext, message: &'static str) -> Self {
        Self::Inconsistent {
            context: context.with_message(message),
        }
    }
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidCommand { .. } | Self::AlreadyStarted { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::UnknownItem { .. } => ErrorSeverity::Validation,
            Self::Inconsistent { .. } => ErrorSeverity::Internal,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::InvalidCommand { context, .. }
            | Self::UnknownItem { context, .. }
            | Self::AlreadyStarted { context }
            | Self::Inconsistent { context } => Some(context),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCommand { .. } => "INVALID_COMMAND",
            Self::UnknownItem { .. } => "UNKNOWN_ITEM",
            Self::AlreadyStarted { .. } => "ALREADY_STARTED",
            Self::Inconsistent { .. } => "INCONSISTENT_SESSION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BattleState;

    #[test]
    fn invalid_command_names_state() {
        let err = CommandError::invalid(
            "close-shop",
            ErrorContext::new(2).with_state(BattleState::EnemyTurn),
        );

        assert_eq!(
            err.to_string(),
            "'close-shop' is not accepted in state enemy_turn"
        );
        assert!(err.severity().is_recoverable());
        assert_eq!(err.context().map(|ctx| ctx.battle_number), Some(2));
    }

    #[test]
    fn inconsistent_is_internal() {
        let err = CommandError::inconsistent(ErrorContext::new(1), "no active problem");
        assert!(err.severity().is_internal());
        assert_eq!(err.to_string(), "inconsistent session: no active problem");
    }
}
