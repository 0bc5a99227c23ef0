//! Common error infrastructure for game-core.
//!
//! This module provides shared types and traits used across all error types in game-core.
//! Domain-specific errors (e.g., `CommandError`, `PurchaseError`) are defined in their
//! respective modules alongside the rules they validate.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each rule has its own error type with specific variants
//! - **Rich Context**: Errors carry the battle number and state they were raised in
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **Never Fatal During Play**: Domain failures are explicit outcomes, not panics

use crate::state::BattleState;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Temporary conditions that may succeed later or with another command
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Unrecoverable errors indicating corrupted session state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry once the session reaches the right state.
    ///
    /// Examples: answer submitted during the enemy turn, not enough gold
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown shop item, snapshot with hp above max hp
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: waiting for an answer without an active problem
    Internal,

    /// Fatal error - session state corrupted, cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ErrorContext {
    /// Battle number at the time of the error.
    pub battle_number: u32,

    /// State the machine was in when the error was raised.
    pub state: Option<BattleState>,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    /// Creates a new error context for the given battle.
    #[must_use]
    pub const fn new(battle_number: u32) -> Self {
        Self {
            battle_number,
            state: None,
            message: None,
        }
    }

    /// Attaches the current battle state (builder pattern).
    #[must_use]
    pub const fn with_state(mut self, state: BattleState) -> Self {
        self.state = Some(state);
        self
    }

    /// Attaches a static message to this context (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Common trait for all game-core errors.
///
/// This trait provides a uniform interface for error classification and context
/// retrieval across all error types in the crate.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Include `ErrorContext` in variants that need debugging info
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Static content (enemy or shop catalog) that violates a catalog invariant.
///
/// Shared by the encounter table and the shop catalog, which both validate on
/// construction so the engine never indexes into an empty or broken list.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("{catalog} catalog must contain at least one entry")]
    Empty { catalog: &'static str },

    #[error("entry '{name}' must have max hp above zero")]
    ZeroHp { name: String },

    #[error("shop item '{id}' must cost at least 1 gold")]
    ZeroCost { id: String },

    #[error("shop item id '{id}' appears more than once")]
    DuplicateItem { id: String },
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty { .. } => "CATALOG_EMPTY",
            Self::ZeroHp { .. } => "CATALOG_ZERO_HP",
            Self::ZeroCost { .. } => "CATALOG_ZERO_COST",
            Self::DuplicateItem { .. } => "CATALOG_DUPLICATE_ITEM",
        }
    }
}
