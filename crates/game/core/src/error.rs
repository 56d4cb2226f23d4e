//! Common error infrastructure for game-core.
//!
//! Domain errors (`CombatError`, `ResolveError`, `ProgressionError`,
//! `ConfigurationError`) live next to the rules they guard. This module holds
//! the shared severity classification every one of them reports.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each subsystem has its own error enum
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **No side effects**: game-core never logs; callers decide how loud an error is

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: A safe default was substituted, play continues
/// - **Validation**: Invalid input that is ignored without changing state
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Usage error the caller must not paper over
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// A default was substituted for missing data.
    ///
    /// Examples: missing character data at combat start, missing level table
    Recoverable,

    /// Invalid input, the operation had no effect.
    ///
    /// Examples: target not found, non-positive XP grant
    Validation,

    /// Unexpected state inconsistency.
    Internal,

    /// The request itself is invalid and was rejected.
    ///
    /// Examples: starting a second combat, starting combat with an empty side
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

    /// Returns true if play can continue after this error.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
