//! Common error infrastructure for campaign-core.
//!
//! Domain errors (`CargoError`, `ContainmentError`, `TransferError`) live next to
//! the state or engine code they validate. They all implement [`CampaignError`]
//! so callers can classify failures uniformly.
//!
//! # Design Principles
//!
//! - **No partial mutation**: an operation that returns `Err` left state untouched
//! - **Severity Classification**: errors are categorized for recovery strategies
//! - **Stable codes**: every variant maps to a static identifier usable in logs

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: capacity or availability conditions that may succeed later
/// - **Validation**: invalid references or arguments, do not retry unchanged
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: a required collaborator is missing, the caller cannot proceed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error, e.g. containment full or not enough items in storage.
    Recoverable,

    /// Validation error, e.g. unknown base or unresolvable species id.
    Validation,

    /// Internal error, e.g. ledger and containment drifted apart.
    Internal,

    /// Fatal error, e.g. a required oracle is not wired into the environment.
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
}

/// Common trait for all campaign-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Keep `error_code` values stable, they end up in logs and saves
pub trait CampaignError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
