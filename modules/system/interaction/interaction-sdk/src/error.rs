//! Error types for the interaction module.

use thiserror::Error;

/// Errors that can occur when using the interaction API or its collaborators.
///
/// Protocol outcomes (unauthenticated caller, bad token hint, subject mismatch,
/// rejected redirect) are never reported through this type; they are
/// [`ValidationResult::Error`](crate::ValidationResult::Error) values.
#[derive(Debug, Error)]
pub enum InteractionError {
    /// The message store failed to read or write a record.
    #[error("message store unavailable: {0}")]
    StoreUnavailable(String),

    /// A collaborator (token validator, redirect validator, authorize validator)
    /// could not be reached.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// A consent decision was recorded without a subject to attribute it to.
    #[error("subject is required to record consent")]
    SubjectRequired,

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
