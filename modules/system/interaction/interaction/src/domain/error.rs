//! Domain errors for the interaction module.

use interaction_sdk::InteractionError;

/// Internal domain errors.
///
/// Only infrastructure faults live here; rejected requests are
/// `ValidationResult::Error` values.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("message store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),

    #[error("subject is required to record consent")]
    SubjectRequired,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<InteractionError> for DomainError {
    fn from(e: InteractionError) -> Self {
        match e {
            InteractionError::StoreUnavailable(msg) => Self::StoreUnavailable(msg),
            InteractionError::ServiceUnavailable(msg) => Self::CollaboratorUnavailable(msg),
            InteractionError::SubjectRequired => Self::SubjectRequired,
            InteractionError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<DomainError> for InteractionError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::StoreUnavailable(msg) => Self::StoreUnavailable(msg),
            DomainError::CollaboratorUnavailable(msg) => Self::ServiceUnavailable(msg),
            DomainError::SubjectRequired => Self::SubjectRequired,
            DomainError::Internal(msg) => Self::Internal(msg),
        }
    }
}
