//! Validation outcomes.

use std::fmt;

/// Classification of a rejected request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// Policy requires an authenticated user and none is present.
    AuthenticationRequired,
    /// The identity-token hint failed to decode or verify.
    TokenInvalid,
    /// The token subject does not match the current principal.
    SubjectMismatch,
    /// The post-logout redirect URI is not registered for the client.
    RedirectRejected,
    /// Any other malformed or unacceptable request.
    InvalidRequest,
}

impl ValidationErrorKind {
    /// Protocol error code suitable for an `error` response parameter.
    #[must_use]
    pub fn error_code(self) -> &'static str {
        match self {
            Self::AuthenticationRequired => "login_required",
            Self::TokenInvalid => "invalid_token",
            Self::SubjectMismatch => "subject_mismatch",
            Self::RedirectRejected => "invalid_redirect_uri",
            Self::InvalidRequest => "invalid_request",
        }
    }
}

/// A rejected request: what went wrong and a human-readable description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub description: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(kind: ValidationErrorKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.error_code(), self.description)
    }
}

/// Outcome of validating a request: either rejected or accepted with a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum ValidationResult<T> {
    Error(ValidationError),
    Success(T),
}

impl<T> ValidationResult<T> {
    pub fn error(kind: ValidationErrorKind, description: impl Into<String>) -> Self {
        Self::Error(ValidationError::new(kind, description))
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    #[must_use]
    pub fn as_success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Error(_) => None,
        }
    }

    #[must_use]
    pub fn as_error(&self) -> Option<&ValidationError> {
        match self {
            Self::Error(e) => Some(e),
            Self::Success(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ValidationResult<U> {
        match self {
            Self::Error(e) => ValidationResult::Error(e),
            Self::Success(value) => ValidationResult::Success(f(value)),
        }
    }

    /// Convert into a `Result` for `?`-style handling.
    ///
    /// # Errors
    ///
    /// Returns the contained [`ValidationError`] for the `Error` variant.
    pub fn into_result(self) -> Result<T, ValidationError> {
        match self {
            Self::Error(e) => Err(e),
            Self::Success(value) => Ok(value),
        }
    }
}

impl<T> From<Result<T, ValidationError>> for ValidationResult<T> {
    fn from(result: Result<T, ValidationError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(e) => Self::Error(e),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn discriminant_matches_variant() {
        let ok: ValidationResult<u8> = ValidationResult::Success(7);
        let err: ValidationResult<u8> =
            ValidationResult::error(ValidationErrorKind::TokenInvalid, "expired");

        assert!(!ok.is_error());
        assert_eq!(ok.as_success(), Some(&7));
        assert!(ok.as_error().is_none());

        assert!(err.is_error());
        assert!(err.as_success().is_none());
        assert_eq!(err.as_error().map(|e| e.kind), Some(ValidationErrorKind::TokenInvalid));
    }

    #[test]
    fn map_keeps_error_untouched() {
        let err: ValidationResult<u8> =
            ValidationResult::error(ValidationErrorKind::SubjectMismatch, "nope");
        let mapped = err.map(|v| v.to_string());

        assert_eq!(
            mapped.into_result().unwrap_err().kind,
            ValidationErrorKind::SubjectMismatch
        );
    }

    #[test]
    fn display_includes_code_and_description() {
        let e = ValidationError::new(ValidationErrorKind::RedirectRejected, "not registered");
        assert_eq!(e.to_string(), "invalid_redirect_uri: not registered");
    }
}
