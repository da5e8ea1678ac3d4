//! Public API traits for the interaction module.
//!
//! These traits define the interface that the HTTP binding layer uses. The
//! binding reads the query string and session principal from the live request
//! and passes them in explicitly; nothing here reaches for ambient request state.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::InteractionError;
use crate::models::{
    AuthorizationRequest, ConsentResponse, ErrorMessage, ValidatedEndSessionRequest,
};
use crate::parameters::RawParameters;
use crate::principal::Principal;
use crate::validation::ValidationResult;

/// End-session (logout) request validation.
///
/// ```ignore
/// let raw = Arc::new(RawParameters::parse_query(uri.query().unwrap_or_default()));
/// match end_session.validate_end_session(raw, session_principal).await? {
///     ValidationResult::Success(request) => sign_out(request),
///     ValidationResult::Error(e) => render_error(e),
/// }
/// ```
#[async_trait]
pub trait EndSessionClient: Send + Sync {
    /// Validate logout parameters against the session principal.
    ///
    /// Protocol failures are returned as `ValidationResult::Error`.
    ///
    /// # Errors
    ///
    /// - `ServiceUnavailable` if the token or redirect validator cannot be reached
    /// - `Internal` for unexpected errors
    async fn validate_end_session(
        &self,
        parameters: Arc<RawParameters>,
        principal: Option<Arc<Principal>>,
    ) -> Result<ValidationResult<ValidatedEndSessionRequest>, InteractionError>;
}

/// Interaction page access to pending login, consent and error context.
///
/// `query` is the query string of the interaction page request. An explicit
/// `return_url` or `error_id` argument takes precedence over the configured
/// query parameter.
#[async_trait]
pub trait UserInteractionClient: Send + Sync {
    /// Pending authorization request that sent the user to the login page.
    ///
    /// Returns `None` when no request is pending or it no longer validates.
    ///
    /// # Errors
    ///
    /// - `ServiceUnavailable` if the authorize validator cannot be reached
    async fn get_login_context(
        &self,
        query: &RawParameters,
        principal: Option<&Principal>,
        return_url: Option<&str>,
    ) -> Result<Option<AuthorizationRequest>, InteractionError>;

    /// Pending authorization request that sent the user to the consent page.
    ///
    /// # Errors
    ///
    /// - `ServiceUnavailable` if the authorize validator cannot be reached
    async fn get_consent_context(
        &self,
        query: &RawParameters,
        principal: Option<&Principal>,
        return_url: Option<&str>,
    ) -> Result<Option<AuthorizationRequest>, InteractionError>;

    /// Error to display on the error page.
    ///
    /// # Errors
    ///
    /// - `StoreUnavailable` if the error store cannot be read
    async fn get_error_context(
        &self,
        query: &RawParameters,
        error_id: Option<&str>,
    ) -> Result<Option<ErrorMessage>, InteractionError>;

    /// Record the user's consent decision for `request`.
    ///
    /// `subject` defaults to the principal's subject id.
    ///
    /// # Errors
    ///
    /// - `SubjectRequired` if neither `subject` nor a principal subject is available
    /// - `StoreUnavailable` if the consent store cannot be written
    async fn grant_consent(
        &self,
        request: &AuthorizationRequest,
        consent: ConsentResponse,
        principal: Option<&Principal>,
        subject: Option<&str>,
    ) -> Result<(), InteractionError>;

    /// Whether `return_url` may be redirected to after login or consent.
    ///
    /// Accepts everything by default; hosts with a return-URL policy override this.
    fn is_valid_return_url(&self, _return_url: &str) -> bool {
        true
    }
}
