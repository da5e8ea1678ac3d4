//! Local (in-process) client for the interaction module.

use std::sync::Arc;

use async_trait::async_trait;
use interaction_sdk::{
    AuthorizationRequest, ConsentResponse, EndSessionClient, ErrorMessage, InteractionError,
    Principal, RawParameters, UserInteractionClient, ValidatedEndSessionRequest,
    ValidationResult,
};

use super::{DomainError, EndSessionRequestValidator, UserInteractionService};

/// Local client wrapping the domain services.
///
/// Handed to the HTTP binding layer by [`crate::module::Interaction`].
pub struct InteractionLocalClient {
    end_session: Arc<EndSessionRequestValidator>,
    interaction: Arc<UserInteractionService>,
}

impl InteractionLocalClient {
    #[must_use]
    pub fn new(
        end_session: Arc<EndSessionRequestValidator>,
        interaction: Arc<UserInteractionService>,
    ) -> Self {
        Self {
            end_session,
            interaction,
        }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> InteractionError {
    tracing::error!(operation = op, error = ?e, "interaction call failed");
    e.into()
}

#[async_trait]
impl EndSessionClient for InteractionLocalClient {
    async fn validate_end_session(
        &self,
        parameters: Arc<RawParameters>,
        principal: Option<Arc<Principal>>,
    ) -> Result<ValidationResult<ValidatedEndSessionRequest>, InteractionError> {
        self.end_session
            .validate(parameters, principal)
            .await
            .map_err(|e| log_and_convert("validate_end_session", e))
    }
}

#[async_trait]
impl UserInteractionClient for InteractionLocalClient {
    async fn get_login_context(
        &self,
        query: &RawParameters,
        principal: Option<&Principal>,
        return_url: Option<&str>,
    ) -> Result<Option<AuthorizationRequest>, InteractionError> {
        self.interaction
            .get_login_context(query, principal, return_url)
            .await
            .map_err(|e| log_and_convert("get_login_context", e))
    }

    async fn get_consent_context(
        &self,
        query: &RawParameters,
        principal: Option<&Principal>,
        return_url: Option<&str>,
    ) -> Result<Option<AuthorizationRequest>, InteractionError> {
        self.interaction
            .get_consent_context(query, principal, return_url)
            .await
            .map_err(|e| log_and_convert("get_consent_context", e))
    }

    async fn get_error_context(
        &self,
        query: &RawParameters,
        error_id: Option<&str>,
    ) -> Result<Option<ErrorMessage>, InteractionError> {
        self.interaction
            .get_error_context(query, error_id)
            .await
            .map_err(|e| log_and_convert("get_error_context", e))
    }

    async fn grant_consent(
        &self,
        request: &AuthorizationRequest,
        consent: ConsentResponse,
        principal: Option<&Principal>,
        subject: Option<&str>,
    ) -> Result<(), InteractionError> {
        self.interaction
            .grant_consent(request, consent, principal, subject)
            .await
            .map_err(|e| log_and_convert("grant_consent", e))
    }
}
