//! Interaction page service: pending login/consent context, error messages
//! and consent decisions.

use std::sync::Arc;

use interaction_sdk::{
    AuthorizationRequest, AuthorizeRequestValidator, ConsentKey, ConsentResponse, ErrorMessage,
    Message, MessageStore, Principal, RawParameters, ValidationResult,
};
use tracing::{debug, info};
use uuid::Uuid;

use super::DomainError;
use crate::config::InteractionConfig;

/// Gives the interaction pages access to the request that sent the user
/// there, and records what the user decided.
pub struct UserInteractionService {
    config: InteractionConfig,
    validator: Arc<dyn AuthorizeRequestValidator>,
    error_store: Arc<dyn MessageStore<ErrorMessage>>,
    consent_store: Arc<dyn MessageStore<ConsentResponse>>,
}

impl UserInteractionService {
    #[must_use]
    pub fn new(
        config: InteractionConfig,
        validator: Arc<dyn AuthorizeRequestValidator>,
        error_store: Arc<dyn MessageStore<ErrorMessage>>,
        consent_store: Arc<dyn MessageStore<ConsentResponse>>,
    ) -> Self {
        Self {
            config,
            validator,
            error_store,
            consent_store,
        }
    }

    /// Pending authorization request for the login page.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the authorize validator fails.
    pub async fn get_login_context(
        &self,
        query: &RawParameters,
        principal: Option<&Principal>,
        return_url: Option<&str>,
    ) -> Result<Option<AuthorizationRequest>, DomainError> {
        let return_url =
            resolve_parameter(query, &self.config.login_return_url_parameter, return_url);
        self.get_authorize_request(return_url, principal).await
    }

    /// Pending authorization request for the consent page.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the authorize validator fails.
    pub async fn get_consent_context(
        &self,
        query: &RawParameters,
        principal: Option<&Principal>,
        return_url: Option<&str>,
    ) -> Result<Option<AuthorizationRequest>, DomainError> {
        let return_url =
            resolve_parameter(query, &self.config.consent_return_url_parameter, return_url);
        self.get_authorize_request(return_url, principal).await
    }

    #[tracing::instrument(skip_all, fields(has_return_url = return_url.is_some()))]
    async fn get_authorize_request(
        &self,
        return_url: Option<&str>,
        principal: Option<&Principal>,
    ) -> Result<Option<AuthorizationRequest>, DomainError> {
        let Some(return_url) = return_url else {
            debug!("No pending authorization request");
            return Ok(None);
        };

        let parameters = RawParameters::from_url(return_url);
        match self.validator.validate(&parameters, principal).await? {
            ValidationResult::Success(validated) => {
                debug!(client_id = %validated.client_id, "Resumed pending authorization request");
                Ok(Some(AuthorizationRequest::from(validated)))
            }
            ValidationResult::Error(e) => {
                debug!(error = %e, "Pending authorization request no longer validates");
                Ok(None)
            }
        }
    }

    /// Error message for the error page.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StoreUnavailable` if the error store fails.
    #[tracing::instrument(skip_all)]
    pub async fn get_error_context(
        &self,
        query: &RawParameters,
        error_id: Option<&str>,
    ) -> Result<Option<ErrorMessage>, DomainError> {
        let Some(error_id) = resolve_parameter(query, &self.config.error_id_parameter, error_id)
        else {
            debug!("No error id supplied");
            return Ok(None);
        };

        let message = self.error_store.read(error_id).await?;
        if message.is_none() {
            debug!(error_id, "Error message not found or expired");
        }
        Ok(message.map(|m| m.data))
    }

    /// Store `error` under a fresh id and return the id for the error page URL.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StoreUnavailable` if the error store fails.
    #[tracing::instrument(skip_all, fields(error_code = %error.error_code))]
    pub async fn create_error_context(&self, error: ErrorMessage) -> Result<String, DomainError> {
        let id = Uuid::new_v4().simple().to_string();
        self.error_store.write(&id, Message::new(error)).await?;
        debug!(error_id = %id, "Stored error message");
        Ok(id)
    }

    /// Record the user's consent decision for `request`.
    ///
    /// `subject` defaults to the principal's subject id. A later decision for
    /// the same client, subject, nonce and scope set replaces this one.
    ///
    /// # Errors
    ///
    /// - `SubjectRequired` if no subject can be determined
    /// - `StoreUnavailable` if the consent store fails
    #[tracing::instrument(skip_all, fields(client_id = %request.client_id, granted = consent.is_granted()))]
    pub async fn grant_consent(
        &self,
        request: &AuthorizationRequest,
        consent: ConsentResponse,
        principal: Option<&Principal>,
        subject: Option<&str>,
    ) -> Result<(), DomainError> {
        let subject = subject
            .or_else(|| principal.and_then(Principal::subject_id))
            .ok_or(DomainError::SubjectRequired)?;

        let key = consent_key(request, subject);
        self.consent_store
            .write(key.as_str(), Message::new(consent))
            .await?;

        info!(subject, "Recorded consent decision");
        Ok(())
    }

    /// Consent decision previously recorded for `request` and `subject`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StoreUnavailable` if the consent store fails.
    #[tracing::instrument(skip_all, fields(client_id = %request.client_id))]
    pub async fn get_consent_response(
        &self,
        request: &AuthorizationRequest,
        subject: &str,
    ) -> Result<Option<ConsentResponse>, DomainError> {
        let key = consent_key(request, subject);
        let message = self.consent_store.read(key.as_str()).await?;
        Ok(message.map(|m| m.data))
    }
}

fn consent_key(request: &AuthorizationRequest, subject: &str) -> ConsentKey {
    ConsentKey::derive(
        &request.client_id,
        subject,
        request.nonce.as_deref(),
        &request.scopes_requested,
    )
}

/// Explicit value wins; otherwise the first value of `name` in the query.
fn resolve_parameter<'a>(
    query: &'a RawParameters,
    name: &str,
    explicit: Option<&'a str>,
) -> Option<&'a str> {
    explicit.or_else(|| query.get(name))
}
