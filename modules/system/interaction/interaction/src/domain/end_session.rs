//! End-session (logout) request validation.

use std::sync::Arc;

use interaction_sdk::constants::{ID_TOKEN_HINT, POST_LOGOUT_REDIRECT_URI, STATE};
use interaction_sdk::{
    Client, Principal, RawParameters, RedirectUriValidator, TokenValidator,
    ValidatedEndSessionRequest, ValidationErrorKind, ValidationResult,
};
use tracing::{debug, warn};

use super::DomainError;
use crate::config::InteractionConfig;

/// Validates logout requests against the session principal, the
/// `id_token_hint` and the client's post-logout redirect allow-list.
pub struct EndSessionRequestValidator {
    require_authenticated_user: bool,
    token_validator: Arc<dyn TokenValidator>,
    uri_validator: Arc<dyn RedirectUriValidator>,
}

impl EndSessionRequestValidator {
    #[must_use]
    pub fn new(
        cfg: &InteractionConfig,
        token_validator: Arc<dyn TokenValidator>,
        uri_validator: Arc<dyn RedirectUriValidator>,
    ) -> Self {
        Self {
            require_authenticated_user: cfg.require_authenticated_user_for_sign_out_message,
            token_validator,
            uri_validator,
        }
    }

    /// Validate an end-session request.
    ///
    /// The authentication gate runs before anything else, including the
    /// empty-parameter shortcut. On success the request shares `parameters`
    /// and the principal with the caller; an absent principal is replaced by
    /// an anonymous one.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` only when a collaborator fails. Rejected requests
    /// are `ValidationResult::Error`.
    #[tracing::instrument(skip_all, fields(param_count = parameters.len()))]
    pub async fn validate(
        &self,
        parameters: Arc<RawParameters>,
        principal: Option<Arc<Principal>>,
    ) -> Result<ValidationResult<ValidatedEndSessionRequest>, DomainError> {
        let authenticated = principal.as_deref().is_some_and(Principal::is_authenticated);
        if self.require_authenticated_user && !authenticated {
            warn!("End session request rejected: user is not authenticated");
            return Ok(ValidationResult::error(
                ValidationErrorKind::AuthenticationRequired,
                "user not authenticated",
            ));
        }

        let subject = principal.unwrap_or_else(|| Arc::new(Principal::anonymous()));

        if parameters.is_empty() {
            debug!("End session request carries no parameters");
            return Ok(ValidationResult::Success(
                ValidatedEndSessionRequest::builder(parameters, subject).build(),
            ));
        }

        let mut client = None;
        if let Some(id_token_hint) = parameters.get(ID_TOKEN_HINT) {
            match self.check_id_token_hint(id_token_hint, &subject).await? {
                ValidationResult::Success(token_client) => client = token_client,
                ValidationResult::Error(e) => return Ok(ValidationResult::Error(e)),
            }
        }

        let post_logout_redirect_uri = match (parameters.get(POST_LOGOUT_REDIRECT_URI), &client) {
            (Some(uri), Some(client)) => {
                if !self
                    .uri_validator
                    .is_post_logout_redirect_uri_valid(uri, client)
                    .await?
                {
                    warn!(
                        client_id = %client.client_id,
                        post_logout_redirect_uri = %uri,
                        "Post logout redirect URI is not registered for client"
                    );
                    return Ok(ValidationResult::error(
                        ValidationErrorKind::RedirectRejected,
                        "invalid post logout URI",
                    ));
                }
                Some(uri.to_owned())
            }
            (Some(uri), None) => {
                debug!(
                    post_logout_redirect_uri = %uri,
                    "Ignoring post logout redirect URI without a resolved client"
                );
                None
            }
            (None, _) => None,
        };

        let state = parameters.get(STATE).map(str::to_owned);

        debug!(
            client_id = client.as_ref().map(|c| c.client_id.as_str()),
            has_redirect = post_logout_redirect_uri.is_some(),
            "End session request validated"
        );

        Ok(ValidationResult::Success(
            ValidatedEndSessionRequest::builder(parameters, subject)
                .client(client)
                .post_logout_redirect_uri(post_logout_redirect_uri)
                .state(state)
                .build(),
        ))
    }

    /// Verify the hint and tie it to `subject`. Yields the token's client.
    async fn check_id_token_hint(
        &self,
        id_token_hint: &str,
        subject: &Principal,
    ) -> Result<ValidationResult<Option<Client>>, DomainError> {
        let token = match self
            .token_validator
            .validate_identity_token(id_token_hint)
            .await?
        {
            ValidationResult::Success(token) => token,
            ValidationResult::Error(e) => {
                warn!(error = %e, "Error validating id token hint");
                return Ok(ValidationResult::error(
                    ValidationErrorKind::TokenInvalid,
                    e.description,
                ));
            }
        };

        match (token.subject_id(), subject.subject_id()) {
            (Some(token_sub), Some(current_sub)) if token_sub == current_sub => {}
            (token_sub, current_sub) => {
                warn!(
                    token_subject = token_sub,
                    current_subject = current_sub,
                    "Current user does not match identity token"
                );
                return Ok(ValidationResult::error(
                    ValidationErrorKind::SubjectMismatch,
                    "subject mismatch",
                ));
            }
        }

        Ok(ValidationResult::Success(token.client))
    }
}
