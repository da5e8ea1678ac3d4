#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Stub collaborators shared by the domain tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use interaction_sdk::{
    AuthorizeRequestValidator, Claim, Client, IdentityTokenValidation, InteractionError, Message,
    MessageStore, Principal, RawParameters, RedirectUriValidator, TokenValidator,
    ValidatedAuthorizeRequest, ValidationErrorKind, ValidationResult,
};

#[must_use]
pub fn alice() -> Arc<Principal> {
    Arc::new(Principal::builder().subject_id("alice").name("Alice").build())
}

/// Token validator returning a fixed outcome.
pub struct StubTokenValidator {
    result: ValidationResult<IdentityTokenValidation>,
    calls: AtomicUsize,
}

impl StubTokenValidator {
    #[must_use]
    pub fn valid_for(subject: &str, client_id: &str) -> Self {
        Self::returning(ValidationResult::Success(IdentityTokenValidation {
            claims: vec![Claim::new("sub", subject)],
            client: Some(Client::new(client_id)),
        }))
    }

    #[must_use]
    pub fn invalid() -> Self {
        Self::returning(ValidationResult::error(
            ValidationErrorKind::TokenInvalid,
            "signature validation failed",
        ))
    }

    #[must_use]
    pub fn returning(result: ValidationResult<IdentityTokenValidation>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenValidator for StubTokenValidator {
    async fn validate_identity_token(
        &self,
        _token: &str,
    ) -> Result<ValidationResult<IdentityTokenValidation>, InteractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.result.clone())
    }
}

/// Redirect validator with a fixed answer.
pub struct StubRedirectUriValidator {
    pub valid: bool,
}

#[async_trait]
impl RedirectUriValidator for StubRedirectUriValidator {
    async fn is_post_logout_redirect_uri_valid(
        &self,
        _uri: &str,
        _client: &Client,
    ) -> Result<bool, InteractionError> {
        Ok(self.valid)
    }
}

/// Collaborator that is always down.
pub struct Unreachable;

#[async_trait]
impl TokenValidator for Unreachable {
    async fn validate_identity_token(
        &self,
        _token: &str,
    ) -> Result<ValidationResult<IdentityTokenValidation>, InteractionError> {
        Err(InteractionError::ServiceUnavailable("jwks endpoint timed out".to_owned()))
    }
}

#[async_trait]
impl RedirectUriValidator for Unreachable {
    async fn is_post_logout_redirect_uri_valid(
        &self,
        _uri: &str,
        _client: &Client,
    ) -> Result<bool, InteractionError> {
        Err(InteractionError::ServiceUnavailable("client store offline".to_owned()))
    }
}

#[async_trait]
impl<T: Send + Sync + 'static> MessageStore<T> for Unreachable {
    async fn write(&self, _id: &str, _message: Message<T>) -> Result<(), InteractionError> {
        Err(InteractionError::StoreUnavailable("connection refused".to_owned()))
    }

    async fn read(&self, _id: &str) -> Result<Option<Message<T>>, InteractionError> {
        Err(InteractionError::StoreUnavailable("connection refused".to_owned()))
    }
}

/// Authorize validator that accepts any request naming a `client_id`, except
/// those from `rejected_client`.
pub struct StubAuthorizeRequestValidator {
    pub rejected_client: Option<String>,
    calls: AtomicUsize,
}

impl StubAuthorizeRequestValidator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rejected_client: None,
            calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn rejecting(client_id: &str) -> Self {
        Self {
            rejected_client: Some(client_id.to_owned()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthorizeRequestValidator for StubAuthorizeRequestValidator {
    async fn validate(
        &self,
        parameters: &RawParameters,
        _principal: Option<&Principal>,
    ) -> Result<ValidationResult<ValidatedAuthorizeRequest>, InteractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let Some(client_id) = parameters.get("client_id") else {
            return Ok(ValidationResult::error(
                ValidationErrorKind::InvalidRequest,
                "client_id is missing",
            ));
        };
        if self.rejected_client.as_deref() == Some(client_id) {
            return Ok(ValidationResult::error(
                ValidationErrorKind::InvalidRequest,
                "unknown client",
            ));
        }

        let split = |name: &str| -> Vec<String> {
            parameters
                .get(name)
                .map(|v| v.split_whitespace().map(str::to_owned).collect())
                .unwrap_or_default()
        };

        Ok(ValidationResult::Success(ValidatedAuthorizeRequest {
            raw: parameters.clone(),
            client_id: client_id.to_owned(),
            redirect_uri: parameters.get("redirect_uri").map(str::to_owned),
            requested_scopes: split("scope"),
            nonce: parameters.get("nonce").map(str::to_owned),
            state: parameters.get("state").map(str::to_owned),
            login_hint: parameters.get("login_hint").map(str::to_owned),
            acr_values: split("acr_values"),
            ..ValidatedAuthorizeRequest::default()
        }))
    }
}
