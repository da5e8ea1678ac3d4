//! Collaborator traits consumed by the interaction module.
//!
//! Hosts provide implementations of these traits; the interaction services
//! receive them at construction time and never depend on a concrete backend.
//! A reference implementation of [`MessageStore`] and [`RedirectUriValidator`]
//! ships in `static_interaction_plugin`.

use async_trait::async_trait;

use crate::error::InteractionError;
use crate::models::{Client, IdentityTokenValidation, Message, ValidatedAuthorizeRequest};
use crate::parameters::RawParameters;
use crate::principal::Principal;
use crate::validation::ValidationResult;

/// Short-lived keyed storage for protocol handoff records.
///
/// Records may expire at any time after being written; readers must treat a
/// missing record as "nothing pending". A write replaces any record already
/// stored under the same id.
#[async_trait]
pub trait MessageStore<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Store `message` under `id`, replacing any previous record.
    ///
    /// # Errors
    ///
    /// - `StoreUnavailable` if the backend cannot accept the write
    async fn write(&self, id: &str, message: Message<T>) -> Result<(), InteractionError>;

    /// Read the record stored under `id`, if any and not expired.
    ///
    /// # Errors
    ///
    /// - `StoreUnavailable` if the backend cannot be read
    async fn read(&self, id: &str) -> Result<Option<Message<T>>, InteractionError>;
}

/// Post-logout redirect allow-list.
#[async_trait]
pub trait RedirectUriValidator: Send + Sync {
    /// Whether `uri` is a registered post-logout redirect target of `client`.
    ///
    /// # Errors
    ///
    /// - `ServiceUnavailable` if the allow-list cannot be consulted
    async fn is_post_logout_redirect_uri_valid(
        &self,
        uri: &str,
        client: &Client,
    ) -> Result<bool, InteractionError>;
}

/// Identity-token decoding and verification.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// Decode and verify a previously issued identity token.
    ///
    /// A token that is malformed, has a bad signature, or was issued by
    /// someone else is a `ValidationResult::Error`, not an `Err`.
    ///
    /// # Errors
    ///
    /// - `ServiceUnavailable` if signing keys or client metadata cannot be loaded
    async fn validate_identity_token(
        &self,
        token: &str,
    ) -> Result<ValidationResult<IdentityTokenValidation>, InteractionError>;
}

/// Re-validation of authorization requests when the interaction page resumes a flow.
#[async_trait]
pub trait AuthorizeRequestValidator: Send + Sync {
    /// Validate raw authorize parameters for `principal`.
    ///
    /// # Errors
    ///
    /// - `ServiceUnavailable` if client metadata cannot be loaded
    async fn validate(
        &self,
        parameters: &RawParameters,
        principal: Option<&Principal>,
    ) -> Result<ValidationResult<ValidatedAuthorizeRequest>, InteractionError>;
}
