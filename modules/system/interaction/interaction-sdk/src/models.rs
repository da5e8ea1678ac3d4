//! Domain models for the interaction module.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{ACR_IDP_PREFIX, ACR_TENANT_PREFIX, claims};
use crate::parameters::RawParameters;
use crate::principal::{Claim, Principal};

/// Client metadata as resolved from an identity token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    pub client_id: String,
    pub client_name: Option<String>,
    /// Registered post-logout redirect targets.
    pub post_logout_redirect_uris: Vec<String>,
}

impl Client {
    #[must_use]
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_post_logout_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.post_logout_redirect_uris.push(uri.into());
        self
    }
}

/// Decoded and verified identity-token hint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityTokenValidation {
    pub claims: Vec<Claim>,
    /// Client the token was issued to, when it could be resolved.
    pub client: Option<Client>,
}

impl IdentityTokenValidation {
    /// Subject (`sub`) claim of the token.
    #[must_use]
    pub fn subject_id(&self) -> Option<&str> {
        self.claims
            .iter()
            .find(|c| c.claim_type == claims::SUBJECT)
            .map(|c| c.value.as_str())
    }
}

/// Authorization request as accepted by the authorize-request validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedAuthorizeRequest {
    pub raw: RawParameters,
    pub client_id: String,
    pub redirect_uri: Option<String>,
    pub requested_scopes: Vec<String>,
    pub nonce: Option<String>,
    pub state: Option<String>,
    pub display_mode: Option<String>,
    pub ui_locales: Option<String>,
    pub login_hint: Option<String>,
    pub prompt_mode: Option<String>,
    pub acr_values: Vec<String>,
}

/// Pending authorization request, as exposed to the login and consent pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub client_id: String,
    pub redirect_uri: Option<String>,
    pub display_mode: Option<String>,
    pub ui_locales: Option<String>,
    /// Upstream identity provider requested through an `idp:` acr value.
    pub idp: Option<String>,
    /// Tenant requested through a `tenant:` acr value.
    pub tenant: Option<String>,
    pub login_hint: Option<String>,
    pub prompt_mode: Option<String>,
    /// Acr values other than `idp:` and `tenant:`.
    pub acr_values: Vec<String>,
    pub scopes_requested: Vec<String>,
    pub nonce: Option<String>,
    /// Original parameters, needed to resume the flow.
    pub parameters: RawParameters,
}

impl From<ValidatedAuthorizeRequest> for AuthorizationRequest {
    fn from(request: ValidatedAuthorizeRequest) -> Self {
        let mut idp = None;
        let mut tenant = None;
        let mut acr_values = Vec::with_capacity(request.acr_values.len());

        for value in request.acr_values {
            if let Some(v) = value.strip_prefix(ACR_IDP_PREFIX) {
                idp.get_or_insert_with(|| v.to_owned());
            } else if let Some(v) = value.strip_prefix(ACR_TENANT_PREFIX) {
                tenant.get_or_insert_with(|| v.to_owned());
            } else {
                acr_values.push(value);
            }
        }

        Self {
            client_id: request.client_id,
            redirect_uri: request.redirect_uri,
            display_mode: request.display_mode,
            ui_locales: request.ui_locales,
            idp,
            tenant,
            login_hint: request.login_hint,
            prompt_mode: request.prompt_mode,
            acr_values,
            scopes_requested: request.requested_scopes,
            nonce: request.nonce,
            parameters: request.raw,
        }
    }
}

/// Accepted end-session request.
///
/// `raw` and `subject` share the instances handed to the validator.
#[derive(Debug, Clone)]
pub struct ValidatedEndSessionRequest {
    raw: Arc<RawParameters>,
    client: Option<Client>,
    post_logout_redirect_uri: Option<String>,
    state: Option<String>,
    subject: Arc<Principal>,
}

impl ValidatedEndSessionRequest {
    #[must_use]
    pub fn builder(
        raw: Arc<RawParameters>,
        subject: Arc<Principal>,
    ) -> ValidatedEndSessionRequestBuilder {
        ValidatedEndSessionRequestBuilder {
            raw,
            subject,
            client: None,
            post_logout_redirect_uri: None,
            state: None,
        }
    }

    #[must_use]
    pub fn raw(&self) -> &Arc<RawParameters> {
        &self.raw
    }

    #[must_use]
    pub fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    #[must_use]
    pub fn post_logout_redirect_uri(&self) -> Option<&str> {
        self.post_logout_redirect_uri.as_deref()
    }

    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    #[must_use]
    pub fn subject(&self) -> &Arc<Principal> {
        &self.subject
    }
}

pub struct ValidatedEndSessionRequestBuilder {
    raw: Arc<RawParameters>,
    subject: Arc<Principal>,
    client: Option<Client>,
    post_logout_redirect_uri: Option<String>,
    state: Option<String>,
}

impl ValidatedEndSessionRequestBuilder {
    #[must_use]
    pub fn client(mut self, client: Option<Client>) -> Self {
        self.client = client;
        self
    }

    #[must_use]
    pub fn post_logout_redirect_uri(mut self, uri: Option<String>) -> Self {
        self.post_logout_redirect_uri = uri;
        self
    }

    #[must_use]
    pub fn state(mut self, state: Option<String>) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn build(self) -> ValidatedEndSessionRequest {
        ValidatedEndSessionRequest {
            raw: self.raw,
            client: self.client,
            post_logout_redirect_uri: self.post_logout_redirect_uri,
            state: self.state,
            subject: self.subject,
        }
    }
}

/// A user's decision on a consent prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsentResponse {
    /// Scopes the user agreed to; a subset of the requested scopes.
    pub scopes_consented: Vec<String>,
    /// Whether the decision should be remembered for later requests.
    pub remember_consent: bool,
}

impl ConsentResponse {
    #[must_use]
    pub fn granted(scopes: impl IntoIterator<Item = impl Into<String>>, remember: bool) -> Self {
        Self {
            scopes_consented: scopes.into_iter().map(Into::into).collect(),
            remember_consent: remember,
        }
    }

    /// Consent was refused.
    #[must_use]
    pub fn denied() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_granted(&self) -> bool {
        !self.scopes_consented.is_empty()
    }
}

/// Terminal error shown on the error page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorMessage {
    pub error_code: String,
    pub error_description: Option<String>,
    pub request_id: Option<String>,
    /// Where the user may continue after acknowledging the error.
    pub redirect_uri: Option<String>,
}

impl ErrorMessage {
    #[must_use]
    pub fn new(error_code: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.error_description = Some(description.into());
        self
    }
}

/// Envelope for everything written to a message store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message<T> {
    pub created: DateTime<Utc>,
    pub data: T,
}

impl<T> Message<T> {
    /// Wrap `data`, stamped with the current time.
    pub fn new(data: T) -> Self {
        Self::with_created(data, Utc::now())
    }

    pub fn with_created(data: T, created: DateTime<Utc>) -> Self {
        Self { created, data }
    }

    /// True once `ttl` has elapsed since creation.
    #[must_use]
    pub fn is_expired(&self, ttl: TimeDelta, now: DateTime<Utc>) -> bool {
        self.created
            .checked_add_signed(ttl)
            .is_some_and(|expires_at| expires_at <= now)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn authorization_request_splits_idp_and_tenant_acr_values() {
        let validated = ValidatedAuthorizeRequest {
            client_id: "web".to_owned(),
            requested_scopes: vec!["openid".to_owned(), "profile".to_owned()],
            nonce: Some("n-1".to_owned()),
            acr_values: vec![
                "idp:google".to_owned(),
                "tenant:acme".to_owned(),
                "mfa".to_owned(),
            ],
            raw: RawParameters::new().with("client_id", "web"),
            ..ValidatedAuthorizeRequest::default()
        };

        let request = AuthorizationRequest::from(validated);

        assert_eq!(request.client_id, "web");
        assert_eq!(request.idp.as_deref(), Some("google"));
        assert_eq!(request.tenant.as_deref(), Some("acme"));
        assert_eq!(request.acr_values, vec!["mfa".to_owned()]);
        assert_eq!(request.scopes_requested, vec!["openid", "profile"]);
        assert_eq!(request.nonce.as_deref(), Some("n-1"));
        assert_eq!(request.parameters.get("client_id"), Some("web"));
    }

    #[test]
    fn consent_without_scopes_is_denied() {
        assert!(!ConsentResponse::denied().is_granted());
        assert!(ConsentResponse::granted(["openid"], true).is_granted());
    }

    #[test]
    fn message_expiry_is_relative_to_creation() {
        let created = Utc::now();
        let message = Message::with_created(ErrorMessage::new("access_denied"), created);
        let ttl = TimeDelta::minutes(5);

        assert!(!message.is_expired(ttl, created + TimeDelta::minutes(4)));
        assert!(message.is_expired(ttl, created + TimeDelta::minutes(5)));
        assert!(!message.is_expired(TimeDelta::MAX, created));
    }

    #[test]
    fn consent_response_serializes_with_defaults() {
        let parsed: ConsentResponse =
            serde_json::from_str(r#"{"scopes_consented":["openid"]}"#).unwrap();
        assert_eq!(parsed.scopes_consented, vec!["openid"]);
        assert!(!parsed.remember_consent);
    }

    #[test]
    fn identity_token_subject_is_read_from_claims() {
        let token = IdentityTokenValidation {
            claims: vec![Claim::new("sub", "alice"), Claim::new("name", "Alice")],
            client: Some(Client::new("web")),
        };
        assert_eq!(token.subject_id(), Some("alice"));
    }
}
