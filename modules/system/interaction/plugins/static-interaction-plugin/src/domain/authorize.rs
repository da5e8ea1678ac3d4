//! Authorize request re-validation against the static client table.

use std::collections::HashSet;

use async_trait::async_trait;
use interaction_sdk::{
    AuthorizeRequestValidator, InteractionError, Principal, RawParameters,
    ValidatedAuthorizeRequest, ValidationErrorKind, ValidationResult,
};
use tracing::debug;

use crate::config::StaticInteractionPluginConfig;

/// Accepts authorize requests from configured clients.
///
/// Only `client_id` is checked; scopes, redirect URI and the remaining
/// parameters are copied through as sent.
pub struct StaticAuthorizeRequestValidator {
    clients: HashSet<String>,
}

impl StaticAuthorizeRequestValidator {
    #[must_use]
    pub fn from_config(cfg: &StaticInteractionPluginConfig) -> Self {
        Self {
            clients: cfg.clients.iter().map(|c| c.client_id.clone()).collect(),
        }
    }
}

fn owned(parameters: &RawParameters, name: &str) -> Option<String> {
    parameters.get(name).map(str::to_owned)
}

fn space_separated(parameters: &RawParameters, name: &str) -> Vec<String> {
    parameters
        .get(name)
        .map(|v| v.split_whitespace().map(str::to_owned).collect())
        .unwrap_or_default()
}

#[async_trait]
impl AuthorizeRequestValidator for StaticAuthorizeRequestValidator {
    async fn validate(
        &self,
        parameters: &RawParameters,
        _principal: Option<&Principal>,
    ) -> Result<ValidationResult<ValidatedAuthorizeRequest>, InteractionError> {
        let Some(client_id) = parameters.get("client_id") else {
            return Ok(ValidationResult::error(
                ValidationErrorKind::InvalidRequest,
                "client_id is missing",
            ));
        };
        if !self.clients.contains(client_id) {
            debug!(client_id, "Authorize request from unknown client");
            return Ok(ValidationResult::error(
                ValidationErrorKind::InvalidRequest,
                "unknown client",
            ));
        }

        Ok(ValidationResult::Success(ValidatedAuthorizeRequest {
            client_id: client_id.to_owned(),
            redirect_uri: owned(parameters, "redirect_uri"),
            requested_scopes: space_separated(parameters, "scope"),
            nonce: owned(parameters, "nonce"),
            state: owned(parameters, "state"),
            display_mode: owned(parameters, "display"),
            ui_locales: owned(parameters, "ui_locales"),
            login_hint: owned(parameters, "login_hint"),
            prompt_mode: owned(parameters, "prompt"),
            acr_values: space_separated(parameters, "acr_values"),
            raw: parameters.clone(),
        }))
    }
}
