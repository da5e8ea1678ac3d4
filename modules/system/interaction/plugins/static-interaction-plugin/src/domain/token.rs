//! Static identity-token validator.

use std::collections::HashMap;

use async_trait::async_trait;
use interaction_sdk::constants::claims;
use interaction_sdk::{
    Claim, Client, IdentityTokenValidation, InteractionError, TokenValidator, ValidationErrorKind,
    ValidationResult,
};
use tracing::{debug, warn};

use crate::config::StaticInteractionPluginConfig;

/// Maps configured identity-token strings to a subject and client.
///
/// Tokens are opaque: no signature, expiry or audience checks happen here.
pub struct StaticTokenValidator {
    tokens: HashMap<String, IdentityTokenValidation>,
}

impl StaticTokenValidator {
    /// Create a validator from plugin configuration.
    ///
    /// A token whose `client_id` is not among the configured clients still
    /// validates, but without a resolved client.
    #[must_use]
    pub fn from_config(cfg: &StaticInteractionPluginConfig) -> Self {
        let clients: HashMap<&str, Client> = cfg
            .clients
            .iter()
            .map(|c| (c.client_id.as_str(), c.to_client()))
            .collect();

        let tokens = cfg
            .tokens
            .iter()
            .map(|m| {
                let client = m.client_id.as_deref().and_then(|id| {
                    let client = clients.get(id).cloned();
                    if client.is_none() {
                        warn!(client_id = id, "Token mapped to unknown client");
                    }
                    client
                });
                let validation = IdentityTokenValidation {
                    claims: vec![Claim::new(claims::SUBJECT, m.subject_id.clone())],
                    client,
                };
                (m.token.clone(), validation)
            })
            .collect();

        Self { tokens }
    }
}

#[async_trait]
impl TokenValidator for StaticTokenValidator {
    async fn validate_identity_token(
        &self,
        token: &str,
    ) -> Result<ValidationResult<IdentityTokenValidation>, InteractionError> {
        match self.tokens.get(token) {
            Some(validation) => Ok(ValidationResult::Success(validation.clone())),
            None => {
                debug!("Unknown identity token");
                Ok(ValidationResult::error(
                    ValidationErrorKind::TokenInvalid,
                    "unknown identity token",
                ))
            }
        }
    }
}
