//! Configuration for the static interaction plugin.

use interaction_sdk::Client;
use serde::Deserialize;

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticInteractionPluginConfig {
    /// Lifetime of records in the in-memory message stores, in seconds.
    pub message_ttl_secs: u64,

    /// Registered clients.
    pub clients: Vec<ClientConfig>,

    /// Static identity-token-to-subject mappings.
    pub tokens: Vec<TokenMapping>,
}

impl Default for StaticInteractionPluginConfig {
    fn default() -> Self {
        Self {
            message_ttl_secs: 300,
            clients: Vec::new(),
            tokens: Vec::new(),
        }
    }
}

/// A registered client.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub client_id: String,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub post_logout_redirect_uris: Vec<String>,
}

impl ClientConfig {
    #[must_use]
    pub fn to_client(&self) -> Client {
        Client {
            client_id: self.client_id.clone(),
            client_name: self.client_name.clone(),
            post_logout_redirect_uris: self.post_logout_redirect_uris.clone(),
        }
    }
}

/// Maps a static identity token to a subject.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenMapping {
    /// The identity token value to match.
    pub token: String,
    /// `sub` claim returned for this token.
    pub subject_id: String,
    /// Client the token was issued to. Must name an entry in `clients`
    /// for the token to resolve a client.
    #[serde(default)]
    pub client_id: Option<String>,
}
