#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Interaction Plugin
//!
//! Development and test backends for the interaction module's collaborators.
//!
//! - [`InMemoryMessageStore`]: process-local message store with a fixed TTL
//! - [`StrictRedirectUriValidator`]: exact match against a client's registered
//!   post-logout redirect URIs
//! - [`StaticTokenValidator`]: identity tokens mapped to subjects from configuration
//! - [`StaticAuthorizeRequestValidator`]: authorize requests accepted for configured clients
//!
//! ## Configuration
//!
//! ```yaml
//! message_ttl_secs: 300
//! clients:
//!   - client_id: "web"
//!     client_name: "Web App"
//!     post_logout_redirect_uris: ["https://app.example/signed-out"]
//! tokens:
//!   - token: "id-token-alice"
//!     subject_id: "alice"
//!     client_id: "web"
//! ```
//!
//! Nothing here survives a restart; do not use it in production.

pub mod config;
pub mod domain;

pub use config::StaticInteractionPluginConfig;
pub use domain::{
    InMemoryMessageStore, StaticAuthorizeRequestValidator, StaticTokenValidator,
    StrictRedirectUriValidator,
};
