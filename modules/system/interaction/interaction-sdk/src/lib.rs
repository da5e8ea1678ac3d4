//! Interaction SDK
//!
//! This crate provides the public API for the `interaction` module:
//!
//! - [`EndSessionClient`] - Logout request validation
//! - [`UserInteractionClient`] - Login / consent / error page context
//! - [`MessageStore`], [`TokenValidator`], [`RedirectUriValidator`],
//!   [`AuthorizeRequestValidator`] - Collaborator traits supplied by the host
//! - [`ValidationResult`] - Tagged outcome of request validation
//! - [`ConsentKey`] - Deterministic consent record key
//! - [`InteractionError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use interaction_sdk::{RawParameters, UserInteractionClient};
//!
//! let query = RawParameters::parse_query(request_query);
//! if let Some(pending) = interaction.get_login_context(&query, principal, None).await? {
//!     render_login(&pending.client_id, pending.login_hint.as_deref());
//! }
//! ```

pub mod api;
pub mod consent_key;
pub mod constants;
pub mod error;
pub mod models;
pub mod parameters;
pub mod plugin_api;
pub mod principal;
pub mod validation;

// Re-export main types at crate root
pub use api::{EndSessionClient, UserInteractionClient};
pub use consent_key::ConsentKey;
pub use error::InteractionError;
pub use models::{
    AuthorizationRequest, Client, ConsentResponse, ErrorMessage, IdentityTokenValidation, Message,
    ValidatedAuthorizeRequest, ValidatedEndSessionRequest,
};
pub use parameters::RawParameters;
pub use plugin_api::{AuthorizeRequestValidator, MessageStore, RedirectUriValidator, TokenValidator};
pub use principal::{Claim, Identity, Principal};
pub use validation::{ValidationError, ValidationErrorKind, ValidationResult};
