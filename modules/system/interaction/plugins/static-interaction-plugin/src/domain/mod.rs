//! Domain layer for the static interaction plugin.

pub mod authorize;
pub mod message_store;
pub mod redirect_uri;
pub mod token;

pub use authorize::StaticAuthorizeRequestValidator;
pub use message_store::InMemoryMessageStore;
pub use redirect_uri::StrictRedirectUriValidator;
pub use token::StaticTokenValidator;
