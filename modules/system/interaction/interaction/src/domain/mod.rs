//! Domain layer for the interaction module.

pub mod end_session;
pub mod error;
pub mod local_client;
pub mod service;

#[cfg(test)]
mod test_support;

pub use end_session::EndSessionRequestValidator;
pub use error::DomainError;
pub use local_client::InteractionLocalClient;
pub use service::UserInteractionService;
