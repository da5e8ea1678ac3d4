//! Interaction module wiring.

use std::sync::Arc;

use interaction_sdk::{
    AuthorizeRequestValidator, ConsentResponse, EndSessionClient, ErrorMessage, MessageStore,
    RedirectUriValidator, TokenValidator, UserInteractionClient,
};
use tracing::info;

use crate::config::InteractionConfig;
use crate::domain::{EndSessionRequestValidator, InteractionLocalClient, UserInteractionService};

/// Collaborators supplied by the host.
pub struct Collaborators {
    pub token_validator: Arc<dyn TokenValidator>,
    pub redirect_uri_validator: Arc<dyn RedirectUriValidator>,
    pub authorize_request_validator: Arc<dyn AuthorizeRequestValidator>,
    pub error_store: Arc<dyn MessageStore<ErrorMessage>>,
    pub consent_store: Arc<dyn MessageStore<ConsentResponse>>,
}

/// Interaction module.
///
/// Builds the end-session validator and the interaction service from
/// configuration and host collaborators, and exposes them through the SDK
/// client traits.
pub struct Interaction {
    client: Arc<InteractionLocalClient>,
    interaction: Arc<UserInteractionService>,
}

impl Interaction {
    #[tracing::instrument(
        skip_all,
        fields(require_authenticated_user = cfg.require_authenticated_user_for_sign_out_message)
    )]
    #[must_use]
    pub fn init(cfg: InteractionConfig, collaborators: Collaborators) -> Self {
        info!("Initializing interaction");

        let end_session = Arc::new(EndSessionRequestValidator::new(
            &cfg,
            collaborators.token_validator,
            collaborators.redirect_uri_validator,
        ));
        let interaction = Arc::new(UserInteractionService::new(
            cfg,
            collaborators.authorize_request_validator,
            collaborators.error_store,
            collaborators.consent_store,
        ));
        let client = Arc::new(InteractionLocalClient::new(end_session, interaction.clone()));

        info!("Interaction initialized");
        Self {
            client,
            interaction,
        }
    }

    #[must_use]
    pub fn end_session_client(&self) -> Arc<dyn EndSessionClient> {
        self.client.clone()
    }

    #[must_use]
    pub fn user_interaction_client(&self) -> Arc<dyn UserInteractionClient> {
        self.client.clone()
    }

    /// Direct service access for host components that resume authorize
    /// requests or raise errors (`get_consent_response`, `create_error_context`).
    #[must_use]
    pub fn service(&self) -> Arc<UserInteractionService> {
        self.interaction.clone()
    }
}
