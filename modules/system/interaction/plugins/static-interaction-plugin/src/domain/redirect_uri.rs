//! Post-logout redirect URI allow-list.

use async_trait::async_trait;
use interaction_sdk::{Client, InteractionError, RedirectUriValidator};

/// Accepts a URI only if it is byte-for-byte one of the client's registered
/// post-logout redirect URIs. No normalization, no case folding.
#[derive(Debug, Default, Clone, Copy)]
pub struct StrictRedirectUriValidator;

#[async_trait]
impl RedirectUriValidator for StrictRedirectUriValidator {
    async fn is_post_logout_redirect_uri_valid(
        &self,
        uri: &str,
        client: &Client,
    ) -> Result<bool, InteractionError> {
        Ok(client.post_logout_redirect_uris.iter().any(|u| u == uri))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn web() -> Client {
        Client::new("web").with_post_logout_redirect_uri("https://app.example/signed-out")
    }

    #[tokio::test]
    async fn registered_uri_is_valid() {
        let validator: &dyn RedirectUriValidator = &StrictRedirectUriValidator;
        assert!(
            validator
                .is_post_logout_redirect_uri_valid("https://app.example/signed-out", &web())
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn near_misses_are_rejected() {
        let validator: &dyn RedirectUriValidator = &StrictRedirectUriValidator;
        for uri in [
            "https://APP.example/signed-out",
            "https://app.example/signed-out/",
            "https://app.example/signed-out?x=1",
            "https://evil.example/",
            "",
        ] {
            assert!(
                !validator
                    .is_post_logout_redirect_uri_valid(uri, &web())
                    .await
                    .unwrap(),
                "{uri} must not match"
            );
        }
    }

    #[tokio::test]
    async fn client_without_registrations_accepts_nothing() {
        let validator: &dyn RedirectUriValidator = &StrictRedirectUriValidator;
        assert!(
            !validator
                .is_post_logout_redirect_uri_valid("https://app.example/", &Client::new("bare"))
                .await
                .unwrap()
        );
    }
}
