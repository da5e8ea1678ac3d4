//! Protocol parameter and claim names.

/// End-session request parameter carrying the previously issued identity token.
pub const ID_TOKEN_HINT: &str = "id_token_hint";

/// End-session request parameter naming the post-logout redirect target.
pub const POST_LOGOUT_REDIRECT_URI: &str = "post_logout_redirect_uri";

/// Opaque round-trip value.
pub const STATE: &str = "state";

pub mod claims {
    pub const SUBJECT: &str = "sub";
    pub const NAME: &str = "name";
    pub const AUTHENTICATION_METHOD: &str = "amr";
    pub const IDENTITY_PROVIDER: &str = "idp";
    pub const AUTHENTICATION_TIME: &str = "auth_time";
}

/// `acr_values` prefix selecting an upstream identity provider.
pub const ACR_IDP_PREFIX: &str = "idp:";

/// `acr_values` prefix selecting a tenant.
pub const ACR_TENANT_PREFIX: &str = "tenant:";
