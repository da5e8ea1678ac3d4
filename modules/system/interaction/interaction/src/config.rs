//! Configuration for the interaction module.

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "INTERACTION__";

/// Configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct InteractionConfig {
    /// Reject end-session requests from callers without an authenticated session.
    pub require_authenticated_user_for_sign_out_message: bool,

    /// Query parameter on the login page carrying the pending authorize URL.
    pub login_return_url_parameter: String,

    /// Query parameter on the consent page carrying the pending authorize URL.
    pub consent_return_url_parameter: String,

    /// Query parameter on the error page carrying the error message id.
    pub error_id_parameter: String,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            require_authenticated_user_for_sign_out_message: false,
            login_return_url_parameter: "returnUrl".to_owned(),
            consent_return_url_parameter: "returnUrl".to_owned(),
            error_id_parameter: "errorId".to_owned(),
        }
    }
}

impl InteractionConfig {
    /// Load configuration from defaults, an optional YAML file and
    /// `INTERACTION__*` environment variables, in increasing precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed, contains unknown keys, or
    /// an environment override has the wrong type.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        let cfg: Self = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
        tracing::debug!(
            require_authenticated_user = cfg.require_authenticated_user_for_sign_out_message,
            login_param = %cfg.login_return_url_parameter,
            consent_param = %cfg.consent_return_url_parameter,
            error_param = %cfg.error_id_parameter,
            "Loaded interaction configuration"
        );
        Ok(cfg)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn defaults_match_interaction_page_conventions() {
        let cfg = InteractionConfig::default();

        assert!(!cfg.require_authenticated_user_for_sign_out_message);
        assert_eq!(cfg.login_return_url_parameter, "returnUrl");
        assert_eq!(cfg.consent_return_url_parameter, "returnUrl");
        assert_eq!(cfg.error_id_parameter, "errorId");
    }

    #[test]
    fn load_without_file_yields_defaults() {
        temp_env::with_vars_unset(
            [
                "INTERACTION__REQUIRE_AUTHENTICATED_USER_FOR_SIGN_OUT_MESSAGE",
                "INTERACTION__ERROR_ID_PARAMETER",
            ],
            || {
                let cfg = InteractionConfig::load(None).unwrap();
                assert_eq!(cfg, InteractionConfig::default());
            },
        );
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "require_authenticated_user_for_sign_out_message: true\nerror_id_parameter: err"
        )
        .unwrap();

        temp_env::with_vars_unset(
            [
                "INTERACTION__REQUIRE_AUTHENTICATED_USER_FOR_SIGN_OUT_MESSAGE",
                "INTERACTION__ERROR_ID_PARAMETER",
            ],
            || {
                let cfg = InteractionConfig::load(Some(file.path())).unwrap();
                assert!(cfg.require_authenticated_user_for_sign_out_message);
                assert_eq!(cfg.error_id_parameter, "err");
                assert_eq!(cfg.login_return_url_parameter, "returnUrl");
            },
        );
    }

    #[test]
    fn environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "error_id_parameter: from_file").unwrap();

        temp_env::with_var("INTERACTION__ERROR_ID_PARAMETER", Some("from_env"), || {
            let cfg = InteractionConfig::load(Some(file.path())).unwrap();
            assert_eq!(cfg.error_id_parameter, "from_env");
        });
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "login_return_url_param: typo").unwrap();

        temp_env::with_vars_unset(["INTERACTION__ERROR_ID_PARAMETER"], || {
            assert!(InteractionConfig::load(Some(file.path())).is_err());
        });
    }
}
