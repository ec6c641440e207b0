//! Connection settings for the change-management API.

use secrecy::SecretString;
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Resolved connection parameters.
#[derive(Debug)]
pub struct ChangeConfig {
    /// Base address of the instance, e.g. `https://example.service-now.com`.
    pub instance_url: Url,
    /// Basic-auth principal.
    pub username: String,
    /// Basic-auth secret.
    pub password: SecretString,
}

/// Whether status reporting is configured.
///
/// Missing connection parameters disable the integration explicitly instead
/// of falling back to defaults.
#[derive(Debug)]
pub enum Integration {
    Enabled(ChangeConfig),
    Disabled {
        /// Names of the parameters that were absent or empty.
        missing: Vec<&'static str>,
    },
}

impl Integration {
    /// Build from optional parts. Empty strings count as absent.
    ///
    /// Fails only when every part is present but the instance address is not
    /// a valid absolute URL.
    pub fn from_parts(
        instance_url: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> ClientResult<Self> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let (instance_url, username, password) =
            (present(instance_url), present(username), present(password));

        let mut missing = Vec::new();
        if instance_url.is_none() {
            missing.push("instance_url");
        }
        if username.is_none() {
            missing.push("username");
        }
        if password.is_none() {
            missing.push("password");
        }

        match (instance_url, username, password) {
            (Some(instance_url), Some(username), Some(password)) => {
                let instance_url = Url::parse(&instance_url).map_err(|e| {
                    ClientError::config_error(format!("invalid instance url '{instance_url}': {e}"))
                })?;
                if instance_url.cannot_be_a_base() {
                    return Err(ClientError::config_error(format!(
                        "instance url '{instance_url}' cannot be used as a base address"
                    )));
                }
                Ok(Self::Enabled(ChangeConfig {
                    instance_url,
                    username,
                    password: SecretString::from(password),
                }))
            }
            _ => Ok(Self::Disabled { missing }),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_all_parts_enable() {
        let integration = Integration::from_parts(
            some("https://example.service-now.com"),
            some("svc-netcfg"),
            some("hunter2"),
        )
        .unwrap();

        match integration {
            Integration::Enabled(config) => {
                assert_eq!(config.instance_url.host_str(), Some("example.service-now.com"));
                assert_eq!(config.username, "svc-netcfg");
                assert_eq!(config.password.expose_secret(), "hunter2");
            }
            Integration::Disabled { .. } => panic!("Expected Enabled"),
        }
    }

    #[test]
    fn test_missing_parts_disable() {
        let integration =
            Integration::from_parts(some("https://example.service-now.com"), None, some(""))
                .unwrap();
        match integration {
            Integration::Disabled { missing } => assert_eq!(missing, vec!["username", "password"]),
            Integration::Enabled(_) => panic!("Expected Disabled"),
        }
    }

    #[test]
    fn test_nothing_configured() {
        let integration = Integration::from_parts(None, None, None).unwrap();
        assert!(!integration.is_enabled());
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        let err = Integration::from_parts(some("not a url"), some("u"), some("p")).unwrap_err();
        assert!(matches!(err, ClientError::ConfigError(_)));
    }

    #[test]
    fn test_password_not_in_debug_output() {
        let integration = Integration::from_parts(
            some("https://example.service-now.com"),
            some("u"),
            some("super-secret-value"),
        )
        .unwrap();
        assert!(!format!("{integration:?}").contains("super-secret-value"));
    }
}
