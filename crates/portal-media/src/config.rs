//! Session configuration read once from the environment.
//!
//! The original tool read its endpoints from hidden environment lookups at
//! call sites; here the configuration is an explicit object constructed
//! once at session start and passed by reference to the uploader and
//! gallery constructors.

use std::env;

use portal_object::container::ContainerAddress;
use thiserror::Error;
use url::Url;

/// Environment variable naming the container base URL.
pub const ENV_BLOB_URL: &str = "BLOB_URL";
/// Environment variable naming the shared-access signature token.
pub const ENV_SAS_TOKEN: &str = "SAS_TOKEN";
/// Environment variable naming the metadata endpoint.
pub const ENV_POST_API: &str = "POST_API";
/// Environment variable overriding the uploader identity.
pub const ENV_USER_ID: &str = "PORTAL_USER_ID";

/// Uploader identity used when [`ENV_USER_ID`] is not set.
pub const DEFAULT_USER_ID: &str = "user123";

/// Error raised while reading the session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is absent.
    #[error("missing required environment variable `{0}`")]
    MissingVar(&'static str),
    /// A variable holds something that does not parse as a URL.
    #[error("`{name}` is not a valid URL: {source}")]
    InvalidUrl {
        /// The offending variable.
        name: &'static str,
        /// The parse failure.
        #[source]
        source: url::ParseError,
    },
}

/// Everything the portal needs to talk to its two external services.
#[derive(Clone, Debug)]
pub struct PortalConfig {
    /// Container base URL plus SAS token.
    pub container: ContainerAddress,
    /// Metadata endpoint records are POSTed to.
    pub post_api: Url,
    /// Identity stamped into every metadata record.
    pub user_id: String,
}

impl PortalConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the configuration through `lookup`, for callers that source
    /// variables from somewhere other than the process environment.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let require = |name: &'static str| lookup(name).ok_or(ConfigError::MissingVar(name));

        let blob_url = require(ENV_BLOB_URL)?;
        let blob_url = Url::parse(&blob_url).map_err(|source| ConfigError::InvalidUrl {
            name: ENV_BLOB_URL,
            source,
        })?;
        let sas_token = require(ENV_SAS_TOKEN)?;

        let post_api = require(ENV_POST_API)?;
        let post_api = Url::parse(&post_api).map_err(|source| ConfigError::InvalidUrl {
            name: ENV_POST_API,
            source,
        })?;

        let user_id = lookup(ENV_USER_ID).unwrap_or_else(|| DEFAULT_USER_ID.to_string());

        Ok(Self {
            container: ContainerAddress::new(blob_url, sas_token),
            post_api,
            user_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            (
                ENV_BLOB_URL,
                "https://account.blob.core.windows.net/media",
            ),
            (ENV_SAS_TOKEN, "sv=2024-01-01&sig=abc"),
            (ENV_POST_API, "https://example.com/api/media"),
        ])
    }

    fn from_vars(vars: &HashMap<&'static str, &'static str>) -> Result<PortalConfig, ConfigError> {
        PortalConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn reads_all_three_endpoints() {
        let config = from_vars(&vars()).unwrap();
        assert_eq!(
            config.container.content_url("x.png"),
            "https://account.blob.core.windows.net/media/x.png?sv=2024-01-01&sig=abc",
        );
        assert_eq!(config.post_api.as_str(), "https://example.com/api/media");
        assert_eq!(config.user_id, DEFAULT_USER_ID);
    }

    #[test]
    fn user_id_can_be_overridden() {
        let mut vars = vars();
        vars.insert(ENV_USER_ID, "alex");
        assert_eq!(from_vars(&vars).unwrap().user_id, "alex");
    }

    #[test]
    fn missing_variable_is_reported_by_name() {
        let mut vars = vars();
        vars.remove(ENV_POST_API);
        let err = from_vars(&vars).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(ENV_POST_API)));
    }

    #[test]
    fn invalid_url_is_rejected() {
        let mut vars = vars();
        vars.insert(ENV_BLOB_URL, "not a url");
        let err = from_vars(&vars).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { name, .. } if name == ENV_BLOB_URL));
    }
}
