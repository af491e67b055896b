//! Harness configuration
//!
//! Resolved once at startup from the process environment (with CLI
//! overrides applied by the binary) and immutable thereafter. Environment
//! values are parsed strictly: invalid UTF-8 or empty-but-set values fail
//! closed, and a configuration error is the only condition that aborts a
//! run before any request is issued.

use std::ffi::OsString;
use std::fmt;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Environment variable naming the dashboard base URL.
pub const BASE_URL_ENV: &str = "VIGIL_BASE_URL";

/// Legacy alias for [`BASE_URL_ENV`], honored for parity with earlier
/// deployments of the harness.
pub const BASE_URL_ALIAS_ENV: &str = "API_URL";

/// Environment variable naming the valid credential.
pub const TOKEN_ENV: &str = "VIGIL_API_TOKEN";

/// Environment variable naming the per-request timeout in seconds.
pub const TIMEOUT_ENV: &str = "VIGIL_TIMEOUT_SEC";

/// Base URL used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Local-dev credential used when no override is configured.
pub const DEFAULT_TOKEN: &str = "89fisiqoo009";

/// Per-request timeout used when no override is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while resolving configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment value was not valid UTF-8.
    #[error("{name} must be valid UTF-8")]
    NotUtf8 {
        /// The offending variable name.
        name: &'static str,
    },

    /// An environment value was set but empty.
    #[error("{name} must not be empty")]
    Empty {
        /// The offending variable name.
        name: &'static str,
    },

    /// The base URL could not be parsed.
    #[error("invalid base URL {value:?}: {message}")]
    InvalidBaseUrl {
        /// The rejected value.
        value: String,
        /// Parser detail.
        message: String,
    },

    /// The timeout was not a positive integer number of seconds.
    #[error("invalid timeout {value:?}: must be a positive integer number of seconds")]
    InvalidTimeout {
        /// The rejected value.
        value: String,
    },
}

/// An opaque credential sent in a request header.
///
/// The wrapped value never appears in `Debug` output, keeping the token out
/// of logs and error chains; callers that build the outbound header use
/// [`ApiToken::reveal`].
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wraps a credential value.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the credential for use as a header value.
    #[must_use]
    pub fn reveal(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}

/// Immutable harness configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Base address of the dashboard under verification.
    pub base_url: Url,
    /// The valid credential for authenticated cases.
    pub token: ApiToken,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HarnessConfig {
    /// Resolves configuration from the process environment.
    ///
    /// Precedence per value: `VIGIL_*` variable, then the legacy alias
    /// where one exists, then the built-in default.
    ///
    /// # Errors
    ///
    /// Returns an error when a set variable is empty, not UTF-8, or fails
    /// validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(|name| std::env::var_os(name))
    }

    /// Resolves configuration through an environment lookup function.
    ///
    /// The seam exists so tests can inject values without mutating process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error when a looked-up value is empty, not UTF-8, or
    /// fails validation.
    pub fn resolve(
        lookup: impl Fn(&str) -> Option<OsString>,
    ) -> Result<Self, ConfigError> {
        let base_url = match read_nonempty(&lookup, BASE_URL_ENV)? {
            Some(value) => value,
            None => read_nonempty(&lookup, BASE_URL_ALIAS_ENV)?
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        };
        let base_url = parse_base_url(&base_url)?;

        let token = read_nonempty(&lookup, TOKEN_ENV)?
            .map_or_else(|| ApiToken::new(DEFAULT_TOKEN), ApiToken::new);

        let timeout = read_nonempty(&lookup, TIMEOUT_ENV)?
            .map(|value| parse_timeout(&value))
            .transpose()?
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self {
            base_url,
            token,
            timeout,
        })
    }

    /// Replaces the base URL with a CLI-supplied value.
    ///
    /// # Errors
    ///
    /// Returns an error when the value is not a valid absolute URL.
    pub fn override_base_url(&mut self, value: &str) -> Result<(), ConfigError> {
        self.base_url = parse_base_url(value)?;
        Ok(())
    }

    /// Replaces the credential with a CLI-supplied value.
    pub fn override_token(&mut self, value: &str) {
        self.token = ApiToken::new(value);
    }

    /// Replaces the timeout with a CLI-supplied value in seconds.
    pub fn override_timeout_secs(&mut self, secs: u64) {
        self.timeout = Duration::from_secs(secs);
    }
}

/// Parses and validates a base URL string.
fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        message: e.to_string(),
    })
}

/// Parses a positive integer number of seconds.
fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidTimeout {
            value: value.to_string(),
        })?;
    if secs == 0 {
        return Err(ConfigError::InvalidTimeout {
            value: value.to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

/// Reads a variable through the lookup, enforcing UTF-8 and rejecting
/// set-but-empty values.
fn read_nonempty(
    lookup: &impl Fn(&str) -> Option<OsString>,
    name: &'static str,
) -> Result<Option<String>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(raw) => {
            let value = raw
                .into_string()
                .map_err(|_| ConfigError::NotUtf8 { name })?;
            if value.trim().is_empty() {
                return Err(ConfigError::Empty { name });
            }
            Ok(Some(value))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn env(pairs: &[(&'static str, &str)]) -> impl Fn(&str) -> Option<OsString> {
        let map: HashMap<String, OsString> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), OsString::from(v)))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = HarnessConfig::resolve(env(&[])).unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:5001/");
        assert_eq!(config.token.reveal(), DEFAULT_TOKEN);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_vigil_base_url_wins_over_alias() {
        let config = HarnessConfig::resolve(env(&[
            (BASE_URL_ENV, "http://primary:8080"),
            (BASE_URL_ALIAS_ENV, "http://alias:9090"),
        ]))
        .unwrap();
        assert_eq!(config.base_url.as_str(), "http://primary:8080/");
    }

    #[test]
    fn test_alias_used_when_primary_is_absent() {
        let config =
            HarnessConfig::resolve(env(&[(BASE_URL_ALIAS_ENV, "http://alias:9090")])).unwrap();
        assert_eq!(config.base_url.as_str(), "http://alias:9090/");
    }

    #[test]
    fn test_unparsable_base_url_is_fatal() {
        let result = HarnessConfig::resolve(env(&[(BASE_URL_ENV, "::not a url::")]));
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_empty_value_fails_closed() {
        let result = HarnessConfig::resolve(env(&[(TOKEN_ENV, "  ")]));
        assert_eq!(result, Err(ConfigError::Empty { name: TOKEN_ENV }));
    }

    #[test]
    fn test_timeout_parsing() {
        let config = HarnessConfig::resolve(env(&[(TIMEOUT_ENV, "5")])).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));

        for bad in ["0", "-3", "soon"] {
            let result = HarnessConfig::resolve(env(&[(TIMEOUT_ENV, bad)]));
            assert!(
                matches!(result, Err(ConfigError::InvalidTimeout { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_non_utf8_value_fails_closed() {
        use std::os::unix::ffi::OsStringExt;
        let raw = OsString::from_vec(vec![0x66, 0x6f, 0x80]);
        let result =
            HarnessConfig::resolve(|name| (name == TOKEN_ENV).then(|| raw.clone()));
        assert_eq!(result, Err(ConfigError::NotUtf8 { name: TOKEN_ENV }));
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let config = HarnessConfig::resolve(env(&[(TOKEN_ENV, "super-secret")])).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"), "{rendered}");
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = HarnessConfig::resolve(env(&[])).unwrap();
        config.override_base_url("http://staging:5001").unwrap();
        config.override_token("staging-token");
        config.override_timeout_secs(10);

        assert_eq!(config.base_url.as_str(), "http://staging:5001/");
        assert_eq!(config.token.reveal(), "staging-token");
        assert_eq!(config.timeout, Duration::from_secs(10));

        assert!(config.override_base_url("nonsense").is_err());
    }
}
