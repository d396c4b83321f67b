//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Twilio (chat is disabled unless all three are set)
//! - `TWILIO_ACCOUNT_SID` - Account SID (`AC...`)
//! - `TWILIO_API_KEY_SID` - API key SID (`SK...`)
//! - `TWILIO_API_KEY_SECRET` - API key secret
//!
//! ## Optional
//! - `CHATROOM` - Chat conversation display name (default: My Room)
//! - `APP_HOST` - Bind address (default: 0.0.0.0)
//! - `APP_PORT` - Listen port (default: 5000)
//! - `TOKEN_TTL_SECS` - Access token lifetime in seconds (default: 3600)
//! - `TWILIO_REQUEST_TIMEOUT_SECS` - Twilio REST request timeout (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use video_chat_core::RoomName;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "5000";
const DEFAULT_TOKEN_TTL_SECS: &str = "3600";
const DEFAULT_REQUEST_TIMEOUT_SECS: &str = "30";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Display name of the chat conversation users join
    pub chat_room: RoomName,
    /// Twilio account and API key
    pub twilio: TwilioCredentials,
    /// Lifetime of issued access tokens
    pub token_ttl: Duration,
    /// Timeout applied to each Twilio REST request
    pub request_timeout: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Twilio account and API key credentials.
///
/// Missing variables are kept as empty strings; [`Self::is_complete`] decides
/// whether the Conversations API may be called. Implements `Debug` manually to
/// redact the secret.
#[derive(Clone)]
pub struct TwilioCredentials {
    /// Account SID, the `sub` claim of access tokens
    pub account_sid: String,
    /// API key SID, the `iss` claim of access tokens and the REST username
    pub api_key_sid: String,
    /// API key secret, signs access tokens and is the REST password
    pub api_key_secret: SecretString,
}

impl std::fmt::Debug for TwilioCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioCredentials")
            .field("account_sid", &self.account_sid)
            .field("api_key_sid", &self.api_key_sid)
            .field("api_key_secret", &"[REDACTED]")
            .finish()
    }
}

impl TwilioCredentials {
    /// Returns `true` when every credential is present and non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.account_sid.is_empty()
            && !self.api_key_sid.is_empty()
            && !self.api_key_secret.expose_secret().is_empty()
    }

    /// Names of the environment variables that were missing or empty.
    #[must_use]
    pub fn missing_vars(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.account_sid.is_empty() {
            missing.push("TWILIO_ACCOUNT_SID");
        }
        if self.api_key_sid.is_empty() {
            missing.push("TWILIO_API_KEY_SID");
        }
        if self.api_key_secret.expose_secret().is_empty() {
            missing.push("TWILIO_API_KEY_SECRET");
        }
        missing
    }

    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        Self {
            account_sid: lookup("TWILIO_ACCOUNT_SID").unwrap_or_default(),
            api_key_sid: lookup("TWILIO_API_KEY_SID").unwrap_or_default(),
            api_key_secret: SecretString::from(
                lookup("TWILIO_API_KEY_SECRET").unwrap_or_default(),
            ),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a numeric or address variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a numeric or address variable cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_var::<IpAddr>(&lookup, "APP_HOST", DEFAULT_HOST)?;
        let port = parse_var::<u16>(&lookup, "APP_PORT", DEFAULT_PORT)?;
        let token_ttl = parse_var::<u64>(&lookup, "TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?;
        let request_timeout = parse_var::<u64>(
            &lookup,
            "TWILIO_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;

        let chat_room = lookup("CHATROOM").map_or_else(RoomName::default, RoomName::new);

        Ok(Self {
            host,
            port,
            chat_room,
            twilio: TwilioCredentials::from_lookup(&lookup),
            token_ttl: Duration::from_secs(token_ttl),
            request_timeout: Duration::from_secs(request_timeout),
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Parse a variable, falling back to `default` when unset.
fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:5000");
        assert_eq!(config.chat_room.as_str(), "My Room");
        assert_eq!(config.token_ttl, Duration::from_secs(3600));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.sentry_dsn.is_none());
        assert!(!config.twilio.is_complete());
    }

    #[test]
    fn test_chatroom_override() {
        let config = ServerConfig::from_lookup(lookup_from(&[("CHATROOM", "Lobby")])).unwrap();
        assert_eq!(config.chat_room.as_str(), "Lobby");
    }

    #[test]
    fn test_invalid_port() {
        let result = ServerConfig::from_lookup(lookup_from(&[("APP_PORT", "not-a-port")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "APP_PORT"));
    }

    #[test]
    fn test_invalid_host() {
        let result = ServerConfig::from_lookup(lookup_from(&[("APP_HOST", "localhost:80")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_complete_credentials() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("TWILIO_ACCOUNT_SID", "AC123"),
            ("TWILIO_API_KEY_SID", "SK123"),
            ("TWILIO_API_KEY_SECRET", "s3cr3t"),
        ]))
        .unwrap();

        assert!(config.twilio.is_complete());
        assert!(config.twilio.missing_vars().is_empty());
    }

    #[test]
    fn test_partial_credentials_are_incomplete() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("TWILIO_ACCOUNT_SID", "AC123"),
            ("TWILIO_API_KEY_SECRET", ""),
        ]))
        .unwrap();

        assert!(!config.twilio.is_complete());
        assert_eq!(
            config.twilio.missing_vars(),
            vec!["TWILIO_API_KEY_SID", "TWILIO_API_KEY_SECRET"]
        );
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let credentials = TwilioCredentials {
            account_sid: "AC_visible".to_string(),
            api_key_sid: "SK_visible".to_string(),
            api_key_secret: SecretString::from("super_secret_api_key"),
        };

        let debug_output = format!("{credentials:?}");

        assert!(debug_output.contains("AC_visible"));
        assert!(debug_output.contains("SK_visible"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_api_key"));
    }
}
