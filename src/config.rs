//! Process configuration read from the environment.
//!
//! Binaries call `dotenvy::dotenv()` first, so a `.env` file in the working
//! directory can supply any of the variables below.
//!
//! | Variable | Required | Meaning |
//! |---|---|---|
//! | `APP_ENV` | yes | Deployment environment name |
//! | `SECRET_KEY` | yes | HMAC secret for session tokens |
//! | `ISSUER` | yes | Session token issuer |
//! | `ENCRYPTION_KEY` | yes | Standard base64 of a 32-byte AES key |
//! | `DATABASE_URL` | no | `PostgreSQL` connection string |
//! | `RABBITMQ_HOST` | no | Broker host; enables the broker settings |
//! | `RABBITMQ_PORT` | no | Broker port, default 5672 |
//! | `RABBITMQ_USERNAME` | with host | Broker user |
//! | `RABBITMQ_PASSWORD` | with host | Broker password |
//! | `NOTIFY_MODE` | no | `inline` or `detached` (default) |
//! | `LOG_FORMAT` | no | `text` (default) or `json` |

use crate::confidentiality::AesGcmCodec;
use crate::notification::services::NotificationMode;
use crate::telemetry::LogFormat;
use base64::{Engine, engine::general_purpose::STANDARD};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_BROKER_PORT: u16 = 5672;

/// Bytes escaped in the userinfo part of the AMQP URI (RFC 3986 unreserved kept).
const USERINFO: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Errors returned while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    /// A variable is set to an unusable value.
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        /// Offending variable.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Message broker connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct BrokerConfig {
    host: String,
    port: u16,
    username: String,
    password: String,
}

impl BrokerConfig {
    /// Returns the broker host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the broker port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the AMQP URI for the default virtual host.
    #[must_use]
    pub fn amqp_uri(&self) -> String {
        format!(
            "amqp://{}:{}@{}:{}/%2f",
            utf8_percent_encode(&self.username, USERINFO),
            utf8_percent_encode(&self.password, USERINFO),
            self.host,
            self.port
        )
    }
}

impl fmt::Debug for BrokerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrokerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated application configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    environment: String,
    secret_key: String,
    issuer: String,
    encryption_key: String,
    database_url: Option<String>,
    broker: Option<BrokerConfig>,
    notification_mode: NotificationMode,
    log_format: LogFormat,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a value
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a value
    /// does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let required = |key: &'static str| optional(key).ok_or(ConfigError::Missing(key));

        let encryption_key = required("ENCRYPTION_KEY")?;
        validate_encryption_key(&encryption_key)?;

        let broker = optional("RABBITMQ_HOST")
            .map(|host| -> Result<BrokerConfig, ConfigError> {
                Ok(BrokerConfig {
                    host,
                    port: optional("RABBITMQ_PORT")
                        .map(|raw| parse_value("RABBITMQ_PORT", &raw))
                        .transpose()?
                        .unwrap_or(DEFAULT_BROKER_PORT),
                    username: required("RABBITMQ_USERNAME")?,
                    password: required("RABBITMQ_PASSWORD")?,
                })
            })
            .transpose()?;
        let notification_mode = optional("NOTIFY_MODE")
            .map(|raw| parse_value("NOTIFY_MODE", &raw))
            .transpose()?
            .unwrap_or_default();
        let log_format = optional("LOG_FORMAT")
            .map(|raw| parse_value("LOG_FORMAT", &raw))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            environment: required("APP_ENV")?,
            secret_key: required("SECRET_KEY")?,
            issuer: required("ISSUER")?,
            encryption_key,
            database_url: optional("DATABASE_URL"),
            broker,
            notification_mode,
            log_format,
        })
    }

    /// Returns the deployment environment name.
    #[must_use]
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Returns the session token signing secret.
    #[must_use]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Returns the session token issuer.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Returns the base64-encoded summary encryption key.
    #[must_use]
    pub fn encryption_key(&self) -> &str {
        &self.encryption_key
    }

    /// Returns the database connection string, if configured.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// Returns the broker settings, if configured.
    #[must_use]
    pub const fn broker(&self) -> Option<&BrokerConfig> {
        self.broker.as_ref()
    }

    /// Returns how task events are dispatched.
    #[must_use]
    pub const fn notification_mode(&self) -> NotificationMode {
        self.notification_mode
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("environment", &self.environment)
            .field("secret_key", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("encryption_key", &"<redacted>")
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "<redacted>"),
            )
            .field("broker", &self.broker)
            .field("notification_mode", &self.notification_mode)
            .field("log_format", &self.log_format)
            .finish()
    }
}

fn validate_encryption_key(encoded: &str) -> Result<(), ConfigError> {
    let decoded = STANDARD
        .decode(encoded)
        .map_err(|err| ConfigError::Invalid {
            key: "ENCRYPTION_KEY",
            reason: err.to_string(),
        })?;
    if decoded.len() != AesGcmCodec::KEY_LEN {
        return Err(ConfigError::Invalid {
            key: "ENCRYPTION_KEY",
            reason: format!(
                "expected {} bytes, got {}",
                AesGcmCodec::KEY_LEN,
                decoded.len()
            ),
        });
    }
    Ok(())
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.parse::<T>().map_err(|err| ConfigError::Invalid {
        key,
        reason: err.to_string(),
    })
}
