//! Environment-driven application configuration.
//!
//! Secrets load from files (`SECRET_KEY_FILE`, `SESSION_KEY_FILE`) so they
//! can be mounted from a secret store; debug builds fall back to ephemeral
//! values with a warning so local development needs no setup.

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::Key;
use thiserror::Error as ThisError;
use tracing::warn;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_SESSION_KEY_PATH: &str = "/var/run/secrets/session_key";
const DEFAULT_SECRET_KEY_PATH: &str = "/var/run/secrets/token_secret";

/// Configuration loading failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
    /// A required environment variable is absent.
    #[error("missing required environment variable {name}")]
    MissingVar {
        /// Variable name.
        name: &'static str,
    },
    /// `BIND_ADDR` does not parse as a socket address.
    #[error("invalid BIND_ADDR {value:?}: {message}")]
    InvalidBindAddr {
        /// Rejected value.
        value: String,
        /// Parser diagnostic.
        message: String,
    },
    /// A secret file could not be read and no fallback applies.
    #[error("failed to read secret at {path}: {message}")]
    SecretUnavailable {
        /// Attempted path.
        path: String,
        /// I/O diagnostic.
        message: String,
    },
}

/// Runtime configuration assembled from the environment.
pub struct AppConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Listener address.
    pub bind_addr: SocketAddr,
    /// Cookie signing/encryption key.
    pub session_key: Key,
    /// Whether session cookies carry the `Secure` flag.
    pub cookie_secure: bool,
    /// HMAC secret for identity tokens.
    pub token_secret: Zeroizing<Vec<u8>>,
}

fn ephemeral_allowed() -> bool {
    cfg!(debug_assertions) || env::var("ALLOW_EPHEMERAL_SECRETS").ok().as_deref() == Some("1")
}

fn read_secret_file(path: &str, label: &str) -> Result<Option<Vec<u8>>, ConfigError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(error) if ephemeral_allowed() => {
            warn!(path, %error, "using ephemeral {label} (dev only)");
            Ok(None)
        }
        Err(error) => Err(ConfigError::SecretUnavailable {
            path: path.to_owned(),
            message: error.to_string(),
        }),
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Fails when `DATABASE_URL` is unset, `BIND_ADDR` is malformed, or a
    /// secret file is unreadable in a release build.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar {
                name: "DATABASE_URL",
            })?;

        let bind_raw = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr: SocketAddr =
            bind_raw
                .parse()
                .map_err(|error: std::net::AddrParseError| ConfigError::InvalidBindAddr {
                    value: bind_raw.clone(),
                    message: error.to_string(),
                })?;

        let session_key_path =
            env::var("SESSION_KEY_FILE").unwrap_or_else(|_| DEFAULT_SESSION_KEY_PATH.into());
        let session_key = match read_secret_file(&session_key_path, "session key")? {
            Some(bytes) => Key::derive_from(&bytes),
            None => Key::generate(),
        };

        let token_secret = match env::var("SECRET_KEY") {
            Ok(value) => Zeroizing::new(value.into_bytes()),
            Err(_) => {
                let path = env::var("SECRET_KEY_FILE")
                    .unwrap_or_else(|_| DEFAULT_SECRET_KEY_PATH.into());
                match read_secret_file(&path, "token secret")? {
                    Some(bytes) => Zeroizing::new(bytes),
                    None => Zeroizing::new(Key::generate().master().to_vec()),
                }
            }
        };

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .map(|value| value != "0")
            .unwrap_or(true);

        Ok(Self {
            database_url,
            bind_addr,
            session_key,
            cookie_secure,
            token_secret,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_addr_parses() {
        let addr: SocketAddr = DEFAULT_BIND_ADDR.parse().expect("default bind addr");
        assert_eq!(addr.port(), 8000);
    }
}
