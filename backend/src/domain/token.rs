//! Signed identity tokens.
//!
//! Issues and parses HMAC-SHA256 JWTs carrying `{id, exp}` claims with a
//! fixed 60-day validity window. The signing secret is injected at
//! construction time; nothing in this module reads ambient process state.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Error;

/// Token validity window: 60 days, matching the account lifecycle contract.
pub const TOKEN_VALIDITY_DAYS: i64 = 60;

/// Claims carried by an identity token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identifier of the authenticated user.
    pub id: Uuid,
    /// Expiry as a Unix timestamp (seconds).
    pub exp: i64,
}

/// Issues and verifies signed identity tokens.
///
/// Cheap to clone; handlers share one instance through the account service.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validity: Duration,
}

impl TokenIssuer {
    /// Build an issuer from the process-wide signing secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validity: Duration::days(TOKEN_VALIDITY_DAYS),
        }
    }

    /// Override the validity window. Test hook; production code always uses
    /// the 60-day default.
    #[cfg(test)]
    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }

    /// Mint a token for `user_id` expiring `validity` from now.
    ///
    /// # Errors
    /// Returns an internal [`Error`] if signing fails.
    pub fn issue(&self, user_id: Uuid) -> Result<String, Error> {
        let claims = Claims {
            id: user_id,
            exp: (Utc::now() + self.validity).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|error| Error::internal(format!("token signing failed: {error}")))
    }

    /// Parse and verify a token, returning the embedded user id.
    ///
    /// Invalid signature, malformed structure, and expired `exp` all surface
    /// as the same `unauthorized` error so callers cannot distinguish them.
    pub fn verify(&self, token: &str) -> Result<Uuid, Error> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims.id)
            .map_err(|error| {
                tracing::debug!(%error, "token verification failed");
                Error::unauthorized("Invalid authentication token.")
            })
    }

    /// Verify an existing token and mint a fresh one for the same user.
    pub fn refresh(&self, token: &str) -> Result<String, Error> {
        let user_id = self.verify(token)?;
        self.issue(user_id)
    }
}
