//! Session tokens: HS256 JWTs carrying [`SessionClaims`].

use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mcontrol_common::views::SessionClaims;

use super::error::AuthError;

/// How long a session token stays valid after it is issued, in seconds.
pub const SESSION_TTL_SECS: i64 = 24 * 60 * 60;

/// Issues and verifies session tokens with a shared secret.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token valid from now for [`SESSION_TTL_SECS`].
    pub fn issue(&self) -> Result<String, AuthError> {
        self.issue_at(Utc::now())
    }

    /// Issue a token as if it had been issued at `issued_at`.
    pub fn issue_at(&self, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let iat = issued_at.timestamp();
        let claims = SessionClaims {
            authenticated: true,
            iat,
            exp: iat + SESSION_TTL_SECS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(AuthError::Signing)
    }

    /// Check signature and expiry, returning the decoded claims.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(AuthError::InvalidToken)
    }
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}
