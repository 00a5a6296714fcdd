use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response for the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthLoginResponse {
    /// The bearer token for the session. This token should be included in
    /// the `Authorization` header of subsequent requests.
    pub token: String,

    pub message: String,
}

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionClaims {
    /// Always `true` for tokens issued by the login endpoint.
    pub authenticated: bool,

    /// Issued at, in seconds since the Unix epoch.
    pub iat: i64,

    /// Expiry, in seconds since the Unix epoch.
    pub exp: i64,
}

/// Response for the token verification endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthVerifyResponse {
    pub valid: bool,

    /// The decoded claims of the presented token.
    pub user: SessionClaims,

    pub timestamp: DateTime<Utc>,
}
