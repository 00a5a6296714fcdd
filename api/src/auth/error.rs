use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password check failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
