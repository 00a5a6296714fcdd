use std::fmt;

use tracing::instrument;

use super::error::AuthError;

/// Checks submitted passwords against the one configured bcrypt hash.
pub struct PasswordVerifier {
    hash: String,
}

impl PasswordVerifier {
    pub fn new(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Returns `Ok(())` when `password` matches.
    ///
    /// The comparison runs on the blocking pool.
    #[instrument(skip_all)]
    pub async fn verify(&self, password: String) -> Result<(), AuthError> {
        let hash = self.hash.clone();

        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AuthError::Other(e.into()))??;

        if matches {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

impl fmt::Debug for PasswordVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordVerifier").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier(password: &str) -> PasswordVerifier {
        PasswordVerifier::new(bcrypt::hash(password, 4).unwrap())
    }

    #[tokio::test]
    async fn test_correct_password_is_accepted() {
        let verifier = verifier("correct horse");
        assert!(verifier.verify("correct horse".into()).await.is_ok());
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let verifier = verifier("correct horse");

        for attempt in ["", "Correct horse", "correct horse ", "battery staple"] {
            assert!(matches!(
                verifier.verify(attempt.into()).await,
                Err(AuthError::InvalidCredentials)
            ));
        }
    }

    #[tokio::test]
    async fn test_malformed_hash_is_an_internal_error() {
        let verifier = PasswordVerifier::new("not-a-bcrypt-hash");

        assert!(matches!(
            verifier.verify("anything".into()).await,
            Err(AuthError::Hashing(_))
        ));
    }

    #[tokio::test]
    async fn test_default_hash_is_well_formed() {
        let verifier = PasswordVerifier::new(crate::config::DEFAULT_PASSWORD_HASH);

        assert!(matches!(
            verifier.verify("definitely not it".into()).await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}
