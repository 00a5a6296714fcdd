use std::sync::Arc;

use mcontrol_db::storage::Storage;

use crate::{
    auth::{PasswordVerifier, TokenIssuer},
    config::McontrolApiConfig,
};

#[derive(Debug, Clone)]
pub struct ApiContext {
    pub db: Arc<dyn Storage>,
    pub passwords: Arc<PasswordVerifier>,
    pub tokens: Arc<TokenIssuer>,
}

impl ApiContext {
    pub fn new(config: McontrolApiConfig, db: Arc<dyn Storage>) -> Self {
        Self {
            db,
            passwords: Arc::new(PasswordVerifier::new(config.password_hash)),
            tokens: Arc::new(TokenIssuer::new(config.jwt_secret.as_bytes())),
        }
    }
}
