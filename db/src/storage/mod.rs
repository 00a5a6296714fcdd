use std::fmt::Debug;

use async_trait::async_trait;
use mcontrol_common::params::UpdateStateParams;
use thiserror::Error;

use crate::{models::DbState, sync::SyncError};

#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod mongodb;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Query Error: {0}")]
    MongoDB(#[from] ::mongodb::error::Error),

    #[error("Serialization Error: {0}")]
    Bson(#[from] ::mongodb::bson::ser::Error),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[async_trait]
pub trait Storage: StateStore + Debug + Send + Sync + 'static {
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait StateStore {
    /// Returns the state record, seeding it first if the store is empty.
    /// Seeding happens at most once for the lifetime of the store.
    async fn get_state(&self) -> Result<DbState, StoreError>;

    /// Merges `patch` into the stored record and writes the result back,
    /// returning what was written. Concurrent callers race; the last write
    /// wins.
    async fn put_state(&self, patch: &UpdateStateParams) -> Result<DbState, StoreError>;
}
