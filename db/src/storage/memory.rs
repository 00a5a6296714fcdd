//! A [`Storage`] that keeps the record in process memory. Used by tests that
//! exercise the full request path without a database.

use async_trait::async_trait;
use mcontrol_common::params::UpdateStateParams;
use tokio::sync::Mutex;

use crate::{
    models::DbState,
    storage::{StateStore, StoreError, Storage},
    sync,
};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: Mutex<Option<DbState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing record instead of an empty store.
    pub fn with_state(state: DbState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
        }
    }

    /// The stored record, without seeding.
    pub async fn peek(&self) -> Option<DbState> {
        self.state.lock().await.clone()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl StateStore for MemoryStorage {
    async fn get_state(&self) -> Result<DbState, StoreError> {
        let mut guard = self.state.lock().await;
        Ok(guard.get_or_insert_with(DbState::seeded).clone())
    }

    async fn put_state(&self, patch: &UpdateStateParams) -> Result<DbState, StoreError> {
        let mut guard = self.state.lock().await;
        let state = sync::apply_patch(guard.clone(), patch)?;
        *guard = Some(state.clone());
        Ok(state)
    }
}
