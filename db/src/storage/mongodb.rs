use async_trait::async_trait;
use mcontrol_common::params::UpdateStateParams;
use mongodb::{
    Client, Collection, Database,
    bson::{doc, to_document},
    options::ReturnDocument,
};
use tracing::{debug, instrument};

use crate::{
    models::{DbState, STATE_ID},
    storage::{StateStore, StoreError, Storage},
    sync,
};

pub const MONGODB_DEFAULT_DATABASE: &str = "machine-control";
pub const MONGODB_COLLECTION_STATES: &str = "states";

#[derive(Debug, Clone)]
pub struct MongoDBStorage(Client);

impl MongoDBStorage {
    pub async fn new(uri: &str) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(uri).await?;
        Ok(Self(client))
    }

    fn get_db(&self) -> Database {
        self.0
            .default_database()
            .unwrap_or_else(|| self.0.database(MONGODB_DEFAULT_DATABASE))
    }

    fn states(&self) -> Collection<DbState> {
        self.get_db().collection::<DbState>(MONGODB_COLLECTION_STATES)
    }
}

#[async_trait]
impl Storage for MongoDBStorage {
    async fn ping(&self) -> Result<(), StoreError> {
        self.get_db().run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[async_trait]
impl StateStore for MongoDBStorage {
    #[instrument(skip(self))]
    async fn get_state(&self) -> Result<DbState, StoreError> {
        // `_id` comes from the filter on insert and may not be set twice.
        let mut seed = to_document(&DbState::seeded())?;
        seed.remove("_id");

        let state = self
            .states()
            .find_one_and_update(doc! { "_id": STATE_ID }, doc! { "$setOnInsert": seed })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?;

        state.ok_or_else(|| StoreError::Internal("upsert returned no state record".into()))
    }

    #[instrument(skip(self, patch))]
    async fn put_state(&self, patch: &UpdateStateParams) -> Result<DbState, StoreError> {
        let collection = self.states();

        let existing = collection.find_one(doc! { "_id": STATE_ID }).await?;
        debug!(exists = existing.is_some(), "Loaded state record for update");

        let state = sync::apply_patch(existing, patch)?;

        collection
            .replace_one(doc! { "_id": STATE_ID }, &state)
            .upsert(true)
            .await?;

        Ok(state)
    }
}
