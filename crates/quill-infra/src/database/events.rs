//! MongoDB-backed event repository.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::doc;

use quill_core::domain::Event;
use quill_core::error::RepoError;
use quill_core::ports::EventRepository;

use super::map_mongo_error;
use super::store::{EVENTS_COLLECTION, MongoStore};

pub struct MongoEventRepository {
    collection: Collection<Event>,
}

impl MongoEventRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self {
            collection: store.database().collection(EVENTS_COLLECTION),
        }
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    async fn insert(&self, event: Event) -> Result<Event, RepoError> {
        self.collection
            .insert_one(&event)
            .await
            .map_err(map_mongo_error)?;
        Ok(event)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Event>, RepoError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .limit(limit)
            .await
            .map_err(map_mongo_error)?;

        cursor.try_collect().await.map_err(map_mongo_error)
    }
}
