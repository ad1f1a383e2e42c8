//! MongoDB-backed user repository.

use async_trait::async_trait;
use mongodb::Collection;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;

use quill_core::domain::User;
use quill_core::error::RepoError;
use quill_core::ports::UserRepository;

use super::map_mongo_error;
use super::store::{MongoStore, USERS_COLLECTION};

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self {
            collection: store.database().collection(USERS_COLLECTION),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, user: User) -> Result<User, RepoError> {
        // The unique index on `username` turns duplicates into a
        // Constraint error via the duplicate-key code.
        self.collection
            .insert_one(&user)
            .await
            .map_err(map_mongo_error)?;
        Ok(user)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, RepoError> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(map_mongo_error)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        self.collection
            .find_one(doc! { "username": username })
            .await
            .map_err(map_mongo_error)
    }
}
