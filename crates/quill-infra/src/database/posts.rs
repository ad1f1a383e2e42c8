//! MongoDB-backed post repository.

use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use mongodb::options::ReturnDocument;

use quill_core::domain::{Post, PostPatch};
use quill_core::error::RepoError;
use quill_core::ports::{DeleteOutcome, PostFilter, PostRepository, PostSort, SortOrder};

use super::map_mongo_error;
use super::store::{MongoStore, POSTS_COLLECTION};

pub struct MongoPostRepository {
    collection: Collection<Post>,
}

impl MongoPostRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self {
            collection: store.database().collection(POSTS_COLLECTION),
        }
    }
}

fn sort_document(sort: PostSort) -> Document {
    let direction = match sort.order {
        SortOrder::Ascending => 1,
        SortOrder::Descending => -1,
    };
    doc! { sort.field.as_key(): direction }
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        self.collection
            .insert_one(&post)
            .await
            .map_err(map_mongo_error)?;
        Ok(post)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Post>, RepoError> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(map_mongo_error)
    }

    async fn list(&self, filter: PostFilter, sort: PostSort) -> Result<Vec<Post>, RepoError> {
        let mut query = Document::new();
        if let Some(author) = filter.author {
            query.insert("author", author);
        }
        if let Some(tag) = filter.tag {
            // Matching a scalar against an array field selects documents
            // whose tag sequence contains the value.
            query.insert("tags", tag);
        }

        let cursor = self
            .collection
            .find(query)
            .sort(sort_document(sort))
            .await
            .map_err(map_mongo_error)?;

        cursor.try_collect().await.map_err(map_mongo_error)
    }

    async fn update(
        &self,
        owner: ObjectId,
        id: ObjectId,
        patch: PostPatch,
    ) -> Result<Option<Post>, RepoError> {
        let mut set = doc! { "updatedAt": mongodb::bson::DateTime::from_chrono(Utc::now()) };
        if let Some(contents) = patch.contents {
            set.insert("contents", contents);
        }
        if let Some(tags) = patch.tags {
            set.insert("tags", tags);
        }

        // The owner is part of the filter: a mismatched owner matches no
        // document and the update is a no-op.
        self.collection
            .find_one_and_update(doc! { "_id": id, "author": owner }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_mongo_error)
    }

    async fn delete(&self, owner: ObjectId, id: ObjectId) -> Result<DeleteOutcome, RepoError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id, "author": owner })
            .await
            .map_err(map_mongo_error)?;

        Ok(DeleteOutcome {
            deleted_count: result.deleted_count,
        })
    }
}
