use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::domain::{Event, Post, PostPatch, User};
use crate::error::RepoError;

/// Post fields a listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// The document key this field sorts on.
    pub fn as_key(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// Resolved sort contract for post listings. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostSort {
    pub field: SortField,
    pub order: SortOrder,
}

/// Listing filter. At most one of `author`/`tag` is set by the services.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub author: Option<ObjectId>,
    pub tag: Option<String>,
}

/// Result of a delete operation: the number of removed documents (0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted_count: u64,
}

/// Post repository. A single atomic store operation per call.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Post>, RepoError>;

    async fn list(&self, filter: PostFilter, sort: PostSort) -> Result<Vec<Post>, RepoError>;

    /// Apply `patch` to the post identified by `id` and owned by `owner`,
    /// refreshing `updatedAt`. Returns the updated post, or `None` when no
    /// document matches (missing id or mismatched owner alike).
    async fn update(
        &self,
        owner: ObjectId,
        id: ObjectId,
        patch: PostPatch,
    ) -> Result<Option<Post>, RepoError>;

    /// Remove the post identified by `id` and owned by `owner`.
    async fn delete(&self, owner: ObjectId, id: ObjectId) -> Result<DeleteOutcome, RepoError>;
}

/// User repository.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Duplicate usernames surface as
    /// [`RepoError::Constraint`].
    async fn insert(&self, user: User) -> Result<User, RepoError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Event repository.
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn insert(&self, event: Event) -> Result<Event, RepoError>;

    /// The most recently recorded events, newest first.
    async fn list_recent(&self, limit: i64) -> Result<Vec<Event>, RepoError>;
}
