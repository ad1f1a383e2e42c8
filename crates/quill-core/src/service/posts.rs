//! The posts service: the read/write contract over post documents.

use std::sync::Arc;

use bson::oid::ObjectId;

use crate::domain::{NewPost, Post, PostPatch};
use crate::error::DomainError;
use crate::ports::{
    DeleteOutcome, PostFilter, PostRepository, PostSort, SortField, SortOrder, UserRepository,
};

/// Caller-supplied sort options, as they arrive from a query string or a
/// GraphQL input object. Resolution to a [`PostSort`] is this service's
/// policy: unknown values fall back to the defaults instead of erroring.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl ListOptions {
    fn resolve(&self) -> PostSort {
        let field = match self.sort_by.as_deref() {
            Some("updatedAt") => SortField::UpdatedAt,
            _ => SortField::CreatedAt,
        };
        let order = match self.sort_order.as_deref() {
            Some("ascending") => SortOrder::Ascending,
            _ => SortOrder::Descending,
        };
        PostSort { field, order }
    }
}

/// Enforces the posts read/write contract: creation validation, the sort
/// and filter policy for listings, whitelisted updates, and owner-scoped
/// mutation.
///
/// "Not found" is always data (`None` or a zero count), never an error;
/// malformed object ids are treated the same as absent ones.
pub struct PostsService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostsService {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    /// Create a post authored by `author`. Fails with a validation error
    /// naming `title` when the title is missing or empty.
    pub async fn create_post(
        &self,
        author: ObjectId,
        fields: NewPost,
    ) -> Result<Post, DomainError> {
        let post = Post::new(author, fields)?;
        tracing::debug!(post_id = %post.id, %author, "creating post");
        Ok(self.posts.insert(post).await?)
    }

    /// Look up a post by its id string. Malformed ids resolve to `None`.
    pub async fn get_post_by_id(&self, id: &str) -> Result<Option<Post>, DomainError> {
        let Ok(id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        Ok(self.posts.find_by_id(id).await?)
    }

    /// All posts under the sort contract (default: newest first).
    pub async fn list_all_posts(&self, options: ListOptions) -> Result<Vec<Post>, DomainError> {
        Ok(self
            .posts
            .list(PostFilter::default(), options.resolve())
            .await?)
    }

    /// Posts by the user named `username`, or an empty vector when no such
    /// user exists.
    pub async fn list_posts_by_author(
        &self,
        username: &str,
        options: ListOptions,
    ) -> Result<Vec<Post>, DomainError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            return Ok(Vec::new());
        };
        let filter = PostFilter {
            author: Some(user.id),
            tag: None,
        };
        Ok(self.posts.list(filter, options.resolve()).await?)
    }

    /// Posts whose tag sequence contains `tag` (exact match).
    pub async fn list_posts_by_tag(
        &self,
        tag: &str,
        options: ListOptions,
    ) -> Result<Vec<Post>, DomainError> {
        let filter = PostFilter {
            author: None,
            tag: Some(tag.to_string()),
        };
        Ok(self.posts.list(filter, options.resolve()).await?)
    }

    /// Apply the whitelisted `patch` to the post identified by `id`,
    /// refreshing `updatedAt`. Returns `None` when the id is malformed,
    /// unknown, or the post is not owned by `author`: an ownership
    /// mismatch is a no-op, indistinguishable from a missing post.
    pub async fn update_post(
        &self,
        author: ObjectId,
        id: &str,
        patch: PostPatch,
    ) -> Result<Option<Post>, DomainError> {
        let Ok(id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        Ok(self.posts.update(author, id, patch).await?)
    }

    /// Remove the post identified by `id` if owned by `author`. Reports the
    /// deleted count; nonexistent, malformed, and non-owned ids all yield 0.
    pub async fn delete_post(
        &self,
        author: ObjectId,
        id: &str,
    ) -> Result<DeleteOutcome, DomainError> {
        let Ok(id) = ObjectId::parse_str(id) else {
            return Ok(DeleteOutcome { deleted_count: 0 });
        };
        Ok(self.posts.delete(author, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_to_created_at_descending() {
        let sort = ListOptions::default().resolve();
        assert_eq!(sort.field, SortField::CreatedAt);
        assert_eq!(sort.order, SortOrder::Descending);
    }

    #[test]
    fn options_resolve_known_values() {
        let sort = ListOptions {
            sort_by: Some("updatedAt".to_string()),
            sort_order: Some("ascending".to_string()),
        }
        .resolve();
        assert_eq!(sort.field, SortField::UpdatedAt);
        assert_eq!(sort.order, SortOrder::Ascending);
    }

    #[test]
    fn unknown_options_fall_back_to_defaults() {
        let sort = ListOptions {
            sort_by: Some("title".to_string()),
            sort_order: Some("sideways".to_string()),
        }
        .resolve();
        assert_eq!(sort.field, SortField::CreatedAt);
        assert_eq!(sort.order, SortOrder::Descending);
    }
}
