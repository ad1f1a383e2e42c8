//! In-memory repositories - used as fallback when no database is
//! configured, and as the test double for the service suite.
//!
//! Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::Utc;
use tokio::sync::RwLock;

use quill_core::domain::{Event, Post, PostPatch, User};
use quill_core::error::RepoError;
use quill_core::ports::{
    DeleteOutcome, EventRepository, PostFilter, PostRepository, PostSort, SortField, SortOrder,
    UserRepository,
};

fn sort_posts(posts: &mut [Post], sort: PostSort) {
    posts.sort_by(|a, b| {
        let ordering = match sort.field {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        };
        match sort.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

/// In-memory post repository using a HashMap behind an async RwLock.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<ObjectId, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn list(&self, filter: PostFilter, sort: PostSort) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        let mut posts: Vec<Post> = store
            .values()
            .filter(|post| match &filter.author {
                Some(author) => post.author == *author,
                None => true,
            })
            .filter(|post| match &filter.tag {
                Some(tag) => post.tags.iter().any(|t| t == tag),
                None => true,
            })
            .cloned()
            .collect();

        sort_posts(&mut posts, sort);
        Ok(posts)
    }

    async fn update(
        &self,
        owner: ObjectId,
        id: ObjectId,
        patch: PostPatch,
    ) -> Result<Option<Post>, RepoError> {
        let mut store = self.store.write().await;
        match store.get_mut(&id) {
            Some(post) if post.author == owner => {
                patch.apply_to(post, Utc::now());
                Ok(Some(post.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete(&self, owner: ObjectId, id: ObjectId) -> Result<DeleteOutcome, RepoError> {
        let mut store = self.store.write().await;
        let owned = store.get(&id).is_some_and(|post| post.author == owner);
        if owned {
            store.remove(&id);
        }

        Ok(DeleteOutcome {
            deleted_count: u64::from(owned),
        })
    }
}

/// In-memory user repository.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<ObjectId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        if store.values().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint(format!(
                "username `{}` is already taken",
                user.username
            )));
        }
        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.username == username).cloned())
    }
}

/// In-memory event repository.
#[derive(Default)]
pub struct InMemoryEventRepository {
    store: RwLock<Vec<Event>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn insert(&self, event: Event) -> Result<Event, RepoError> {
        let mut store = self.store.write().await;
        store.push(event.clone());
        Ok(event)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Event>, RepoError> {
        let store = self.store.read().await;
        let mut events: Vec<Event> = store.clone();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        events.truncate(limit.max(0) as usize);
        Ok(events)
    }
}
