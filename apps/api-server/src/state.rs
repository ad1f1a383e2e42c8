//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::PasswordService;
use quill_core::service::{EventsService, PostsService, UsersService};
use quill_infra::database::{
    InMemoryEventRepository, InMemoryPostRepository, InMemoryUserRepository, MongoConfig,
    MongoEventRepository, MongoPostRepository, MongoStore, MongoUserRepository,
};
use quill_infra::Argon2PasswordService;

/// Shared application state: the services, plus the store handle kept for
/// shutdown.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostsService>,
    pub users: Arc<UsersService>,
    pub events: Arc<EventsService>,
    pub store: Option<Arc<MongoStore>>,
}

impl AppState {
    /// Build the application state over MongoDB, falling back to the
    /// in-memory repositories when the store is unreachable.
    pub async fn new(config: &MongoConfig) -> Self {
        match MongoStore::connect(config).await {
            Ok(store) => {
                let store = Arc::new(store);
                let post_repo = Arc::new(MongoPostRepository::new(&store));
                let user_repo = Arc::new(MongoUserRepository::new(&store));
                let event_repo = Arc::new(MongoEventRepository::new(&store));
                let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

                Self {
                    posts: Arc::new(PostsService::new(post_repo, user_repo.clone())),
                    users: Arc::new(UsersService::new(user_repo, passwords)),
                    events: Arc::new(EventsService::new(event_repo)),
                    store: Some(store),
                }
            }
            Err(e) => {
                tracing::error!(
                    "Failed to connect to MongoDB: {}. Using in-memory store.",
                    e
                );
                Self::in_memory()
            }
        }
    }

    /// State over the in-memory repositories. Data does not survive a
    /// restart.
    pub fn in_memory() -> Self {
        let post_repo = Arc::new(InMemoryPostRepository::new());
        let user_repo = Arc::new(InMemoryUserRepository::new());
        let event_repo = Arc::new(InMemoryEventRepository::new());
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        Self {
            posts: Arc::new(PostsService::new(post_repo, user_repo.clone())),
            users: Arc::new(UsersService::new(user_repo, passwords)),
            events: Arc::new(EventsService::new(event_repo)),
            store: None,
        }
    }
}
