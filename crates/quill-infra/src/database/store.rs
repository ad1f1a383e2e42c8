//! The shared MongoDB handle.

use mongodb::bson::{Document, doc};
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};

pub(crate) const POSTS_COLLECTION: &str = "posts";
pub(crate) const USERS_COLLECTION: &str = "users";
pub(crate) const EVENTS_COLLECTION: &str = "events";

/// Configuration for the document store connection.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub db_name: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            db_name: "quill".to_string(),
        }
    }
}

/// One client per process, constructed by the entry point and passed into
/// the repositories. The entry point owns the lifecycle: connect once at
/// startup, [`MongoStore::shutdown`] on termination.
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    /// Connect, ping the server, and ensure collection indexes.
    pub async fn connect(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(&config.uri).await?;
        let db = client.database(&config.db_name);

        // Fail fast rather than on the first query.
        db.run_command(doc! { "ping": 1 }).await?;
        tracing::info!(uri = %config.uri, db = %config.db_name, "connected to MongoDB");

        let store = Self { client, db };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
        let username_unique = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.db
            .collection::<Document>(USERS_COLLECTION)
            .create_index(username_unique)
            .await?;

        Ok(())
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Close the connection. Called once by the entry point on shutdown.
    pub async fn shutdown(&self) {
        self.client.clone().shutdown().await;
        tracing::info!("MongoDB connection closed");
    }
}
