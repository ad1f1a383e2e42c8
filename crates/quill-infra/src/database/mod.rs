//! Document store access: the shared MongoDB handle, the Mongo-backed
//! repositories, and their in-memory twins.

mod events;
mod memory;
mod posts;
mod store;
mod users;

pub use events::MongoEventRepository;
pub use memory::{InMemoryEventRepository, InMemoryPostRepository, InMemoryUserRepository};
pub use posts::MongoPostRepository;
pub use store::{MongoConfig, MongoStore};
pub use users::MongoUserRepository;


use quill_core::error::RepoError;

// Server error code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

pub(crate) fn map_mongo_error(err: mongodb::error::Error) -> RepoError {
    use mongodb::error::{ErrorKind, WriteFailure};

    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE =>
        {
            RepoError::Constraint(write_error.message.clone())
        }
        ErrorKind::ServerSelection { .. } => RepoError::Connection(err.to_string()),
        _ => RepoError::Query(err.to_string()),
    }
}
