//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! MongoDB-backed repositories, their in-memory twins (the fallback when no
//! database is configured, and the test double for the service suite), and
//! the JWT/Argon2 auth services.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{
    InMemoryEventRepository, InMemoryPostRepository, InMemoryUserRepository, MongoConfig,
    MongoEventRepository, MongoPostRepository, MongoStore, MongoUserRepository,
};
