//! # Quill Core
//!
//! The domain layer of the Quill blog platform.
//! This crate contains entities, ports, and the services that enforce the
//! read/write contracts, with zero infrastructure dependencies beyond the
//! store's id and time types.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
