//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL persistence via SeaORM
//!
//! Without `postgres` only the in-memory store is available.

pub mod database;
pub mod memory;

pub use database::DatabaseConfig;
pub use memory::MemoryRepository;

#[cfg(feature = "postgres")]
pub use database::{PostgresImageRepository, PostgresPostRepository, PostgresRepository};
