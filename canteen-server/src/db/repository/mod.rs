//! Repository Module
//!
//! Typed access to the SurrealDB tables. Each repository wraps a shared
//! [`BaseRepository`] and exposes the document-store operations the
//! services need: find-by-filter, insert, update-by-id, update-by-filter.

pub mod menu_item;
pub mod order;
pub mod student;

// Re-exports
pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;
pub use student::StudentRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
