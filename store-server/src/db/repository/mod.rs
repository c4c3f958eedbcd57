//! Repository Module
//!
//! CRUD access to the SurrealDB tables.

pub mod order;
pub mod product;
pub mod user;

// Re-exports
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use user::UserRepository;

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

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let message = err.to_string();
        // Unique index violations read "index `...` already contains ..."
        if message.contains("already contains") {
            RepoError::Duplicate(message)
        } else {
            RepoError::Database(message)
        }
    }
}

impl From<RepoError> for shared::error::AppError {
    fn from(err: RepoError) -> Self {
        use shared::error::{AppError, ErrorCode};
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
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
