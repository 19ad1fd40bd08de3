//! Repository Module
//!
//! SurrealDB access in the parameterized-query style. All order mutations
//! go through the coordinator; handlers use the repository directly only
//! for read-only queries.

pub mod order;

pub use order::{KitchenStats, OrderRepository};

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for crate::utils::AppError {
    fn from(err: RepoError) -> Self {
        use crate::utils::AppError;
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: "table:id" strings across the whole stack
// =============================================================================
//
// surrealdb::RecordId handles all IDs:
//   - parse:  let id: RecordId = "order:abc".parse()?;
//   - build:  let id = RecordId::from_table_key("order", "abc");
//   - CRUD:   db.select(id) / db.update(id) take a RecordId directly

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
