//! Database Module
//!
//! Embedded SurrealDB storage. The order store contract consumed by the
//! coordinator is implemented in [`repository::OrderRepository`].

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "mesa";
const DATABASE: &str = "mesa";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the on-disk database (RocksDB engine)
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(path = %db_path, "Database connection established");
        Ok(Self { db })
    }

    /// Open an in-memory database (tests and local development)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
        Ok(Self { db })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::DiningTable;

    #[tokio::test]
    async fn on_disk_database_round_trips_records() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("mesa.db");
        let service = DbService::new(&path.to_string_lossy()).await.unwrap();

        let table = DiningTable {
            id: None,
            table_number: "B2".to_string(),
            location: None,
            capacity: 2,
            is_active: true,
        };
        let created: Option<DiningTable> = service
            .db
            .create("dining_table")
            .content(table)
            .await
            .unwrap();
        let id = created.unwrap().id.unwrap();

        let found: Option<DiningTable> = service.db.select(id).await.unwrap();
        assert_eq!(found.unwrap().table_number, "B2");
    }
}
