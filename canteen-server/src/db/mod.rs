//! Database Module
//!
//! Embedded SurrealDB storage: connection bootstrap, storage models and
//! repositories.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

/// Database service owning the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `db_path`
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::bootstrap(db).await
    }

    /// In-memory database (tests and local tooling)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::bootstrap(db).await
    }

    async fn bootstrap(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns("canteen")
            .use_db("canteen")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        tracing::info!("Database connection established");
        Ok(Self { db })
    }
}

/// Apply table and index definitions.
///
/// The unique index on `public_id` backs the allocator's uniqueness
/// invariant at the storage layer; `created_at` is indexed for the
/// retention sweep range delete.
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        "
        DEFINE TABLE IF NOT EXISTS order SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS order_public_id ON order FIELDS public_id UNIQUE;
        DEFINE INDEX IF NOT EXISTS order_created_at ON order FIELDS created_at;
        DEFINE INDEX IF NOT EXISTS order_owner ON order FIELDS owner_id;
        DEFINE TABLE IF NOT EXISTS menu_item SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS student SCHEMALESS;
        ",
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?
    .check()
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
    Ok(())
}
