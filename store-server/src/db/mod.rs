//! Database Module
//!
//! Embedded SurrealDB storage: connection handling, schema definition,
//! repositories, and the product listing query builder.

pub mod models;
pub mod query;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "storefront";
const DATABASE: &str = "storefront";

/// Database service, owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the embedded database at `db_path` and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        tracing::info!(path = db_path, "Database connection established");

        Ok(Self { db })
    }
}

/// Define indexes the storefront relies on
///
/// Both uniqueness guarantees the handlers depend on are enforced here
/// rather than by application-level checks alone:
/// - `user.email` backs duplicate-registration detection
/// - `order.orderNumber` backs the retry-on-collision order number scheme
pub async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    let statements = [
        "DEFINE INDEX IF NOT EXISTS user_email ON TABLE user COLUMNS email UNIQUE",
        "DEFINE INDEX IF NOT EXISTS order_number ON TABLE order COLUMNS orderNumber UNIQUE",
        "DEFINE INDEX IF NOT EXISTS order_user ON TABLE order COLUMNS userId",
        "DEFINE INDEX IF NOT EXISTS product_category ON TABLE product COLUMNS category",
    ];

    for statement in statements {
        db.query(statement)
            .await
            .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?
            .check()
            .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
    }

    Ok(())
}
