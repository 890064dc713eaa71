use std::sync::Arc;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sqlx::postgres::PgPool;

use crate::config::Config;
use crate::services::{DiskMediaStore, MediaStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// SeaORM database connection
    pub db: DatabaseConnection,
    /// Where uploaded photo bytes live
    pub media: Arc<dyn MediaStore>,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState: run migrations, connect the ORM, open the
    /// upload root
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        // Connect to PostgreSQL with SQLx (for migrations)
        let pg_pool = PgPool::connect(&config.database_url)
            .await
            .map_err(|e| AppStateError::Postgres(e.to_string()))?;

        sqlx::migrate!("./migrations")
            .run(&pg_pool)
            .await
            .map_err(|e| AppStateError::Migration(e.to_string()))?;

        // Connect with SeaORM for everything else
        let mut opt = ConnectOptions::new(&config.database_url);
        opt.max_connections(100)
            .min_connections(5)
            .sqlx_logging(true);

        let db = Database::connect(opt)
            .await
            .map_err(|e| AppStateError::Postgres(e.to_string()))?;

        Self::with_database(config, db).await
    }

    /// Create AppState over an already-connected database.
    ///
    /// Used by the test suite, which prepares its own (sqlite) schema.
    pub async fn with_database(
        config: Config,
        db: DatabaseConnection,
    ) -> Result<Self, AppStateError> {
        let media = DiskMediaStore::new(&config.upload_dir)
            .await
            .map_err(|e| AppStateError::Storage(e.to_string()))?;

        Ok(Self {
            db,
            media: Arc::new(media),
            config,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("PostgreSQL connection error: {0}")]
    Postgres(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Upload storage error: {0}")]
    Storage(String),
}
