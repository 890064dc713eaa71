use std::path::PathBuf;

use axum_test::TestServer;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tempfile::TempDir;

use curio::build_router;
use curio::config::Config;
use curio::entity;
use curio::state::AppState;

/// Test application wrapper: a throwaway sqlite database plus a throwaway
/// upload root, both living inside one temp directory
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub upload_dir: PathBuf,
    // Held so the database file and uploads outlive the test body
    _tmp: TempDir,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let tmp = TempDir::new().expect("Failed to create temp dir");

        let db_path = tmp.path().join("curio_test.db");
        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let db = Database::connect(db_url.as_str())
            .await
            .expect("Failed to open sqlite database");
        create_schema(&db).await;

        let upload_dir = tmp.path().join("uploads");
        let config = Config {
            database_url: db_url,
            host: "127.0.0.1".to_string(),
            port: 0,
            upload_dir: upload_dir.to_string_lossy().into_owned(),
        };

        let state = AppState::with_database(config, db)
            .await
            .expect("Failed to create test app state");

        let router = build_router(state.clone());
        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            state,
            upload_dir,
            _tmp: tmp,
        }
    }
}

/// Build the schema straight from the entities; the Postgres migrations are
/// not sqlite-compatible
async fn create_schema(db: &DatabaseConnection) {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    db.execute(backend.build(&schema.create_table_from_entity(entity::prelude::Category)))
        .await
        .expect("Failed to create categories table");
    db.execute(backend.build(&schema.create_table_from_entity(entity::prelude::Collection)))
        .await
        .expect("Failed to create collections table");
    db.execute(backend.build(&schema.create_table_from_entity(entity::prelude::Item)))
        .await
        .expect("Failed to create items table");
    db.execute(backend.build(&schema.create_table_from_entity(entity::prelude::ItemPhoto)))
        .await
        .expect("Failed to create item_photos table");
}
