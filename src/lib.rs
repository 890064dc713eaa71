// Library crate for the curio catalogue API
// Exports modules for use by the server binary and tests

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::handlers::{
    add_photos, create_collection, create_item, delete_collection, delete_item, delete_photo,
    get_collection, get_item, list_categories, list_collections, list_items, list_photos,
    set_primary_photo, update_collection, update_item,
};
use crate::services::MAX_REQUEST_BYTES;
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    let upload_root = state.config.upload_dir.clone();

    Router::new()
        .route("/", get(|| async { "Curio catalogue API" }))
        // Category routes
        .route("/api/categories", get(list_categories))
        // Collection routes
        .route("/api/collections", get(list_collections))
        .route("/api/collections", post(create_collection))
        .route("/api/collections/{id}", get(get_collection))
        .route("/api/collections/{id}", put(update_collection))
        .route("/api/collections/{id}", delete(delete_collection))
        // Item routes (nested under collections)
        .route("/api/collections/{id}/items", get(list_items))
        .route("/api/collections/{id}/items", post(create_item))
        // Item routes (direct access)
        .route("/api/items/{id}", get(get_item))
        .route("/api/items/{id}", put(update_item))
        .route("/api/items/{id}", delete(delete_item))
        // Photo routes
        .route("/api/items/{id}/photos", get(list_photos))
        .route("/api/items/{id}/photos", post(add_photos))
        .route(
            "/api/items/{item_id}/photos/{photo_id}/primary",
            put(set_primary_photo),
        )
        .route(
            "/api/items/{item_id}/photos/{photo_id}",
            delete(delete_photo),
        )
        // Stored photo files
        .nest_service("/uploads", ServeDir::new(upload_root))
        // A full photo batch is larger than axum's default body cap
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
