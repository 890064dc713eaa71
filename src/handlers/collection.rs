use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::handlers::{validate_optional, validate_required, DEFAULT_USER_ID};
use crate::models::{Collection, CreateCollection, UpdateCollection};
use crate::repositories::CollectionRepository;
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCollectionRequest {
    pub name: String,
    pub category_id: i32,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCollectionRequest {
    pub name: String,
    pub category_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionResponse {
    pub id: i32,
    pub name: String,
    pub category_id: i32,
    pub category_label: String,
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
}

impl From<Collection> for CollectionResponse {
    fn from(c: Collection) -> Self {
        Self {
            id: c.id,
            name: c.name,
            category_id: c.category_id,
            category_label: c.category_label,
            description: c.description,
            created_at: c.created_at,
        }
    }
}

// ============ Handlers ============

/// List the user's collections
#[utoipa::path(
    get,
    path = "/api/collections",
    responses(
        (status = 200, description = "List of collections", body = [CollectionResponse])
    ),
    tag = "Collections"
)]
pub async fn list_collections(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CollectionResponse>>> {
    let collections = CollectionRepository::list_by_user(&state.db, DEFAULT_USER_ID).await?;
    Ok(Json(collections.into_iter().map(|c| c.into()).collect()))
}

/// Create a new collection
#[utoipa::path(
    post,
    path = "/api/collections",
    request_body = CreateCollectionRequest,
    responses(
        (status = 201, description = "Collection created successfully", body = CollectionResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found")
    ),
    tag = "Collections"
)]
pub async fn create_collection(
    State(state): State<AppState>,
    Json(payload): Json<CreateCollectionRequest>,
) -> AppResult<(StatusCode, Json<CollectionResponse>)> {
    validate_required(&payload.name, "Name", 100)?;
    validate_optional(&payload.description, "Description", 1000)?;

    let create_collection = CreateCollection {
        name: payload.name,
        category_id: payload.category_id,
        description: payload.description,
    };

    let collection =
        CollectionRepository::create(&state.db, DEFAULT_USER_ID, &create_collection).await?;
    Ok((StatusCode::CREATED, Json(collection.into())))
}

/// Get a collection by ID
#[utoipa::path(
    get,
    path = "/api/collections/{id}",
    params(
        ("id" = i32, Path, description = "Collection ID")
    ),
    responses(
        (status = 200, description = "Collection details", body = CollectionResponse),
        (status = 404, description = "Collection not found")
    ),
    tag = "Collections"
)]
pub async fn get_collection(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CollectionResponse>> {
    let collection =
        CollectionRepository::find_by_id_and_user(&state.db, id, DEFAULT_USER_ID).await?;
    Ok(Json(collection.into()))
}

/// Update a collection
#[utoipa::path(
    put,
    path = "/api/collections/{id}",
    params(
        ("id" = i32, Path, description = "Collection ID")
    ),
    request_body = UpdateCollectionRequest,
    responses(
        (status = 200, description = "Collection updated successfully", body = CollectionResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Collection not found")
    ),
    tag = "Collections"
)]
pub async fn update_collection(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCollectionRequest>,
) -> AppResult<Json<CollectionResponse>> {
    validate_required(&payload.name, "Name", 100)?;

    let update_collection = UpdateCollection {
        name: payload.name,
        category_id: payload.category_id,
    };

    let collection =
        CollectionRepository::update(&state.db, id, DEFAULT_USER_ID, &update_collection).await?;
    Ok(Json(collection.into()))
}

/// Delete a collection and everything it contains
#[utoipa::path(
    delete,
    path = "/api/collections/{id}",
    params(
        ("id" = i32, Path, description = "Collection ID")
    ),
    responses(
        (status = 204, description = "Collection deleted successfully"),
        (status = 404, description = "Collection not found")
    ),
    tag = "Collections"
)]
pub async fn delete_collection(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    CollectionRepository::delete_by_user(&state.db, id, DEFAULT_USER_ID).await?;
    Ok(StatusCode::NO_CONTENT)
}
