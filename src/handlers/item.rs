use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::handlers::{validate_optional, validate_required, DEFAULT_USER_ID};
use crate::models::{CreateItem, Item, UpdateItem};
use crate::repositories::ItemRepository;
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateItemRequest {
    pub title: String,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub acquired_date: Option<time::Date>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateItemRequest {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemResponse {
    pub id: i32,
    pub collection_id: i32,
    pub title: String,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub acquired_date: Option<time::Date>,
    pub cover_photo_url: Option<String>,
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
}

impl From<Item> for ItemResponse {
    fn from(i: Item) -> Self {
        Self {
            id: i.id,
            collection_id: i.collection_id,
            title: i.title,
            description: i.description,
            acquired_date: i.acquired_date,
            cover_photo_url: i.cover_photo_url,
            created_at: i.created_at,
        }
    }
}

// ============ Handlers ============

/// List items of a collection
#[utoipa::path(
    get,
    path = "/api/collections/{id}/items",
    params(
        ("id" = i32, Path, description = "Collection ID")
    ),
    responses(
        (status = 200, description = "Items of the collection", body = [ItemResponse]),
        (status = 404, description = "Collection not found")
    ),
    tag = "Items"
)]
pub async fn list_items(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<ItemResponse>>> {
    let items = ItemRepository::list_by_collection(&state.db, id, DEFAULT_USER_ID).await?;
    Ok(Json(items.into_iter().map(|i| i.into()).collect()))
}

/// Create a new item in a collection
#[utoipa::path(
    post,
    path = "/api/collections/{id}/items",
    params(
        ("id" = i32, Path, description = "Collection ID")
    ),
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created successfully", body = ItemResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Collection not found")
    ),
    tag = "Items"
)]
pub async fn create_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CreateItemRequest>,
) -> AppResult<(StatusCode, Json<ItemResponse>)> {
    validate_required(&payload.title, "Title", 150)?;
    validate_optional(&payload.description, "Description", 2000)?;

    let create_item = CreateItem {
        title: payload.title,
        description: payload.description,
        acquired_date: payload.acquired_date,
    };

    let item = ItemRepository::create(&state.db, id, DEFAULT_USER_ID, &create_item).await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/api/items/{id}",
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item details", body = ItemResponse),
        (status = 404, description = "Item not found")
    ),
    tag = "Items"
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ItemResponse>> {
    let item = ItemRepository::find_by_id_and_user(&state.db, id, DEFAULT_USER_ID).await?;
    Ok(Json(item.into()))
}

/// Update an item's title and description
#[utoipa::path(
    put,
    path = "/api/items/{id}",
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Item updated successfully", body = ItemResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Item not found")
    ),
    tag = "Items"
)]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateItemRequest>,
) -> AppResult<Json<ItemResponse>> {
    validate_required(&payload.title, "Title", 150)?;
    validate_optional(&payload.description, "Description", 2000)?;

    let update_item = UpdateItem {
        title: payload.title,
        description: payload.description,
    };

    let item = ItemRepository::update(&state.db, id, DEFAULT_USER_ID, &update_item).await?;
    Ok(Json(item.into()))
}

/// Delete an item and its photos
#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    responses(
        (status = 204, description = "Item deleted successfully"),
        (status = 404, description = "Item not found")
    ),
    tag = "Items"
)]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    ItemRepository::delete(&state.db, id, DEFAULT_USER_ID).await?;
    Ok(StatusCode::NO_CONTENT)
}
