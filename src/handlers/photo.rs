use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::handlers::DEFAULT_USER_ID;
use crate::models::Photo;
use crate::repositories::ItemRepository;
use crate::services::{PhotoService, UploadFile};
use crate::state::AppState;

// ============ Response DTOs ============

#[derive(Debug, Serialize, ToSchema)]
pub struct PhotoResponse {
    pub id: i32,
    pub item_id: i32,
    pub url: String,
    pub is_primary: bool,
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
}

impl From<Photo> for PhotoResponse {
    fn from(p: Photo) -> Self {
        Self {
            id: p.id,
            item_id: p.item_id,
            url: p.url,
            is_primary: p.is_primary,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadPhotosResponse {
    pub urls: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PrimaryPhotoResponse {
    pub cover_photo_url: String,
}

// ============ Handlers ============

/// List an item's photos, primary first
#[utoipa::path(
    get,
    path = "/api/items/{id}/photos",
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Photos of the item, primary first", body = [PhotoResponse]),
        (status = 404, description = "Item not found")
    ),
    tag = "Photos"
)]
pub async fn list_photos(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<PhotoResponse>>> {
    let photos = PhotoService::list(&state.db, id, DEFAULT_USER_ID).await?;
    Ok(Json(photos.into_iter().map(|p| p.into()).collect()))
}

/// Upload up to five photos for an item
#[utoipa::path(
    post,
    path = "/api/items/{id}/photos",
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    responses(
        (status = 201, description = "Photos stored", body = UploadPhotosResponse),
        (status = 400, description = "No files, non-image file, oversized file, or photo cap exceeded"),
        (status = 404, description = "Item not found")
    ),
    tag = "Photos"
)]
pub async fn add_photos(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadPhotosResponse>)> {
    // Gate on the item before touching the disk
    ItemRepository::find_by_id_and_user(&state.db, id, DEFAULT_USER_ID).await?;

    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let file_name = field.file_name().map(str::to_string);
        if file_name.is_none() {
            // Ignore non-file form fields
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?.to_vec();

        files.push(UploadFile {
            file_name,
            content_type,
            bytes,
        });
    }

    let urls = state.media.store(&files).await?;

    if let Err(err) = PhotoService::add(&state.db, id, DEFAULT_USER_ID, &urls).await {
        // The rows were never committed; drop the stored files too
        state.media.discard(&urls).await;
        return Err(err);
    }

    Ok((StatusCode::CREATED, Json(UploadPhotosResponse { urls })))
}

/// Promote a photo to primary
#[utoipa::path(
    put,
    path = "/api/items/{item_id}/photos/{photo_id}/primary",
    params(
        ("item_id" = i32, Path, description = "Item ID"),
        ("photo_id" = i32, Path, description = "Photo ID")
    ),
    responses(
        (status = 200, description = "Primary updated", body = PrimaryPhotoResponse),
        (status = 404, description = "Item or photo not found")
    ),
    tag = "Photos"
)]
pub async fn set_primary_photo(
    State(state): State<AppState>,
    Path((item_id, photo_id)): Path<(i32, i32)>,
) -> AppResult<Json<PrimaryPhotoResponse>> {
    let cover_photo_url =
        PhotoService::set_primary(&state.db, item_id, photo_id, DEFAULT_USER_ID).await?;
    Ok(Json(PrimaryPhotoResponse { cover_photo_url }))
}

/// Delete a photo
#[utoipa::path(
    delete,
    path = "/api/items/{item_id}/photos/{photo_id}",
    params(
        ("item_id" = i32, Path, description = "Item ID"),
        ("photo_id" = i32, Path, description = "Photo ID")
    ),
    responses(
        (status = 204, description = "Photo deleted; primary re-elected if needed"),
        (status = 404, description = "Item or photo not found")
    ),
    tag = "Photos"
)]
pub async fn delete_photo(
    State(state): State<AppState>,
    Path((item_id, photo_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    PhotoService::remove(&state.db, item_id, photo_id, DEFAULT_USER_ID).await?;
    Ok(StatusCode::NO_CONTENT)
}
