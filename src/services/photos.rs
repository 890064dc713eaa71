use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::error::{AppError, AppResult};
use crate::models::Photo;
use crate::repositories::{ItemRepository, PhotoRepository};

/// Fixed maximum number of photos allowed per item
pub const MAX_PHOTOS: u64 = 5;

/// Photo lifecycle orchestration.
///
/// Sequences photo-row and item-row writes so that, after every operation,
/// an item with photos has exactly one primary and its cover URL mirrors
/// that photo, and an item without photos has a null cover. Each multi-step
/// sequence runs inside one transaction, closing the window in which a
/// concurrent request could observe zero or two primaries.
pub struct PhotoService;

impl PhotoService {
    /// Ordered photo list for an owned item
    pub async fn list(
        db: &DatabaseConnection,
        item_id: i32,
        user_id: i32,
    ) -> AppResult<Vec<Photo>> {
        ItemRepository::find_by_id_and_user(db, item_id, user_id).await?;
        PhotoRepository::list_by_item(db, item_id).await
    }

    /// Attach a batch of already-stored photo URLs to an item.
    ///
    /// The whole batch is rejected when it would push the item past
    /// MAX_PHOTOS. When the item had no primary beforehand, the first photo
    /// of the fresh list (lowest id, i.e. first of the batch) is elected; an
    /// existing primary is never displaced by an add.
    pub async fn add(
        db: &DatabaseConnection,
        item_id: i32,
        user_id: i32,
        urls: &[String],
    ) -> AppResult<()> {
        ItemRepository::find_by_id_and_user(db, item_id, user_id).await?;

        let existing = PhotoRepository::count_by_item(db, item_id).await?;
        if existing + urls.len() as u64 > MAX_PHOTOS {
            return Err(AppError::Capacity(format!(
                "max {MAX_PHOTOS} photos per item"
            )));
        }

        let txn = db.begin().await?;

        PhotoRepository::insert_batch(&txn, item_id, urls).await?;

        let photos = PhotoRepository::list_by_item(&txn, item_id).await?;
        let has_primary = photos.iter().any(|p| p.is_primary);

        if !has_primary {
            if let Some(first) = photos.first() {
                PhotoRepository::mark_primary(&txn, item_id, first.id).await?;
                ItemRepository::set_cover_photo(&txn, item_id, Some(first.url.clone())).await?;
            }
        }

        txn.commit().await?;

        Ok(())
    }

    /// Promote a photo to primary and refresh the item's cover URL
    pub async fn set_primary(
        db: &DatabaseConnection,
        item_id: i32,
        photo_id: i32,
        user_id: i32,
    ) -> AppResult<String> {
        ItemRepository::find_by_id_and_user(db, item_id, user_id).await?;
        let photo = PhotoRepository::find_by_id(db, item_id, photo_id).await?;

        let txn = db.begin().await?;

        PhotoRepository::clear_primary(&txn, item_id).await?;
        PhotoRepository::mark_primary(&txn, item_id, photo.id).await?;
        ItemRepository::set_cover_photo(&txn, item_id, Some(photo.url.clone())).await?;

        txn.commit().await?;

        Ok(photo.url)
    }

    /// Delete a photo; when it was the primary, re-elect the lowest-id
    /// remaining photo, or null the cover if none remain
    pub async fn remove(
        db: &DatabaseConnection,
        item_id: i32,
        photo_id: i32,
        user_id: i32,
    ) -> AppResult<()> {
        ItemRepository::find_by_id_and_user(db, item_id, user_id).await?;
        let photo = PhotoRepository::find_by_id(db, item_id, photo_id).await?;

        let txn = db.begin().await?;

        PhotoRepository::delete(&txn, item_id, photo_id).await?;

        if photo.is_primary {
            let remaining = PhotoRepository::list_by_item(&txn, item_id).await?;

            match remaining.first() {
                Some(next) => {
                    PhotoRepository::clear_primary(&txn, item_id).await?;
                    PhotoRepository::mark_primary(&txn, item_id, next.id).await?;
                    ItemRepository::set_cover_photo(&txn, item_id, Some(next.url.clone()))
                        .await?;
                }
                None => {
                    ItemRepository::set_cover_photo(&txn, item_id, None).await?;
                }
            }
        }

        txn.commit().await?;

        Ok(())
    }
}
