use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::entity::item_photo::{self, ActiveModel, Column, Entity as ItemPhotoEntity};
use crate::error::{AppError, AppResult};
use crate::models::Photo;

/// Photo repository for database operations.
///
/// Methods are generic over the connection so callers can run the
/// multi-step primary/cover sequences inside a single transaction.
pub struct PhotoRepository;

impl PhotoRepository {
    /// List an item's photos, primary first, then oldest (lowest id) first
    pub async fn list_by_item<C: ConnectionTrait>(db: &C, item_id: i32) -> AppResult<Vec<Photo>> {
        let models = ItemPhotoEntity::find()
            .filter(Column::ItemId.eq(item_id))
            .order_by_desc(Column::IsPrimary)
            .order_by_asc(Column::Id)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Count photos currently stored for an item
    pub async fn count_by_item<C: ConnectionTrait>(db: &C, item_id: i32) -> AppResult<u64> {
        let count = ItemPhotoEntity::find()
            .filter(Column::ItemId.eq(item_id))
            .count(db)
            .await?;

        Ok(count)
    }

    /// Scoped lookup: a photo id belonging to a different item is NotFound
    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        item_id: i32,
        photo_id: i32,
    ) -> AppResult<Photo> {
        let model = ItemPhotoEntity::find()
            .filter(Column::Id.eq(photo_id))
            .filter(Column::ItemId.eq(item_id))
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Photo".to_string()))?;

        Ok(model.into())
    }

    /// Insert one non-primary row per URL as a single multi-row statement
    pub async fn insert_batch<C: ConnectionTrait>(
        db: &C,
        item_id: i32,
        urls: &[String],
    ) -> AppResult<()> {
        if urls.is_empty() {
            return Ok(());
        }

        let models = urls.iter().map(|url| ActiveModel {
            item_id: Set(item_id),
            url: Set(url.clone()),
            is_primary: Set(false),
            created_at: Set(time::OffsetDateTime::now_utc()),
            ..Default::default()
        });

        ItemPhotoEntity::insert_many(models).exec(db).await?;

        Ok(())
    }

    /// Unset the primary flag on every photo of the item
    pub async fn clear_primary<C: ConnectionTrait>(db: &C, item_id: i32) -> AppResult<()> {
        ItemPhotoEntity::update_many()
            .col_expr(Column::IsPrimary, Expr::value(false))
            .filter(Column::ItemId.eq(item_id))
            .exec(db)
            .await?;

        Ok(())
    }

    /// Set the primary flag on exactly the given photo.
    ///
    /// Callers must clear_primary first to keep at most one flag set.
    pub async fn mark_primary<C: ConnectionTrait>(
        db: &C,
        item_id: i32,
        photo_id: i32,
    ) -> AppResult<()> {
        let result = ItemPhotoEntity::update_many()
            .col_expr(Column::IsPrimary, Expr::value(true))
            .filter(Column::Id.eq(photo_id))
            .filter(Column::ItemId.eq(item_id))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Photo".to_string()));
        }

        Ok(())
    }

    /// Remove the row, scoped to the item
    pub async fn delete<C: ConnectionTrait>(db: &C, item_id: i32, photo_id: i32) -> AppResult<()> {
        let result = ItemPhotoEntity::delete_many()
            .filter(Column::Id.eq(photo_id))
            .filter(Column::ItemId.eq(item_id))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Photo".to_string()));
        }

        Ok(())
    }
}

// Conversion from SeaORM model to our domain model
impl From<item_photo::Model> for Photo {
    fn from(m: item_photo::Model) -> Self {
        Self {
            id: m.id,
            item_id: m.item_id,
            url: m.url,
            is_primary: m.is_primary,
            created_at: m.created_at,
        }
    }
}
