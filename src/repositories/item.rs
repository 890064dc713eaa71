use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::entity::collection::{Column as CollectionColumn, Entity as CollectionEntity};
use crate::entity::item::{self, ActiveModel, Column, Entity as ItemEntity};
use crate::entity::item_photo::{Column as PhotoColumn, Entity as ItemPhotoEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateItem, Item, UpdateItem};

/// Item repository for database operations
pub struct ItemRepository;

impl ItemRepository {
    /// Find an item scoped to the owning user.
    ///
    /// Every photo operation uses this as its existence gate.
    pub async fn find_by_id_and_user<C: ConnectionTrait>(
        db: &C,
        item_id: i32,
        user_id: i32,
    ) -> AppResult<Item> {
        let model = ItemEntity::find_by_id(item_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Item".to_string()))?;

        Self::verify_collection_ownership(db, model.collection_id, user_id).await?;

        Ok(model.into())
    }

    /// List items of a collection, newest first
    pub async fn list_by_collection(
        db: &DatabaseConnection,
        collection_id: i32,
        user_id: i32,
    ) -> AppResult<Vec<Item>> {
        Self::verify_collection_ownership(db, collection_id, user_id).await?;

        let models = ItemEntity::find()
            .filter(Column::CollectionId.eq(collection_id))
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Create a new item in a collection the user owns.
    ///
    /// The cover URL starts out null; only the photo lifecycle writes it.
    pub async fn create(
        db: &DatabaseConnection,
        collection_id: i32,
        user_id: i32,
        input: &CreateItem,
    ) -> AppResult<Item> {
        Self::verify_collection_ownership(db, collection_id, user_id).await?;

        let model = ActiveModel {
            collection_id: Set(collection_id),
            title: Set(input.title.trim().to_string()),
            description: Set(input.description.clone()),
            acquired_date: Set(input.acquired_date),
            cover_photo_url: Set(None),
            created_at: Set(time::OffsetDateTime::now_utc()),
            ..Default::default()
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// Update title and description (with ownership check)
    pub async fn update(
        db: &DatabaseConnection,
        item_id: i32,
        user_id: i32,
        input: &UpdateItem,
    ) -> AppResult<Item> {
        let model = ItemEntity::find_by_id(item_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Item".to_string()))?;

        Self::verify_collection_ownership(db, model.collection_id, user_id).await?;

        let mut active: ActiveModel = model.into();
        active.title = Set(input.title.trim().to_string());
        active.description = Set(input.description.clone());

        let result = active.update(db).await?;
        Ok(result.into())
    }

    /// Delete an item together with its photo rows
    pub async fn delete(db: &DatabaseConnection, item_id: i32, user_id: i32) -> AppResult<()> {
        Self::find_by_id_and_user(db, item_id, user_id).await?;

        let txn = db.begin().await?;

        ItemPhotoEntity::delete_many()
            .filter(PhotoColumn::ItemId.eq(item_id))
            .exec(&txn)
            .await?;
        ItemEntity::delete_by_id(item_id).exec(&txn).await?;

        txn.commit().await?;

        Ok(())
    }

    /// Unconditionally overwrite the denormalized cover field.
    ///
    /// The caller always supplies the freshly-known URL, or None when the
    /// item has no photos left.
    pub async fn set_cover_photo<C: ConnectionTrait>(
        db: &C,
        item_id: i32,
        url: Option<String>,
    ) -> AppResult<()> {
        ItemEntity::update_many()
            .col_expr(Column::CoverPhotoUrl, Expr::value(url))
            .filter(Column::Id.eq(item_id))
            .exec(db)
            .await?;

        Ok(())
    }

    /// Verify that the user owns the collection
    async fn verify_collection_ownership<C: ConnectionTrait>(
        db: &C,
        collection_id: i32,
        user_id: i32,
    ) -> AppResult<()> {
        CollectionEntity::find_by_id(collection_id)
            .filter(CollectionColumn::UserId.eq(user_id))
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Collection".to_string()))?;

        Ok(())
    }
}

// Conversion from SeaORM model to our domain model
impl From<item::Model> for Item {
    fn from(m: item::Model) -> Self {
        Self {
            id: m.id,
            collection_id: m.collection_id,
            title: m.title,
            description: m.description,
            acquired_date: m.acquired_date,
            cover_photo_url: m.cover_photo_url,
            created_at: m.created_at,
        }
    }
}
