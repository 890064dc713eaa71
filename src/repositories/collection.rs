use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::entity::category::{self, Entity as CategoryEntity};
use crate::entity::collection::{self, ActiveModel, Column, Entity as CollectionEntity};
use crate::entity::item::{Column as ItemColumn, Entity as ItemEntity};
use crate::entity::item_photo::{Column as PhotoColumn, Entity as ItemPhotoEntity};
use crate::error::{AppError, AppResult};
use crate::models::{Collection, CreateCollection, UpdateCollection};

/// Collection repository for database operations
pub struct CollectionRepository;

impl CollectionRepository {
    /// List the user's collections with their category label, newest first
    pub async fn list_by_user(db: &DatabaseConnection, user_id: i32) -> AppResult<Vec<Collection>> {
        let rows = CollectionEntity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .find_also_related(CategoryEntity)
            .all(db)
            .await?;

        Ok(rows.into_iter().map(from_row).collect())
    }

    /// Find a collection by ID (with ownership check)
    pub async fn find_by_id_and_user(
        db: &DatabaseConnection,
        id: i32,
        user_id: i32,
    ) -> AppResult<Collection> {
        let row = CollectionEntity::find_by_id(id)
            .filter(Column::UserId.eq(user_id))
            .find_also_related(CategoryEntity)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Collection".to_string()))?;

        Ok(from_row(row))
    }

    /// Create a new collection under an existing category
    pub async fn create(
        db: &DatabaseConnection,
        user_id: i32,
        input: &CreateCollection,
    ) -> AppResult<Collection> {
        let category = Self::find_category(db, input.category_id).await?;

        let model = ActiveModel {
            user_id: Set(user_id),
            category_id: Set(input.category_id),
            name: Set(input.name.trim().to_string()),
            description: Set(input.description.clone()),
            created_at: Set(time::OffsetDateTime::now_utc()),
            ..Default::default()
        };

        let result = model.insert(db).await?;
        Ok(from_row((result, Some(category))))
    }

    /// Update name and category (with ownership check)
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        user_id: i32,
        input: &UpdateCollection,
    ) -> AppResult<Collection> {
        let model = CollectionEntity::find_by_id(id)
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Collection".to_string()))?;

        let category = Self::find_category(db, input.category_id).await?;

        let mut active: ActiveModel = model.into();
        active.name = Set(input.name.trim().to_string());
        active.category_id = Set(input.category_id);

        let result = active.update(db).await?;
        Ok(from_row((result, Some(category))))
    }

    /// Delete a collection together with its items and their photo rows
    pub async fn delete_by_user(db: &DatabaseConnection, id: i32, user_id: i32) -> AppResult<()> {
        CollectionEntity::find_by_id(id)
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Collection".to_string()))?;

        let txn = db.begin().await?;

        let item_ids: Vec<i32> = ItemEntity::find()
            .select_only()
            .column(ItemColumn::Id)
            .filter(ItemColumn::CollectionId.eq(id))
            .into_tuple()
            .all(&txn)
            .await?;

        if !item_ids.is_empty() {
            ItemPhotoEntity::delete_many()
                .filter(PhotoColumn::ItemId.is_in(item_ids))
                .exec(&txn)
                .await?;
            ItemEntity::delete_many()
                .filter(ItemColumn::CollectionId.eq(id))
                .exec(&txn)
                .await?;
        }

        CollectionEntity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        Ok(())
    }

    async fn find_category<C: ConnectionTrait>(
        db: &C,
        category_id: i32,
    ) -> AppResult<category::Model> {
        CategoryEntity::find_by_id(category_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Category".to_string()))
    }
}

fn from_row((model, category): (collection::Model, Option<category::Model>)) -> Collection {
    Collection {
        id: model.id,
        user_id: model.user_id,
        category_id: model.category_id,
        category_label: category.map(|c| c.label).unwrap_or_default(),
        name: model.name,
        description: model.description,
        created_at: model.created_at,
    }
}
