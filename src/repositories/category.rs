use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entity::category::{self, ActiveModel, Column, Entity as CategoryEntity};
use crate::error::AppResult;
use crate::models::Category;

/// Category repository; categories are reference data seeded by migration
pub struct CategoryRepository;

impl CategoryRepository {
    /// List all categories ordered by label
    pub async fn list(db: &DatabaseConnection) -> AppResult<Vec<Category>> {
        let models = CategoryEntity::find()
            .order_by_asc(Column::Label)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Create a category (used by seeds and test fixtures)
    pub async fn create(db: &DatabaseConnection, label: &str) -> AppResult<Category> {
        let model = ActiveModel {
            label: Set(label.to_string()),
            ..Default::default()
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }
}

impl From<category::Model> for Category {
    fn from(m: category::Model) -> Self {
        Self {
            id: m.id,
            label: m.label,
        }
    }
}
