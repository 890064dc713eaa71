use uuid::Uuid;

use curio::handlers::DEFAULT_USER_ID;
use curio::models::{Category, Collection, CreateCollection, CreateItem, Item, Photo};
use curio::repositories::{
    CategoryRepository, CollectionRepository, ItemRepository, PhotoRepository,
};
use curio::services::PhotoService;
use curio::state::AppState;

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

#[allow(dead_code)]
impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a test category
    pub async fn create_category(&self) -> Category {
        CategoryRepository::create(&self.state.db, &format!("Category {}", Uuid::new_v4()))
            .await
            .unwrap()
    }

    /// Create a test collection (with a fresh category)
    pub async fn create_collection(&self) -> Collection {
        let category = self.create_category().await;

        let input = CreateCollection {
            name: format!("Test Collection {}", Uuid::new_v4()),
            category_id: category.id,
            description: Some("Test collection description".to_string()),
        };

        CollectionRepository::create(&self.state.db, DEFAULT_USER_ID, &input)
            .await
            .unwrap()
    }

    /// Create a test item
    pub async fn create_item(&self, collection_id: i32) -> Item {
        let input = CreateItem {
            title: format!("Test Item {}", Uuid::new_v4()),
            description: Some("Test item description".to_string()),
            acquired_date: None,
        };

        ItemRepository::create(&self.state.db, collection_id, DEFAULT_USER_ID, &input)
            .await
            .unwrap()
    }

    /// Create a test item inside a fresh collection
    pub async fn create_item_with_collection(&self) -> Item {
        let collection = self.create_collection().await;
        self.create_item(collection.id).await
    }

    /// Attach `count` photos to an item through the lifecycle service, so
    /// primary election behaves exactly as it does in production
    pub async fn add_photos(&self, item_id: i32, count: usize) -> Vec<Photo> {
        let urls: Vec<String> = (0..count)
            .map(|_| format!("/uploads/items/{}.png", Uuid::new_v4()))
            .collect();

        PhotoService::add(&self.state.db, item_id, DEFAULT_USER_ID, &urls)
            .await
            .unwrap();

        PhotoRepository::list_by_item(&self.state.db, item_id)
            .await
            .unwrap()
    }

    /// Current photo list for an item, primary first
    pub async fn photos(&self, item_id: i32) -> Vec<Photo> {
        PhotoRepository::list_by_item(&self.state.db, item_id)
            .await
            .unwrap()
    }

    /// Re-read an item row
    pub async fn item(&self, item_id: i32) -> Item {
        ItemRepository::find_by_id_and_user(&self.state.db, item_id, DEFAULT_USER_ID)
            .await
            .unwrap()
    }
}
