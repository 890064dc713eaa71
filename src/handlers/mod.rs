pub mod category;
pub mod collection;
pub mod common;
pub mod item;
pub mod photo;

pub use category::{list_categories, CategoryResponse};
pub use collection::{
    create_collection, delete_collection, get_collection, list_collections, update_collection,
    CollectionResponse, CreateCollectionRequest, UpdateCollectionRequest,
};
pub use common::{validate_optional, validate_required, DEFAULT_USER_ID};
pub use item::{
    create_item, delete_item, get_item, list_items, update_item, CreateItemRequest, ItemResponse,
    UpdateItemRequest,
};
pub use photo::{
    add_photos, delete_photo, list_photos, set_primary_photo, PhotoResponse, PrimaryPhotoResponse,
    UploadPhotosResponse,
};
