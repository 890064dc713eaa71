use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: i32,
    pub collection_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub acquired_date: Option<Date>,
    /// Mirrors the primary photo's URL; null iff the item has no photos
    pub cover_photo_url: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateItem {
    pub title: String,
    pub description: Option<String>,
    pub acquired_date: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItem {
    pub title: String,
    pub description: Option<String>,
}
