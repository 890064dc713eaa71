use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: i32,
    pub user_id: i32,
    pub category_id: i32,
    pub category_label: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateCollection {
    pub name: String,
    pub category_id: i32,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCollection {
    pub name: String,
    pub category_id: i32,
}
