use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub id: i32,
    pub item_id: i32,
    pub url: String,
    pub is_primary: bool,
    pub created_at: OffsetDateTime,
}
