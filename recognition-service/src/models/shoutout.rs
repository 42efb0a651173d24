use chrono::{DateTime, Utc};
/// Shoutout models: the post itself, tagged colleagues, emoji reactions,
/// and comments
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShoutOut {
    pub id: Uuid,
    pub author_id: Uuid,
    pub message: String,
    pub image_url: Option<String>,
    pub department: String,
    pub is_reported: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShoutOutTag {
    pub id: Uuid,
    pub shoutout_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShoutOutReaction {
    pub id: Uuid,
    pub shoutout_id: Uuid,
    pub user_id: Uuid,
    pub emoji: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShoutOutComment {
    pub id: Uuid,
    pub shoutout_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
