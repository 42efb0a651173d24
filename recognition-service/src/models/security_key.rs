use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One-time registration token gating admin self-registration.
/// Once `is_used` flips to true it can never be consumed again.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SecurityKey {
    pub id: Uuid,
    pub key: String,
    pub is_used: bool,
    pub created_at: DateTime<Utc>,
}
