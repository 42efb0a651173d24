use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Employee-of-the-month announcement. Name and department are denormalized
/// at announcement time so the record survives later profile edits.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployeeOfMonth {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub name: String,
    pub department: Option<String>,
    pub month_year: Option<String>,
    pub created_at: DateTime<Utc>,
}
