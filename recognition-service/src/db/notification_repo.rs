use crate::error::Result;
use crate::models::Notification;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    message: &str,
    department: Option<&str>,
) -> Result<Notification> {
    let row = sqlx::query_as::<_, Notification>(
        r#"
        INSERT INTO notifications (user_id, message, department)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(message)
    .bind(department)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// All notifications, newest first
pub async fn list(pool: &PgPool) -> Result<Vec<Notification>> {
    let rows =
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?;

    Ok(rows)
}
