use crate::error::Result;
use crate::models::ShoutOutComment;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn create(
    pool: &PgPool,
    shoutout_id: Uuid,
    user_id: Uuid,
    content: &str,
) -> Result<ShoutOutComment> {
    let row = sqlx::query_as::<_, ShoutOutComment>(
        r#"
        INSERT INTO shoutout_comments (shoutout_id, user_id, content)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(shoutout_id)
    .bind(user_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Comments on one shoutout, oldest first
pub async fn list_by_shoutout(pool: &PgPool, shoutout_id: Uuid) -> Result<Vec<ShoutOutComment>> {
    let rows = sqlx::query_as::<_, ShoutOutComment>(
        r#"
        SELECT * FROM shoutout_comments
        WHERE shoutout_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(shoutout_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Comment counts for a batch of shoutouts
pub async fn counts_for(pool: &PgPool, shoutout_ids: &[Uuid]) -> Result<Vec<(Uuid, i64)>> {
    let rows: Vec<(Uuid, i64)> = sqlx::query_as(
        r#"
        SELECT shoutout_id, COUNT(*)
        FROM shoutout_comments
        WHERE shoutout_id = ANY($1)
        GROUP BY shoutout_id
        "#,
    )
    .bind(shoutout_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
