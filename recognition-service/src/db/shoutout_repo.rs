use crate::error::{AppError, Result};
use crate::models::ShoutOut;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Shoutout row joined with its author's display name
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ShoutOutWithAuthor {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub message: String,
    pub image_url: Option<String>,
    pub department: String,
    pub is_reported: bool,
    pub created_at: DateTime<Utc>,
}

/// Create a shoutout and its colleague tags in one transaction
pub async fn create(
    pool: &PgPool,
    author_id: Uuid,
    message: &str,
    image_url: Option<&str>,
    department: &str,
    tagged_user_ids: &[Uuid],
) -> Result<ShoutOut> {
    let mut tx = pool.begin().await?;

    let shoutout = sqlx::query_as::<_, ShoutOut>(
        r#"
        INSERT INTO shoutouts (author_id, message, image_url, department)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(author_id)
    .bind(message)
    .bind(image_url)
    .bind(department)
    .fetch_one(&mut *tx)
    .await?;

    for user_id in tagged_user_ids {
        sqlx::query("INSERT INTO shoutout_tags (shoutout_id, user_id) VALUES ($1, $2)")
            .bind(shoutout.id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| match e {
                // An unknown tagged colleague fails the whole creation
                sqlx::Error::Database(ref db) if db.constraint().is_some() => {
                    AppError::Validation(format!("Unknown tagged user: {}", user_id))
                }
                other => AppError::Database(other),
            })?;
    }

    tx.commit().await?;
    Ok(shoutout)
}

/// Department-scoped feed, newest first
pub async fn feed(pool: &PgPool, department: Option<&str>, limit: i64) -> Result<Vec<ShoutOut>> {
    let rows = match department {
        Some(dept) => {
            sqlx::query_as::<_, ShoutOut>(
                r#"
                SELECT * FROM shoutouts
                WHERE department = $1
                ORDER BY created_at DESC
                LIMIT $2
                "#,
            )
            .bind(dept)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, ShoutOut>(
                "SELECT * FROM shoutouts ORDER BY created_at DESC LIMIT $1",
            )
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows)
}

pub async fn find_by_id(pool: &PgPool, shoutout_id: Uuid) -> Result<Option<ShoutOut>> {
    let row = sqlx::query_as::<_, ShoutOut>("SELECT * FROM shoutouts WHERE id = $1")
        .bind(shoutout_id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// All shoutouts a user authored, newest first
pub async fn by_author(pool: &PgPool, author_id: Uuid) -> Result<Vec<ShoutOut>> {
    let rows = sqlx::query_as::<_, ShoutOut>(
        "SELECT * FROM shoutouts WHERE author_id = $1 ORDER BY created_at DESC",
    )
    .bind(author_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn update_message(pool: &PgPool, shoutout_id: Uuid, message: &str) -> Result<ShoutOut> {
    let row = sqlx::query_as::<_, ShoutOut>(
        r#"
        UPDATE shoutouts SET message = $1 WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(message)
    .bind(shoutout_id)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn delete(pool: &PgPool, shoutout_id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM shoutouts WHERE id = $1")
        .bind(shoutout_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn mark_reported(pool: &PgPool, shoutout_id: Uuid) -> Result<ShoutOut> {
    let row = sqlx::query_as::<_, ShoutOut>(
        r#"
        UPDATE shoutouts SET is_reported = TRUE WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(shoutout_id)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Moderation listing joined with author names, optionally scoped to a
/// department and/or restricted to reported posts
pub async fn moderation_list(
    pool: &PgPool,
    department: Option<&str>,
    reported_only: bool,
) -> Result<Vec<ShoutOutWithAuthor>> {
    let base = r#"
        SELECT s.id, s.author_id, u.name AS author_name, s.message,
               s.image_url, s.department, s.is_reported, s.created_at
        FROM shoutouts s
        JOIN users u ON u.id = s.author_id
    "#;

    let rows = match (department, reported_only) {
        (Some(dept), true) => {
            sqlx::query_as::<_, ShoutOutWithAuthor>(&format!(
                "{} WHERE s.department = $1 AND s.is_reported = TRUE ORDER BY s.created_at DESC",
                base
            ))
            .bind(dept)
            .fetch_all(pool)
            .await?
        }
        (Some(dept), false) => {
            sqlx::query_as::<_, ShoutOutWithAuthor>(&format!(
                "{} WHERE s.department = $1 ORDER BY s.created_at DESC",
                base
            ))
            .bind(dept)
            .fetch_all(pool)
            .await?
        }
        (None, true) => {
            sqlx::query_as::<_, ShoutOutWithAuthor>(&format!(
                "{} WHERE s.is_reported = TRUE ORDER BY s.created_at DESC",
                base
            ))
            .fetch_all(pool)
            .await?
        }
        (None, false) => {
            sqlx::query_as::<_, ShoutOutWithAuthor>(&format!(
                "{} ORDER BY s.created_at DESC",
                base
            ))
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows)
}

/// Tags for a batch of shoutouts: (shoutout_id, tagged user id, tagged name)
pub async fn tags_for(
    pool: &PgPool,
    shoutout_ids: &[Uuid],
) -> Result<Vec<(Uuid, Uuid, String)>> {
    let rows: Vec<(Uuid, Uuid, String)> = sqlx::query_as(
        r#"
        SELECT t.shoutout_id, t.user_id, u.name
        FROM shoutout_tags t
        JOIN users u ON u.id = t.user_id
        WHERE t.shoutout_id = ANY($1)
        "#,
    )
    .bind(shoutout_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Author display names for a batch of shoutout authors
pub async fn author_names(pool: &PgPool, author_ids: &[Uuid]) -> Result<Vec<(Uuid, String)>> {
    let rows: Vec<(Uuid, String)> =
        sqlx::query_as("SELECT id, name FROM users WHERE id = ANY($1)")
            .bind(author_ids)
            .fetch_all(pool)
            .await?;

    Ok(rows)
}
