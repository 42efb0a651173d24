use crate::error::Result;
use crate::models::ShoutOutReaction;
use sqlx::PgPool;
use uuid::Uuid;

/// A user's existing reaction on a shoutout, if any
pub async fn find(
    pool: &PgPool,
    shoutout_id: Uuid,
    user_id: Uuid,
) -> Result<Option<ShoutOutReaction>> {
    let row = sqlx::query_as::<_, ShoutOutReaction>(
        "SELECT * FROM shoutout_reactions WHERE shoutout_id = $1 AND user_id = $2",
    )
    .bind(shoutout_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn create(
    pool: &PgPool,
    shoutout_id: Uuid,
    user_id: Uuid,
    emoji: &str,
) -> Result<ShoutOutReaction> {
    let row = sqlx::query_as::<_, ShoutOutReaction>(
        r#"
        INSERT INTO shoutout_reactions (shoutout_id, user_id, emoji)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(shoutout_id)
    .bind(user_id)
    .bind(emoji)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn update_emoji(pool: &PgPool, reaction_id: Uuid, emoji: &str) -> Result<()> {
    sqlx::query("UPDATE shoutout_reactions SET emoji = $1 WHERE id = $2")
        .bind(emoji)
        .bind(reaction_id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn delete(pool: &PgPool, reaction_id: Uuid) -> Result<()> {
    sqlx::query("DELETE FROM shoutout_reactions WHERE id = $1")
        .bind(reaction_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Per-emoji reaction counts for a batch of shoutouts
pub async fn counts_for(
    pool: &PgPool,
    shoutout_ids: &[Uuid],
) -> Result<Vec<(Uuid, String, i64)>> {
    let rows: Vec<(Uuid, String, i64)> = sqlx::query_as(
        r#"
        SELECT shoutout_id, emoji, COUNT(*)
        FROM shoutout_reactions
        WHERE shoutout_id = ANY($1)
        GROUP BY shoutout_id, emoji
        "#,
    )
    .bind(shoutout_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
