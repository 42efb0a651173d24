use crate::error::Result;
use crate::models::SecurityKey;
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a freshly generated key
pub async fn create(pool: &PgPool, key: &str) -> Result<SecurityKey> {
    let row = sqlx::query_as::<_, SecurityKey>(
        r#"
        INSERT INTO security_keys (key)
        VALUES ($1)
        RETURNING *
        "#,
    )
    .bind(key)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// List all keys, newest first
pub async fn list(pool: &PgPool) -> Result<Vec<SecurityKey>> {
    let rows =
        sqlx::query_as::<_, SecurityKey>("SELECT * FROM security_keys ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?;

    Ok(rows)
}

/// Delete a key by id; returns false when no such key
pub async fn delete(pool: &PgPool, key_id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM security_keys WHERE id = $1")
        .bind(key_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Atomically consume an unused key.
///
/// The conditional UPDATE is the concurrency guard: of any number of
/// simultaneous registrations presenting the same key, exactly one sees a
/// row come back. Runs on the registration transaction so a failed user
/// insert rolls the consumption back.
pub async fn consume<'e, E>(executor: E, key: &str) -> Result<Option<Uuid>>
where
    E: sqlx::PgExecutor<'e>,
{
    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        UPDATE security_keys
        SET is_used = TRUE
        WHERE key = $1 AND is_used = FALSE
        RETURNING id
        "#,
    )
    .bind(key)
    .fetch_optional(executor)
    .await?;

    Ok(row.map(|(id,)| id))
}

/// Look a key up by its value
pub async fn find_by_key(pool: &PgPool, key: &str) -> Result<Option<SecurityKey>> {
    let row = sqlx::query_as::<_, SecurityKey>("SELECT * FROM security_keys WHERE key = $1")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}
