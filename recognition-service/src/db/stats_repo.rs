/// Aggregate queries behind the personal stats, leaderboard, and activity
/// graph endpoints
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::Result;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LeaderboardRow {
    pub author_name: String,
    pub department: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DailyActivityRow {
    pub date: NaiveDate,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MostLikedRow {
    pub author_name: String,
    pub like_count: i64,
}

/// A recent item in the caller's activity feed
#[derive(Debug, Clone, Serialize)]
pub struct RecentActivity {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

pub async fn shoutouts_given(pool: &PgPool, user_id: Uuid) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shoutouts WHERE author_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Times the user was tagged in someone's shoutout
pub async fn shoutouts_received(pool: &PgPool, user_id: Uuid) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shoutout_tags WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

pub async fn comments_made(pool: &PgPool, user_id: Uuid) -> Result<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM shoutout_comments WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

    Ok(count)
}

/// Last few given shoutouts, received tags, and comments, merged newest-first
pub async fn recent_activity(pool: &PgPool, user_id: Uuid) -> Result<Vec<RecentActivity>> {
    let mut recent = Vec::new();

    let given: Vec<(String, DateTime<Utc>)> = sqlx::query_as(
        r#"
        SELECT message, created_at FROM shoutouts
        WHERE author_id = $1
        ORDER BY created_at DESC LIMIT 5
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    recent.extend(given.into_iter().map(|(message, created_at)| RecentActivity {
        kind: "given",
        message,
        created_at,
    }));

    let received: Vec<(String, DateTime<Utc>)> = sqlx::query_as(
        r#"
        SELECT s.message, s.created_at
        FROM shoutouts s
        JOIN shoutout_tags t ON t.shoutout_id = s.id
        WHERE t.user_id = $1
        ORDER BY s.created_at DESC LIMIT 5
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    recent.extend(
        received
            .into_iter()
            .map(|(message, created_at)| RecentActivity {
                kind: "received",
                message,
                created_at,
            }),
    );

    let comments: Vec<(String, DateTime<Utc>)> = sqlx::query_as(
        r#"
        SELECT content, created_at FROM shoutout_comments
        WHERE user_id = $1
        ORDER BY created_at DESC LIMIT 5
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    recent.extend(
        comments
            .into_iter()
            .map(|(message, created_at)| RecentActivity {
                kind: "comment",
                message,
                created_at,
            }),
    );

    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(10);

    Ok(recent)
}

/// Top contributors by authored shoutouts
pub async fn leaderboard(
    pool: &PgPool,
    department: Option<&str>,
    limit: i64,
) -> Result<Vec<LeaderboardRow>> {
    let base = r#"
        SELECT u.name AS author_name, u.department, COUNT(s.id) AS count
        FROM shoutouts s
        JOIN users u ON u.id = s.author_id
    "#;

    let rows = match department {
        Some(dept) => {
            sqlx::query_as::<_, LeaderboardRow>(&format!(
                "{} WHERE u.department = $1 GROUP BY u.name, u.department ORDER BY count DESC LIMIT $2",
                base
            ))
            .bind(dept)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, LeaderboardRow>(&format!(
                "{} GROUP BY u.name, u.department ORDER BY count DESC LIMIT $1",
                base
            ))
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows)
}

/// Shoutouts per day over the trailing week
pub async fn daily_activity(
    pool: &PgPool,
    department: Option<&str>,
) -> Result<Vec<DailyActivityRow>> {
    let rows = match department {
        Some(dept) => {
            sqlx::query_as::<_, DailyActivityRow>(
                r#"
                SELECT created_at::date AS date, COUNT(*) AS count
                FROM shoutouts
                WHERE created_at >= NOW() - INTERVAL '7 days' AND department = $1
                GROUP BY created_at::date
                ORDER BY date
                "#,
            )
            .bind(dept)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, DailyActivityRow>(
                r#"
                SELECT created_at::date AS date, COUNT(*) AS count
                FROM shoutouts
                WHERE created_at >= NOW() - INTERVAL '7 days'
                GROUP BY created_at::date
                ORDER BY date
                "#,
            )
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows)
}

/// The author whose posts collected the most 👍 reactions
pub async fn most_liked(pool: &PgPool, department: Option<&str>) -> Result<Option<MostLikedRow>> {
    let base = r#"
        SELECT u.name AS author_name, COUNT(r.id) AS like_count
        FROM shoutout_reactions r
        JOIN shoutouts s ON s.id = r.shoutout_id
        JOIN users u ON u.id = s.author_id
        WHERE r.emoji = $1
    "#;

    let row = match department {
        Some(dept) => {
            sqlx::query_as::<_, MostLikedRow>(&format!(
                "{} AND u.department = $2 GROUP BY u.name ORDER BY like_count DESC LIMIT 1",
                base
            ))
            .bind("\u{1F44D}")
            .bind(dept)
            .fetch_optional(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, MostLikedRow>(&format!(
                "{} GROUP BY u.name ORDER BY like_count DESC LIMIT 1",
                base
            ))
            .bind("\u{1F44D}")
            .fetch_optional(pool)
            .await?
        }
    };

    Ok(row)
}
