/// Personal stats, leaderboard, and activity-graph endpoints
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;

use crate::db::stats_repo;
use crate::error::Result;
use crate::middleware::UserId;
use crate::security::TokenManager;
use crate::services::policy;
use crate::services::AuthService;

const LEADERBOARD_LIMIT: i64 = 5;

#[derive(Debug, Serialize)]
pub struct MyStatsResponse {
    pub shoutouts_given: i64,
    pub shoutouts_received: i64,
    pub comments_made: i64,
    pub recent: Vec<stats_repo::RecentActivity>,
}

/// GET /api/v1/stats/me
pub async fn my_stats(pool: web::Data<PgPool>, user: UserId) -> Result<HttpResponse> {
    let given = stats_repo::shoutouts_given(pool.get_ref(), user.0).await?;
    let received = stats_repo::shoutouts_received(pool.get_ref(), user.0).await?;
    let comments = stats_repo::comments_made(pool.get_ref(), user.0).await?;
    let recent = stats_repo::recent_activity(pool.get_ref(), user.0).await?;

    Ok(HttpResponse::Ok().json(MyStatsResponse {
        shoutouts_given: given,
        shoutouts_received: received,
        comments_made: comments,
        recent,
    }))
}

/// GET /api/v1/stats/leaderboard
///
/// Top contributors; superadmins see all departments.
pub async fn leaderboard(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
    user: UserId,
) -> Result<HttpResponse> {
    let (caller, role) = AuthService::new(pool.get_ref().clone(), tokens.get_ref().clone())
        .load_caller(user.0)
        .await?;

    let scope = policy::scope_for(role, &caller.department);
    let rows = stats_repo::leaderboard(
        pool.get_ref(),
        scope.department_filter(),
        LEADERBOARD_LIMIT,
    )
    .await?;

    Ok(HttpResponse::Ok().json(rows))
}

/// GET /api/v1/stats/daily-activity
pub async fn daily_activity(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
    user: UserId,
) -> Result<HttpResponse> {
    let (caller, role) = AuthService::new(pool.get_ref().clone(), tokens.get_ref().clone())
        .load_caller(user.0)
        .await?;

    let scope = policy::scope_for(role, &caller.department);
    let rows = stats_repo::daily_activity(pool.get_ref(), scope.department_filter()).await?;

    Ok(HttpResponse::Ok().json(rows))
}

/// GET /api/v1/stats/most-liked
pub async fn most_liked(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
    user: UserId,
) -> Result<HttpResponse> {
    let (caller, role) = AuthService::new(pool.get_ref().clone(), tokens.get_ref().clone())
        .load_caller(user.0)
        .await?;

    let scope = policy::scope_for(role, &caller.department);
    let row = stats_repo::most_liked(pool.get_ref(), scope.department_filter()).await?;

    match row {
        Some(row) => Ok(HttpResponse::Ok().json(row)),
        None => Ok(HttpResponse::Ok()
            .json(serde_json::json!({ "author_name": "No Data", "like_count": 0 }))),
    }
}
