/// Announcement endpoints
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::db::{notification_repo, user_repo};
use crate::error::{AppError, Result};
use crate::middleware::UserId;

#[derive(Debug, Deserialize)]
pub struct CreateNotificationRequest {
    pub message: String,
}

/// POST /api/v1/notifications
pub async fn create_notification(
    pool: web::Data<PgPool>,
    user: UserId,
    payload: web::Json<CreateNotificationRequest>,
) -> Result<HttpResponse> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("Message cannot be empty".to_string()));
    }

    let caller = user_repo::find_by_id(pool.get_ref(), user.0)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let notification = notification_repo::create(
        pool.get_ref(),
        caller.id,
        message,
        Some(&caller.department),
    )
    .await?;

    Ok(HttpResponse::Created().json(notification))
}

/// GET /api/v1/notifications
pub async fn list_notifications(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let notifications = notification_repo::list(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(notifications))
}
