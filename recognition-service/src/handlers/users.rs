/// Current-user endpoints: profile lookup, profile update, and the
/// same-department colleague list used by the tagging dropdown
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::UserSummary;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub joining_date: Option<String>,
    pub current_project: Option<String>,
    pub group_members: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ColleagueEntry {
    pub id: Uuid,
    pub name: String,
}

/// GET /api/v1/users/me
pub async fn get_current_user(pool: web::Data<PgPool>, user: UserId) -> Result<HttpResponse> {
    let caller = user_repo::find_by_id(pool.get_ref(), user.0)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(UserSummary::from(&caller)))
}

/// PATCH /api/v1/users/me
pub async fn update_profile(
    pool: web::Data<PgPool>,
    user: UserId,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse> {
    if let Some(ref project) = payload.current_project {
        if project.len() > 255 {
            return Err(AppError::Validation(
                "Current project exceeds maximum length of 255 characters".to_string(),
            ));
        }
    }

    let group_members = payload.group_members.as_ref().map(|m| m.join(","));

    let updated = user_repo::update_profile(
        pool.get_ref(),
        user.0,
        payload.joining_date.as_deref(),
        payload.current_project.as_deref(),
        group_members.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(UserSummary::from(&updated)))
}

/// GET /api/v1/users/department
///
/// Colleagues in the caller's own department, for tagging
pub async fn department_colleagues(
    pool: web::Data<PgPool>,
    user: UserId,
) -> Result<HttpResponse> {
    let caller = user_repo::find_by_id(pool.get_ref(), user.0)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let colleagues = user_repo::list_by_department(pool.get_ref(), &caller.department).await?;

    let entries: Vec<ColleagueEntry> = colleagues
        .iter()
        .map(|u| ColleagueEntry {
            id: u.id,
            name: u.name.clone(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(entries))
}
