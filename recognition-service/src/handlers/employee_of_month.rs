/// Employee-of-the-month endpoints
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{eom_repo, user_repo};
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::security::TokenManager;
use crate::services::policy::{self, Role};
use crate::services::AuthService;

#[derive(Debug, Deserialize)]
pub struct AnnounceRequest {
    pub employee_id: Uuid,
}

/// GET /api/v1/employee-of-month
///
/// Latest announcement; everyone except superadmins sees only their own
/// department's.
pub async fn latest(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
    user: UserId,
) -> Result<HttpResponse> {
    let (caller, role) = AuthService::new(pool.get_ref().clone(), tokens.get_ref().clone())
        .load_caller(user.0)
        .await?;

    let scope = policy::scope_for(role, &caller.department);
    let record = eom_repo::latest(pool.get_ref(), scope.department_filter())
        .await?
        .ok_or_else(|| AppError::NotFound("No Employee of the Month found".to_string()))?;

    Ok(HttpResponse::Ok().json(record))
}

/// POST /api/v1/employee-of-month
///
/// Admins may only crown employees from their own department.
pub async fn announce(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
    user: UserId,
    payload: web::Json<AnnounceRequest>,
) -> Result<HttpResponse> {
    let (caller, role) = AuthService::new(pool.get_ref().clone(), tokens.get_ref().clone())
        .load_caller(user.0)
        .await?;

    let employee = user_repo::find_by_id(pool.get_ref(), payload.employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    if !policy::can_announce_employee_of_month(role, &caller.department, &employee.department) {
        return Err(AppError::Forbidden(format!(
            "You can only select employees from your department: {}",
            caller.department
        )));
    }

    let month_year = Utc::now().format("%B %Y").to_string();
    let record = eom_repo::create(
        pool.get_ref(),
        employee.id,
        &employee.name,
        &employee.department,
        &month_year,
    )
    .await?;

    tracing::info!(employee = %employee.id, month = %month_year, "Employee of the month announced");
    Ok(HttpResponse::Created().json(record))
}

/// GET /api/v1/employee-of-month/history (superadmin)
pub async fn history(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
    user: UserId,
) -> Result<HttpResponse> {
    let (_caller, role) = AuthService::new(pool.get_ref().clone(), tokens.get_ref().clone())
        .load_caller(user.0)
        .await?;

    if role != Role::Superadmin {
        return Err(AppError::Forbidden("Access denied".to_string()));
    }

    let records = eom_repo::list_all(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(records))
}
