/// Admin management endpoints: employee/admin listings, deletion,
/// suspension, and the dashboard summary. Role gates follow the policy
/// table; department scoping comes from the caller's visibility scope.
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::UserSummary;
use crate::security::TokenManager;
use crate::services::policy::{self, Role, ROLE_ADMIN, ROLE_EMPLOYEE};
use crate::services::AuthService;

#[derive(Debug, Deserialize)]
pub struct SuspendQuery {
    pub suspend: bool,
}

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_users: i64,
    pub total_admins: i64,
    pub total_employees: i64,
}

async fn load_caller(
    pool: &web::Data<PgPool>,
    tokens: &web::Data<TokenManager>,
    user: &UserId,
) -> Result<(crate::models::User, Role)> {
    AuthService::new(pool.get_ref().clone(), tokens.get_ref().clone())
        .load_caller(user.0)
        .await
}

/// GET /api/v1/admin/employees
///
/// Superadmins see every employee; admins only their own department.
pub async fn list_employees(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
    user: UserId,
) -> Result<HttpResponse> {
    let (caller, role) = load_caller(&pool, &tokens, &user).await?;

    if !policy::can_list_employees(role) {
        return Err(AppError::Forbidden(
            "Only admins can list employees".to_string(),
        ));
    }

    let scope = policy::scope_for(role, &caller.department);
    let employees =
        user_repo::list_by_role(pool.get_ref(), ROLE_EMPLOYEE, scope.department_filter()).await?;

    let summaries: Vec<UserSummary> = employees.iter().map(UserSummary::from).collect();
    Ok(HttpResponse::Ok().json(summaries))
}

/// GET /api/v1/admin/admins
pub async fn list_admins(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
    user: UserId,
) -> Result<HttpResponse> {
    let (_caller, role) = load_caller(&pool, &tokens, &user).await?;

    if !policy::can_list_admins(role) {
        return Err(AppError::Forbidden(
            "Only superadmin can view admins".to_string(),
        ));
    }

    let admins = user_repo::list_by_role(pool.get_ref(), ROLE_ADMIN, None).await?;
    let summaries: Vec<UserSummary> = admins.iter().map(UserSummary::from).collect();
    Ok(HttpResponse::Ok().json(summaries))
}

/// DELETE /api/v1/admin/admins/{id}
pub async fn delete_admin(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
    user: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let (_caller, role) = load_caller(&pool, &tokens, &user).await?;

    if !policy::can_delete_admin(role) {
        return Err(AppError::Forbidden(
            "Only superadmin can delete admins".to_string(),
        ));
    }

    let deleted = user_repo::delete_by_id_and_role(pool.get_ref(), *path, ROLE_ADMIN).await?;
    if !deleted {
        return Err(AppError::NotFound("Admin not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Admin deleted successfully" })))
}

/// DELETE /api/v1/admin/employees/{id}
pub async fn delete_employee(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
    user: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let (caller, role) = load_caller(&pool, &tokens, &user).await?;

    let employee = user_repo::find_by_id(pool.get_ref(), *path)
        .await?
        .filter(|u| u.role == ROLE_EMPLOYEE)
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    if !policy::can_manage_employee(role, &caller.department, &employee.department) {
        return Err(AppError::Forbidden(
            "Employee is outside your department".to_string(),
        ));
    }

    user_repo::delete_by_id_and_role(pool.get_ref(), employee.id, ROLE_EMPLOYEE).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Employee deleted successfully" })))
}

/// PATCH /api/v1/admin/employees/{id}/suspend?suspend=true|false
pub async fn suspend_employee(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
    user: UserId,
    path: web::Path<Uuid>,
    query: web::Query<SuspendQuery>,
) -> Result<HttpResponse> {
    let (caller, role) = load_caller(&pool, &tokens, &user).await?;

    let employee = user_repo::find_by_id(pool.get_ref(), *path)
        .await?
        .filter(|u| u.role == ROLE_EMPLOYEE)
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    if !policy::can_manage_employee(role, &caller.department, &employee.department) {
        return Err(AppError::Forbidden(
            "Employee is outside your department".to_string(),
        ));
    }

    user_repo::set_active(pool.get_ref(), employee.id, !query.suspend)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    let action = if query.suspend { "suspended" } else { "activated" };
    Ok(HttpResponse::Ok()
        .json(serde_json::json!({ "message": format!("Employee {} successfully", action) })))
}

/// GET /api/v1/admin/dashboard
pub async fn dashboard_summary(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
    user: UserId,
) -> Result<HttpResponse> {
    let (caller, role) = load_caller(&pool, &tokens, &user).await?;

    if !role.is_admin() {
        return Err(AppError::Forbidden("Access denied".to_string()));
    }

    let scope = policy::scope_for(role, &caller.department);
    let (total_users, total_admins, total_employees) =
        user_repo::dashboard_counts(pool.get_ref(), scope.department_filter()).await?;

    Ok(HttpResponse::Ok().json(DashboardSummary {
        total_users,
        total_admins,
        total_employees,
    }))
}
