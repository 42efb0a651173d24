/// Authentication endpoints: register, login, refresh, logout
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::UserSummary;
use crate::security::TokenManager;
use crate::services::{AuthService, NewRegistration};

pub const REFRESH_COOKIE: &str = "refresh_token";

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,

    pub role: String,

    #[validate(length(min = 1, max = 100))]
    pub department: String,

    pub security_key: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,

    /// The portal the client is logging into; must match the stored role
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: UserSummary,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

/// POST /api/v1/auth/register
pub async fn register(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    metrics::inc_register_requests();
    payload.validate()?;

    let service = AuthService::new(pool.get_ref().clone(), tokens.get_ref().clone());
    let payload = payload.into_inner();

    let user = service
        .register(NewRegistration {
            username: payload.username,
            name: payload.name,
            email: payload.email,
            password: payload.password,
            role: payload.role,
            department: payload.department,
            security_key: payload.security_key,
        })
        .await?;

    Ok(HttpResponse::Created().json(UserSummary::from(&user)))
}

/// POST /api/v1/auth/login
///
/// On success the refresh token travels both in the body and as an
/// HttpOnly SameSite=Lax cookie whose Max-Age matches the refresh TTL.
pub async fn login(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    metrics::inc_login_requests();
    payload.validate()?;

    let service = AuthService::new(pool.get_ref().clone(), tokens.get_ref().clone());

    let (pair, user) = service
        .login(&payload.email, &payload.password, &payload.role)
        .await
        .map_err(|e| {
            metrics::inc_login_failures();
            e
        })?;

    let cookie = Cookie::build(REFRESH_COOKIE, pair.refresh_token.clone())
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(tokens.refresh_ttl_seconds()))
        .path("/")
        .finish();

    Ok(HttpResponse::Ok().cookie(cookie).json(LoginResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        token_type: pair.token_type,
        user: UserSummary::from(&user),
    }))
}

/// POST /api/v1/auth/refresh
///
/// Reads the refresh-token cookie and returns a fresh access token. The
/// refresh token is reused as-is (no rotation).
pub async fn refresh(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
) -> Result<HttpResponse> {
    let refresh_token = req
        .cookie(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(AppError::MissingToken)?;

    let service = AuthService::new(pool.get_ref().clone(), tokens.get_ref().clone());
    let (access_token, _user) = service.refresh(&refresh_token).await?;

    Ok(HttpResponse::Ok().json(RefreshResponse {
        access_token,
        refresh_token,
        token_type: "bearer".to_string(),
    }))
}

/// POST /api/v1/auth/logout
///
/// Client-side only: clears the cookie. Already-issued tokens stay valid
/// until expiry; there is no server-side blacklist.
pub async fn logout() -> Result<HttpResponse> {
    let cookie = Cookie::build(REFRESH_COOKIE, "")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::ZERO)
        .path("/")
        .finish();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(serde_json::json!({ "message": "logged out" })))
}
