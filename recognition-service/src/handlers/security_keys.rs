/// One-time admin-registration key management (admin-only)
use actix_web::{web, HttpResponse};
use rand::{distributions::Alphanumeric, Rng};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::security_key_repo;
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::security::TokenManager;
use crate::services::AuthService;

const KEY_LENGTH: usize = 24;

#[derive(Debug, Serialize)]
pub struct SecurityKeyEntry {
    pub id: Uuid,
    pub key: String,
    pub is_used: bool,
}

/// Generate a random URL-safe key value
fn generate_security_key() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(KEY_LENGTH)
        .map(char::from)
        .collect()
}

async fn require_admin(
    pool: &web::Data<PgPool>,
    tokens: &web::Data<TokenManager>,
    user: &UserId,
) -> Result<()> {
    let (_caller, role) = AuthService::new(pool.get_ref().clone(), tokens.get_ref().clone())
        .load_caller(user.0)
        .await?;

    if !role.is_admin() {
        return Err(AppError::Forbidden(
            "Only admins can manage security keys".to_string(),
        ));
    }
    Ok(())
}

/// POST /api/v1/security-keys
pub async fn create_security_key(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
    user: UserId,
) -> Result<HttpResponse> {
    require_admin(&pool, &tokens, &user).await?;

    let key = security_key_repo::create(pool.get_ref(), &generate_security_key()).await?;

    tracing::info!(key_id = %key.id, "Security key created");
    Ok(HttpResponse::Created().json(serde_json::json!({
        "id": key.id,
        "security_key": key.key,
    })))
}

/// GET /api/v1/security-keys
pub async fn list_security_keys(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
    user: UserId,
) -> Result<HttpResponse> {
    require_admin(&pool, &tokens, &user).await?;

    let keys = security_key_repo::list(pool.get_ref()).await?;
    let entries: Vec<SecurityKeyEntry> = keys
        .into_iter()
        .map(|k| SecurityKeyEntry {
            id: k.id,
            key: k.key,
            is_used: k.is_used,
        })
        .collect();

    Ok(HttpResponse::Ok().json(entries))
}

/// DELETE /api/v1/security-keys/{id}
pub async fn delete_security_key(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
    user: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    require_admin(&pool, &tokens, &user).await?;

    let deleted = security_key_repo::delete(pool.get_ref(), *path).await?;
    if !deleted {
        return Err(AppError::NotFound("Key not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Key deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_keys_are_unique_and_sized() {
        let a = generate_security_key();
        let b = generate_security_key();
        assert_eq!(a.len(), KEY_LENGTH);
        assert_eq!(b.len(), KEY_LENGTH);
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
