/// Unit tests for token issuance, validation, and the access/refresh
/// claim-shape asymmetry
///
/// This test module covers:
/// - Access tokens carrying subject and role
/// - Refresh tokens carrying subject only
/// - Rejection of malformed, tampered, foreign-secret, and expired tokens
/// - Cookie TTL derivation
use uuid::Uuid;

use recognition_service::config::JwtConfig;
use recognition_service::security::{TokenManager, TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};

fn manager() -> TokenManager {
    TokenManager::from_config(&JwtConfig {
        secret: "integration-test-secret".to_string(),
        algorithm: "HS256".to_string(),
        access_token_ttl_minutes: 30,
        refresh_token_ttl_days: 7,
    })
    .expect("HS256 manager builds")
}

// ============================================================================
// Issuance
// ============================================================================

#[test]
fn test_access_token_claims() {
    let m = manager();
    let user_id = Uuid::new_v4();

    let token = m.issue_access_token(user_id, "admin").unwrap();
    let claims = m.validate(&token).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.role.as_deref(), Some("admin"));
    assert_eq!(claims.token_type, TOKEN_TYPE_ACCESS);
}

#[test]
fn test_refresh_token_has_no_role_claim() {
    let m = manager();
    let token = m.issue_refresh_token(Uuid::new_v4()).unwrap();
    let claims = m.validate(&token).unwrap();

    assert!(claims.role.is_none());
    assert_eq!(claims.token_type, TOKEN_TYPE_REFRESH);
}

#[test]
fn test_refresh_expiry_exceeds_access_expiry() {
    let m = manager();
    let user_id = Uuid::new_v4();

    let access = m.validate(&m.issue_access_token(user_id, "employee").unwrap()).unwrap();
    let refresh = m.validate(&m.issue_refresh_token(user_id).unwrap()).unwrap();

    assert!(refresh.exp > access.exp);
}

#[test]
fn test_refresh_cookie_max_age_matches_ttl() {
    let m = manager();
    assert_eq!(m.refresh_ttl_seconds(), 7 * 24 * 60 * 60);
}

// ============================================================================
// Validation failures
// ============================================================================

#[test]
fn test_validate_rejects_garbage() {
    let m = manager();
    assert!(m.validate("").is_err());
    assert!(m.validate("garbage").is_err());
    assert!(m.validate("a.b.c").is_err());
}

#[test]
fn test_validate_rejects_tampered_payload() {
    let m = manager();
    let token = m.issue_access_token(Uuid::new_v4(), "employee").unwrap();

    let mut parts: Vec<&str> = token.split('.').collect();
    let swapped = format!("{}AA", parts[1]);
    parts[1] = &swapped;

    assert!(m.validate(&parts.join(".")).is_err());
}

#[test]
fn test_validate_rejects_foreign_secret() {
    let m = manager();
    let other = TokenManager::from_config(&JwtConfig {
        secret: "some-other-secret".to_string(),
        algorithm: "HS256".to_string(),
        access_token_ttl_minutes: 30,
        refresh_token_ttl_days: 7,
    })
    .unwrap();

    let token = other.issue_access_token(Uuid::new_v4(), "employee").unwrap();
    assert!(m.validate(&token).is_err());
}

#[test]
fn test_validate_rejects_expired_token() {
    // A negative TTL puts the expiry in the past at issuance
    let expired = TokenManager::from_config(&JwtConfig {
        secret: "integration-test-secret".to_string(),
        algorithm: "HS256".to_string(),
        access_token_ttl_minutes: -5,
        refresh_token_ttl_days: 7,
    })
    .unwrap();

    let token = expired
        .issue_access_token(Uuid::new_v4(), "employee")
        .unwrap();
    assert!(expired.validate(&token).is_err());

    // Same secret, so only the expiry can be the reason for rejection
    assert!(manager().validate(&token).is_err());
}
