/// JWT token issuance and validation.
///
/// Access tokens carry the subject and the role held at issuance time;
/// refresh tokens carry the subject only. The role is re-resolved from the
/// user record when a refresh token is exchanged, so role changes take
/// effect without waiting for refresh-token expiry.
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::{AppError, Result};

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Role at issuance time; absent on refresh tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Token type: "access" or "refresh"
    pub token_type: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Access + refresh token pair returned by login
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

/// Signs and validates tokens from a single shared secret.
///
/// Constructed once from [`JwtConfig`] at startup and passed explicitly to
/// whatever needs it; there is no ambient key state.
#[derive(Clone)]
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenManager {
    pub fn from_config(config: &JwtConfig) -> Result<Self> {
        let algorithm: Algorithm = config
            .algorithm
            .parse()
            .map_err(|_| AppError::Internal(format!("Unknown JWT algorithm: {}", config.algorithm)))?;

        // Shared-secret signing only; asymmetric algorithms would need PEM
        // key material the configuration does not carry.
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(AppError::Internal(format!(
                "Unsupported JWT algorithm for shared-secret signing: {}",
                config.algorithm
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            algorithm,
            access_ttl: Duration::minutes(config.access_token_ttl_minutes),
            refresh_ttl: Duration::days(config.refresh_token_ttl_days),
        })
    }

    /// Generate a short-lived access token carrying subject and role
    pub fn issue_access_token(&self, user_id: Uuid, role: &str) -> Result<String> {
        self.issue(user_id, Some(role), TOKEN_TYPE_ACCESS, self.access_ttl)
    }

    /// Generate a long-lived refresh token carrying the subject only
    pub fn issue_refresh_token(&self, user_id: Uuid) -> Result<String> {
        self.issue(user_id, None, TOKEN_TYPE_REFRESH, self.refresh_ttl)
    }

    fn issue(
        &self,
        user_id: Uuid,
        role: Option<&str>,
        token_type: &str,
        ttl: Duration,
    ) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.map(|r| r.to_string()),
            token_type: token_type.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal("Failed to sign token".to_string()))
    }

    /// Validate and decode a token
    ///
    /// Bad signature, malformed input, and elapsed expiry all surface as
    /// `InvalidToken`; the caller cannot distinguish them.
    pub fn validate(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is exact; no clock-skew grace
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                tracing::debug!("Token validation failed: {}", e);
                AppError::InvalidToken
            })?;

        Ok(token_data.claims)
    }

    /// Max-Age for the refresh-token cookie, in whole seconds
    pub fn refresh_ttl_seconds(&self) -> i64 {
        self.refresh_ttl.num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            algorithm: "HS256".to_string(),
            access_token_ttl_minutes: 30,
            refresh_token_ttl_days: 7,
        }
    }

    #[test]
    fn test_access_token_round_trip() {
        let manager = TokenManager::from_config(&test_config()).unwrap();
        let user_id = Uuid::new_v4();

        let token = manager.issue_access_token(user_id, "employee").unwrap();
        // JWT tokens have 3 parts separated by dots
        assert_eq!(token.matches('.').count(), 2);

        let claims = manager.validate(&token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role.as_deref(), Some("employee"));
        assert_eq!(claims.token_type, TOKEN_TYPE_ACCESS);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_token_carries_subject_only() {
        let manager = TokenManager::from_config(&test_config()).unwrap();
        let user_id = Uuid::new_v4();

        let token = manager.issue_refresh_token(user_id).unwrap();
        let claims = manager.validate(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, None);
        assert_eq!(claims.token_type, TOKEN_TYPE_REFRESH);
    }

    #[test]
    fn test_refresh_token_outlives_access_token() {
        let manager = TokenManager::from_config(&test_config()).unwrap();
        let user_id = Uuid::new_v4();

        let access = manager.issue_access_token(user_id, "admin").unwrap();
        let refresh = manager.issue_refresh_token(user_id).unwrap();

        let access_claims = manager.validate(&access).unwrap();
        let refresh_claims = manager.validate(&refresh).unwrap();
        assert!(refresh_claims.exp > access_claims.exp);
    }

    #[test]
    fn test_malformed_token_rejected() {
        let manager = TokenManager::from_config(&test_config()).unwrap();
        assert!(matches!(
            manager.validate("not.a.token"),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let manager = TokenManager::from_config(&test_config()).unwrap();
        let token = manager
            .issue_access_token(Uuid::new_v4(), "employee")
            .unwrap();

        let mut parts: Vec<String> = token.split('.').map(|s| s.to_string()).collect();
        parts[1] = format!("{}x", parts[1]);
        let tampered = parts.join(".");

        assert!(matches!(
            manager.validate(&tampered),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let manager = TokenManager::from_config(&test_config()).unwrap();
        let other = TokenManager::from_config(&JwtConfig {
            secret: "different-secret".to_string(),
            ..test_config()
        })
        .unwrap();

        let token = other.issue_access_token(Uuid::new_v4(), "employee").unwrap();
        assert!(matches!(
            manager.validate(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let manager = TokenManager::from_config(&JwtConfig {
            access_token_ttl_minutes: -1,
            ..test_config()
        })
        .unwrap();

        let token = manager
            .issue_access_token(Uuid::new_v4(), "employee")
            .unwrap();
        assert!(matches!(
            manager.validate(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_unsupported_algorithm_rejected() {
        let result = TokenManager::from_config(&JwtConfig {
            algorithm: "RS256".to_string(),
            ..test_config()
        });
        assert!(result.is_err());
    }
}
