/// Core authentication flows: registration (with one-time security keys),
/// credential + claimed-role login, and refresh-token exchange.
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{security_key_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::User;
use crate::security::{self, TokenManager, TokenPair, TOKEN_TYPE_REFRESH};
use crate::services::policy::{Role, ROLE_ADMIN};
use crate::validators;

/// Fields collected at registration time
#[derive(Debug)]
pub struct NewRegistration {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub department: String,
    pub security_key: Option<String>,
}

pub struct AuthService {
    db: PgPool,
    tokens: TokenManager,
}

impl AuthService {
    pub fn new(db: PgPool, tokens: TokenManager) -> Self {
        Self { db, tokens }
    }

    /// Register a new account.
    ///
    /// Admin registration consumes an unused security key; the key flip and
    /// the user insert commit together or not at all.
    pub async fn register(&self, reg: NewRegistration) -> Result<User> {
        if validators::validate_registration_role(&reg.role).is_err() {
            return Err(AppError::Validation(format!(
                "Role must be employee or admin, got: {}",
                reg.role
            )));
        }
        if !validators::validate_email(&reg.email) {
            return Err(AppError::Validation("Invalid email address".to_string()));
        }
        if !validators::validate_username(&reg.username) {
            return Err(AppError::Validation("Invalid username".to_string()));
        }

        if user_repo::find_by_email(&self.db, &reg.email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }
        if user_repo::find_by_username(&self.db, &reg.username)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateUsername);
        }

        let password_hash = security::hash_password(&reg.password)?;

        let mut tx = self.db.begin().await?;

        if reg.role == ROLE_ADMIN {
            let key = reg
                .security_key
                .as_deref()
                .filter(|k| !k.is_empty())
                .ok_or(AppError::SecurityKeyRequired)?;

            security_key_repo::consume(&mut *tx, key)
                .await?
                .ok_or(AppError::InvalidSecurityKey)?;
        }

        let user = user_repo::create_user(
            &mut *tx,
            user_repo::NewUser {
                username: &reg.username,
                email: &reg.email,
                password_hash: &password_hash,
                role: &reg.role,
                name: &reg.name,
                department: &reg.department,
            },
        )
        .await?;

        tx.commit().await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Verify credentials and the claimed role, then issue a token pair.
    ///
    /// Unknown email and wrong password produce the same error so callers
    /// cannot probe which accounts exist. A correct password with the wrong
    /// claimed role fails separately with 403.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        claimed_role: &str,
    ) -> Result<(TokenPair, User)> {
        let user = user_repo::find_by_email(&self.db, email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        security::verify_password(password, &user.password_hash)?;

        if user.role != claimed_role {
            tracing::warn!(user_id = %user.id, claimed = %claimed_role, "Login role mismatch");
            return Err(AppError::RoleMismatch(claimed_role.to_string()));
        }

        let access_token = self.tokens.issue_access_token(user.id, &user.role)?;
        let refresh_token = self.tokens.issue_refresh_token(user.id)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok((
            TokenPair {
                access_token,
                refresh_token,
                token_type: "bearer".to_string(),
            },
            user,
        ))
    }

    /// Exchange a refresh token for a fresh access token.
    ///
    /// The role embedded in the new access token is whatever the user record
    /// holds now, not whatever was true at login. The refresh token itself is
    /// reused unchanged; there is no rotation or server-side revocation, so a
    /// stolen refresh token stays valid until its natural expiry.
    pub async fn refresh(&self, refresh_token: &str) -> Result<(String, User)> {
        let claims = self.tokens.validate(refresh_token)?;

        if claims.token_type != TOKEN_TYPE_REFRESH {
            return Err(AppError::InvalidToken);
        }

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;

        let user = user_repo::find_by_id(&self.db, user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let access_token = self.tokens.issue_access_token(user.id, &user.role)?;

        tracing::debug!(user_id = %user.id, "Access token refreshed");
        Ok((access_token, user))
    }

    /// Load the authenticated caller's record, with the parsed role
    pub async fn load_caller(&self, user_id: Uuid) -> Result<(User, Role)> {
        let user = user_repo::find_by_id(&self.db, user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let role = user.role.parse::<Role>()?;
        Ok((user, role))
    }
}
