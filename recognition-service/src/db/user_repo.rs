use crate::error::{AppError, Result};
use crate::models::User;
use sqlx::PgPool;
use uuid::Uuid;

pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
    pub name: &'a str,
    pub department: &'a str,
}

/// Create a new user. Runs on any executor so registration can insert
/// inside the same transaction that consumes a security key.
pub async fn create_user<'e, E>(executor: E, new_user: NewUser<'_>) -> Result<User>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, email, password_hash, role, name, department)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(new_user.username)
    .bind(new_user.email)
    .bind(new_user.password_hash)
    .bind(new_user.role)
    .bind(new_user.name)
    .bind(new_user.department)
    .fetch_one(executor)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.constraint() == Some("users_email_key") => {
            AppError::DuplicateEmail
        }
        sqlx::Error::Database(ref db) if db.constraint() == Some("users_username_key") => {
            AppError::DuplicateUsername
        }
        other => AppError::Database(other),
    })
}

/// Get user by email
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Get user by username
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Get user by ID
pub async fn find_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// List users with a given role, optionally confined to one department
pub async fn list_by_role(
    pool: &PgPool,
    role: &str,
    department: Option<&str>,
) -> Result<Vec<User>> {
    let users = match department {
        Some(dept) => {
            sqlx::query_as::<_, User>(
                r#"
                SELECT * FROM users
                WHERE role = $1 AND department = $2
                ORDER BY name
                "#,
            )
            .bind(role)
            .bind(dept)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE role = $1 ORDER BY name")
                .bind(role)
                .fetch_all(pool)
                .await?
        }
    };

    Ok(users)
}

/// List every user in a department (colleague dropdown, admin user views)
pub async fn list_by_department(pool: &PgPool, department: &str) -> Result<Vec<User>> {
    let users =
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE department = $1 ORDER BY name")
            .bind(department)
            .fetch_all(pool)
            .await?;

    Ok(users)
}

/// Delete a user row holding a specific role; returns false when no such row
pub async fn delete_by_id_and_role(pool: &PgPool, user_id: Uuid, role: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1 AND role = $2")
        .bind(user_id)
        .bind(role)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Suspend or reactivate an employee; returns the updated row if it exists
pub async fn set_active(pool: &PgPool, user_id: Uuid, is_active: bool) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET is_active = $1, updated_at = CURRENT_TIMESTAMP
        WHERE id = $2 AND role = 'employee'
        RETURNING *
        "#,
    )
    .bind(is_active)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Update the caller's own profile fields
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    joining_date: Option<&str>,
    current_project: Option<&str>,
    group_members: Option<&str>,
) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET joining_date = $1,
            current_project = $2,
            group_members = $3,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = $4
        RETURNING *
        "#,
    )
    .bind(joining_date)
    .bind(current_project)
    .bind(group_members)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// User counts for the admin dashboard: (total, admins, employees)
pub async fn dashboard_counts(pool: &PgPool, department: Option<&str>) -> Result<(i64, i64, i64)> {
    let row: (i64, i64, i64) = match department {
        Some(dept) => {
            sqlx::query_as(
                r#"
                SELECT COUNT(*),
                       COUNT(*) FILTER (WHERE role = 'admin'),
                       COUNT(*) FILTER (WHERE role = 'employee')
                FROM users
                WHERE department = $1
                "#,
            )
            .bind(dept)
            .fetch_one(pool)
            .await?
        }
        None => {
            sqlx::query_as(
                r#"
                SELECT COUNT(*),
                       COUNT(*) FILTER (WHERE role = 'admin'),
                       COUNT(*) FILTER (WHERE role = 'employee')
                FROM users
                "#,
            )
            .fetch_one(pool)
            .await?
        }
    };

    Ok(row)
}
