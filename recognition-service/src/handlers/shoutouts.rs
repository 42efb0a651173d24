/// Shoutout endpoints: creation with colleague tags, the department feed,
/// author edits, emoji reactions, comments, reporting, and the admin
/// moderation views
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::db::{comment_repo, reaction_repo, shoutout_repo};
use crate::error::{AppError, Result};
use crate::metrics;
use crate::middleware::UserId;
use crate::models::{ShoutOut, ShoutOutComment, User};
use crate::security::TokenManager;
use crate::services::policy::{self, Role};
use crate::services::AuthService;

const FEED_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct CreateShoutOutRequest {
    pub message: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub tagged_user_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateShoutOutRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ReactionRequest {
    pub emoji: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

/// Feed entry: a shoutout plus its author name, tags, reaction counts, and
/// comment count
#[derive(Debug, Serialize)]
pub struct ShoutOutFeedItem {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub message: String,
    pub image_url: Option<String>,
    pub department: String,
    pub created_at: DateTime<Utc>,
    pub tagged_users: Vec<Uuid>,
    pub tagged_user_names: Vec<String>,
    pub reactions: HashMap<String, i64>,
    pub comments_count: i64,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub shoutout_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<ShoutOutComment> for CommentResponse {
    fn from(c: ShoutOutComment) -> Self {
        CommentResponse {
            id: c.id,
            shoutout_id: c.shoutout_id,
            user_id: c.user_id,
            content: c.content,
            created_at: c.created_at,
        }
    }
}

async fn load_caller(
    pool: &web::Data<PgPool>,
    tokens: &web::Data<TokenManager>,
    user: &UserId,
) -> Result<(User, Role)> {
    AuthService::new(pool.get_ref().clone(), tokens.get_ref().clone())
        .load_caller(user.0)
        .await
}

/// POST /api/v1/shoutouts
///
/// The shoutout inherits the author's department; tags commit with the post
/// or not at all.
pub async fn create_shoutout(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
    user: UserId,
    payload: web::Json<CreateShoutOutRequest>,
) -> Result<HttpResponse> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("Message cannot be empty".to_string()));
    }

    let (caller, _role) = load_caller(&pool, &tokens, &user).await?;

    let shoutout = shoutout_repo::create(
        pool.get_ref(),
        caller.id,
        message,
        payload.image_url.as_deref(),
        &caller.department,
        &payload.tagged_user_ids,
    )
    .await?;

    metrics::inc_shoutouts_created();
    tracing::info!(shoutout_id = %shoutout.id, author = %caller.id, "Shoutout created");

    let item = assemble_feed_items(pool.get_ref(), vec![shoutout])
        .await?
        .pop()
        .ok_or_else(|| AppError::Internal("Created shoutout vanished".to_string()))?;

    Ok(HttpResponse::Created().json(item))
}

/// GET /api/v1/shoutouts/feed
///
/// Department-scoped for everyone except superadmins, newest first.
pub async fn get_feed(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
    user: UserId,
) -> Result<HttpResponse> {
    let (caller, role) = load_caller(&pool, &tokens, &user).await?;

    let scope = policy::scope_for(role, &caller.department);
    let shoutouts = shoutout_repo::feed(pool.get_ref(), scope.department_filter(), FEED_LIMIT).await?;

    let items = assemble_feed_items(pool.get_ref(), shoutouts).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// GET /api/v1/shoutouts/mine
pub async fn my_shoutouts(
    pool: web::Data<PgPool>,
    user: UserId,
) -> Result<HttpResponse> {
    let shoutouts = shoutout_repo::by_author(pool.get_ref(), user.0).await?;
    let items = assemble_feed_items(pool.get_ref(), shoutouts).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// PUT /api/v1/shoutouts/{id}
///
/// Only the author may edit their own shoutout.
pub async fn update_shoutout(
    pool: web::Data<PgPool>,
    user: UserId,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateShoutOutRequest>,
) -> Result<HttpResponse> {
    let shoutout = shoutout_repo::find_by_id(pool.get_ref(), *path)
        .await?
        .ok_or_else(|| AppError::NotFound("Shoutout not found".to_string()))?;

    if shoutout.author_id != user.0 {
        return Err(AppError::Forbidden(
            "Not authorized to edit this shoutout".to_string(),
        ));
    }

    let message = payload.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("Message cannot be empty".to_string()));
    }

    let updated = shoutout_repo::update_message(pool.get_ref(), shoutout.id, message).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/v1/shoutouts/{id}
///
/// Authors delete their own posts; admins moderate within their department,
/// superadmins anywhere.
pub async fn delete_shoutout(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
    user: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let (caller, role) = load_caller(&pool, &tokens, &user).await?;

    let shoutout = shoutout_repo::find_by_id(pool.get_ref(), *path)
        .await?
        .ok_or_else(|| AppError::NotFound("Shoutout not found".to_string()))?;

    if !policy::can_remove_shoutout(
        role,
        caller.id,
        &caller.department,
        shoutout.author_id,
        &shoutout.department,
    ) {
        return Err(AppError::Forbidden(
            "Not authorized to delete this shoutout".to_string(),
        ));
    }

    shoutout_repo::delete(pool.get_ref(), shoutout.id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Shoutout deleted successfully" })))
}

/// POST /api/v1/shoutouts/{id}/react
///
/// One reaction per user per shoutout: same emoji toggles it off, a
/// different emoji replaces it.
pub async fn react_to_shoutout(
    pool: web::Data<PgPool>,
    user: UserId,
    path: web::Path<Uuid>,
    payload: web::Json<ReactionRequest>,
) -> Result<HttpResponse> {
    let shoutout = shoutout_repo::find_by_id(pool.get_ref(), *path)
        .await?
        .ok_or_else(|| AppError::NotFound("Shoutout not found".to_string()))?;

    let existing = reaction_repo::find(pool.get_ref(), shoutout.id, user.0).await?;

    let message = match existing {
        Some(reaction) if reaction.emoji == payload.emoji => {
            reaction_repo::delete(pool.get_ref(), reaction.id).await?;
            "reaction removed"
        }
        Some(reaction) => {
            reaction_repo::update_emoji(pool.get_ref(), reaction.id, &payload.emoji).await?;
            "reaction updated"
        }
        None => {
            reaction_repo::create(pool.get_ref(), shoutout.id, user.0, &payload.emoji).await?;
            "reaction added"
        }
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": message })))
}

/// POST /api/v1/shoutouts/{id}/comments
pub async fn add_comment(
    pool: web::Data<PgPool>,
    user: UserId,
    path: web::Path<Uuid>,
    payload: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    let content = payload.content.trim();
    if content.is_empty() {
        return Err(AppError::Validation("Comment cannot be empty".to_string()));
    }

    let shoutout = shoutout_repo::find_by_id(pool.get_ref(), *path)
        .await?
        .ok_or_else(|| AppError::NotFound("Shoutout not found".to_string()))?;

    let comment = comment_repo::create(pool.get_ref(), shoutout.id, user.0, content).await?;
    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}

/// GET /api/v1/shoutouts/{id}/comments
pub async fn list_comments(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let comments = comment_repo::list_by_shoutout(pool.get_ref(), *path).await?;
    let out: Vec<CommentResponse> = comments.into_iter().map(CommentResponse::from).collect();
    Ok(HttpResponse::Ok().json(out))
}

/// PUT /api/v1/shoutouts/{id}/report
///
/// Users flag posts for moderation; authors cannot report themselves.
pub async fn report_shoutout(
    pool: web::Data<PgPool>,
    user: UserId,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let shoutout = shoutout_repo::find_by_id(pool.get_ref(), *path)
        .await?
        .ok_or_else(|| AppError::NotFound("Shoutout not found".to_string()))?;

    if shoutout.author_id == user.0 {
        return Err(AppError::Validation(
            "You cannot report your own shoutout".to_string(),
        ));
    }

    let reported = shoutout_repo::mark_reported(pool.get_ref(), shoutout.id).await?;
    Ok(HttpResponse::Ok().json(reported))
}

/// GET /api/v1/shoutouts/moderation
///
/// Scoped listing with author names for the admin dashboard.
pub async fn moderation_list(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
    user: UserId,
) -> Result<HttpResponse> {
    let (caller, role) = load_caller(&pool, &tokens, &user).await?;

    let scope = policy::scope_for(role, &caller.department);
    let rows =
        shoutout_repo::moderation_list(pool.get_ref(), scope.department_filter(), false).await?;

    Ok(HttpResponse::Ok().json(rows))
}

/// GET /api/v1/shoutouts/reported
pub async fn reported_list(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenManager>,
    user: UserId,
) -> Result<HttpResponse> {
    let (caller, role) = load_caller(&pool, &tokens, &user).await?;

    let scope = policy::scope_for(role, &caller.department);
    let rows =
        shoutout_repo::moderation_list(pool.get_ref(), scope.department_filter(), true).await?;

    Ok(HttpResponse::Ok().json(rows))
}

/// Join shoutouts with author names, tags, reaction counts, and comment
/// counts in four batched queries
async fn assemble_feed_items(
    pool: &PgPool,
    shoutouts: Vec<ShoutOut>,
) -> Result<Vec<ShoutOutFeedItem>> {
    if shoutouts.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = shoutouts.iter().map(|s| s.id).collect();
    let author_ids: Vec<Uuid> = {
        let mut ids: Vec<Uuid> = shoutouts.iter().map(|s| s.author_id).collect();
        ids.sort();
        ids.dedup();
        ids
    };

    let authors: HashMap<Uuid, String> = shoutout_repo::author_names(pool, &author_ids)
        .await?
        .into_iter()
        .collect();

    let mut tags_map: HashMap<Uuid, Vec<(Uuid, String)>> = HashMap::new();
    for (shoutout_id, user_id, name) in shoutout_repo::tags_for(pool, &ids).await? {
        tags_map
            .entry(shoutout_id)
            .or_default()
            .push((user_id, name));
    }

    let mut reactions_map: HashMap<Uuid, HashMap<String, i64>> = HashMap::new();
    for (shoutout_id, emoji, count) in reaction_repo::counts_for(pool, &ids).await? {
        reactions_map
            .entry(shoutout_id)
            .or_default()
            .insert(emoji, count);
    }

    let comment_counts: HashMap<Uuid, i64> = comment_repo::counts_for(pool, &ids)
        .await?
        .into_iter()
        .collect();

    let items = shoutouts
        .into_iter()
        .map(|s| {
            let tags = tags_map.remove(&s.id).unwrap_or_default();
            let (tagged_users, tagged_user_names) = tags.into_iter().unzip();

            ShoutOutFeedItem {
                id: s.id,
                author_id: s.author_id,
                author_name: authors
                    .get(&s.author_id)
                    .cloned()
                    .unwrap_or_else(|| "Anonymous".to_string()),
                message: s.message,
                image_url: s.image_url,
                department: s.department,
                created_at: s.created_at,
                tagged_users,
                tagged_user_names,
                reactions: reactions_map.remove(&s.id).unwrap_or_default(),
                comments_count: comment_counts.get(&s.id).copied().unwrap_or(0),
            }
        })
        .collect();

    Ok(items)
}
