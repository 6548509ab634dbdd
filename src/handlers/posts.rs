use axum::extract::Path;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::{Comment, Like};
use crate::database::parse_id;
use crate::database::store::{PostStore, UserStore};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, AuthUser};
use crate::sublist::{self, SubEntry};
use crate::validate::FieldErrors;

#[derive(Debug, Deserialize)]
pub struct PostRequest {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub text: Option<String>,
}

/// POST /api/posts - create a post, snapshotting the author's display data
pub async fn create(
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<PostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut fields = FieldErrors::new();
    fields.require("text", payload.text.as_deref(), "Text is required");
    fields.into_result()?;

    let pool = DatabaseManager::pool().await?;

    let author = UserStore::new(pool.clone())
        .find_by_id(auth_user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    let post = PostStore::new(pool)
        .insert(
            auth_user.id,
            &payload.text.unwrap_or_default(),
            &author.name,
            &author.avatar,
        )
        .await?;

    Ok(ApiResponse::success(post))
}

/// GET /api/posts - all posts, newest first
pub async fn list() -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let posts = PostStore::new(pool).list().await?;
    Ok(ApiResponse::success(posts))
}

/// GET /api/posts/:id
pub async fn get(Path(id): Path<String>) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;

    let pool = DatabaseManager::pool().await?;
    let post = PostStore::new(pool)
        .find(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    Ok(ApiResponse::success(post))
}

/// DELETE /api/posts/:id - owner only
pub async fn delete(
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;

    let pool = DatabaseManager::pool().await?;
    let store = PostStore::new(pool);

    let post = store
        .find(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    if post.user_id != auth_user.id {
        return Err(ApiError::unauthorized("user not authorized"));
    }

    store.delete(id).await?;
    Ok(ApiResponse::success(json!({ "msg": "Post removed successfully" })))
}

/// PUT /api/posts/:id/like - idempotent like toggle; responds with the
/// updated like list either way
pub async fn toggle_like(
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;

    let pool = DatabaseManager::pool().await?;
    let store = PostStore::new(pool);

    let post = store
        .find(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    let mut likes = post.likes.0;
    sublist::toggle_owned(&mut likes, auth_user.id, || Like::by(auth_user.id));

    let post = store.save_likes(id, likes).await?;
    Ok(ApiResponse::success(post.likes.0))
}

/// POST /api/posts/:id/comments - prepend a comment
pub async fn add_comment(
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<CommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut fields = FieldErrors::new();
    fields.require("text", payload.text.as_deref(), "Text is required");
    fields.into_result()?;

    let id = parse_id(&id)?;

    let pool = DatabaseManager::pool().await?;
    let store = PostStore::new(pool.clone());

    let author = UserStore::new(pool)
        .find_by_id(auth_user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    let post = store
        .find(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    let comment = Comment {
        id: Uuid::new_v4(),
        user: auth_user.id,
        text: payload.text.unwrap_or_default(),
        name: author.name,
        avatar: author.avatar,
        date: Utc::now(),
    };

    let mut comments = post.comments.0;
    sublist::add_front(&mut comments, comment);

    let post = store.save_comments(id, comments).await?;
    Ok(ApiResponse::success(post))
}

/// DELETE /api/posts/:id/comments/:comment_id - comment owner only; unknown
/// comments are an error here, unlike experience/education removal
pub async fn remove_comment(
    Extension(auth_user): Extension<AuthUser>,
    Path((id, comment_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let comment_id = parse_id(&comment_id)?;

    let pool = DatabaseManager::pool().await?;
    let store = PostStore::new(pool);

    let post = store
        .find(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    let comment = sublist::find_by_id(&post.comments.0, comment_id)
        .ok_or_else(|| ApiError::not_found("comment does not exist"))?;

    if comment.user != auth_user.id {
        return Err(ApiError::unauthorized("user not authorized"));
    }

    let mut comments = post.comments.0;
    let _ = sublist::remove_first_matching(&mut comments, |c| c.id() == comment_id);

    let post = store.save_comments(id, comments).await?;
    Ok(ApiResponse::success(post.comments.0))
}
