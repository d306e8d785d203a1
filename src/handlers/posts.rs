//! Post handlers: list and create. Both sit behind the bearer-token
//! extractor; an unauthenticated request never reaches them.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::{post_create, posts_list, PostRow};
use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub author: PostAuthor,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct PostAuthor {
    pub id: i64,
    pub username: String,
}

impl From<PostRow> for PostResponse {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            author: PostAuthor {
                id: row.user_id,
                username: row.author_username,
            },
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

/// GET /posts?search=
pub async fn list_posts(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let rows = posts_list(state.db(), query.search.as_deref()).await?;
    Ok(Json(rows.into_iter().map(PostResponse::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatePostResponse {
    pub message: String,
    pub post: PostResponse,
}

/// POST /posts, creates a post owned by the authenticated user.
pub async fn create_post(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatePostResponse>), AppError> {
    let Json(body) = body?;
    if body.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let row = post_create(state.db(), user.id, &body.title, body.content.as_deref()).await?;
    info!(post_id = row.id, user_id = user.id, "post created");

    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponse {
            message: "Post created".to_string(),
            post: row.into(),
        }),
    ))
}
