//! Repositories: users and posts over PostgreSQL.

use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::DbPool;

// ---- Users ----

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

pub async fn user_create(
    pool: &DbPool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> AppResult<UserRow> {
    sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (username, email, password_hash)
        VALUES ($1, $2, $3)
        RETURNING id, username, email, password_hash, created_at
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(map_unique_violation)
}

pub async fn user_find_by_email(pool: &DbPool, email: &str) -> AppResult<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, email, password_hash, created_at FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Sort field for the user listing. A whitelist: the column name is
/// interpolated into the query, never taken from the request verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSort {
    Email,
    Username,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// `%`, `_` and backslash are LIKE metacharacters; a filter string coming
/// from a request must match them literally.
fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

pub async fn users_list(
    pool: &DbPool,
    username_filter: &str,
    limit: i64,
    offset: i64,
    sort: UserSort,
    order: SortOrder,
) -> AppResult<Vec<UserRow>> {
    let order_by = match (sort, order) {
        (UserSort::Email, SortOrder::Asc) => "email ASC",
        (UserSort::Email, SortOrder::Desc) => "email DESC",
        (UserSort::Username, SortOrder::Asc) => "username ASC",
        (UserSort::Username, SortOrder::Desc) => "username DESC",
    };
    let sql = format!(
        "SELECT id, username, email, password_hash, created_at FROM users \
         WHERE username ILIKE $1 ORDER BY {} LIMIT $2 OFFSET $3",
        order_by
    );
    let rows = sqlx::query_as::<_, UserRow>(&sql)
        .bind(format!("%{}%", escape_like(username_filter)))
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// The unique constraints on users are the authoritative guard against
/// concurrent registration races; surface their violation as a conflict,
/// not a server error.
fn map_unique_violation(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            let message = if db.constraint() == Some("users_username_key") {
                "Username already in use"
            } else {
                "Email already in use"
            };
            return AppError::Conflict(message.to_string());
        }
    }
    AppError::Db(err)
}

// ---- Posts ----

#[derive(Debug, FromRow)]
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub user_id: i64,
    pub author_username: String,
    pub created_at: DateTime<Utc>,
}

pub async fn post_create(
    pool: &DbPool,
    user_id: i64,
    title: &str,
    content: Option<&str>,
) -> AppResult<PostRow> {
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        INSERT INTO posts (title, content, user_id)
        VALUES ($1, $2, $3)
        RETURNING id, title, content, user_id,
            (SELECT username FROM users WHERE id = $3) AS author_username,
            created_at
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// List posts newest first, optionally filtered by a case-insensitive
/// substring match over title or content.
pub async fn posts_list(pool: &DbPool, search: Option<&str>) -> AppResult<Vec<PostRow>> {
    let pattern = search.map(|s| format!("%{}%", escape_like(s)));
    let rows = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT p.id, p.title, p.content, p.user_id,
               u.username AS author_username, p.created_at
        FROM posts p
        JOIN users u ON u.id = p.user_id
        WHERE $1::text IS NULL OR p.title ILIKE $1 OR p.content ILIKE $1
        ORDER BY p.created_at DESC
        "#,
    )
    .bind(pattern)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
