//! Public user listing with filter, pagination, and sorting.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::{users_list, SortOrder, UserSort};
use crate::error::AppError;
use crate::handlers::http::AppState;

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
}

/// Sanitized projection: id, username, email only.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// GET /users?username=&page=&limit=&sort_by=&order=
///
/// Unknown sort fields fall back to the email default; the order defaults
/// to ascending.
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    let page = i64::from(query.page.unwrap_or(1).max(1));
    let limit = i64::from(query.limit.unwrap_or(10).clamp(1, 100));
    let sort = match query.sort_by.as_deref() {
        Some("username") => UserSort::Username,
        _ => UserSort::Email,
    };
    let order = match query.order.as_deref() {
        Some("desc") => SortOrder::Desc,
        _ => SortOrder::Asc,
    };

    let rows = users_list(
        state.db(),
        query.username.as_deref().unwrap_or(""),
        limit,
        (page - 1) * limit,
        sort,
        order,
    )
    .await?;

    Ok(Json(
        rows.into_iter()
            .map(|u| UserSummary {
                id: u.id,
                username: u.username,
                email: u.email,
            })
            .collect(),
    ))
}
