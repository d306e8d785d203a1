//! Blog backend built with Rust.
//!
//! Registration and login with salted password hashes and JWT issuance,
//! bearer-token-protected post endpoints, and a public user listing,
//! backed by PostgreSQL.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;

pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;

use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

/// Build the API router (auth, posts, users, health). Used by main and by
/// integration tests. Non-POST on the auth routes and non-GET on /users
/// get a 405 from the method router itself.
pub fn create_app(state: AppState) -> axum::Router {
    let auth_routes = axum::Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    axum::Router::new()
        .route("/health", get(handlers::http::health))
        .route(
            "/posts",
            get(handlers::posts::list_posts).post(handlers::posts::create_post),
        )
        .route("/users", get(handlers::users::list_users))
        .nest("/auth", auth_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
