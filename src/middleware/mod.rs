//! Request middleware: bearer-token authentication for protected routes.

pub mod auth;

pub use auth::AuthUser;
