//! HTTP request handlers: state/health, posts, user listing.

pub mod http;
pub mod posts;
pub mod users;

pub use http::*;
