//! HTTP middleware and extractors

pub mod api_key;
pub mod auth;

pub use auth::AuthUser;
