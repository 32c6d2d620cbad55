//! Request identity + route guards.
use axum::http::{HeaderMap, header};

pub mod context;
pub mod guard;

/// `Authorization: Bearer <token>` -> `<token>`.
///
/// Any other shape (missing header, non-UTF-8 value, other scheme, empty token) yields `None`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let token = headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?
        .trim();

    (!token.is_empty()).then_some(token)
}
