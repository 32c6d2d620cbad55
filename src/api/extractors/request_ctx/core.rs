use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::RequestContext;

/// Handler-side access to the RequestContext.
/// The context middleware inserts it into request.extensions() for every request,
/// so a missing context means the middleware was not wired (500, not 401).
pub struct Ctx(pub RequestContext);

impl<S> FromRequestParts<S> for Ctx
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(Ctx)
            .ok_or_else(|| {
                tracing::error!("request context missing; is the context middleware applied?");
                AppError::Internal
            })
    }
}
