//! HTTP-level middleware (cross-cutting concerns).
//!
//! Responsibility:
//! - Request-Id generation + propagation (X-Request-Id). The context middleware
//!   reads the same header, so the request id in logs, context and response agree.
//! - Access logging / request tracing (TraceLayer)
//! - Global request rate limit (`RATE_LIMIT_PER_MINUTE`, 429 when exceeded)
//! - Body size limits
//! - Global timeouts

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::extract::{Request, State};
use axum::http::{StatusCode, header::HeaderName};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::AppError;

type Limiter = Option<Arc<DefaultDirectRateLimiter>>;

/// Apply HTTP-level middleware to the given Router.
///
/// Limits come from `Config` (defaults: 100 requests/minute, 1 MiB body, 30 s timeout).
pub fn apply(router: Router, config: &Config) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");
    let limiter: Limiter = NonZeroU32::new(config.rate_limit_per_minute)
        .map(|per_minute| Arc::new(RateLimiter::direct(Quota::per_minute(per_minute))));

    let layers = ServiceBuilder::new()
        // Make the service error `Infallible` by converting errors into responses.
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            if err.is::<tower::timeout::error::Elapsed>() {
                StatusCode::REQUEST_TIMEOUT
            } else {
                tracing::error!(error = %err, "unhandled middleware error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }))
        // Keep a client-supplied id, otherwise generate one; echo it on the response.
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_seconds,
        )))
        .layer(TraceLayer::new_for_http());

    // innermost: rejected requests are still traced and carry the request id
    router
        .layer(middleware::from_fn_with_state(limiter, rate_limit))
        .layer(layers)
}

/// Process-wide limit: a burst of `RATE_LIMIT_PER_MINUTE` requests, refilled evenly
/// over the minute.
async fn rate_limit(State(limiter): State<Limiter>, req: Request, next: Next) -> Response {
    if limiter.as_ref().is_some_and(|l| l.check().is_err()) {
        tracing::warn!(path = %req.uri().path(), "rate limit exceeded");
        return AppError::TooManyRequests.into_response();
    }

    next.run(req).await
}
