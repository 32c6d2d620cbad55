//! Route guard bindings.
//!
//! Each route is bound to a [`Guard`] once, while the router is assembled:
//!
//! ```ignore
//! .route("/", bind(post(create_product), Guard::any_of([CATALOG_WRITE])))
//! ```
//!
//! `Guard::Public` attaches nothing. Every other guard attaches a route layer
//! that evaluates the request's context before the handler runs; a deny ends
//! the request with the fixed 403 body and the handler is never called.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};
use tracing::{debug, error};

use crate::api::extractors::RequestContext;
use crate::error::AppError;
use crate::services::authz::{Decision, Guard};

/// Bind `guard` to `route`.
pub fn bind<S>(route: MethodRouter<S>, guard: Guard) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    match guard {
        Guard::Public => route,
        guard => route.route_layer(middleware::from_fn_with_state(Arc::new(guard), enforce)),
    }
}

async fn enforce(
    State(guard): State<Arc<Guard>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(ctx) = req.extensions().get::<RequestContext>() else {
        error!(path = %req.uri().path(), "guarded route reached without a request context");
        return Err(AppError::Internal);
    };

    match guard.evaluate(ctx) {
        Decision::Allow => Ok(next.run(req).await),
        Decision::Deny => {
            debug!(
                request_id = %ctx.request_id(),
                user_id = ctx.user_id().unwrap_or("-"),
                method = %req.method(),
                path = %req.uri().path(),
                "permission check denied"
            );
            Err(AppError::Forbidden)
        }
    }
}
