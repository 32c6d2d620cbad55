//! Bearer credential -> RequestContext, stored in request extensions.
//!
//! Runs for every request, before routing. It never rejects:
//! - no header / not `Bearer <token>` -> anonymous context
//! - credential fails verification (signature, expiry, claims, kind) -> anonymous
//!   context, failure logged at debug
//! - verified access credential -> identity + permissions
//!
//! Enforcement happens later, at the route guard. Identity is only ever taken
//! from a verified decode.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::{self, Next},
    response::Response,
};
use tracing::{debug, warn};
use uuid::Uuid;

use super::bearer_token;
use crate::api::extractors::RequestContext;
use crate::config::PermissionSource;
use crate::services::auth::TokenKind;
use crate::services::authz::PermissionSet;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Attach the context middleware to every route of `router`.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 `from_fn` cannot take a State extractor; pass the state explicitly
    router.layer(middleware::from_fn_with_state(state, context_middleware))
}

async fn context_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let ctx = build_context(&state, req.headers()).await;

    // middleware -> extractor
    req.extensions_mut().insert(ctx);

    next.run(req).await
}

pub(crate) async fn build_context(state: &AppState, headers: &HeaderMap) -> RequestContext {
    let request_id = request_id(headers);

    let Some(token) = bearer_token(headers) else {
        return RequestContext::anonymous(request_id);
    };

    let credential = match state.issuer.verify_kind(token, TokenKind::Access) {
        Ok(credential) => credential,
        Err(err) => {
            debug!(
                request_id = %request_id,
                error = %err,
                "credential rejected, continuing as anonymous"
            );
            return RequestContext::anonymous(request_id);
        }
    };

    let permissions = match state.permission_source {
        PermissionSource::Claims => credential.permissions,
        PermissionSource::Registry => {
            resolve_from_registry(state, &request_id, credential.role.as_deref()).await
        }
    };

    RequestContext::authenticated(request_id, credential.subject, credential.role, permissions)
}

async fn resolve_from_registry(
    state: &AppState,
    request_id: &str,
    role: Option<&str>,
) -> PermissionSet {
    let Some(role) = role else {
        return PermissionSet::new();
    };

    match state.roles.permissions_for(role).await {
        Ok(resolved) => resolved.unwrap_or_default(),
        Err(err) => {
            warn!(
                request_id = %request_id,
                role = %role,
                error = %err,
                "role registry lookup failed, continuing without permissions"
            );
            PermissionSet::new()
        }
    }
}

/// Reuse the transport's correlation id, otherwise mint one.
fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header};
    use chrono::{Duration as ChronoDuration, Utc};

    use std::sync::Arc;

    use axum::{
        http::StatusCode,
        routing::{get, post},
    };
    use tower::ServiceExt;

    use crate::api::extractors::Ctx;
    use crate::middleware::auth::guard::bind;
    use crate::services::authz::{Guard, StaticRoleRegistry};
    use crate::state::test_support::{UnavailableRegistry, state, state_with, state_with_registry};

    fn headers(authorization: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("req-123"));
        if let Some(value) = authorization {
            headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    fn perms(items: &[&str]) -> PermissionSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn missing_header_is_anonymous() {
        let state = state(PermissionSource::Claims);
        let ctx = build_context(&state, &headers(None)).await;
        assert!(ctx.is_anonymous());
        assert_eq!(ctx.request_id(), "req-123");
        assert!(ctx.permissions().is_empty());
    }

    #[tokio::test]
    async fn request_id_is_generated_when_absent() {
        let state = state(PermissionSource::Claims);
        let a = build_context(&state, &HeaderMap::new()).await;
        let b = build_context(&state, &HeaderMap::new()).await;
        assert!(!a.request_id().is_empty());
        assert_ne!(a.request_id(), b.request_id());
    }

    #[tokio::test]
    async fn malformed_prefix_is_anonymous() {
        let state = state(PermissionSource::Claims);
        let issued = state
            .issuer
            .issue_access("user-1", Some("owner"), &perms(&["catalog.write"]))
            .unwrap();

        for value in [
            format!("Basic {}", issued.token),
            format!("bearer{}", issued.token),
            issued.token.clone(),
            "Bearer ".to_string(),
        ] {
            let ctx = build_context(&state, &headers(Some(&value))).await;
            assert!(ctx.is_anonymous(), "{value}");
        }
    }

    #[tokio::test]
    async fn verified_access_credential_populates_identity() {
        let state = state(PermissionSource::Claims);
        let issued = state
            .issuer
            .issue_access("user-1", Some("manager"), &perms(&["catalog.write"]))
            .unwrap();

        let ctx = build_context(&state, &headers(Some(&format!("Bearer {}", issued.token)))).await;
        assert_eq!(ctx.user_id(), Some("user-1"));
        assert_eq!(ctx.role(), Some("manager"));
        assert_eq!(ctx.permissions(), &perms(&["catalog.write"]));
        assert_eq!(ctx.request_id(), "req-123");
    }

    #[tokio::test]
    async fn expired_credential_degrades_to_anonymous() {
        let state = state(PermissionSource::Claims);
        let issued = state
            .issuer
            .issue_at(
                TokenKind::Access,
                "user-1",
                Some("owner"),
                &perms(&["catalog.write"]),
                Utc::now() - ChronoDuration::hours(2),
            )
            .unwrap();

        let ctx = build_context(&state, &headers(Some(&format!("Bearer {}", issued.token)))).await;
        assert!(ctx.is_anonymous());
        assert!(ctx.permissions().is_empty());
    }

    #[tokio::test]
    async fn refresh_credential_is_not_an_identity() {
        let state = state(PermissionSource::Claims);
        let issued = state
            .issuer
            .issue_refresh("user-1", Some("owner"), &perms(&["catalog.write"]))
            .unwrap();

        let ctx = build_context(&state, &headers(Some(&format!("Bearer {}", issued.token)))).await;
        assert!(ctx.is_anonymous());
    }

    #[tokio::test]
    async fn unsigned_claims_are_never_trusted() {
        let state = state(PermissionSource::Claims);
        // alg=none token claiming owner permissions
        let forged = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.\
eyJpc3MiOiJzdG9yZWZyb250LWFwaSIsImF1ZCI6InN0b3JlZnJvbnQtYXBpIiwic3ViIjoiYXR0YWNrZXIiLCJyb2xlIjoib3duZXIiLCJwZXJtaXNzaW9ucyI6WyJzdGFmZi53cml0ZSJdLCJpYXQiOjEsImV4cCI6OTk5OTk5OTk5OSwianRpIjoieCIsImtpbmQiOiJhY2Nlc3MifQ.";

        let ctx = build_context(&state, &headers(Some(&format!("Bearer {forged}")))).await;
        assert!(ctx.is_anonymous());
        assert!(ctx.permissions().is_empty());
    }

    #[tokio::test]
    async fn registry_source_ignores_embedded_permissions() {
        let registry = StaticRoleRegistry::empty().with_role("analyst", ["reports.read"]);
        let state = state_with(PermissionSource::Registry, registry);
        let issued = state
            .issuer
            .issue_access("user-1", Some("analyst"), &perms(&["staff.write"]))
            .unwrap();

        let ctx = build_context(&state, &headers(Some(&format!("Bearer {}", issued.token)))).await;
        assert_eq!(ctx.user_id(), Some("user-1"));
        assert_eq!(ctx.permissions(), &perms(&["reports.read"]));
    }

    #[tokio::test]
    async fn registry_source_with_unknown_role_grants_nothing() {
        let state = state_with(PermissionSource::Registry, StaticRoleRegistry::empty());
        let issued = state
            .issuer
            .issue_access("user-1", Some("ghost"), &perms(&["staff.write"]))
            .unwrap();

        let ctx = build_context(&state, &headers(Some(&format!("Bearer {}", issued.token)))).await;
        assert_eq!(ctx.user_id(), Some("user-1"));
        assert!(ctx.permissions().is_empty());
    }

    #[tokio::test]
    async fn registry_outage_keeps_identity_but_grants_nothing() {
        let state = state_with_registry(PermissionSource::Registry, Arc::new(UnavailableRegistry));
        let issued = state
            .issuer
            .issue_access("user-1", Some("owner"), &perms(&["catalog.write"]))
            .unwrap();

        let ctx = build_context(&state, &headers(Some(&format!("Bearer {}", issued.token)))).await;
        assert!(!ctx.is_anonymous());
        assert_eq!(ctx.user_id(), Some("user-1"));
        assert_eq!(ctx.role(), Some("owner"));
        assert!(ctx.permissions().is_empty());
    }

    #[tokio::test]
    async fn registry_outage_denies_guarded_routes() {
        async fn created() -> StatusCode {
            StatusCode::CREATED
        }
        async fn whoami(Ctx(ctx): Ctx) -> String {
            ctx.user_id().unwrap_or("anonymous").to_string()
        }

        let state = state_with_registry(PermissionSource::Registry, Arc::new(UnavailableRegistry));
        let token = state
            .issuer
            .issue_access("user-1", Some("owner"), &perms(&["catalog.write"]))
            .unwrap()
            .token;
        let routes = Router::new()
            .route("/products", bind(post(created), Guard::any_of(["catalog.write"])))
            .route("/whoami", bind(get(whoami), Guard::Optional));
        let app = apply(routes, state.clone()).with_state(state);

        let request = |method: &str, uri: &str| {
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap()
        };

        let res = app.clone().oneshot(request("POST", "/products")).await.unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let res = app.oneshot(request("GET", "/whoami")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"user-1");
    }
}
