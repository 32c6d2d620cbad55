//! End-to-end tests through the fully layered router.
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use storefront_api::app::{build_router, build_state};
use storefront_api::config::{AppEnv, Config, PermissionSource, StaffAccount};

fn config(permission_source: PermissionSource) -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        app_env: AppEnv::Development,
        cors_allowed_origins: Vec::new(),
        request_timeout_seconds: 30,
        body_limit_bytes: 1024 * 1024,
        rate_limit_per_minute: 100,
        jwt_secret: "integration-test-secret".to_string(),
        auth_issuer: "storefront-api".to_string(),
        auth_audience: "storefront-api".to_string(),
        access_token_ttl_seconds: 900,
        refresh_token_ttl_seconds: 604_800,
        token_leeway_seconds: 0,
        permission_source,
        staff_accounts: vec![
            StaffAccount {
                email: "editor@example.com".to_string(),
                role: "content_editor".to_string(),
            },
            StaffAccount {
                email: "owner@example.com".to_string(),
                role: "owner".to_string(),
            },
        ],
    }
}

fn app() -> Router {
    app_with(PermissionSource::Claims)
}

fn app_with(source: PermissionSource) -> Router {
    app_from(config(source))
}

fn app_from(config: Config) -> Router {
    build_router(build_state(&config).unwrap(), &config)
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn login(app: &Router, email: &str) -> (String, String) {
    let (status, body) = send(
        app,
        post_json("/auth/login", None, json!({"email": email, "password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    (
        body["token"].as_str().unwrap().to_string(),
        body["refreshToken"].as_str().unwrap().to_string(),
    )
}

fn product() -> Value {
    json!({"title": "Mug", "sku": "MUG-1", "price": 12.5})
}

#[tokio::test]
async fn login_gate_refresh_flow() {
    let app = app();

    let (access, refresh) = login(&app, "editor@example.com").await;

    let (status, body) = send(&app, post_json("/products", Some(&access), product())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["sku"], "MUG-1");
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));

    let (customer, _) = login(&app, "shopper@example.com").await;
    let (status, body) = send(&app, post_json("/products", Some(&customer), product())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({"message": "forbidden"}));

    let (status, body) = send(&app, post_json("/auth/refresh", Some(&access), json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"message": "invalid token"}));

    let (status, body) = send(&app, post_json("/auth/refresh", Some(&refresh), json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    let renewed = body["token"].as_str().unwrap().to_string();

    let (status, _) = send(&app, post_json("/products", Some(&renewed), product())).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn refresh_without_credential_is_unauthorized() {
    let app = app();
    let (status, body) = send(&app, post_json("/auth/refresh", None, json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"message": "invalid token"}));
}

#[tokio::test]
async fn anonymous_caller_is_forbidden_on_guarded_routes() {
    let app = app();
    for uri in ["/orders", "/reports/sales", "/staff/users", "/inventory/alerts"] {
        let (status, body) = send(&app, get(uri, None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(body, json!({"message": "forbidden"}));
    }
}

#[tokio::test]
async fn bad_credentials_never_break_public_routes() {
    let app = app();
    for token in ["garbage", "a.b.c", ""] {
        let (status, body) = send(&app, get("/products", Some(token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["total"], 0);
    }

    let req = Request::get("/health")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn any_of_accepts_either_permission() {
    let app = app();
    // content_editor holds catalog.write but not growth.write
    let (access, _) = login(&app, "editor@example.com").await;

    let (status, body) = send(
        &app,
        post_json("/growth/copilot", Some(&access), json!({"prompt": "mug"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prompt"], "mug");

    let (status, _) = send(&app, get("/growth/profit", Some(&access))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn owner_reaches_staff_and_finance_routes() {
    let app = app();
    let (access, _) = login(&app, "owner@example.com").await;

    let (status, _) = send(&app, get("/staff/audit", Some(&access))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        post_json("/orders/o-1/refund", Some(&access), json!({"amount": 5.0})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["orderId"], "o-1");
    assert_eq!(body["status"], "pending");
}

#[tokio::test]
async fn wishlist_is_scoped_by_identity() {
    let app = app();

    let (status, body) = send(&app, get("/storefront/wishlist", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scope"], "guest");

    let (access, _) = login(&app, "shopper@example.com").await;
    let (status, body) = send(&app, get("/storefront/wishlist", Some(&access))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scope"], "account");

    let (status, body) = send(
        &app,
        post_json("/storefront/wishlist", Some("garbage"), json!({"productId": "p-1"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["scope"], "guest");
    assert_eq!(body["productId"], "p-1");
}

#[tokio::test]
async fn public_order_placement_starts_pending_payment() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json(
            "/orders",
            None,
            json!({
                "email": "shopper@example.com",
                "lineItems": [{"sku": "MUG-1", "quantity": 2, "price": 12.5}],
                "shippingAddress": {"city": "Lisbon"}
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "pending_payment");
}

#[tokio::test]
async fn cart_estimate_and_sales_range_defaults() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json(
            "/storefront/cart/estimate",
            None,
            json!({"items": [{"sku": "a", "quantity": 3}]}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subtotal"], 30);
    assert_eq!(body["taxes"], 3);
    assert_eq!(body["total"], 30);

    let (owner, _) = login(&app, "owner@example.com").await;
    let (_, body) = send(&app, get("/reports/sales", Some(&owner))).await;
    assert_eq!(body["range"], "last_30_days");
    let (_, body) = send(&app, get("/reports/sales?range=ytd", Some(&owner))).await;
    assert_eq!(body["range"], "ytd");
}

#[tokio::test]
async fn invalid_bodies_are_bad_requests() {
    let app = app();

    let (status, body) = send(
        &app,
        post_json("/auth/login", None, json!({"email": "nobody", "password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "email is invalid");

    let (status, body) = send(
        &app,
        post_json("/auth/login", None, json!({"email": "a@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let (status, _) = send(
        &app,
        post_json("/reviews", None, json!({"productId": "p-1", "rating": 9})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn request_id_is_propagated() {
    let app = app();

    let req = Request::get("/health")
        .header("x-request-id", "req-abc")
        .body(Body::empty())
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.headers()["x-request-id"], "req-abc");

    let res = app.oneshot(get("/health", None)).await.unwrap();
    assert!(res.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn registry_source_resolves_permissions_per_request() {
    let app = app_with(PermissionSource::Registry);
    let (access, _) = login(&app, "editor@example.com").await;

    let (status, _) = send(&app, post_json("/products", Some(&access), product())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, get("/orders", Some(&access))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_routes_use_the_json_error_body() {
    let app = app();
    let (status, body) = send(&app, get("/nope", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "route not found"}));
}

#[tokio::test]
async fn request_over_the_rate_limit_gets_429() {
    let app = app();
    for i in 0..100 {
        let (status, _) = send(&app, get("/health", None)).await;
        assert_eq!(status, StatusCode::OK, "request {}", i + 1);
    }

    let (status, body) = send(&app, get("/health", None)).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body, json!({"message": "too many requests"}));
}

#[tokio::test]
async fn oversized_body_is_rejected_with_413() {
    let app = app_from(Config {
        body_limit_bytes: 64,
        ..config(PermissionSource::Claims)
    });
    let padding = "x".repeat(256);

    let (status, body) = send(
        &app,
        post_json(
            "/auth/login",
            None,
            json!({"email": "a@example.com", "password": padding}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body, json!({"message": "payload too large"}));

    let req = Request::post("/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, "4096")
        .body(Body::from(vec![b' '; 4096]))
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let app = app();
    let (access, _) = login(&app, "editor@example.com").await;

    for req in [get("/health", None), get("/orders", Some(&access))] {
        let res = app.clone().oneshot(req).await.unwrap();
        let headers = res.headers();
        assert_eq!(headers["x-frame-options"], "DENY");
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["cache-control"], "no-store");
        assert_eq!(headers["referrer-policy"], "no-referrer");
    }
}

fn preflight(origin: &str) -> Request<Body> {
    Request::options("/products")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization,content-type")
        .body(Body::empty())
        .unwrap()
}

fn production(origins: &[&str]) -> Router {
    app_from(Config {
        app_env: AppEnv::Production,
        cors_allowed_origins: origins.iter().map(|o| o.to_string()).collect(),
        ..config(PermissionSource::Claims)
    })
}

#[tokio::test]
async fn production_cors_only_allows_listed_origins() {
    let app = production(&["https://shop.example.com"]);

    let res = app
        .clone()
        .oneshot(preflight("https://shop.example.com"))
        .await
        .unwrap();
    assert_eq!(
        res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://shop.example.com"
    );
    assert!(res.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());

    let res = app.oneshot(preflight("https://evil.example.com")).await.unwrap();
    assert!(res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn production_cors_with_empty_allowlist_allows_nobody() {
    let app = production(&[]);
    let res = app.oneshot(preflight("https://shop.example.com")).await.unwrap();
    assert!(res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn development_cors_is_permissive() {
    let app = app();
    let res = app.oneshot(preflight("http://localhost:5173")).await.unwrap();
    assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
