/*
 * Responsibility
 * - URL structure of the API
 * - Every route is bound to its guard here, once, at router construction
 *   (P = Guard::Public, O = Guard::Optional, otherwise a permission predicate)
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    api::handlers::{
        auth, catalog, content, customers, growth, health, inventory, orders, promotions,
        reports, reviews, staff, storefront,
    },
    error::AppError,
    middleware::auth::guard::bind,
    services::authz::{Guard, permissions::*},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .nest("/auth", auth_routes())
        .nest("/products", catalog_routes())
        .nest("/inventory", inventory_routes())
        .nest("/growth", growth_routes())
        .nest("/orders", order_routes())
        .nest("/customers", customer_routes())
        .nest("/promotions", promotion_routes())
        .nest("/reviews", review_routes())
        .nest("/content", content_routes())
        .nest("/reports", report_routes())
        .nest("/staff", staff_routes())
        .nest("/storefront", storefront_routes())
        .fallback(not_found)
}

async fn not_found() -> AppError {
    AppError::not_found("route")
}

// refresh enforces its own credential requirement
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
}

fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(catalog::list_products).merge(bind(
                post(catalog::create_product),
                Guard::any_of([CATALOG_WRITE]),
            )),
        )
        .route("/{id}", get(catalog::get_product))
}

fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/alerts",
            bind(get(inventory::alerts), Guard::any_of([INVENTORY_READ])),
        )
        .route(
            "/{variant_id}/movements",
            bind(
                post(inventory::record_movement),
                Guard::any_of([INVENTORY_WRITE]),
            ),
        )
}

fn growth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profit",
            bind(get(growth::profit), Guard::any_of([GROWTH_READ])),
        )
        .route(
            "/reorder",
            bind(get(growth::reorder), Guard::any_of([GROWTH_READ])),
        )
        .route(
            "/copilot",
            bind(
                post(growth::copilot),
                Guard::any_of([GROWTH_WRITE, CATALOG_WRITE]),
            ),
        )
}

fn order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            bind(get(orders::list_orders), Guard::any_of([ORDERS_READ]))
                .merge(post(orders::create_order)),
        )
        .route(
            "/{id}",
            bind(get(orders::get_order), Guard::any_of([ORDERS_READ])),
        )
        .route(
            "/{id}/status",
            bind(post(orders::update_status), Guard::any_of([ORDERS_WRITE])),
        )
        .route(
            "/{id}/refund",
            bind(
                post(orders::refund),
                Guard::any_of([ORDERS_WRITE, FINANCE_WRITE]),
            ),
        )
        .route(
            "/{id}/shipments",
            bind(post(orders::create_shipment), Guard::any_of([ORDERS_WRITE])),
        )
        .route(
            "/{id}/invoice",
            bind(get(orders::invoice), Guard::any_of([ORDERS_READ])),
        )
        .route(
            "/{id}/timeline",
            bind(get(orders::timeline), Guard::any_of([ORDERS_READ])),
        )
}

fn customer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            bind(
                get(customers::list_customers),
                Guard::any_of([CUSTOMERS_READ]),
            )
            .merge(bind(
                post(customers::create_customer),
                Guard::any_of([CUSTOMERS_WRITE]),
            )),
        )
        .route(
            "/segments",
            bind(get(customers::segments), Guard::any_of([CUSTOMERS_READ])),
        )
        .route(
            "/{id}",
            bind(get(customers::get_customer), Guard::any_of([CUSTOMERS_READ])),
        )
}

fn promotion_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            bind(
                get(promotions::list_promotions),
                Guard::any_of([PROMOTIONS_READ]),
            )
            .merge(bind(
                post(promotions::create_promotion),
                Guard::any_of([PROMOTIONS_WRITE]),
            )),
        )
        .route("/validate", post(promotions::validate_code))
}

fn review_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route(
            "/{id}/moderate",
            bind(post(reviews::moderate), Guard::any_of([REVIEWS_MODERATE])),
        )
}

fn content_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/pages",
            get(content::list_pages).merge(bind(
                post(content::create_page),
                Guard::any_of([CONTENT_WRITE]),
            )),
        )
        .route(
            "/navigation",
            get(content::navigation).merge(bind(
                post(content::create_navigation),
                Guard::any_of([CONTENT_WRITE]),
            )),
        )
        .route(
            "/theme",
            bind(post(content::update_theme), Guard::any_of([CONTENT_WRITE])),
        )
}

fn report_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/sales",
            bind(get(reports::sales), Guard::any_of([REPORTS_READ])),
        )
        .route(
            "/inventory",
            bind(get(reports::inventory), Guard::any_of([REPORTS_READ])),
        )
        .route(
            "/customers",
            bind(get(reports::customers), Guard::any_of([REPORTS_READ])),
        )
}

fn staff_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            bind(get(staff::list_users), Guard::any_of([STAFF_READ]))
                .merge(bind(post(staff::create_user), Guard::any_of([STAFF_WRITE]))),
        )
        .route(
            "/roles",
            bind(get(staff::list_roles), Guard::any_of([STAFF_READ]))
                .merge(bind(post(staff::create_role), Guard::any_of([STAFF_WRITE]))),
        )
        .route(
            "/audit",
            bind(get(staff::audit), Guard::any_of([STAFF_READ])),
        )
}

fn storefront_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(storefront::catalog))
        .route("/catalog/{slug}", get(storefront::product))
        .route("/collections", get(storefront::collections))
        .route(
            "/wishlist",
            bind(
                get(storefront::wishlist)
                    .post(storefront::add_to_wishlist)
                    .delete(storefront::remove_from_wishlist),
                Guard::Optional,
            ),
        )
        .route("/cart/estimate", post(storefront::estimate_cart))
        .route("/checkout", post(storefront::checkout))
        .route("/order-tracking", get(storefront::track_order))
}
