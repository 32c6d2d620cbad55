/*
 * Responsibility
 * - Public storefront: browse, collections, cart estimate, checkout, tracking
 * - Wishlist runs under the optional guard: signed-in callers get their own
 *   list, guests a session-less one
 */
use axum::{
    Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde_json::{Value, json};
use tracing::debug;

use super::check;
use crate::{
    api::{
        dto::{
            common::{new_id, require},
            orders::OrderStatus,
            storefront::{
                CartEstimate, CartEstimateRequest, CatalogMeta, CatalogPage, CatalogQuery,
                CheckoutRequest, CheckoutResponse, CreatedWishlistItem, ReviewSummary,
                StorefrontProduct, TrackingQuery, TrackingResponse, Wishlist, WishlistItem,
                WishlistScope,
            },
        },
        extractors::{Ctx, JsonBody, RequestContext},
    },
    error::AppError,
};

pub async fn catalog(Query(query): Query<CatalogQuery>) -> Json<CatalogPage> {
    Json(CatalogPage {
        items: Vec::new(),
        meta: CatalogMeta { query, total: 0 },
    })
}

pub async fn product(Path(slug): Path<String>) -> Json<StorefrontProduct> {
    Json(StorefrontProduct {
        slug,
        title: "Sample product".to_string(),
        variants: Vec::new(),
        reviews: ReviewSummary {
            average: 0.0,
            count: 0,
        },
    })
}

pub async fn collections() -> Json<Value> {
    Json(json!({"items": [], "meta": {"total": 0}}))
}

fn wishlist_scope(ctx: &RequestContext) -> WishlistScope {
    match ctx.user_id() {
        Some(_) => WishlistScope::Account,
        None => WishlistScope::Guest,
    }
}

pub async fn wishlist(Ctx(ctx): Ctx) -> Json<Wishlist> {
    Json(Wishlist {
        items: Vec::new(),
        scope: wishlist_scope(&ctx),
    })
}

pub async fn add_to_wishlist(
    Ctx(ctx): Ctx,
    JsonBody(item): JsonBody<WishlistItem>,
) -> Result<(StatusCode, Json<CreatedWishlistItem>), AppError> {
    check(require(&item.product_id, "productId is required"))?;

    debug!(
        request_id = %ctx.request_id(),
        user_id = ctx.user_id().unwrap_or("-"),
        product_id = %item.product_id,
        "wishlist item added"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedWishlistItem {
            id: new_id(),
            item,
            scope: wishlist_scope(&ctx),
        }),
    ))
}

pub async fn remove_from_wishlist(
    Ctx(ctx): Ctx,
    JsonBody(item): JsonBody<WishlistItem>,
) -> StatusCode {
    debug!(
        request_id = %ctx.request_id(),
        user_id = ctx.user_id().unwrap_or("-"),
        product_id = %item.product_id,
        "wishlist item removed"
    );
    StatusCode::NO_CONTENT
}

pub async fn estimate_cart(JsonBody(req): JsonBody<CartEstimateRequest>) -> Json<CartEstimate> {
    Json(CartEstimate::for_items(req.items))
}

pub async fn checkout(
    JsonBody(req): JsonBody<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>), AppError> {
    check(req.validate())?;
    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            order_id: new_id(),
            status: OrderStatus::PendingPayment,
            payment_intent_client_secret: "mock",
        }),
    ))
}

pub async fn track_order(Query(query): Query<TrackingQuery>) -> Json<TrackingResponse> {
    Json(TrackingResponse {
        reference: query.reference,
        status: OrderStatus::Processing,
        timeline: Vec::new(),
    })
}
