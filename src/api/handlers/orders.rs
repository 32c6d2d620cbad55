/*
 * Responsibility
 * - /orders handlers (stubs; nothing is persisted)
 * - POST / is public so the storefront can place orders without staff credentials
 */
use axum::{Json, extract::Path, http::StatusCode};
use chrono::Utc;
use serde_json::{Value, json};

use super::check;
use crate::{
    api::{
        dto::{
            common::{ListResponse, new_id},
            orders::{
                CreatedOrder, OrderDetail, OrderPayload, OrderStatus, RefundRequest,
                RefundResponse, ShipmentPayload, ShipmentResponse, StatusUpdateRequest,
                StatusUpdateResponse,
            },
        },
        extractors::JsonBody,
    },
    error::AppError,
};

pub async fn list_orders() -> Json<ListResponse<OrderDetail>> {
    Json(ListResponse::new(Vec::new()))
}

pub async fn create_order(
    JsonBody(req): JsonBody<OrderPayload>,
) -> Result<(StatusCode, Json<CreatedOrder>), AppError> {
    check(req.validate())?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedOrder {
            id: new_id(),
            status: OrderStatus::PendingPayment,
            order: req,
        }),
    ))
}

pub async fn get_order(Path(id): Path<String>) -> Json<OrderDetail> {
    Json(OrderDetail {
        id,
        status: OrderStatus::Processing,
        payments: Vec::new(),
        shipments: Vec::new(),
        timeline: Vec::new(),
    })
}

pub async fn update_status(
    Path(id): Path<String>,
    JsonBody(req): JsonBody<StatusUpdateRequest>,
) -> Json<StatusUpdateResponse> {
    Json(StatusUpdateResponse {
        id,
        status: req.status,
        note: req.note,
        updated_at: Utc::now().to_rfc3339(),
    })
}

pub async fn refund(
    Path(order_id): Path<String>,
    JsonBody(req): JsonBody<RefundRequest>,
) -> Result<(StatusCode, Json<RefundResponse>), AppError> {
    check(req.validate())?;
    Ok((
        StatusCode::CREATED,
        Json(RefundResponse {
            id: new_id(),
            order_id,
            amount: req.amount,
            status: "pending",
        }),
    ))
}

pub async fn create_shipment(
    Path(order_id): Path<String>,
    JsonBody(req): JsonBody<ShipmentPayload>,
) -> (StatusCode, Json<ShipmentResponse>) {
    (
        StatusCode::CREATED,
        Json(ShipmentResponse {
            id: new_id(),
            order_id,
            shipment: req,
            status: OrderStatus::Shipped,
        }),
    )
}

pub async fn invoice(Path(order_id): Path<String>) -> Json<Value> {
    Json(json!({
        "orderId": order_id,
        "url": "https://example.com/invoices/demo.pdf",
    }))
}

pub async fn timeline(Path(order_id): Path<String>) -> Json<Value> {
    Json(json!({"orderId": order_id, "events": []}))
}
