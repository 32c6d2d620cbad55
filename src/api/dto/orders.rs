/*
 * Responsibility
 * - Orders request/response DTOs
 * - Status values follow the order lifecycle; no transition rules are enforced here
 */
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::common::require_email;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    PendingPayment,
    Paid,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LineItem {
    pub sku: String,
    pub quantity: u32,
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub email: String,
    pub line_items: Vec<LineItem>,
    pub shipping_address: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OrderPayload {
    pub fn validate(&self) -> Result<(), &'static str> {
        require_email(&self.email)?;
        if self.line_items.is_empty() {
            return Err("lineItems must not be empty");
        }
        if self.line_items.iter().any(|i| i.quantity == 0) {
            return Err("quantity must be > 0");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedOrder {
    pub id: String,
    pub status: OrderStatus,
    #[serde(flatten)]
    pub order: OrderPayload,
}

#[derive(Debug, Serialize)]
pub struct OrderDetail {
    pub id: String,
    pub status: OrderStatus,
    pub payments: Vec<serde_json::Value>,
    pub shipments: Vec<serde_json::Value>,
    pub timeline: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateResponse {
    pub id: String,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct RefundRequest {
    pub amount: f64,
    pub reason: Option<String>,
}

impl RefundRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err("amount must be > 0");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundResponse {
    pub id: String,
    pub order_id: String,
    pub amount: f64,
    pub status: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShipmentItem {
    pub sku: String,
    pub quantity: u32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ShipmentItem>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentResponse {
    pub id: String,
    pub order_id: String,
    #[serde(flatten)]
    pub shipment: ShipmentPayload,
    pub status: OrderStatus,
}
