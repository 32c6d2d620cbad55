/*
 * Responsibility
 * - Public storefront DTOs (browse, cart, checkout, tracking, wishlist)
 */
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::common::require_email;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSort {
    PriceAsc,
    PriceDesc,
    Newest,
    Bestsellers,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<CatalogSort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CatalogMeta {
    #[serde(flatten)]
    pub query: CatalogQuery,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct CatalogPage {
    pub items: Vec<serde_json::Value>,
    pub meta: CatalogMeta,
}

#[derive(Debug, Serialize)]
pub struct ReviewSummary {
    pub average: f64,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct StorefrontProduct {
    pub slug: String,
    pub title: String,
    pub variants: Vec<serde_json::Value>,
    pub reviews: ReviewSummary,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
}

/// Whether a wishlist call was served for a signed-in account or a guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WishlistScope {
    Account,
    Guest,
}

#[derive(Debug, Serialize)]
pub struct Wishlist {
    pub items: Vec<WishlistItem>,
    pub scope: WishlistScope,
}

#[derive(Debug, Serialize)]
pub struct CreatedWishlistItem {
    pub id: String,
    #[serde(flatten)]
    pub item: WishlistItem,
    pub scope: WishlistScope,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CartItem {
    pub sku: String,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct CartEstimateRequest {
    pub items: Vec<CartItem>,
}

#[derive(Debug, Serialize)]
pub struct CartEstimate {
    pub items: Vec<CartItem>,
    pub subtotal: u64,
    pub shipping: u64,
    pub taxes: u64,
    pub total: u64,
}

// Placeholder pricing: every unit costs 10, taxes are 10% (rounded).
const UNIT_PRICE: u64 = 10;

impl CartEstimate {
    pub fn for_items(items: Vec<CartItem>) -> Self {
        let subtotal: u64 = items
            .iter()
            .map(|i| u64::from(i.quantity) * UNIT_PRICE)
            .sum();
        let taxes = (subtotal as f64 * 0.1).round() as u64;

        Self {
            items,
            subtotal,
            shipping: 0,
            taxes,
            total: subtotal,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Cod,
    BankTransfer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    pub sku: String,
    pub quantity: u32,
    pub price: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub email: String,
    pub items: Vec<CheckoutItem>,
    pub shipping_address: BTreeMap<String, String>,
    pub billing_address: Option<BTreeMap<String, String>>,
    pub payment_method: PaymentMethod,
    pub customer_id: Option<String>,
    pub notes: Option<String>,
}

impl CheckoutRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        require_email(&self.email)?;
        if self.items.is_empty() {
            return Err("items must not be empty");
        }
        if self.shipping_address.is_empty() {
            return Err("shippingAddress is required");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order_id: String,
    pub status: super::orders::OrderStatus,
    pub payment_intent_client_secret: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct TrackingQuery {
    pub reference: String,
}

#[derive(Debug, Serialize)]
pub struct TrackingResponse {
    pub reference: String,
    pub status: super::orders::OrderStatus,
    pub timeline: Vec<serde_json::Value>,
}
