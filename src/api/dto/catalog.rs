use serde::{Deserialize, Serialize};

use super::common::require;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub title: String,
    pub sku: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ProductPayload {
    pub fn validate(&self) -> Result<(), &'static str> {
        require(&self.title, "title is required")?;
        require(&self.sku, "sku is required")?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("price must be >= 0");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ProductDetail {
    pub id: String,
    pub title: String,
    pub variants: Vec<serde_json::Value>,
    pub tags: Vec<String>,
}
