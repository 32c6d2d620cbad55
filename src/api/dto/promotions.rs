use serde::{Deserialize, Serialize};

use super::common::require;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionType {
    Percentage,
    Fixed,
    FreeShipping,
    Automatic,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionPayload {
    pub code: String,
    #[serde(rename = "type")]
    pub kind: PromotionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_spend: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_customer_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<String>,
}

impl PromotionPayload {
    pub fn validate(&self) -> Result<(), &'static str> {
        require(&self.code, "code is required")?;
        if let PromotionType::Percentage = self.kind
            && self.value.is_some_and(|v| !(0.0..=100.0).contains(&v))
        {
            return Err("percentage value must be within 0..=100");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedPromotion {
    pub id: String,
    #[serde(flatten)]
    pub promotion: PromotionPayload,
    pub status: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatePromotionRequest {
    pub code: String,
    pub cart_total: f64,
    pub customer_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ValidatePromotionResponse {
    pub code: String,
    pub valid: bool,
    pub discount: f64,
}
