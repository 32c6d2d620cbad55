use serde::{Deserialize, Serialize};

use super::common::require;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayload {
    pub product_id: String,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
}

impl ReviewPayload {
    pub fn validate(&self) -> Result<(), &'static str> {
        require(&self.product_id, "productId is required")?;
        if !(1..=5).contains(&self.rating) {
            return Err("rating must be within 1..=5");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Published,
    Rejected,
}

#[derive(Debug, Serialize)]
pub struct CreatedReview {
    pub id: String,
    pub status: ReviewStatus,
    #[serde(flatten)]
    pub review: ReviewPayload,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationAction {
    Approve,
    Reject,
}

#[derive(Debug, Deserialize)]
pub struct ModerateRequest {
    pub action: ModerationAction,
}

#[derive(Debug, Serialize)]
pub struct ModerateResponse {
    pub id: String,
    pub status: ReviewStatus,
}
