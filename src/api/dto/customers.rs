use serde::{Deserialize, Serialize};

use super::common::require_email;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl CustomerPayload {
    pub fn validate(&self) -> Result<(), &'static str> {
        require_email(&self.email)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedCustomer {
    pub id: String,
    #[serde(flatten)]
    pub customer: CustomerPayload,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct CustomerDetail {
    pub id: String,
    pub email: String,
    pub tags: Vec<String>,
    pub addresses: Vec<serde_json::Value>,
}
