use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementReason {
    Receive,
    Adjustment,
    Sale,
    Refund,
    Reserve,
    Release,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementPayload {
    pub delta: i64,
    pub reason: MovementReason,
    pub reference_type: Option<String>,
    pub reference_id: Option<String>,
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl MovementPayload {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.delta == 0 {
            return Err("delta must not be zero");
        }
        Ok(())
    }
}

/// One append-only ledger entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: String,
    pub variant_id: String,
    pub delta: i64,
    pub reason: MovementReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementResponse {
    pub movement: Movement,
    pub on_hand: i64,
    pub reserved: i64,
}
