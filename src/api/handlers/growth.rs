use axum::Json;
use serde::Deserialize;
use serde_json::{Value, json};

use super::check;
use crate::{
    api::{dto::common::require, extractors::JsonBody},
    error::AppError,
};

#[derive(Debug, Deserialize)]
pub struct CopilotRequest {
    pub prompt: String,
}

pub async fn profit() -> Json<Value> {
    Json(json!({"grossMargin": 0, "orders": 0, "lowMarginSkus": []}))
}

pub async fn reorder() -> Json<Value> {
    Json(json!({"suggestions": []}))
}

pub async fn copilot(JsonBody(req): JsonBody<CopilotRequest>) -> Result<Json<Value>, AppError> {
    check(require(&req.prompt, "prompt is required"))?;
    Ok(Json(json!({
        "prompt": req.prompt,
        "output": "Generated description placeholder.",
    })))
}
