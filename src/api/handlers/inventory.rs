use axum::{Json, extract::Path, http::StatusCode};
use chrono::Utc;
use serde_json::{Value, json};

use super::check;
use crate::{
    api::{
        dto::inventory::{Movement, MovementPayload, MovementResponse},
        extractors::JsonBody,
    },
    error::AppError,
};

pub async fn alerts() -> Json<Value> {
    Json(json!({"alerts": []}))
}

/// Append one ledger entry for a variant. Stock levels are not tracked yet.
pub async fn record_movement(
    Path(variant_id): Path<String>,
    JsonBody(req): JsonBody<MovementPayload>,
) -> Result<(StatusCode, Json<MovementResponse>), AppError> {
    check(req.validate())?;

    let now = Utc::now();
    let movement = Movement {
        id: format!("{variant_id}-{}", now.timestamp_millis()),
        variant_id,
        delta: req.delta,
        reason: req.reason,
        reference_id: req.reference_id,
        reference_type: req.reference_type,
        metadata: req.metadata,
        created_at: now.to_rfc3339(),
    };

    Ok((
        StatusCode::CREATED,
        Json(MovementResponse {
            movement,
            on_hand: 0,
            reserved: 0,
        }),
    ))
}
