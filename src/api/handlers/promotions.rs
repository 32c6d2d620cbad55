use axum::{Json, http::StatusCode};

use super::check;
use crate::{
    api::{
        dto::{
            common::{ListResponse, new_id, require},
            promotions::{
                CreatedPromotion, PromotionPayload, ValidatePromotionRequest,
                ValidatePromotionResponse,
            },
        },
        extractors::JsonBody,
    },
    error::AppError,
};

pub async fn list_promotions() -> Json<ListResponse<CreatedPromotion>> {
    Json(ListResponse::new(Vec::new()))
}

pub async fn create_promotion(
    JsonBody(req): JsonBody<PromotionPayload>,
) -> Result<(StatusCode, Json<CreatedPromotion>), AppError> {
    check(req.validate())?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedPromotion {
            id: new_id(),
            promotion: req,
            status: "active",
        }),
    ))
}

// Every code is accepted with no discount until promotions are persisted.
pub async fn validate_code(
    JsonBody(req): JsonBody<ValidatePromotionRequest>,
) -> Result<Json<ValidatePromotionResponse>, AppError> {
    check(require(&req.code, "code is required"))?;
    Ok(Json(ValidatePromotionResponse {
        code: req.code,
        valid: true,
        discount: 0.0,
    }))
}
