use axum::{Json, extract::Path, http::StatusCode};

use super::check;
use crate::{
    api::{
        dto::{
            common::{ListResponse, new_id},
            reviews::{
                CreatedReview, ModerateRequest, ModerateResponse, ModerationAction,
                ReviewPayload, ReviewStatus,
            },
        },
        extractors::JsonBody,
    },
    error::AppError,
};

pub async fn list_reviews() -> Json<ListResponse<CreatedReview>> {
    Json(ListResponse::new(Vec::new()))
}

/// New reviews wait for moderation.
pub async fn create_review(
    JsonBody(req): JsonBody<ReviewPayload>,
) -> Result<(StatusCode, Json<CreatedReview>), AppError> {
    check(req.validate())?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedReview {
            id: new_id(),
            status: ReviewStatus::Pending,
            review: req,
        }),
    ))
}

pub async fn moderate(
    Path(id): Path<String>,
    JsonBody(req): JsonBody<ModerateRequest>,
) -> Json<ModerateResponse> {
    let status = match req.action {
        ModerationAction::Approve => ReviewStatus::Published,
        ModerationAction::Reject => ReviewStatus::Rejected,
    };
    Json(ModerateResponse { id, status })
}
