use axum::{Json, http::StatusCode};
use serde_json::{Value, json};

use super::check;
use crate::{
    api::{
        dto::{
            common::{Created, ListResponse},
            staff::{RolePayload, StaffPayload},
        },
        extractors::JsonBody,
    },
    error::AppError,
};

pub async fn list_users() -> Json<ListResponse<Created<StaffPayload>>> {
    Json(ListResponse::new(Vec::new()))
}

pub async fn create_user(
    JsonBody(req): JsonBody<StaffPayload>,
) -> Result<(StatusCode, Json<Created<StaffPayload>>), AppError> {
    check(req.validate())?;
    Ok((StatusCode::CREATED, Json(Created::new(req))))
}

pub async fn list_roles() -> Json<Value> {
    Json(json!({"items": []}))
}

pub async fn create_role(
    JsonBody(req): JsonBody<RolePayload>,
) -> Result<(StatusCode, Json<Created<RolePayload>>), AppError> {
    check(req.validate())?;
    Ok((StatusCode::CREATED, Json(Created::new(req))))
}

pub async fn audit() -> Json<Value> {
    Json(json!({"entries": []}))
}
