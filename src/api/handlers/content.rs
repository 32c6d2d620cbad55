use axum::{Json, http::StatusCode};
use serde_json::{Value, json};

use super::check;
use crate::{
    api::{
        dto::{
            common::{Created, ListResponse, require},
            content::{NavigationPayload, PagePayload, ThemeSetting, ThemeUpdated},
        },
        extractors::JsonBody,
    },
    error::AppError,
};

pub async fn list_pages() -> Json<ListResponse<Created<PagePayload>>> {
    Json(ListResponse::new(Vec::new()))
}

pub async fn create_page(
    JsonBody(req): JsonBody<PagePayload>,
) -> Result<(StatusCode, Json<Created<PagePayload>>), AppError> {
    check(req.validate())?;
    Ok((StatusCode::CREATED, Json(Created::new(req))))
}

pub async fn navigation() -> Json<Value> {
    Json(json!({"items": []}))
}

pub async fn create_navigation(
    JsonBody(req): JsonBody<NavigationPayload>,
) -> Result<(StatusCode, Json<Created<NavigationPayload>>), AppError> {
    check(req.validate())?;
    Ok((StatusCode::CREATED, Json(Created::new(req))))
}

pub async fn update_theme(
    JsonBody(req): JsonBody<ThemeSetting>,
) -> Result<Json<ThemeUpdated>, AppError> {
    check(require(&req.setting, "setting is required"))?;
    Ok(Json(ThemeUpdated {
        updated: true,
        setting: req,
    }))
}
