/*
 * Responsibility
 * - POST /auth/login: email/password -> access + refresh pair
 * - POST /auth/refresh: bearer refresh credential -> new access credential
 * - refresh is its own enforcement point: every failure is 401 "invalid token"
 */
use axum::{Json, extract::State, http::HeaderMap};

use super::check;
use crate::{
    api::{
        dto::auth::{LoginRequest, LoginResponse, RefreshResponse},
        extractors::JsonBody,
    },
    error::AppError,
    middleware::auth::bearer_token,
    state::AppState,
};

pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    check(req.validate())?;

    let pair = state.auth.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        token: pair.access.token,
        refresh_token: pair.refresh.token,
    }))
}

pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RefreshResponse>, AppError> {
    let token = bearer_token(&headers).ok_or(AppError::InvalidToken)?;

    let access = state.auth.refresh(token).await?;

    Ok(Json(RefreshResponse {
        token: access.token,
    }))
}
