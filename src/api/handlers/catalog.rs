use axum::{Json, extract::Path, http::StatusCode};

use super::check;
use crate::{
    api::{
        dto::{
            catalog::{ProductDetail, ProductPayload},
            common::{Created, ListResponse},
        },
        extractors::JsonBody,
    },
    error::AppError,
};

pub async fn list_products() -> Json<ListResponse<ProductDetail>> {
    Json(ListResponse::new(Vec::new()))
}

pub async fn create_product(
    JsonBody(req): JsonBody<ProductPayload>,
) -> Result<(StatusCode, Json<Created<ProductPayload>>), AppError> {
    check(req.validate())?;
    Ok((StatusCode::CREATED, Json(Created::new(req))))
}

pub async fn get_product(Path(id): Path<String>) -> Json<ProductDetail> {
    Json(ProductDetail {
        id,
        title: "Sample product".to_string(),
        variants: Vec::new(),
        tags: Vec::new(),
    })
}
