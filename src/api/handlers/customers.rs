use axum::{Json, extract::Path, http::StatusCode};
use chrono::Utc;
use serde_json::{Value, json};

use super::check;
use crate::{
    api::{
        dto::{
            common::{ListResponse, new_id},
            customers::{CreatedCustomer, CustomerDetail, CustomerPayload},
        },
        extractors::JsonBody,
    },
    error::AppError,
};

pub async fn list_customers() -> Json<ListResponse<CustomerDetail>> {
    Json(ListResponse::new(Vec::new()))
}

pub async fn create_customer(
    JsonBody(req): JsonBody<CustomerPayload>,
) -> Result<(StatusCode, Json<CreatedCustomer>), AppError> {
    check(req.validate())?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedCustomer {
            id: new_id(),
            customer: req,
            created_at: Utc::now().to_rfc3339(),
        }),
    ))
}

pub async fn get_customer(Path(id): Path<String>) -> Json<CustomerDetail> {
    Json(CustomerDetail {
        id,
        email: "customer@example.com".to_string(),
        tags: vec!["vip".to_string()],
        addresses: Vec::new(),
    })
}

pub async fn segments() -> Json<Value> {
    Json(json!({"segments": []}))
}
