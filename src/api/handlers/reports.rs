use axum::{Json, extract::Query};
use serde::Deserialize;
use serde_json::{Value, json};

const DEFAULT_RANGE: &str = "last_30_days";

#[derive(Debug, Deserialize)]
pub struct SalesQuery {
    pub range: Option<String>,
}

pub async fn sales(Query(query): Query<SalesQuery>) -> Json<Value> {
    let range = query
        .range
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_RANGE.to_string());

    Json(json!({
        "range": range,
        "totals": {"revenue": 0, "orders": 0, "units": 0},
    }))
}

pub async fn inventory() -> Json<Value> {
    Json(json!({"lowStock": [], "valuation": 0}))
}

pub async fn customers() -> Json<Value> {
    Json(json!({"segments": [], "ltvEstimates": []}))
}
