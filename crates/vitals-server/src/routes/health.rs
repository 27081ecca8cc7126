use axum::Json;
use serde_json::{json, Value};

pub async fn root() -> &'static str {
    "Patient records API"
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
