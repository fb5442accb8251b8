// src/api/http/handlers.rs
// Health and taxonomy endpoints.

use axum::Json;
use chrono::Utc;
use serde::Serialize;
use serde_json::{Value, json};

use crate::taxonomy::ServiceCategory;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_status: String,
    pub timestamp: String,
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Returns the static category taxonomy: key → human-readable description.
pub async fn categories_handler() -> Json<Value> {
    let mut categories = serde_json::Map::new();
    for category in ServiceCategory::ALL {
        categories.insert(category.key().to_string(), json!(category.description()));
    }

    Json(json!({
        "categories": categories,
        "description": "Available service categories for classification",
    }))
}
