// src/api/http/classify.rs
// Classification endpoints: single, batch, and insights. Classification
// handlers always answer 200 with a schema-valid body; the only rejection is
// a malformed request (empty guest message).

use axum::{Json, extract::State};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::classifier::{ClassificationRequest, ClassificationResult};
use crate::state::AppState;

#[derive(Serialize)]
pub struct BatchClassifyResponse {
    pub results: Vec<ClassificationResult>,
    pub total_processed: usize,
}

pub async fn classify_handler(
    State(app_state): State<AppState>,
    Json(request): Json<ClassificationRequest>,
) -> ApiResult<Json<ClassificationResult>> {
    validate_request(&request)?;

    info!("classifying message: {}", preview(&request.guest_message));
    let result = app_state.classifier.classify(&request).await;

    Ok(Json(result))
}

pub async fn insights_handler(
    State(app_state): State<AppState>,
    Json(request): Json<ClassificationRequest>,
) -> ApiResult<Json<Value>> {
    validate_request(&request)?;

    let payload = app_state.classifier.insights(&request.guest_message).await;
    Ok(Json(payload))
}

pub async fn batch_classify_handler(
    State(app_state): State<AppState>,
    Json(requests): Json<Vec<ClassificationRequest>>,
) -> ApiResult<Json<BatchClassifyResponse>> {
    for request in &requests {
        validate_request(request)?;
    }

    info!("batch classifying {} messages", requests.len());
    let results = app_state.classifier.classify_batch(&requests).await;

    Ok(Json(BatchClassifyResponse {
        total_processed: results.len(),
        results,
    }))
}

fn validate_request(request: &ClassificationRequest) -> Result<(), ApiError> {
    if request.guest_message.trim().is_empty() {
        return Err(ApiError::unprocessable_entity("guest_message must not be empty"));
    }
    Ok(())
}

/// First 100 characters of the guest message, for log lines.
fn preview(message: &str) -> String {
    message.chars().take(100).collect()
}
