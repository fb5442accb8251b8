// src/classifier/engine.rs
// Stage sequencing for the classification pipeline: gateway call → sanitize →
// validate, with a single bounded repair round before giving up. Worst case
// is two gateway calls per classification.

use std::sync::Arc;

use serde_json::{Value, json};
use thiserror::Error;
use tracing::{error, info, warn};

use super::prompt;
use super::sanitize::sanitize_response;
use super::types::{ClassificationRequest, ClassificationResult};
use super::validate::{ParseFailure, validate_classification, validate_insights};
use crate::llm::{GatewayError, LlmGateway};

/// Terminal pipeline failure. Anything here becomes the caller-facing
/// fallback result.
#[derive(Debug, Error)]
pub enum ClassifyFailure {
    #[error("gateway failure: {0}")]
    Gateway(#[from] GatewayError),
    #[error("reply unparseable after repair: {0}")]
    Repair(ParseFailure),
    #[error("gateway failure during repair: {0}")]
    RepairGateway(GatewayError),
}

#[derive(Debug, Error)]
enum InsightFailure {
    #[error("gateway failure: {0}")]
    Gateway(#[from] GatewayError),
    #[error("unparseable reply: {0}")]
    Parse(#[from] ParseFailure),
}

/// Stateless classification pipeline. Holds only the gateway handle; no
/// per-call state is retained, so one instance is safe to share across
/// concurrent requests.
pub struct Classifier {
    gateway: Arc<dyn LlmGateway>,
}

impl Classifier {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self { gateway }
    }

    /// Classify a guest message. Never fails: a terminal pipeline failure
    /// yields the zero-confidence fallback result instead.
    pub async fn classify(&self, request: &ClassificationRequest) -> ClassificationResult {
        match self.classify_inner(request).await {
            Ok(result) => {
                info!(
                    "classified message: ticket={}, categories={}, confidence={:.2}",
                    result.should_create_ticket,
                    result.categories.len(),
                    result.confidence
                );
                result
            }
            Err(failure) => {
                error!("classification failed: {}", failure);
                fallback_result(&failure)
            }
        }
    }

    /// Classify a batch of requests concurrently. One result per input, in
    /// input order; an element's failure resolves to its own fallback without
    /// touching siblings.
    pub async fn classify_batch(
        &self,
        requests: &[ClassificationRequest],
    ) -> Vec<ClassificationResult> {
        futures::future::join_all(requests.iter().map(|request| self.classify(request))).await
    }

    async fn classify_inner(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResult, ClassifyFailure> {
        let raw = self
            .gateway
            .invoke(prompt::classification_messages(request))
            .await?;
        let candidate = sanitize_response(&raw);

        match validate_classification(&candidate) {
            Ok(result) => Ok(result),
            Err(failure) => self.repair(&candidate, request, failure).await,
        }
    }

    /// One repair round: hand the broken text back to the model, re-run
    /// sanitize and validate on its answer, and stop there. Never recurses.
    async fn repair(
        &self,
        broken: &str,
        request: &ClassificationRequest,
        failure: ParseFailure,
    ) -> Result<ClassificationResult, ClassifyFailure> {
        warn!(
            "reply from {} failed to parse ({}), attempting repair",
            self.gateway.name(),
            failure.detail
        );

        let raw = self
            .gateway
            .invoke(prompt::repair_messages(broken, &request.guest_message))
            .await
            .map_err(ClassifyFailure::RepairGateway)?;
        let candidate = sanitize_response(&raw);

        validate_classification(&candidate).map_err(ClassifyFailure::Repair)
    }

    /// Best-effort open analysis of a guest message. Advisory: a terminal
    /// failure yields an explicit error payload rather than a fabricated
    /// analysis, and no repair round is attempted.
    pub async fn insights(&self, guest_message: &str) -> Value {
        match self.insights_inner(guest_message).await {
            Ok(payload) => payload,
            Err(failure) => {
                error!("insight generation failed: {}", failure);
                json!({ "error": format!("insight generation failed: {failure}") })
            }
        }
    }

    async fn insights_inner(&self, guest_message: &str) -> Result<Value, InsightFailure> {
        let raw = self
            .gateway
            .invoke(prompt::insight_messages(guest_message))
            .await?;
        let candidate = sanitize_response(&raw);
        Ok(validate_insights(&candidate)?)
    }
}

/// Safe result returned when the pipeline cannot produce a validated answer:
/// no ticket, zero confidence, reasoning naming the failure class.
pub fn fallback_result(failure: &ClassifyFailure) -> ClassificationResult {
    ClassificationResult {
        should_create_ticket: false,
        categories: Vec::new(),
        confidence: 0.0,
        reasoning: format!("classification failed: {failure}"),
        suggested_priority: "low".to_string(),
        estimated_completion_time: None,
    }
}
