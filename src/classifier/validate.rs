// src/classifier/validate.rs
// Turns sanitized reply text into a typed ClassificationResult. Structural
// parse failures are recoverable signals for the repair coordinator; field
// defects are repaired locally (drop the entry, default the scalar) so that
// partial validity beats total failure.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use super::types::{CategoryAssignment, ClassificationResult};
use crate::taxonomy::{ServiceCategory, Urgency};

const SNIPPET_LEN: usize = 240;
const DEFAULT_REASONING: &str = "classification completed";
const DEFAULT_PRIORITY: &str = "low";

/// Sanitized text that failed to parse as the expected JSON object. Carries a
/// truncated copy of the offending text for logging and the repair prompt.
#[derive(Debug, Error)]
#[error("{detail}; text: {snippet}")]
pub struct ParseFailure {
    pub snippet: String,
    pub detail: String,
}

impl ParseFailure {
    fn new(text: &str, detail: impl Into<String>) -> Self {
        Self {
            snippet: truncate(text, SNIPPET_LEN),
            detail: detail.into(),
        }
    }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        text.chars().take(limit).collect()
    }
}

/// Parses and validates a classification reply.
///
/// Returns `ParseFailure` only for structurally broken input (not JSON, or
/// not a JSON object). Everything past that point succeeds: defective
/// category entries are dropped with a warning and missing scalars take
/// their documented defaults.
pub fn validate_classification(text: &str) -> Result<ClassificationResult, ParseFailure> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ParseFailure::new(text, e.to_string()))?;

    let Some(object) = value.as_object() else {
        return Err(ParseFailure::new(text, "expected a JSON object"));
    };

    let categories = collect_categories(object);

    let should_create_ticket = object
        .get("should_create_ticket")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let confidence =
        clamp_confidence(object.get("confidence").and_then(Value::as_f64).unwrap_or(0.0));

    let reasoning = object
        .get("reasoning")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_REASONING.to_string());

    let suggested_priority = object
        .get("suggested_priority")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_PRIORITY.to_string());

    let estimated_completion_time = object
        .get("estimated_completion_time")
        .and_then(Value::as_str)
        .map(str::to_string);

    let result = ClassificationResult {
        should_create_ticket,
        categories,
        confidence,
        reasoning,
        suggested_priority,
        estimated_completion_time,
    };

    // The ticket flag and the category list are supposed to agree. A
    // violation is a model defect worth flagging, not a reason to fail.
    if result.should_create_ticket && result.categories.is_empty() {
        warn!("ticket requested with no category assignments");
    } else if !result.should_create_ticket && !result.categories.is_empty() {
        warn!(
            "{} category assignments present on a no-ticket result",
            result.categories.len()
        );
    }

    Ok(result)
}

/// Loose validation for the insight pipeline: any well-formed JSON value is
/// accepted as-is, unknown keys included.
pub fn validate_insights(text: &str) -> Result<Value, ParseFailure> {
    serde_json::from_str(text).map_err(|e| ParseFailure::new(text, e.to_string()))
}

fn collect_categories(object: &Map<String, Value>) -> Vec<CategoryAssignment> {
    let Some(entries) = object.get("categories").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut categories = Vec::new();
    for entry in entries {
        match parse_category(entry) {
            Some(assignment) => categories.push(assignment),
            None => warn!("dropping invalid category entry: {}", entry),
        }
    }
    categories
}

fn parse_category(entry: &Value) -> Option<CategoryAssignment> {
    let category = ServiceCategory::from_key(entry.get("category")?.as_str()?)?;

    let message = entry.get("message")?.as_str()?.trim();
    if message.is_empty() {
        return None;
    }

    let urgency = Urgency::parse(entry.get("urgency")?.as_str()?)?;

    Some(CategoryAssignment {
        category,
        message: message.to_string(),
        urgency,
    })
}

fn clamp_confidence(raw: f64) -> f32 {
    if !(0.0..=1.0).contains(&raw) {
        warn!("confidence {} outside [0.0, 1.0], clamping", raw);
    }
    raw.clamp(0.0, 1.0) as f32
}
