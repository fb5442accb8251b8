// src/classifier/types.rs

use serde::{Deserialize, Serialize};

use crate::taxonomy::{ServiceCategory, Urgency};

/// One assignment per requested service: where it goes, what staff should do,
/// and how fast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAssignment {
    pub category: ServiceCategory,
    /// Single-line, staff-facing instruction generated by the model.
    pub message: String,
    pub urgency: Urgency,
}

/// Immutable per-request input. Created once per inbound message, never
/// persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationRequest {
    pub guest_message: String,
    pub guest_id: Option<String>,
    pub room_number: Option<String>,
}

impl ClassificationRequest {
    pub fn new(guest_message: impl Into<String>) -> Self {
        Self {
            guest_message: guest_message.into(),
            guest_id: None,
            room_number: None,
        }
    }
}

/// The final typed classification answer. A well-formed result has a
/// non-empty category list exactly when `should_create_ticket` is true;
/// the pipeline reports violations of that shape but does not reject them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub should_create_ticket: bool,
    pub categories: Vec<CategoryAssignment>,
    pub confidence: f32,
    pub reasoning: String,
    pub suggested_priority: String,
    pub estimated_completion_time: Option<String>,
}
