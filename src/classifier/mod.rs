// src/classifier/mod.rs

pub mod engine;
pub mod prompt;
pub mod sanitize;
pub mod types;
pub mod validate;

pub use engine::{Classifier, ClassifyFailure};
pub use types::{CategoryAssignment, ClassificationRequest, ClassificationResult};
