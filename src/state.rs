// src/state.rs

use std::sync::Arc;

use crate::classifier::Classifier;

/// Shared application state for the HTTP server. Immutable after startup, so
/// concurrent handlers need no synchronization beyond the Arc.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<Classifier>,
}

impl AppState {
    pub fn new(classifier: Arc<Classifier>) -> Self {
        Self { classifier }
    }
}
