//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use easyflow_core::ports::{CompletionService, CourseStore};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Absent when no model credential was configured; the parse endpoint
    /// then reports a configuration error instead of calling out.
    pub completion: Option<Arc<dyn CompletionService>>,
    pub store: Arc<dyn CourseStore>,
}
