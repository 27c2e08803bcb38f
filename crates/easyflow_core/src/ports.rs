//! crates/easyflow_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of specific external implementations like the model
//! provider or the record store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Course, CourseDraft, Task, TaskDraft};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The remote service rejected or failed the call (transport included).
    #[error("Upstream service error: {0}")]
    Upstream(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// A hosted language-model completion service.
///
/// One prompt in, one completion out. The pipeline never retries a failed or
/// malformed completion; whatever comes back is final for that request.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Sends a prompt and returns the model's raw text reply.
    async fn complete(&self, prompt: &str, max_output_tokens: u32) -> PortResult<String>;
}

/// The Course/Task record store. In production this is a managed document
/// database reached through serverless functions; every operation is keyed by
/// the owning user's identity plus the record id.
#[async_trait]
pub trait CourseStore: Send + Sync {
    // --- Course Management ---
    async fn create_course(&self, user_id: Uuid, draft: CourseDraft) -> PortResult<Course>;

    async fn list_courses(&self, user_id: Uuid) -> PortResult<Vec<Course>>;

    async fn get_course(&self, user_id: Uuid, course_id: Uuid) -> PortResult<Course>;

    /// Full-record replace; partial updates are not supported.
    async fn replace_course(
        &self,
        user_id: Uuid,
        course_id: Uuid,
        draft: CourseDraft,
    ) -> PortResult<Course>;

    async fn delete_course(&self, user_id: Uuid, course_id: Uuid) -> PortResult<()>;

    // --- Task Management ---
    async fn create_task(&self, user_id: Uuid, draft: TaskDraft) -> PortResult<Task>;

    async fn list_tasks(&self, user_id: Uuid) -> PortResult<Vec<Task>>;

    async fn replace_task(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        draft: TaskDraft,
    ) -> PortResult<Task>;

    async fn delete_task(&self, user_id: Uuid, task_id: Uuid) -> PortResult<()>;

    /// Flips the task's completed flag and returns the updated record.
    async fn toggle_task(&self, user_id: Uuid, task_id: Uuid) -> PortResult<Task>;
}
