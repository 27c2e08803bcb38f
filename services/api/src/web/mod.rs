pub mod courses;
pub mod rest;
pub mod state;
pub mod tasks;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use state::AppState;
use std::sync::Arc;

// Re-export the main handlers to make them easily accessible
// to the binary that will build the web server router.
pub use rest::{import_syllabus_handler, parse_syllabus_handler};

/// Builds the API router. Shared between the server binary and the
/// integration tests so both exercise the same wiring.
pub fn api_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/syllabus/parse", post(parse_syllabus_handler))
        .route("/syllabus/import", post(import_syllabus_handler))
        .route(
            "/courses",
            get(courses::list_courses_handler).post(courses::create_course_handler),
        )
        .route(
            "/courses/{id}",
            get(courses::get_course_handler)
                .put(courses::replace_course_handler)
                .delete(courses::delete_course_handler),
        )
        .route(
            "/tasks",
            get(tasks::list_tasks_handler).post(tasks::create_task_handler),
        )
        .route(
            "/tasks/{id}",
            put(tasks::replace_task_handler).delete(tasks::delete_task_handler),
        )
        .route("/tasks/{id}/toggle", post(tasks::toggle_task_handler))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .with_state(app_state)
}
