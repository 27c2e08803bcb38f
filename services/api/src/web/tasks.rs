//! services/api/src/web/tasks.rs
//!
//! Axum handlers for the Task surface: CRUD plus completion toggling.

use crate::web::courses::port_error_response;
use crate::web::rest::user_id_from_headers;
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use easyflow_core::domain::{Task, TaskDraft};
use std::sync::Arc;
use uuid::Uuid;

/// List the user's tasks, soonest due first.
#[utoipa::path(
    get,
    path = "/tasks",
    responses(
        (status = 200, description = "The user's tasks", body = [Task]),
        (status = 400, description = "Missing or invalid x-user-id header")
    ),
    params(("x-user-id" = Uuid, Header, description = "The unique ID of the user."))
)]
pub async fn list_tasks_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let user_id = user_id_from_headers(&headers)?;
    let tasks = app_state
        .store
        .list_tasks(user_id)
        .await
        .map_err(port_error_response)?;
    Ok(Json(tasks))
}

/// Create a task from a manual form entry.
#[utoipa::path(
    post,
    path = "/tasks",
    request_body = TaskDraft,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Missing or invalid x-user-id header")
    ),
    params(("x-user-id" = Uuid, Header, description = "The unique ID of the user."))
)]
pub async fn create_task_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(draft): Json<TaskDraft>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let user_id = user_id_from_headers(&headers)?;
    let task = app_state
        .store
        .create_task(user_id, draft)
        .await
        .map_err(port_error_response)?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Replace a task record in full.
#[utoipa::path(
    put,
    path = "/tasks/{id}",
    request_body = TaskDraft,
    responses(
        (status = 200, description = "The updated task", body = Task),
        (status = 404, description = "No such task for this user")
    ),
    params(
        ("id" = Uuid, Path, description = "The task id."),
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn replace_task_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(draft): Json<TaskDraft>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let user_id = user_id_from_headers(&headers)?;
    let task = app_state
        .store
        .replace_task(user_id, id, draft)
        .await
        .map_err(port_error_response)?;
    Ok(Json(task))
}

/// Delete a task.
#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    responses(
        (status = 204, description = "Task deleted"),
        (status = 404, description = "No such task for this user")
    ),
    params(
        ("id" = Uuid, Path, description = "The task id."),
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn delete_task_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let user_id = user_id_from_headers(&headers)?;
    app_state
        .store
        .delete_task(user_id, id)
        .await
        .map_err(port_error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Flip a task's completed flag.
#[utoipa::path(
    post,
    path = "/tasks/{id}/toggle",
    responses(
        (status = 200, description = "The toggled task", body = Task),
        (status = 404, description = "No such task for this user")
    ),
    params(
        ("id" = Uuid, Path, description = "The task id."),
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn toggle_task_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let user_id = user_id_from_headers(&headers)?;
    let task = app_state
        .store
        .toggle_task(user_id, id)
        .await
        .map_err(port_error_response)?;
    Ok(Json(task))
}
