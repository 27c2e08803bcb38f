//! services/api/src/web/courses.rs
//!
//! Axum handlers for the Course CRUD surface. Courses are mutated only
//! through full-record replace, so the update route takes a complete draft.

use crate::web::rest::user_id_from_headers;
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use easyflow_core::domain::{Course, CourseDraft};
use easyflow_core::ports::PortError;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

pub(crate) fn port_error_response(e: PortError) -> (StatusCode, String) {
    match e {
        PortError::NotFound(what) => (StatusCode::NOT_FOUND, format!("Not found: {what}")),
        other => {
            error!("store operation failed: {:?}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

/// List the user's courses.
#[utoipa::path(
    get,
    path = "/courses",
    responses(
        (status = 200, description = "The user's courses", body = [Course]),
        (status = 400, description = "Missing or invalid x-user-id header")
    ),
    params(("x-user-id" = Uuid, Header, description = "The unique ID of the user."))
)]
pub async fn list_courses_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let user_id = user_id_from_headers(&headers)?;
    let courses = app_state
        .store
        .list_courses(user_id)
        .await
        .map_err(port_error_response)?;
    Ok(Json(courses))
}

/// Create a course from a manual form entry.
#[utoipa::path(
    post,
    path = "/courses",
    request_body = CourseDraft,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Missing or invalid x-user-id header")
    ),
    params(("x-user-id" = Uuid, Header, description = "The unique ID of the user."))
)]
pub async fn create_course_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(draft): Json<CourseDraft>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let user_id = user_id_from_headers(&headers)?;
    let course = app_state
        .store
        .create_course(user_id, draft)
        .await
        .map_err(port_error_response)?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// Fetch one course by id.
#[utoipa::path(
    get,
    path = "/courses/{id}",
    responses(
        (status = 200, description = "The course", body = Course),
        (status = 404, description = "No such course for this user")
    ),
    params(
        ("id" = Uuid, Path, description = "The course id."),
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn get_course_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let user_id = user_id_from_headers(&headers)?;
    let course = app_state
        .store
        .get_course(user_id, id)
        .await
        .map_err(port_error_response)?;
    Ok(Json(course))
}

/// Replace a course record in full.
#[utoipa::path(
    put,
    path = "/courses/{id}",
    request_body = CourseDraft,
    responses(
        (status = 200, description = "The updated course", body = Course),
        (status = 404, description = "No such course for this user")
    ),
    params(
        ("id" = Uuid, Path, description = "The course id."),
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn replace_course_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(draft): Json<CourseDraft>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let user_id = user_id_from_headers(&headers)?;
    let course = app_state
        .store
        .replace_course(user_id, id, draft)
        .await
        .map_err(port_error_response)?;
    Ok(Json(course))
}

/// Delete a course.
#[utoipa::path(
    delete,
    path = "/courses/{id}",
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "No such course for this user")
    ),
    params(
        ("id" = Uuid, Path, description = "The course id."),
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn delete_course_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let user_id = user_id_from_headers(&headers)?;
    app_state
        .store
        .delete_course(user_id, id)
        .await
        .map_err(port_error_response)?;
    Ok(StatusCode::NO_CONTENT)
}
