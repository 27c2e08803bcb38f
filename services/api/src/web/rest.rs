//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the syllabus endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use easyflow_core::{
    domain::{AssignmentEntry, Course, CourseDraft, ExamEntry, Importance, SyllabusRecord, Task,
        TaskDraft, UploadedDocument},
    extract::{ExtractError, ACCEPTED_MEDIA_TYPES, MEDIA_TYPE_DOCX, MEDIA_TYPE_PDF,
        MEDIA_TYPE_TEXT},
    mapper,
    normalize::NormalizeError,
    pipeline::{self, ImportError},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        parse_syllabus_handler,
        import_syllabus_handler,
        crate::web::courses::list_courses_handler,
        crate::web::courses::create_course_handler,
        crate::web::courses::get_course_handler,
        crate::web::courses::replace_course_handler,
        crate::web::courses::delete_course_handler,
        crate::web::tasks::list_tasks_handler,
        crate::web::tasks::create_task_handler,
        crate::web::tasks::replace_task_handler,
        crate::web::tasks::delete_task_handler,
        crate::web::tasks::toggle_task_handler,
    ),
    components(
        schemas(
            SyllabusRecord,
            AssignmentEntry,
            ExamEntry,
            Course,
            CourseDraft,
            Task,
            TaskDraft,
            Importance,
            ErrorBody,
            ImportResponse,
        )
    ),
    tags(
        (name = "Easy Flow API", description = "Course scheduling, task tracking, and AI syllabus import.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The JSON error body returned by the syllabus endpoints.
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(rename = "receivedType", skip_serializing_if = "Option::is_none")]
    pub received_type: Option<String>,
    #[serde(rename = "acceptedTypes", skip_serializing_if = "Option::is_none")]
    pub accepted_types: Option<Vec<String>>,
    /// Development builds only; suppressed in production payloads.
    #[serde(rename = "fileName", skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl ErrorBody {
    fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
            details: None,
            note: None,
            received_type: None,
            accepted_types: None,
            file_name: None,
        }
    }
}

/// The persisted results of a confirmed syllabus import.
#[derive(Serialize, ToSchema)]
pub struct ImportResponse {
    pub course: Course,
    pub tasks: Vec<Task>,
}

//=========================================================================================
// Parse endpoint failures → HTTP responses
//=========================================================================================

/// Everything that can go wrong on the parse endpoint, mapped to the wire
/// contract: 400 for caller problems, 500 for configuration and empty
/// completions, 502 when the model call itself failed.
pub enum ParseFailure {
    MissingFile,
    UnreadableUpload(String),
    NotConfigured,
    Pipeline { error: ImportError, file_name: String },
}

impl IntoResponse for ParseFailure {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ParseFailure::MissingFile => {
                (StatusCode::BAD_REQUEST, ErrorBody::new("No file provided"))
            }
            ParseFailure::UnreadableUpload(details) => {
                let mut body = ErrorBody::new("Could not read the uploaded file");
                body.details = Some(details);
                (StatusCode::BAD_REQUEST, body)
            }
            ParseFailure::NotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("AI service is not configured"),
            ),
            ParseFailure::Pipeline { error, file_name } => {
                let (status, mut body) = pipeline_error_body(error);
                // The upload's name helps debugging but is withheld from
                // production payloads.
                if cfg!(debug_assertions) {
                    body.file_name = Some(file_name);
                }
                (status, body)
            }
        };

        (status, Json(body)).into_response()
    }
}

fn pipeline_error_body(error: ImportError) -> (StatusCode, ErrorBody) {
    match error {
        ImportError::Extract(ExtractError::UnsupportedFormat { received, note }) => {
            let mut body = ErrorBody::new("Unsupported file type");
            body.received_type = Some(received);
            body.accepted_types = Some(accepted_types());
            body.note = note;
            (StatusCode::BAD_REQUEST, body)
        }
        ImportError::Extract(ExtractError::EmptyExtraction) => (
            StatusCode::BAD_REQUEST,
            ErrorBody::new("No text could be extracted from the file"),
        ),
        ImportError::Extract(ExtractError::InvalidDocument(details)) => {
            let mut body = ErrorBody::new("Could not read the document");
            body.details = Some(details);
            (StatusCode::BAD_REQUEST, body)
        }
        ImportError::Completion(details) => {
            let mut body = ErrorBody::new("AI request failed");
            body.details = Some(details);
            (StatusCode::BAD_GATEWAY, body)
        }
        ImportError::EmptyCompletion => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody::new("AI returned an empty response"),
        ),
        ImportError::Normalize(NormalizeError::NoJsonFound { excerpt }) => {
            let mut body = ErrorBody::new("No JSON found in AI response");
            body.details = Some(excerpt);
            (StatusCode::BAD_REQUEST, body)
        }
        ImportError::Normalize(NormalizeError::InvalidJson { message, excerpt }) => {
            let mut body = ErrorBody::new("AI response was not valid JSON");
            body.details = Some(excerpt);
            body.note = Some(message);
            (StatusCode::BAD_REQUEST, body)
        }
    }
}

fn accepted_types() -> Vec<String> {
    ACCEPTED_MEDIA_TYPES.iter().map(|t| t.to_string()).collect()
}

//=========================================================================================
// Shared helpers
//=========================================================================================

/// Pulls the caller's identity from the `x-user-id` header.
pub(crate) fn user_id_from_headers(headers: &HeaderMap) -> Result<Uuid, (StatusCode, String)> {
    let user_id_str = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                "x-user-id header is required".to_string(),
            )
        })?;

    Uuid::parse_str(user_id_str).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "Invalid x-user-id format".to_string(),
        )
    })
}

/// The media type the upload declares, preferring the part's content type and
/// falling back to the file extension when the browser sent nothing useful.
fn declared_media_type(content_type: Option<&str>, file_name: &str) -> String {
    if let Some(declared) = content_type {
        let declared = declared.split(';').next().unwrap_or(declared).trim();
        if !declared.is_empty() && declared != "application/octet-stream" {
            return declared.to_ascii_lowercase();
        }
    }

    match file_name.rsplit('.').next().map(str::to_ascii_lowercase) {
        Some(ext) if ext == "txt" || ext == "text" => MEDIA_TYPE_TEXT.to_string(),
        Some(ext) if ext == "docx" => MEDIA_TYPE_DOCX.to_string(),
        Some(ext) if ext == "pdf" => MEDIA_TYPE_PDF.to_string(),
        _ => "application/octet-stream".to_string(),
    }
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Parse an uploaded syllabus into a structured record.
///
/// Accepts a multipart/form-data request with a single part named `file`.
/// The reply is the schema-complete SyllabusRecord for the UI to preview;
/// nothing is persisted by this endpoint.
#[utoipa::path(
    post,
    path = "/syllabus/parse",
    request_body(content_type = "multipart/form-data", description = "The syllabus file to parse."),
    responses(
        (status = 200, description = "Syllabus parsed successfully", body = SyllabusRecord),
        (status = 400, description = "Missing file, unsupported type, or unparseable AI output", body = ErrorBody),
        (status = 500, description = "Missing configuration or empty AI response", body = ErrorBody),
        (status = 502, description = "The AI call itself failed", body = ErrorBody)
    )
)]
pub async fn parse_syllabus_handler(
    State(app_state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<SyllabusRecord>, ParseFailure> {
    let mut document: Option<UploadedDocument> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ParseFailure::UnreadableUpload(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("syllabus").to_string();
        let media_type = declared_media_type(field.content_type(), &file_name);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ParseFailure::UnreadableUpload(e.to_string()))?;
        document = Some(UploadedDocument {
            file_name,
            media_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let document = document.ok_or(ParseFailure::MissingFile)?;

    let completion = app_state
        .completion
        .as_ref()
        .ok_or(ParseFailure::NotConfigured)?;

    info!(
        media_type = %document.media_type,
        size = document.bytes.len(),
        "parsing uploaded syllabus"
    );

    let record = pipeline::parse_syllabus(completion.as_ref(), &document)
        .await
        .map_err(|error| {
            error!(%error, "syllabus parse failed");
            ParseFailure::Pipeline {
                error,
                file_name: document.file_name.clone(),
            }
        })?;

    Ok(Json(record))
}

/// Persist a user-confirmed syllabus record as a course plus its tasks.
///
/// The UI calls this after the user has reviewed the parsed preview. The
/// record is mapped through the domain mapper and written via the store.
#[utoipa::path(
    post,
    path = "/syllabus/import",
    request_body = SyllabusRecord,
    responses(
        (status = 201, description = "Course and tasks created", body = ImportResponse),
        (status = 400, description = "Bad request (e.g., missing header)"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn import_syllabus_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(record): Json<SyllabusRecord>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let user_id = user_id_from_headers(&headers)?;

    let plan = mapper::plan_import(&record, Utc::now());

    let result = async {
        let course = app_state.store.create_course(user_id, plan.course).await?;
        let mut tasks = Vec::with_capacity(plan.tasks.len());
        for mut draft in plan.tasks {
            draft.course_id = Some(course.id);
            tasks.push(app_state.store.create_task(user_id, draft).await?);
        }
        Ok::<_, easyflow_core::ports::PortError>(ImportResponse { course, tasks })
    }
    .await;

    match result {
        Ok(response) => {
            info!(
                course = %response.course.title,
                tasks = response.tasks.len(),
                "syllabus import persisted"
            );
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(e) => {
            error!("Failed to import syllabus: {:?}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to import syllabus".to_string(),
            ))
        }
    }
}
