//! crates/easyflow_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or transport concern; the
//! serde names follow the wire schema the syllabus parser promises to the UI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

//=========================================================================================
// Upload
//=========================================================================================

/// A file as received from the uploader, before any text extraction.
/// Transient: one per request, dropped as soon as text has been pulled out.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    /// The declared media type (e.g. "text/plain"), parameters already stripped.
    pub media_type: String,
    pub bytes: Vec<u8>,
}

//=========================================================================================
// SyllabusRecord (the parser's target schema)
//=========================================================================================

/// The normalized, schema-complete structured extraction of a syllabus.
///
/// Every field is always present after normalization; see
/// [`crate::normalize`] for the backfill rules that guarantee it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SyllabusRecord {
    pub course_title: String,
    /// Full weekday names, comma-joined (e.g. "Monday, Wednesday, Friday").
    pub meeting_days: String,
    /// 24-hour "HH:MM".
    pub start_time: String,
    /// 24-hour "HH:MM".
    pub end_time: String,
    pub instructor: Option<String>,
    pub location: Option<String>,
    pub semester: Option<String>,
    pub description: String,
    pub course_objectives: Vec<String>,
    pub assignments: Vec<AssignmentEntry>,
    pub exams: Vec<ExamEntry>,
    pub requirements: Vec<String>,
    pub grading_scale: Option<String>,
    pub policies: Vec<String>,
    pub notes: String,
}

impl Default for SyllabusRecord {
    fn default() -> Self {
        Self {
            course_title: defaults::COURSE_TITLE.to_string(),
            meeting_days: defaults::MEETING_DAYS.to_string(),
            start_time: defaults::START_TIME.to_string(),
            end_time: defaults::END_TIME.to_string(),
            instructor: None,
            location: None,
            semester: None,
            description: String::new(),
            course_objectives: Vec::new(),
            assignments: Vec::new(),
            exams: Vec::new(),
            requirements: Vec::new(),
            grading_scale: None,
            policies: Vec::new(),
            notes: String::new(),
        }
    }
}

/// Fallback values backfilled into a [`SyllabusRecord`] when the model omits
/// a required field. One canonical set, used by the normalizer and by the
/// weekday scheduler fallback alike.
pub mod defaults {
    pub const COURSE_TITLE: &str = "Untitled Course";
    pub const MEETING_DAYS: &str = "Monday, Wednesday, Friday";
    pub const START_TIME: &str = "09:00";
    pub const END_TIME: &str = "10:30";
}

/// One graded assignment pulled from a syllabus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignmentEntry {
    pub title: Option<String>,
    pub description: String,
    /// "YYYY-MM-DD" if the syllabus stated one.
    pub due_date: Option<String>,
    /// Percentage of the final grade, as a bare number.
    pub weight: Option<f64>,
}

/// One exam pulled from a syllabus. Same shape as an assignment, but the
/// wire schema calls the date field "date" rather than "dueDate".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ExamEntry {
    pub title: Option<String>,
    pub description: String,
    /// "YYYY-MM-DD" if the syllabus stated one.
    pub date: Option<String>,
    pub weight: Option<f64>,
}

//=========================================================================================
// Application entities
//=========================================================================================

/// A scheduled course. Mutated only through full-record replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    /// Comma-separated full weekday names.
    pub days: String,
    pub start_time: String,
    pub end_time: String,
    pub notes: String,
}

/// The fields of a [`Course`] the caller supplies; ids are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub days: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub notes: String,
}

/// Priority level used to order a user's task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Importance {
    Easy,
    Medium,
    Hard,
}

/// A tracked to-do item, either imported from a syllabus or entered by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    /// The course this task was imported alongside, if any.
    pub course_id: Option<Uuid>,
    pub title: String,
    pub notes: String,
    pub due_date: DateTime<Utc>,
    pub importance: Importance,
    pub completed: bool,
}

/// The fields of a [`Task`] the caller supplies; ids are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    #[serde(default)]
    pub course_id: Option<Uuid>,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    pub due_date: DateTime<Utc>,
    pub importance: Importance,
    #[serde(default)]
    pub completed: bool,
}
