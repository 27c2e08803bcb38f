//! crates/easyflow_core/src/normalize.rs
//!
//! Turns a raw model completion into a schema-complete [`SyllabusRecord`].
//!
//! Models occasionally disobey the no-fence instruction or add prose around
//! the JSON, so normalization runs in stages: strip an outer code fence,
//! carve out the first `{` through the last `}`, parse that span as untyped
//! JSON, then run a validation-and-defaulting pass that produces the typed
//! record. A field that is missing, falsy, or of the wrong type gets its
//! fallback value; an untyped value never flows downstream. A malformed
//! completion is terminal for the request; the upstream call is never retried.

use serde_json::Value;

use crate::domain::{defaults, AssignmentEntry, ExamEntry, SyllabusRecord};

/// How much raw model output is carried in error diagnostics.
const EXCERPT_CHARS: usize = 500;

/// A failure while locating or parsing the JSON in a model completion.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("No JSON object found in the model output")]
    NoJsonFound { excerpt: String },
    #[error("Model output was not valid JSON: {message}")]
    InvalidJson { message: String, excerpt: String },
}

/// Normalizes a raw completion into a [`SyllabusRecord`].
pub fn normalize_completion(raw: &str) -> Result<SyllabusRecord, NormalizeError> {
    let unfenced = strip_code_fences(raw);

    let candidate = json_candidate(unfenced).ok_or_else(|| NormalizeError::NoJsonFound {
        excerpt: diagnostic_excerpt(raw),
    })?;

    let value: Value =
        serde_json::from_str(candidate).map_err(|e| NormalizeError::InvalidJson {
            message: e.to_string(),
            excerpt: diagnostic_excerpt(raw),
        })?;

    Ok(record_from_value(&value))
}

/// The first [`EXCERPT_CHARS`] characters of the raw output, for diagnostics.
pub fn diagnostic_excerpt(raw: &str) -> String {
    raw.chars().take(EXCERPT_CHARS).collect()
}

//=========================================================================================
// Stage 1: formatting artifacts
//=========================================================================================

/// Strips a leading ``` fence line (optionally tagged "json") and a trailing
/// ``` fence. Text without an opening fence passes through untouched.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the remainder of the fence line ("json", "JSON", or nothing).
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => return trimmed,
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// The greedy span from the first `{` through the last `}`, if any.
fn json_candidate(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

//=========================================================================================
// Stage 2: validation and defaulting
//=========================================================================================

/// Builds the typed record from untyped JSON, backfilling every required
/// field. Applying this to an already-backfilled record is a no-op.
fn record_from_value(value: &Value) -> SyllabusRecord {
    SyllabusRecord {
        course_title: string_or(value, "courseTitle", defaults::COURSE_TITLE),
        meeting_days: string_or(value, "meetingDays", defaults::MEETING_DAYS),
        start_time: string_or(value, "startTime", defaults::START_TIME),
        end_time: string_or(value, "endTime", defaults::END_TIME),
        instructor: opt_string(value, "instructor"),
        location: opt_string(value, "location"),
        semester: opt_string(value, "semester"),
        description: string_or(value, "description", ""),
        course_objectives: string_list(value, "courseObjectives"),
        assignments: assignment_list(value),
        exams: exam_list(value),
        requirements: string_list(value, "requirements"),
        grading_scale: opt_string(value, "gradingScale"),
        policies: string_list(value, "policies"),
        notes: string_or(value, "notes", ""),
    }
}

/// A non-empty string field, or the fallback. Missing keys, nulls, wrong
/// types, and empty strings all count as falsy.
fn string_or(value: &Value, key: &str, fallback: &str) -> String {
    match value.get(key).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => fallback.to_string(),
    }
}

/// A nullable string field; falsy values collapse to None.
fn opt_string(value: &Value, key: &str) -> Option<String> {
    match value.get(key).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Some(s.to_string()),
        _ => None,
    }
}

/// A list of strings; entries that fail the type check are dropped.
fn string_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn assignment_list(value: &Value) -> Vec<AssignmentEntry> {
    value
        .get("assignments")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter(|item| item.is_object())
                .map(|item| AssignmentEntry {
                    title: opt_string(item, "title"),
                    description: string_or(item, "description", ""),
                    due_date: opt_string(item, "dueDate"),
                    weight: item.get("weight").and_then(Value::as_f64),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn exam_list(value: &Value) -> Vec<ExamEntry> {
    value
        .get("exams")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter(|item| item.is_object())
                .map(|item| ExamEntry {
                    title: opt_string(item, "title"),
                    description: string_or(item, "description", ""),
                    date: opt_string(item, "date"),
                    weight: item.get("weight").and_then(Value::as_f64),
                })
                .collect()
        })
        .unwrap_or_default()
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_and_bare_completions_normalize_identically() {
        let bare = r#"{"courseTitle": "Biology 101"}"#;
        let fenced = format!("```json\n{bare}\n```");
        assert_eq!(
            normalize_completion(bare).unwrap(),
            normalize_completion(&fenced).unwrap()
        );
    }

    #[test]
    fn untagged_fence_is_stripped_too() {
        let raw = "```\n{\"courseTitle\": \"Chem 2\"}\n```";
        assert_eq!(normalize_completion(raw).unwrap().course_title, "Chem 2");
    }

    #[test]
    fn surrounding_prose_is_ignored() {
        let raw = "Sure! Here is the extraction:\n{\"courseTitle\": \"Art History\"}\nLet me know if you need anything else.";
        assert_eq!(
            normalize_completion(raw).unwrap().course_title,
            "Art History"
        );
    }

    #[test]
    fn no_braces_is_no_json_found_with_excerpt() {
        let raw = "I could not find a syllabus in that document.";
        match normalize_completion(raw) {
            Err(NormalizeError::NoJsonFound { excerpt }) => {
                assert!(excerpt.starts_with("I could not"))
            }
            other => panic!("expected NoJsonFound, got {other:?}"),
        }
    }

    #[test]
    fn excerpt_is_capped_at_500_chars() {
        let raw = "y".repeat(2_000);
        match normalize_completion(&raw) {
            Err(NormalizeError::NoJsonFound { excerpt }) => {
                assert_eq!(excerpt.chars().count(), 500)
            }
            other => panic!("expected NoJsonFound, got {other:?}"),
        }
    }

    #[test]
    fn broken_json_is_invalid_json() {
        let raw = r#"{"courseTitle": "Calc I", }"#;
        assert!(matches!(
            normalize_completion(raw),
            Err(NormalizeError::InvalidJson { .. })
        ));
    }

    #[test]
    fn empty_object_backfills_every_required_field() {
        let record = normalize_completion("{}").unwrap();
        assert_eq!(record.course_title, "Untitled Course");
        assert_eq!(record.meeting_days, "Monday, Wednesday, Friday");
        assert_eq!(record.start_time, "09:00");
        assert_eq!(record.end_time, "10:30");
        assert!(record.assignments.is_empty());
        assert!(record.exams.is_empty());
    }

    #[test]
    fn falsy_values_are_backfilled_like_missing_ones() {
        let raw = r#"{"courseTitle": "", "startTime": null, "meetingDays": 3}"#;
        let record = normalize_completion(raw).unwrap();
        assert_eq!(record.course_title, "Untitled Course");
        assert_eq!(record.start_time, "09:00");
        assert_eq!(record.meeting_days, "Monday, Wednesday, Friday");
    }

    #[test]
    fn defaulting_is_idempotent() {
        let once = normalize_completion(r#"{"courseTitle": "Physics"}"#).unwrap();
        let reserialized = serde_json::to_string(&once).unwrap();
        let twice = normalize_completion(&reserialized).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn mistyped_list_entries_are_dropped_not_propagated() {
        let raw = r#"{"requirements": ["Textbook", 42, null, "Calculator"]}"#;
        let record = normalize_completion(raw).unwrap();
        assert_eq!(record.requirements, vec!["Textbook", "Calculator"]);
    }

    #[test]
    fn assignments_and_exams_parse_their_own_date_keys() {
        let raw = r#"{
            "assignments": [{"title": "HW1", "dueDate": "2025-09-12", "weight": 25}],
            "exams": [{"title": "Midterm", "date": "2025-10-10"}]
        }"#;
        let record = normalize_completion(raw).unwrap();
        assert_eq!(record.assignments[0].due_date.as_deref(), Some("2025-09-12"));
        assert_eq!(record.assignments[0].weight, Some(25.0));
        assert_eq!(record.exams[0].date.as_deref(), Some("2025-10-10"));
        assert_eq!(record.exams[0].weight, None);
    }
}
