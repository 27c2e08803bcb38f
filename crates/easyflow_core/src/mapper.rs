//! crates/easyflow_core/src/mapper.rs
//!
//! Maps a normalized [`SyllabusRecord`] into the application's Course and
//! Task shapes. The output is a plan of drafts handed to the UI for review;
//! nothing is persisted until the user confirms the import.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::domain::{CourseDraft, Importance, SyllabusRecord, TaskDraft};
use crate::schedule::normalize_meeting_days;

/// Assignments worth more than this share of the grade are marked Hard.
/// Provisional product heuristic; keep it in one place.
pub const HARD_WEIGHT_THRESHOLD: f64 = 20.0;

/// Fallback due date offset for assignments without a parseable date.
const ASSIGNMENT_FALLBACK_DAYS: i64 = 7;
/// Fallback due date offset for exams without a parseable date.
const EXAM_FALLBACK_DAYS: i64 = 30;

/// Notes longer than this are taken verbatim instead of being synthesized.
const VERBATIM_NOTES_CHARS: usize = 50;

/// One course plus its tasks, ready for user review.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportPlan {
    pub course: CourseDraft,
    pub tasks: Vec<TaskDraft>,
}

/// Builds the import plan for a record. `now` anchors the fallback due dates
/// and the import-timestamp footer, so callers control it for determinism.
pub fn plan_import(record: &SyllabusRecord, now: DateTime<Utc>) -> ImportPlan {
    let days = normalize_meeting_days(&record.meeting_days);

    let course = CourseDraft {
        title: record.course_title.clone(),
        description: record.description.clone(),
        days: days.clone(),
        start_time: record.start_time.clone(),
        end_time: record.end_time.clone(),
        notes: compose_course_notes(record, &days, now),
    };

    let mut tasks = Vec::with_capacity(record.assignments.len() + record.exams.len());

    for entry in &record.assignments {
        let importance = match entry.weight {
            Some(weight) if weight > HARD_WEIGHT_THRESHOLD => Importance::Hard,
            _ => Importance::Medium,
        };
        tasks.push(TaskDraft {
            course_id: None,
            title: entry
                .title
                .clone()
                .unwrap_or_else(|| "Assignment".to_string()),
            notes: entry.description.clone(),
            due_date: due_date_or(entry.due_date.as_deref(), now, ASSIGNMENT_FALLBACK_DAYS),
            importance,
            completed: false,
        });
    }

    for entry in &record.exams {
        tasks.push(TaskDraft {
            course_id: None,
            title: entry.title.clone().unwrap_or_else(|| "Exam".to_string()),
            notes: entry.description.clone(),
            due_date: due_date_or(entry.date.as_deref(), now, EXAM_FALLBACK_DAYS),
            importance: Importance::Hard,
            completed: false,
        });
    }

    ImportPlan { course, tasks }
}

/// Parses a "YYYY-MM-DD" date to midnight UTC, or falls back to
/// `now + fallback_days` when absent or unparseable.
fn due_date_or(date: Option<&str>, now: DateTime<Utc>, fallback_days: i64) -> DateTime<Utc> {
    date.and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .unwrap_or_else(|| now + Duration::days(fallback_days))
}

//=========================================================================================
// Notes composition
//=========================================================================================

/// Builds the course notes. A substantial notes field from the syllabus is
/// used verbatim; otherwise a structured summary is synthesized from the
/// record, section by section, ending with an import timestamp.
fn compose_course_notes(record: &SyllabusRecord, days: &str, now: DateTime<Utc>) -> String {
    if record.notes.chars().count() > VERBATIM_NOTES_CHARS {
        return record.notes.clone();
    }

    let mut sections: Vec<String> = Vec::new();

    let mut header: Vec<String> = Vec::new();
    if let Some(instructor) = &record.instructor {
        header.push(format!("Instructor: {instructor}"));
    }
    if let Some(location) = &record.location {
        header.push(format!("Location: {location}"));
    }
    if let Some(semester) = &record.semester {
        header.push(format!("Semester: {semester}"));
    }
    header.push(format!(
        "Meets: {days} {}-{}",
        record.start_time, record.end_time
    ));
    sections.push(header.join("\n"));

    if !record.description.trim().is_empty() {
        sections.push(record.description.clone());
    }
    if !record.notes.trim().is_empty() {
        sections.push(record.notes.clone());
    }

    if !record.course_objectives.is_empty() {
        sections.push(bulleted("Objectives", record.course_objectives.iter().cloned()));
    }

    if !record.assignments.is_empty() {
        sections.push(bulleted(
            "Assignments",
            record.assignments.iter().map(|a| {
                let title = a.title.as_deref().unwrap_or("Assignment");
                let mut line = title.to_string();
                if let Some(weight) = a.weight {
                    line.push_str(&format!(" (weight {weight}%)"));
                }
                if let Some(due) = &a.due_date {
                    line.push_str(&format!(", due {due}"));
                }
                line
            }),
        ));
    }

    if !record.exams.is_empty() {
        sections.push(bulleted(
            "Exams",
            record.exams.iter().map(|e| {
                let title = e.title.as_deref().unwrap_or("Exam");
                let mut line = title.to_string();
                if let Some(weight) = e.weight {
                    line.push_str(&format!(" (weight {weight}%)"));
                }
                if let Some(date) = &e.date {
                    line.push_str(&format!(", on {date}"));
                }
                line
            }),
        ));
    }

    if let Some(scale) = &record.grading_scale {
        sections.push(format!("Grading: {scale}"));
    }
    if !record.requirements.is_empty() {
        sections.push(bulleted("Requirements", record.requirements.iter().cloned()));
    }
    if !record.policies.is_empty() {
        sections.push(bulleted("Policies", record.policies.iter().cloned()));
    }

    sections.push(format!("Imported {}", now.format("%Y-%m-%d %H:%M UTC")));

    sections.join("\n\n")
}

fn bulleted(heading: &str, items: impl Iterator<Item = String>) -> String {
    let mut out = format!("{heading}:");
    for item in items {
        out.push_str("\n- ");
        out.push_str(&item);
    }
    out
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssignmentEntry, ExamEntry};
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap()
    }

    fn assignment(title: Option<&str>, weight: Option<f64>) -> AssignmentEntry {
        AssignmentEntry {
            title: title.map(str::to_string),
            weight,
            ..Default::default()
        }
    }

    #[test]
    fn heavy_assignments_are_hard_light_ones_medium() {
        let record = SyllabusRecord {
            assignments: vec![
                assignment(Some("HW1"), Some(25.0)),
                assignment(Some("HW2"), Some(10.0)),
                assignment(Some("HW3"), None),
            ],
            ..Default::default()
        };
        let plan = plan_import(&record, fixed_now());
        assert_eq!(plan.tasks[0].importance, Importance::Hard);
        assert_eq!(plan.tasks[1].importance, Importance::Medium);
        assert_eq!(plan.tasks[2].importance, Importance::Medium);
    }

    #[test]
    fn exams_are_always_hard() {
        let record = SyllabusRecord {
            exams: vec![ExamEntry {
                title: Some("Quiz".to_string()),
                weight: Some(1.0),
                ..Default::default()
            }],
            ..Default::default()
        };
        let plan = plan_import(&record, fixed_now());
        assert_eq!(plan.tasks[0].importance, Importance::Hard);
    }

    #[test]
    fn untitled_entries_get_generic_titles() {
        let record = SyllabusRecord {
            assignments: vec![assignment(None, None)],
            exams: vec![ExamEntry::default()],
            ..Default::default()
        };
        let plan = plan_import(&record, fixed_now());
        assert_eq!(plan.tasks[0].title, "Assignment");
        assert_eq!(plan.tasks[1].title, "Exam");
    }

    #[test]
    fn stated_dates_parse_and_missing_ones_fall_back() {
        let record = SyllabusRecord {
            assignments: vec![
                AssignmentEntry {
                    due_date: Some("2025-09-12".to_string()),
                    ..Default::default()
                },
                AssignmentEntry {
                    due_date: Some("next Tuesday".to_string()),
                    ..Default::default()
                },
            ],
            exams: vec![ExamEntry::default()],
            ..Default::default()
        };
        let now = fixed_now();
        let plan = plan_import(&record, now);

        assert_eq!(
            plan.tasks[0].due_date,
            Utc.with_ymd_and_hms(2025, 9, 12, 0, 0, 0).unwrap()
        );
        assert_eq!(plan.tasks[1].due_date, now + Duration::days(7));
        assert_eq!(plan.tasks[2].due_date, now + Duration::days(30));
    }

    #[test]
    fn course_days_are_normalized() {
        let record = SyllabusRecord {
            meeting_days: "TR".to_string(),
            ..Default::default()
        };
        let plan = plan_import(&record, fixed_now());
        assert_eq!(plan.course.days, "Tuesday, Thursday");
    }

    #[test]
    fn long_notes_are_kept_verbatim() {
        let notes = "A".repeat(80);
        let record = SyllabusRecord {
            notes: notes.clone(),
            ..Default::default()
        };
        let plan = plan_import(&record, fixed_now());
        assert_eq!(plan.course.notes, notes);
    }

    #[test]
    fn short_notes_yield_a_synthesized_summary_with_footer() {
        let record = SyllabusRecord {
            course_title: "Bio 101".to_string(),
            instructor: Some("Dr. Grant".to_string()),
            notes: "Bring a lab coat".to_string(),
            course_objectives: vec!["Learn taxonomy".to_string()],
            assignments: vec![AssignmentEntry {
                title: Some("HW1".to_string()),
                weight: Some(25.0),
                due_date: Some("2025-09-12".to_string()),
                ..Default::default()
            }],
            grading_scale: Some("A 90+".to_string()),
            ..Default::default()
        };
        let notes = plan_import(&record, fixed_now()).course.notes;

        assert!(notes.contains("Instructor: Dr. Grant"));
        assert!(notes.contains("Bring a lab coat"));
        assert!(notes.contains("Objectives:\n- Learn taxonomy"));
        assert!(notes.contains("- HW1 (weight 25%), due 2025-09-12"));
        assert!(notes.contains("Grading: A 90+"));
        assert!(notes.ends_with("Imported 2025-09-01 12:00 UTC"));
    }
}
