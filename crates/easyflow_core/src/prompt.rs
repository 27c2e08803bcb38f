//! crates/easyflow_core/src/prompt.rs
//!
//! Builds the fixed-schema instruction prompt for the syllabus parser.
//! The output is deterministic for a given input text and template version.

/// Hard cap on how much extracted syllabus text is interpolated into the
/// prompt, to stay inside the model's context window.
pub const MAX_SYLLABUS_CHARS: usize = 50_000;

const PARSE_PROMPT_TEMPLATE: &str = r#"Extract the course information from the syllabus below into a single JSON object with EXACTLY this schema:

{
  "courseTitle": string,
  "meetingDays": string,
  "startTime": string,
  "endTime": string,
  "instructor": string or null,
  "location": string or null,
  "semester": string or null,
  "description": string,
  "courseObjectives": [string, ...],
  "assignments": [{"title": string, "description": string, "dueDate": "YYYY-MM-DD" or null, "weight": number or null}, ...],
  "exams": [{"title": string, "description": string, "date": "YYYY-MM-DD" or null, "weight": number or null}, ...],
  "requirements": [string, ...],
  "gradingScale": string or null,
  "policies": [string, ...],
  "notes": string
}

Normalization rules:
- meetingDays must use full weekday names joined by ", ". Expand abbreviations: "MWF" becomes "Monday, Wednesday, Friday"; "TR" becomes "Tuesday, Thursday".
- All dates must be formatted "YYYY-MM-DD". If a year is not stated, use the most plausible year from the syllabus context.
- startTime and endTime must be 24-hour "HH:MM" (e.g. "09:00", "14:30").
- weight is a bare number for a percentage of the final grade (25 for 25%), or null when the syllabus does not state one.
- Use null for unknown nullable fields and [] for lists with no entries. Never invent data.

Output rules:
- Respond with the JSON object ONLY.
- No code fences, no markdown, no commentary before or after the JSON.

SYLLABUS:
---
{syllabus_text}
---"#;

/// Builds the parse prompt, truncating the syllabus to the first
/// [`MAX_SYLLABUS_CHARS`] characters.
pub fn build_parse_prompt(syllabus_text: &str) -> String {
    PARSE_PROMPT_TEMPLATE.replace("{syllabus_text}", truncate_chars(syllabus_text))
}

/// Cuts a string at the character cap without splitting a UTF-8 code point.
fn truncate_chars(text: &str) -> &str {
    match text.char_indices().nth(MAX_SYLLABUS_CHARS) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_is_deterministic_and_contains_the_text() {
        let a = build_parse_prompt("Class meets MWF");
        let b = build_parse_prompt("Class meets MWF");
        assert_eq!(a, b);
        assert!(a.contains("Class meets MWF"));
        assert!(a.contains("\"courseTitle\""));
    }

    #[test]
    fn oversized_text_is_cut_to_the_cap() {
        let big = "x".repeat(MAX_SYLLABUS_CHARS + 1_000);
        let prompt = build_parse_prompt(&big);
        let embedded = prompt.matches('x').count();
        assert_eq!(embedded, MAX_SYLLABUS_CHARS);
    }

    #[test]
    fn truncation_respects_multibyte_boundaries() {
        let big = "é".repeat(MAX_SYLLABUS_CHARS + 5);
        let prompt = build_parse_prompt(&big);
        assert_eq!(prompt.matches('é').count(), MAX_SYLLABUS_CHARS);
    }
}
