//! crates/easyflow_core/src/pipeline.rs
//!
//! The end-to-end syllabus parse: extract text, build the prompt, ask the
//! model once, normalize the reply. Stateless and single-pass; every failure
//! is terminal for the request and reported to the caller as-is.

use crate::domain::{SyllabusRecord, UploadedDocument};
use crate::extract::{self, ExtractError};
use crate::normalize::{self, NormalizeError};
use crate::ports::CompletionService;
use crate::prompt;

/// Fixed output-token budget for the parse completion.
pub const MAX_COMPLETION_TOKENS: u32 = 4_096;

/// A failure anywhere along the parse pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    /// The model call itself failed (transport or service error).
    #[error("Model completion failed: {0}")]
    Completion(String),
    #[error("Model returned an empty completion")]
    EmptyCompletion,
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Parses one uploaded syllabus into a schema-complete [`SyllabusRecord`].
pub async fn parse_syllabus(
    completion: &dyn CompletionService,
    doc: &UploadedDocument,
) -> Result<SyllabusRecord, ImportError> {
    let text = extract::extract_text(doc)?;
    let prompt = prompt::build_parse_prompt(&text);

    let raw = completion
        .complete(&prompt, MAX_COMPLETION_TOKENS)
        .await
        .map_err(|e| ImportError::Completion(e.to_string()))?;

    if raw.trim().is_empty() {
        return Err(ImportError::EmptyCompletion);
    }

    Ok(normalize::normalize_completion(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::MEDIA_TYPE_TEXT;
    use crate::ports::{PortError, PortResult};
    use async_trait::async_trait;

    /// A completion service that replies with one canned string.
    struct CannedCompletion(Result<String, String>);

    #[async_trait]
    impl CompletionService for CannedCompletion {
        async fn complete(&self, _prompt: &str, _max_output_tokens: u32) -> PortResult<String> {
            self.0
                .clone()
                .map_err(PortError::Upstream)
        }
    }

    fn syllabus_upload() -> UploadedDocument {
        UploadedDocument {
            file_name: "bio101.txt".to_string(),
            media_type: MEDIA_TYPE_TEXT.to_string(),
            bytes: b"Class meets MWF 9:00-10:15am. Midterm Oct 10.".to_vec(),
        }
    }

    #[tokio::test]
    async fn canned_completion_flows_through_to_a_record() {
        let stub = CannedCompletion(Ok(r#"```json
{
  "courseTitle": "Biology 101",
  "meetingDays": "Monday, Wednesday, Friday",
  "startTime": "09:00",
  "endTime": "10:15",
  "exams": [{"title": "Midterm", "date": "2025-10-10"}]
}
```"#
            .to_string()));

        let record = parse_syllabus(&stub, &syllabus_upload()).await.unwrap();
        assert_eq!(record.meeting_days, "Monday, Wednesday, Friday");
        assert_eq!(record.start_time, "09:00");
        assert_eq!(record.end_time, "10:15");
        assert_eq!(record.exams[0].date.as_deref(), Some("2025-10-10"));
    }

    #[tokio::test]
    async fn transport_failure_surfaces_as_completion_error() {
        let stub = CannedCompletion(Err("connection reset".to_string()));
        let err = parse_syllabus(&stub, &syllabus_upload()).await.unwrap_err();
        assert!(matches!(err, ImportError::Completion(_)));
    }

    #[tokio::test]
    async fn blank_reply_is_empty_completion() {
        let stub = CannedCompletion(Ok("   \n".to_string()));
        let err = parse_syllabus(&stub, &syllabus_upload()).await.unwrap_err();
        assert!(matches!(err, ImportError::EmptyCompletion));
    }

    #[tokio::test]
    async fn non_json_reply_is_a_normalize_error() {
        let stub = CannedCompletion(Ok("Sorry, I can't help with that.".to_string()));
        let err = parse_syllabus(&stub, &syllabus_upload()).await.unwrap_err();
        assert!(matches!(
            err,
            ImportError::Normalize(NormalizeError::NoJsonFound { .. })
        ));
    }
}
