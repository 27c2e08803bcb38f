pub mod domain;
pub mod extract;
pub mod mapper;
pub mod normalize;
pub mod pipeline;
pub mod ports;
pub mod prompt;
pub mod schedule;

pub use domain::{
    AssignmentEntry, Course, CourseDraft, ExamEntry, Importance, SyllabusRecord, Task, TaskDraft,
    UploadedDocument,
};
pub use pipeline::{parse_syllabus, ImportError};
pub use ports::{CompletionService, CourseStore, PortError, PortResult};
