//! services/api/src/adapters/store.rs
//!
//! An in-memory implementation of the `CourseStore` port. Production
//! deployments put a managed document database behind this trait; this
//! adapter backs local development and the test suite.

use std::collections::HashMap;

use async_trait::async_trait;
use easyflow_core::domain::{Course, CourseDraft, Task, TaskDraft};
use easyflow_core::ports::{CourseStore, PortError, PortResult};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Course and task records keyed by record id, each row carrying its owner.
/// Lookups always check ownership, so one user can never see another's rows.
#[derive(Default)]
pub struct InMemoryCourseStore {
    courses: RwLock<HashMap<Uuid, Course>>,
    tasks: RwLock<HashMap<Uuid, Task>>,
}

impl InMemoryCourseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseStore for InMemoryCourseStore {
    async fn create_course(&self, user_id: Uuid, draft: CourseDraft) -> PortResult<Course> {
        let course = Course {
            id: Uuid::new_v4(),
            user_id,
            title: draft.title,
            description: draft.description,
            days: draft.days,
            start_time: draft.start_time,
            end_time: draft.end_time,
            notes: draft.notes,
        };
        self.courses
            .write()
            .await
            .insert(course.id, course.clone());
        Ok(course)
    }

    async fn list_courses(&self, user_id: Uuid) -> PortResult<Vec<Course>> {
        let mut courses: Vec<Course> = self
            .courses
            .read()
            .await
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        courses.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(courses)
    }

    async fn get_course(&self, user_id: Uuid, course_id: Uuid) -> PortResult<Course> {
        self.courses
            .read()
            .await
            .get(&course_id)
            .filter(|c| c.user_id == user_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("course {course_id}")))
    }

    async fn replace_course(
        &self,
        user_id: Uuid,
        course_id: Uuid,
        draft: CourseDraft,
    ) -> PortResult<Course> {
        let mut courses = self.courses.write().await;
        let existing = courses
            .get_mut(&course_id)
            .filter(|c| c.user_id == user_id)
            .ok_or_else(|| PortError::NotFound(format!("course {course_id}")))?;

        *existing = Course {
            id: course_id,
            user_id,
            title: draft.title,
            description: draft.description,
            days: draft.days,
            start_time: draft.start_time,
            end_time: draft.end_time,
            notes: draft.notes,
        };
        Ok(existing.clone())
    }

    async fn delete_course(&self, user_id: Uuid, course_id: Uuid) -> PortResult<()> {
        let mut courses = self.courses.write().await;
        match courses.get(&course_id) {
            Some(c) if c.user_id == user_id => {
                courses.remove(&course_id);
                Ok(())
            }
            _ => Err(PortError::NotFound(format!("course {course_id}"))),
        }
    }

    async fn create_task(&self, user_id: Uuid, draft: TaskDraft) -> PortResult<Task> {
        let task = Task {
            id: Uuid::new_v4(),
            user_id,
            course_id: draft.course_id,
            title: draft.title,
            notes: draft.notes,
            due_date: draft.due_date,
            importance: draft.importance,
            completed: draft.completed,
        };
        self.tasks.write().await.insert(task.id, task.clone());
        Ok(task)
    }

    async fn list_tasks(&self, user_id: Uuid) -> PortResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .tasks
            .read()
            .await
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.due_date);
        Ok(tasks)
    }

    async fn replace_task(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        draft: TaskDraft,
    ) -> PortResult<Task> {
        let mut tasks = self.tasks.write().await;
        let existing = tasks
            .get_mut(&task_id)
            .filter(|t| t.user_id == user_id)
            .ok_or_else(|| PortError::NotFound(format!("task {task_id}")))?;

        *existing = Task {
            id: task_id,
            user_id,
            course_id: draft.course_id,
            title: draft.title,
            notes: draft.notes,
            due_date: draft.due_date,
            importance: draft.importance,
            completed: draft.completed,
        };
        Ok(existing.clone())
    }

    async fn delete_task(&self, user_id: Uuid, task_id: Uuid) -> PortResult<()> {
        let mut tasks = self.tasks.write().await;
        match tasks.get(&task_id) {
            Some(t) if t.user_id == user_id => {
                tasks.remove(&task_id);
                Ok(())
            }
            _ => Err(PortError::NotFound(format!("task {task_id}"))),
        }
    }

    async fn toggle_task(&self, user_id: Uuid, task_id: Uuid) -> PortResult<Task> {
        let mut tasks = self.tasks.write().await;
        let existing = tasks
            .get_mut(&task_id)
            .filter(|t| t.user_id == user_id)
            .ok_or_else(|| PortError::NotFound(format!("task {task_id}")))?;

        existing.completed = !existing.completed;
        Ok(existing.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use easyflow_core::domain::Importance;

    fn draft_course(title: &str) -> CourseDraft {
        CourseDraft {
            title: title.to_string(),
            description: String::new(),
            days: "Monday, Wednesday".to_string(),
            start_time: "09:00".to_string(),
            end_time: "10:30".to_string(),
            notes: String::new(),
        }
    }

    fn draft_task(title: &str) -> TaskDraft {
        TaskDraft {
            course_id: None,
            title: title.to_string(),
            notes: String::new(),
            due_date: Utc::now(),
            importance: Importance::Medium,
            completed: false,
        }
    }

    #[tokio::test]
    async fn courses_round_trip_through_create_replace_delete() {
        let store = InMemoryCourseStore::new();
        let user = Uuid::new_v4();

        let created = store.create_course(user, draft_course("Bio")).await.unwrap();
        assert_eq!(store.list_courses(user).await.unwrap().len(), 1);

        let mut replacement = draft_course("Biology 101");
        replacement.notes = "lab coat".to_string();
        let replaced = store
            .replace_course(user, created.id, replacement)
            .await
            .unwrap();
        assert_eq!(replaced.title, "Biology 101");
        assert_eq!(replaced.id, created.id);

        store.delete_course(user, created.id).await.unwrap();
        assert!(store.list_courses(user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn records_are_scoped_to_their_owner() {
        let store = InMemoryCourseStore::new();
        let alice = Uuid::new_v4();
        let mallory = Uuid::new_v4();

        let course = store.create_course(alice, draft_course("Bio")).await.unwrap();
        assert!(store.list_courses(mallory).await.unwrap().is_empty());
        assert!(matches!(
            store.get_course(mallory, course.id).await,
            Err(PortError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_course(mallory, course.id).await,
            Err(PortError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn toggle_flips_completion_both_ways() {
        let store = InMemoryCourseStore::new();
        let user = Uuid::new_v4();
        let task = store.create_task(user, draft_task("HW1")).await.unwrap();

        let toggled = store.toggle_task(user, task.id).await.unwrap();
        assert!(toggled.completed);
        let toggled = store.toggle_task(user, task.id).await.unwrap();
        assert!(!toggled.completed);
    }

    #[tokio::test]
    async fn tasks_list_sorted_by_due_date() {
        let store = InMemoryCourseStore::new();
        let user = Uuid::new_v4();

        let mut later = draft_task("later");
        later.due_date = Utc::now() + chrono::Duration::days(10);
        let mut sooner = draft_task("sooner");
        sooner.due_date = Utc::now() + chrono::Duration::days(1);

        store.create_task(user, later).await.unwrap();
        store.create_task(user, sooner).await.unwrap();

        let titles: Vec<String> = store
            .list_tasks(user)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["sooner", "later"]);
    }
}
