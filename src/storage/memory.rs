// src/storage/memory.rs

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::AppError,
    models::{
        category::ExamCategory,
        course::Course,
        material::StudyMaterial,
        mock_test::MockTest,
        progress::{ProgressUpsert, UserProgress},
        question::Question,
        test_series::TestSeries,
        user::{NewUser, User},
    },
};

use super::{Storage, seed};

/// In-memory adapter. Used when no database is configured (demo mode) and
/// by the integration tests. All state lives behind a single `RwLock`, so
/// the progress upsert is serialized by the write lock.
pub struct MemStorage {
    inner: RwLock<Inner>,
}

#[derive(Default)]
pub(super) struct Inner {
    pub users: BTreeMap<i64, User>,
    pub categories: BTreeMap<i64, ExamCategory>,
    pub courses: BTreeMap<i64, Course>,
    pub series: BTreeMap<i64, TestSeries>,
    pub tests: BTreeMap<i64, MockTest>,
    /// Questions per test id, already in position order.
    pub questions: HashMap<i64, Vec<Question>>,
    pub materials: BTreeMap<i64, StudyMaterial>,
    /// Keyed by (user_id, item_id, item_type).
    pub progress: HashMap<(i64, i64, String), UserProgress>,
    pub next_user_id: i64,
    pub next_progress_id: i64,
}

impl MemStorage {
    pub fn new() -> Self {
        MemStorage {
            inner: RwLock::new(Inner {
                next_user_id: 1,
                next_progress_id: 1,
                ..Inner::default()
            }),
        }
    }

    /// Pre-populated with the demo catalog, mirroring what a fresh
    /// deployment without a database serves.
    pub fn with_demo_data() -> Self {
        let storage = MemStorage::new();
        {
            // new() just built the lock; no other handle can exist yet.
            let mut inner = storage
                .inner
                .try_write()
                .expect("freshly created storage is uncontended");
            seed::populate_demo_data(&mut inner);
        }
        storage
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        MemStorage::new()
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_user(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.username == username).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.username == user.username) {
            return Err(AppError::Conflict(format!(
                "User '{}' already exists",
                user.username
            )));
        }
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(format!(
                "Email '{}' already registered",
                user.email
            )));
        }

        let id = inner.next_user_id;
        inner.next_user_id += 1;
        let created = User {
            id,
            username: user.username,
            email: user.email,
            password: user.password,
            full_name: user.full_name,
            role: "user".to_string(),
            created_at: Some(Utc::now()),
        };
        inner.users.insert(id, created.clone());
        Ok(created)
    }

    async fn get_exam_categories(&self) -> Result<Vec<ExamCategory>, AppError> {
        Ok(self.inner.read().await.categories.values().cloned().collect())
    }

    async fn get_exam_category(&self, id: i64) -> Result<Option<ExamCategory>, AppError> {
        Ok(self.inner.read().await.categories.get(&id).cloned())
    }

    async fn get_exam_category_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<ExamCategory>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.categories.values().find(|c| c.slug == slug).cloned())
    }

    async fn get_courses(&self) -> Result<Vec<Course>, AppError> {
        Ok(self.inner.read().await.courses.values().cloned().collect())
    }

    async fn get_course(&self, id: i64) -> Result<Option<Course>, AppError> {
        Ok(self.inner.read().await.courses.get(&id).cloned())
    }

    async fn get_courses_by_category(&self, category_id: i64) -> Result<Vec<Course>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .courses
            .values()
            .filter(|c| c.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn get_test_series(&self) -> Result<Vec<TestSeries>, AppError> {
        Ok(self.inner.read().await.series.values().cloned().collect())
    }

    async fn get_test_series_by_category(
        &self,
        category_id: i64,
    ) -> Result<Vec<TestSeries>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .series
            .values()
            .filter(|s| s.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn get_mock_tests(&self) -> Result<Vec<MockTest>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.tests.values().filter(|t| t.is_active).cloned().collect())
    }

    async fn get_mock_test(&self, id: i64) -> Result<Option<MockTest>, AppError> {
        Ok(self.inner.read().await.tests.get(&id).cloned())
    }

    async fn get_mock_tests_by_series(&self, series_id: i64) -> Result<Vec<MockTest>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .tests
            .values()
            .filter(|t| t.series_id == Some(series_id) && t.is_active)
            .cloned()
            .collect())
    }

    async fn get_questions(&self, test_id: i64) -> Result<Vec<Question>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.questions.get(&test_id).cloned().unwrap_or_default())
    }

    async fn get_study_materials(&self) -> Result<Vec<StudyMaterial>, AppError> {
        Ok(self.inner.read().await.materials.values().cloned().collect())
    }

    async fn get_study_materials_by_category(
        &self,
        category_id: i64,
    ) -> Result<Vec<StudyMaterial>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .materials
            .values()
            .filter(|m| m.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn get_user_progress(&self, user_id: i64) -> Result<Vec<UserProgress>, AppError> {
        let inner = self.inner.read().await;
        let mut progress: Vec<UserProgress> = inner
            .progress
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        progress.sort_by_key(|p| p.id);
        Ok(progress)
    }

    async fn upsert_user_progress(
        &self,
        entry: ProgressUpsert,
    ) -> Result<UserProgress, AppError> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let key = (entry.user_id, entry.item_id, entry.item_type.clone());

        if let Some(existing) = inner.progress.get_mut(&key) {
            existing.progress = entry.progress;
            existing.score = entry.score;
            existing.completed = entry.completed;
            existing.status = entry.status;
            existing.started_at = entry.started_at;
            existing.completed_at = entry.completed_at;
            existing.updated_at = Some(now);
            return Ok(existing.clone());
        }

        let id = inner.next_progress_id;
        inner.next_progress_id += 1;
        let created = UserProgress {
            id,
            user_id: entry.user_id,
            item_id: entry.item_id,
            item_type: entry.item_type,
            progress: entry.progress,
            score: entry.score,
            completed: entry.completed,
            status: entry.status,
            started_at: entry.started_at,
            completed_at: entry.completed_at,
            created_at: Some(now),
            updated_at: Some(now),
        };
        inner.progress.insert(key, created.clone());
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_progress(user_id: i64, item_id: i64, score: i32) -> ProgressUpsert {
        ProgressUpsert {
            user_id,
            item_id,
            item_type: "test".to_string(),
            progress: 100,
            score: Some(score),
            completed: true,
            status: "completed".to_string(),
            started_at: Some(Utc::now()),
            completed_at: Some(Utc::now()),
        }
    }

    #[tokio::test]
    async fn test_upsert_progress_is_idempotent_per_user_and_test() {
        let storage = MemStorage::new();

        let first = storage.upsert_user_progress(test_progress(1, 7, 40)).await.unwrap();
        let second = storage.upsert_user_progress(test_progress(1, 7, 85)).await.unwrap();

        // Same row updated in place, not appended.
        assert_eq!(first.id, second.id);
        assert_eq!(second.score, Some(85));

        let all = storage.get_user_progress(1).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].score, Some(85));
    }

    #[tokio::test]
    async fn test_upsert_progress_distinguishes_item_types() {
        let storage = MemStorage::new();

        let mut course_entry = test_progress(1, 7, 0);
        course_entry.item_type = "course".to_string();
        course_entry.progress = 30;
        course_entry.completed = false;
        course_entry.status = "in_progress".to_string();

        storage.upsert_user_progress(test_progress(1, 7, 60)).await.unwrap();
        storage.upsert_user_progress(course_entry).await.unwrap();

        // A test and a course sharing an id are separate records.
        let all = storage.get_user_progress(1).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicates() {
        let storage = MemStorage::new();
        let user = NewUser {
            username: "asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "hash".to_string(),
            full_name: "Asha K".to_string(),
        };

        storage.create_user(user.clone()).await.unwrap();
        let err = storage.create_user(user).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_demo_data_has_gradable_paper() {
        let storage = MemStorage::with_demo_data();

        let tests = storage.get_mock_tests().await.unwrap();
        assert!(!tests.is_empty());

        let questions = storage.get_questions(1).await.unwrap();
        assert_eq!(questions.len() as i32, tests[0].total_questions);
        for (index, q) in questions.iter().enumerate() {
            assert_eq!(q.position as usize, index);
            assert!((q.correct_option_index as usize) < q.options.len());
        }
    }
}
