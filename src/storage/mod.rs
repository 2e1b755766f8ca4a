// src/storage/mod.rs
//
// Storage port for the platform. Exactly one adapter is selected at
// process start; there is no runtime switch. Handlers only ever see the
// `Storage` trait through `AppState`.

mod memory;
mod postgres;
mod seed;

pub use memory::MemStorage;
pub use postgres::PgStorage;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    config::Config,
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

#[async_trait]
pub trait Storage: Send + Sync {
    // User methods
    async fn get_user(&self, id: i64) -> Result<Option<User>, AppError>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn create_user(&self, user: NewUser) -> Result<User, AppError>;

    // Exam category methods
    async fn get_exam_categories(&self) -> Result<Vec<ExamCategory>, AppError>;
    async fn get_exam_category(&self, id: i64) -> Result<Option<ExamCategory>, AppError>;
    async fn get_exam_category_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<ExamCategory>, AppError>;

    // Course methods
    async fn get_courses(&self) -> Result<Vec<Course>, AppError>;
    async fn get_course(&self, id: i64) -> Result<Option<Course>, AppError>;
    async fn get_courses_by_category(&self, category_id: i64) -> Result<Vec<Course>, AppError>;

    // Test series methods
    async fn get_test_series(&self) -> Result<Vec<TestSeries>, AppError>;
    async fn get_test_series_by_category(
        &self,
        category_id: i64,
    ) -> Result<Vec<TestSeries>, AppError>;

    // Mock test methods
    async fn get_mock_tests(&self) -> Result<Vec<MockTest>, AppError>;
    async fn get_mock_test(&self, id: i64) -> Result<Option<MockTest>, AppError>;
    async fn get_mock_tests_by_series(&self, series_id: i64) -> Result<Vec<MockTest>, AppError>;

    /// Questions for a test, ordered by position. This is the privileged
    /// read: rows include the answer key and marking data, so the result
    /// must not reach a client without being mapped to `PublicQuestion`.
    async fn get_questions(&self, test_id: i64) -> Result<Vec<Question>, AppError>;

    // Study material methods
    async fn get_study_materials(&self) -> Result<Vec<StudyMaterial>, AppError>;
    async fn get_study_materials_by_category(
        &self,
        category_id: i64,
    ) -> Result<Vec<StudyMaterial>, AppError>;

    // User progress methods
    async fn get_user_progress(&self, user_id: i64) -> Result<Vec<UserProgress>, AppError>;

    /// Atomic upsert keyed by (user_id, item_id, item_type). Resubmitting
    /// must update the single existing row, never create a duplicate,
    /// including under concurrent retries for the same user and test.
    async fn upsert_user_progress(
        &self,
        entry: ProgressUpsert,
    ) -> Result<UserProgress, AppError>;
}

/// Selects the storage adapter for this process.
///
/// Postgres when `DATABASE_URL` is set and reachable; otherwise the
/// in-memory adapter pre-populated with demo catalog data. The choice is
/// made once and baked into `AppState`.
pub async fn connect(config: &Config) -> Arc<dyn Storage> {
    if let Some(url) = &config.database_url {
        match PgStorage::connect(url).await {
            Ok(storage) => {
                tracing::info!("Database connected...");
                return Arc::new(storage);
            }
            Err(e) => {
                tracing::warn!("Database unavailable ({}), falling back to in-memory storage", e);
            }
        }
    } else {
        tracing::warn!("DATABASE_URL not set, using in-memory storage");
    }

    Arc::new(MemStorage::with_demo_data())
}
