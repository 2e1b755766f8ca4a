// src/storage/postgres.rs

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

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

use super::Storage;

const CONNECT_RETRIES: u32 = 5;

/// Postgres adapter backed by a sqlx pool.
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Connects with retry (the database container may still be starting)
    /// and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let mut retry_count = 0;
        let pool = loop {
            match PgPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(Duration::from_secs(3))
                .connect(database_url)
                .await
            {
                Ok(pool) => break pool,
                Err(e) => {
                    retry_count += 1;
                    if retry_count > CONNECT_RETRIES {
                        return Err(e);
                    }
                    tracing::warn!(
                        "Database not ready, retrying in 2s... (Attempt {})",
                        retry_count
                    );
                    tokio::time::sleep(Duration::from_secs(2)).await;
                }
            }
        };

        tracing::info!("Running migrations...");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run database migrations");
        tracing::info!("Migrations applied successfully.");

        Ok(PgStorage { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        PgStorage { pool }
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn get_user(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password, full_name, role, created_at
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password, full_name, role, created_at
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password, full_name, role, created_at
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        let created = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password, full_name)
             VALUES ($1, $2, $3, $4)
             RETURNING id, username, email, password, full_name, role, created_at",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.full_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Postgres error code for unique violation is 23505
            if e.to_string().contains("unique constraint") || e.to_string().contains("23505") {
                AppError::Conflict(format!("User '{}' already exists", user.username))
            } else {
                tracing::error!("Failed to create user: {:?}", e);
                AppError::from(e)
            }
        })?;
        Ok(created)
    }

    async fn get_exam_categories(&self) -> Result<Vec<ExamCategory>, AppError> {
        let categories = sqlx::query_as::<_, ExamCategory>(
            "SELECT id, name, description, icon, slug FROM exam_categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn get_exam_category(&self, id: i64) -> Result<Option<ExamCategory>, AppError> {
        let category = sqlx::query_as::<_, ExamCategory>(
            "SELECT id, name, description, icon, slug FROM exam_categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    async fn get_exam_category_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<ExamCategory>, AppError> {
        let category = sqlx::query_as::<_, ExamCategory>(
            "SELECT id, name, description, icon, slug FROM exam_categories WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    async fn get_courses(&self) -> Result<Vec<Course>, AppError> {
        let courses =
            sqlx::query_as::<_, Course>("SELECT * FROM courses ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(courses)
    }

    async fn get_course(&self, id: i64) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(course)
    }

    async fn get_courses_by_category(&self, category_id: i64) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(
            "SELECT * FROM courses WHERE category_id = $1 ORDER BY id",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(courses)
    }

    async fn get_test_series(&self) -> Result<Vec<TestSeries>, AppError> {
        let series = sqlx::query_as::<_, TestSeries>("SELECT * FROM test_series ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(series)
    }

    async fn get_test_series_by_category(
        &self,
        category_id: i64,
    ) -> Result<Vec<TestSeries>, AppError> {
        let series = sqlx::query_as::<_, TestSeries>(
            "SELECT * FROM test_series WHERE category_id = $1 ORDER BY id",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(series)
    }

    async fn get_mock_tests(&self) -> Result<Vec<MockTest>, AppError> {
        let tests = sqlx::query_as::<_, MockTest>(
            "SELECT * FROM mock_tests WHERE is_active ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(tests)
    }

    async fn get_mock_test(&self, id: i64) -> Result<Option<MockTest>, AppError> {
        let test = sqlx::query_as::<_, MockTest>("SELECT * FROM mock_tests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(test)
    }

    async fn get_mock_tests_by_series(&self, series_id: i64) -> Result<Vec<MockTest>, AppError> {
        let tests = sqlx::query_as::<_, MockTest>(
            "SELECT * FROM mock_tests WHERE series_id = $1 AND is_active ORDER BY id",
        )
        .bind(series_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tests)
    }

    async fn get_questions(&self, test_id: i64) -> Result<Vec<Question>, AppError> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT * FROM questions WHERE test_id = $1 ORDER BY position",
        )
        .bind(test_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    async fn get_study_materials(&self) -> Result<Vec<StudyMaterial>, AppError> {
        let materials =
            sqlx::query_as::<_, StudyMaterial>("SELECT * FROM study_materials ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(materials)
    }

    async fn get_study_materials_by_category(
        &self,
        category_id: i64,
    ) -> Result<Vec<StudyMaterial>, AppError> {
        let materials = sqlx::query_as::<_, StudyMaterial>(
            "SELECT * FROM study_materials WHERE category_id = $1 ORDER BY id",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(materials)
    }

    async fn get_user_progress(&self, user_id: i64) -> Result<Vec<UserProgress>, AppError> {
        let progress = sqlx::query_as::<_, UserProgress>(
            "SELECT * FROM user_progress WHERE user_id = $1 ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(progress)
    }

    async fn upsert_user_progress(
        &self,
        entry: ProgressUpsert,
    ) -> Result<UserProgress, AppError> {
        // The unique index on (user_id, item_id, item_type) makes this a
        // single atomic statement, so concurrent retries from the same
        // user cannot create duplicate rows.
        let progress = sqlx::query_as::<_, UserProgress>(
            "INSERT INTO user_progress
                 (user_id, item_id, item_type, progress, score, completed, status,
                  started_at, completed_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT (user_id, item_id, item_type) DO UPDATE SET
                 progress = EXCLUDED.progress,
                 score = EXCLUDED.score,
                 completed = EXCLUDED.completed,
                 status = EXCLUDED.status,
                 started_at = EXCLUDED.started_at,
                 completed_at = EXCLUDED.completed_at,
                 updated_at = now()
             RETURNING *",
        )
        .bind(entry.user_id)
        .bind(entry.item_id)
        .bind(&entry.item_type)
        .bind(entry.progress)
        .bind(entry.score)
        .bind(entry.completed)
        .bind(&entry.status)
        .bind(entry.started_at)
        .bind(entry.completed_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert user progress: {:?}", e);
            AppError::from(e)
        })?;
        Ok(progress)
    }
}
