// src/models/progress.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'user_progress' table in the database.
///
/// One record per (user, item, item_type). Retaking a test overwrites the
/// existing record in place; history is not kept.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub id: i64,
    pub user_id: i64,
    pub item_id: i64,
    /// 'course' or 'test'.
    pub item_type: String,
    /// Completion percentage (courses) or 100 once a test is submitted.
    pub progress: i32,
    /// Latest score percentage (tests only).
    pub score: Option<i32>,
    pub completed: bool,
    /// 'not_started', 'in_progress' or 'completed'.
    pub status: String,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Insert/update shape handed to the storage upsert. The storage layer
/// keys on (user_id, item_id, item_type) and must never produce duplicate
/// rows for that triple, even under concurrent retries.
#[derive(Debug, Clone)]
pub struct ProgressUpsert {
    pub user_id: i64,
    pub item_id: i64,
    pub item_type: String,
    pub progress: i32,
    pub score: Option<i32>,
    pub completed: bool,
    pub status: String,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for the generic progress upsert endpoint (used by the dashboard for
/// course progress; test progress is written by the submission path).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProgressRequest {
    pub item_id: i64,
    #[validate(custom(function = validate_item_type))]
    pub item_type: String,
    #[validate(range(min = 0, max = 100))]
    pub progress: i32,
    pub score: Option<i32>,
    #[serde(default)]
    pub completed: bool,
}

fn validate_item_type(item_type: &str) -> Result<(), validator::ValidationError> {
    match item_type {
        "course" | "test" => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_item_type")),
    }
}
