// src/models/category.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'exam_categories' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ExamCategory {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Icon identifier rendered by the frontend (e.g., "fa-university").
    pub icon: String,
    /// URL-friendly unique identifier.
    pub slug: String,
}
