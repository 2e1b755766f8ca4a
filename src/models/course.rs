// src/models/course.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'courses' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category_id: i64,
    pub instructor: String,
    /// Human-readable duration (e.g., "80 Hours").
    pub duration: String,
    pub level: String,
    pub lessons_count: i32,
    /// Price in the smallest currency unit.
    pub price: i32,
    pub discount_price: Option<i32>,
    pub image_url: String,
    /// Rating scaled by 10 (48 means 4.8).
    pub rating: Option<i32>,
    pub rating_count: i32,
    pub enrolled_count: i32,
    pub is_bestseller: bool,
    pub is_new: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
