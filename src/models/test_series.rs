// src/models/test_series.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};

/// Represents the 'test_series' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSeries {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category_id: i64,
    pub tests_count: i32,
    pub price: i32,
    pub discount_price: Option<i32>,
    /// Marketing bullet points, stored as a JSON array.
    pub features: Json<Vec<String>>,
    pub tag: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
