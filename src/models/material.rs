// src/models/material.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'study_materials' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyMaterial {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Material kind: 'PDF', 'Video', 'Notes', ...
    /// Mapped from the database column 'material_type' since the wire
    /// contract calls this field `type`.
    #[serde(rename = "type")]
    pub material_type: String,
    pub category_id: i64,
    pub file_url: String,
    pub thumbnail_url: Option<String>,
    pub is_free: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
