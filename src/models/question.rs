// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};

/// Represents the 'questions' table in the database.
///
/// Within one test, question order is fixed by `position` and clients
/// address questions purely by zero-based index. The grading fields
/// (`correct_option_index`, `marks`, `negative_marks`) are read only
/// through the privileged storage path and never leave the server before
/// submission.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,

    pub test_id: i64,

    /// Zero-based position within the test.
    pub position: i32,

    /// The text content of the question.
    pub question_text: String,

    /// List of options (e.g., ["Option A", "Option B"]).
    /// Stored as a JSON array in the database.
    pub options: Json<Vec<String>>,

    /// Index into `options` of the correct answer.
    pub correct_option_index: i32,

    /// Explanation shown when reviewing results.
    pub explanation: Option<String>,

    /// Points awarded when answered correctly.
    pub marks: f64,

    /// Points subtracted when answered incorrectly; unattempted questions
    /// are not penalized.
    pub negative_marks: f64,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for sending questions to a test taker (excludes the answer key and
/// marking data).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub id: i64,
    pub question_text: String,
    pub options: Json<Vec<String>>,
}

impl From<Question> for PublicQuestion {
    fn from(q: Question) -> Self {
        PublicQuestion {
            id: q.id,
            question_text: q.question_text,
            options: q.options,
        }
    }
}
