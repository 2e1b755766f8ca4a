// src/models/attempt.rs

use serde::{Deserialize, Serialize};

/// DTO for submitting a test attempt.
///
/// `answers[i]` is the selected option index for question `i`, or null when
/// the question was left unattempted. The vector length must equal the
/// test's question count; mismatches are a client contract violation and
/// are rejected without grading.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmitTestRequest {
    pub answers: Vec<Option<i32>>,
}

/// Graded outcome of one attempt, revealed only after submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    /// Signed sum of per-question contributions; may be negative under
    /// negative marking.
    pub score: f64,
    /// Sum of all marks in the question set.
    pub total_marks: f64,
    /// `round(score / total_marks * 100)`, half-up. Not clamped.
    pub percentage: i32,
    /// Correct option index per question, in question order.
    pub correct_answers: Vec<i32>,
}
