// src/handlers/exam.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    error::AppError,
    models::{
        attempt::SubmitTestRequest,
        progress::ProgressUpsert,
        question::PublicQuestion,
    },
    scoring,
    state::AppState,
    utils::jwt::Claims,
};

pub async fn list_mock_tests(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let tests = state.storage.get_mock_tests().await?;
    Ok(Json(tests))
}

pub async fn get_mock_test(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let test = state
        .storage
        .get_mock_test(id)
        .await?
        .ok_or(AppError::NotFound("Mock test not found".to_string()))?;
    Ok(Json(test))
}

pub async fn list_mock_tests_by_series(
    State(state): State<AppState>,
    Path(series_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let tests = state.storage.get_mock_tests_by_series(series_id).await?;
    Ok(Json(tests))
}

/// Returns the question paper for a test, in question order, with the
/// answer key and marking data stripped. Requires an authenticated caller
/// (enforced by the auth middleware on this route).
pub async fn get_questions(
    State(state): State<AppState>,
    Path(test_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if state.storage.get_mock_test(test_id).await?.is_none() {
        return Err(AppError::NotFound("Mock test not found".to_string()));
    }

    let questions = state.storage.get_questions(test_id).await?;

    let public: Vec<PublicQuestion> = questions.into_iter().map(PublicQuestion::from).collect();

    Ok(Json(public))
}

/// Submits a user's answer vector and grades it.
///
/// * Validates the vector against the authoritative question set
///   (length and option-index bounds) before any grading.
/// * Applies negative marking; the score is not clamped at zero.
/// * Upserts the user's progress record for this test (retakes overwrite
///   the previous record, they do not append history).
/// * Reveals the correct answers in the response, and only there.
pub async fn submit_test(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(test_id): Path<i64>,
    Json(req): Json<SubmitTestRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    if state.storage.get_mock_test(test_id).await?.is_none() {
        return Err(AppError::NotFound("Mock test not found".to_string()));
    }

    let questions = state.storage.get_questions(test_id).await?;
    if questions.is_empty() {
        return Err(AppError::NotFound(
            "No questions found for this test".to_string(),
        ));
    }

    let result = scoring::grade(&questions, &req.answers)?;

    let now = Utc::now();
    state
        .storage
        .upsert_user_progress(ProgressUpsert {
            user_id,
            item_id: test_id,
            item_type: "test".to_string(),
            progress: 100,
            score: Some(result.percentage),
            completed: true,
            status: "completed".to_string(),
            started_at: Some(now),
            completed_at: Some(now),
        })
        .await?;

    tracing::info!(
        "User {} submitted test {}: {}/{} ({}%)",
        user_id,
        test_id,
        result.score,
        result.total_marks,
        result.percentage
    );

    Ok(Json(result))
}
