// src/handlers/progress.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use chrono::Utc;
use validator::Validate;

use crate::{
    error::AppError,
    models::progress::{ProgressUpsert, UpsertProgressRequest},
    state::AppState,
    utils::jwt::Claims,
};

/// Lists all progress records for the current user (dashboard view).
pub async fn list_progress(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let progress = state.storage.get_user_progress(user_id).await?;
    Ok(Json(progress))
}

/// Generic progress upsert, used by the dashboard for course progress.
/// Test completion is written by the submission path; both funnel into the
/// same (user, item, item_type)-keyed record.
pub async fn upsert_progress(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpsertProgressRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user_id = claims.user_id()?;
    let now = Utc::now();
    let completed = payload.completed || payload.progress >= 100;

    let status = if completed {
        "completed"
    } else if payload.progress > 0 {
        "in_progress"
    } else {
        "not_started"
    };

    let progress = state
        .storage
        .upsert_user_progress(ProgressUpsert {
            user_id,
            item_id: payload.item_id,
            item_type: payload.item_type,
            progress: payload.progress,
            score: payload.score,
            completed,
            status: status.to_string(),
            started_at: Some(now),
            completed_at: completed.then_some(now),
        })
        .await?;

    Ok(Json(progress))
}
