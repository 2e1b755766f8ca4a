// src/handlers/catalog.rs
//
// Read-only browsing surface: exam categories, courses, test series and
// study materials. Authoring goes through operations tooling, not the API.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{error::AppError, state::AppState};

pub async fn list_exam_categories(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let categories = state.storage.get_exam_categories().await?;
    Ok(Json(categories))
}

pub async fn get_exam_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let category = state
        .storage
        .get_exam_category(id)
        .await?
        .ok_or(AppError::NotFound("Category not found".to_string()))?;
    Ok(Json(category))
}

pub async fn get_exam_category_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let category = state
        .storage
        .get_exam_category_by_slug(&slug)
        .await?
        .ok_or(AppError::NotFound("Category not found".to_string()))?;
    Ok(Json(category))
}

pub async fn list_courses(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let courses = state.storage.get_courses().await?;
    Ok(Json(courses))
}

pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let course = state
        .storage
        .get_course(id)
        .await?
        .ok_or(AppError::NotFound("Course not found".to_string()))?;
    Ok(Json(course))
}

pub async fn list_courses_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let courses = state.storage.get_courses_by_category(category_id).await?;
    Ok(Json(courses))
}

pub async fn list_test_series(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let series = state.storage.get_test_series().await?;
    Ok(Json(series))
}

pub async fn list_test_series_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let series = state
        .storage
        .get_test_series_by_category(category_id)
        .await?;
    Ok(Json(series))
}

pub async fn list_study_materials(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let materials = state.storage.get_study_materials().await?;
    Ok(Json(materials))
}

pub async fn list_study_materials_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let materials = state
        .storage
        .get_study_materials_by_category(category_id)
        .await?;
    Ok(Json(materials))
}
