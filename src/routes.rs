// src/routes.rs

use axum::{
    Router, http::Method, middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, catalog, exam, progress},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, catalog, exams, progress).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (storage adapter + config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .merge(
            Router::new()
                .route("/me", get(auth::me))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    let category_routes = Router::new()
        .route("/", get(catalog::list_exam_categories))
        .route("/{id}", get(catalog::get_exam_category))
        .route("/slug/{slug}", get(catalog::get_exam_category_by_slug));

    let course_routes = Router::new()
        .route("/", get(catalog::list_courses))
        .route("/{id}", get(catalog::get_course))
        .route("/category/{category_id}", get(catalog::list_courses_by_category));

    let series_routes = Router::new()
        .route("/", get(catalog::list_test_series))
        .route(
            "/category/{category_id}",
            get(catalog::list_test_series_by_category),
        );

    let mock_test_routes = Router::new()
        .route("/", get(exam::list_mock_tests))
        .route("/{id}", get(exam::get_mock_test))
        .route("/series/{series_id}", get(exam::list_mock_tests_by_series));

    let material_routes = Router::new()
        .route("/", get(catalog::list_study_materials))
        .route(
            "/category/{category_id}",
            get(catalog::list_study_materials_by_category),
        );

    // Question delivery and grading require an authenticated caller;
    // rejection happens before any question read or grading.
    let question_routes = Router::new()
        .route("/{test_id}", get(exam::get_questions))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let submit_routes = Router::new()
        .route("/{test_id}", post(exam::submit_test))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let progress_routes = Router::new()
        .route(
            "/",
            get(progress::list_progress).post(progress::upsert_progress),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/exam-categories", category_routes)
        .nest("/api/courses", course_routes)
        .nest("/api/test-series", series_routes)
        .nest("/api/mock-tests", mock_test_routes)
        .nest("/api/study-materials", material_routes)
        .nest("/api/questions", question_routes)
        .nest("/api/submit-test", submit_routes)
        .nest("/api/user-progress", progress_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
