// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{enrollment, profile, quiz},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (quizzes, leaderboard, profile, enrollments).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (stores, scorer, config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth = middleware::from_fn_with_state(state.clone(), auth_middleware);

    let quiz_routes = Router::new()
        .route("/{quiz_id}", get(quiz::get_quiz))
        // Protected quiz routes
        .merge(
            Router::new()
                .route("/{quiz_id}/answer", post(quiz::answer_question))
                .route("/{quiz_id}/submit", post(quiz::submit_quiz))
                .layer(auth.clone()),
        );

    let profile_routes = Router::new()
        .route("/me", get(profile::get_me).patch(profile::update_preferences))
        .route("/recommendations", get(profile::get_recommendations))
        .layer(auth.clone());

    let enrollment_routes = Router::new()
        .route(
            "/{course_id}",
            post(enrollment::enroll).delete(enrollment::unenroll),
        )
        .route(
            "/{course_id}/modules/{module_id}/complete",
            post(enrollment::complete_module),
        )
        .layer(auth);

    Router::new()
        .route("/api/leaderboard", get(quiz::get_leaderboard))
        .nest("/api/quizzes", quiz_routes)
        .nest("/api/profile", profile_routes)
        .nest("/api/enrollments", enrollment_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
