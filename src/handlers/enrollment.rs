// src/handlers/enrollment.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    engine::ledger::{self, ModuleTotals, ProfileEvent},
    error::AppError,
    models::profile::ModuleCompletionResponse,
    state::AppState,
    utils::jwt::Claims,
};

/// Enrolls the current learner in a course. Enrolling twice is a no-op.
pub async fn enroll(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(course_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let course = state.catalog.get_course(&course_id).await?;
    let profile = state.profiles.get_profile(&claims.sub).await?;

    if let Some(existing) = profile.enrollments.get(&course.id) {
        return Ok((StatusCode::OK, Json(existing.clone())));
    }

    let next = ledger::apply(
        &profile,
        ProfileEvent::Enrolled {
            course_id: course.id.clone(),
        },
        &ModuleTotals::default(),
    );
    let saved = state.profiles.put_profile(next).await?;
    tracing::info!("Learner {} enrolled in {}", claims.sub, course.id);

    let enrollment = saved.enrollments.get(&course.id).cloned().unwrap_or_default();
    Ok((StatusCode::CREATED, Json(enrollment)))
}

/// Removes the learner's enrollment. Points and badges are kept.
pub async fn unenroll(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(course_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let profile = state.profiles.get_profile(&claims.sub).await?;

    if profile.enrollments.contains_key(&course_id) {
        let next = ledger::apply(
            &profile,
            ProfileEvent::Unenrolled {
                course_id: course_id.clone(),
            },
            &ModuleTotals::default(),
        );
        state.profiles.put_profile(next).await?;
        tracing::info!("Learner {} unenrolled from {}", claims.sub, course_id);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Marks a module complete, awarding points and re-evaluating badges.
pub async fn complete_module(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((course_id, module_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let profile = state.profiles.get_profile(&claims.sub).await?;
    let course = state.catalog.get_course(&course_id).await?;
    let courses = state.catalog.list_courses().await?;

    let next = ledger::complete_module(
        &profile,
        &course,
        &module_id,
        &ModuleTotals::from_courses(&courses),
        Utc::now().date_naive(),
    )?;
    let saved = state.profiles.put_profile(next).await?;

    let progress = saved
        .enrollments
        .get(&course.id)
        .map(|e| e.progress(&course))
        .unwrap_or(0);

    Ok(Json(ModuleCompletionResponse {
        progress,
        points: saved.points,
        badges: saved.badges.iter().copied().collect(),
    }))
}
