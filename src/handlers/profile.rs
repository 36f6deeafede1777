use axum::{Extension, Json, extract::State, response::IntoResponse};
use chrono::Utc;
use validator::Validate;

use crate::{
    engine::{
        ledger::{self, ModuleTotals, ProfileEvent},
        recommend::recommend,
    },
    error::AppError,
    models::profile::{CourseProgress, MeResponse, UpdatePreferencesRequest},
    state::AppState,
    utils::jwt::Claims,
};

/// Get current learner's profile with streak, course progress and weekly activity.
pub async fn get_me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let profile = state.profiles.get_profile(&claims.sub).await?;
    let courses = state.catalog.list_courses().await?;
    let today = Utc::now().date_naive();

    let progress = profile
        .enrollments
        .iter()
        .map(|(course_id, enrollment)| CourseProgress {
            course_id: course_id.clone(),
            progress: courses
                .iter()
                .find(|c| &c.id == course_id)
                .map(|c| enrollment.progress(c))
                .unwrap_or(0),
            last_score: enrollment.latest_score().map(|s| s.percent),
        })
        .collect();

    Ok(Json(MeResponse {
        streak: ledger::current_streak(&profile.activity, today),
        weekly_activity: ledger::weekly_activity(&profile.activity, today),
        courses: progress,
        profile,
    }))
}

/// Edit display name, interests or daily goal.
pub async fn update_preferences(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdatePreferencesRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let profile = state.profiles.get_profile(&claims.sub).await?;
    let next = ledger::apply(
        &profile,
        ProfileEvent::PreferencesUpdated {
            name: payload.name,
            interests: payload.interests,
            daily_goal_min: payload.daily_goal_min,
        },
        &ModuleTotals::default(),
    );
    let saved = state.profiles.put_profile(next).await?;

    Ok(Json(saved))
}

/// Top courses for the current learner, with score breakdown.
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let profile = state.profiles.get_profile(&claims.sub).await?;
    let courses = state.catalog.list_courses().await?;

    Ok(Json(recommend(&profile, &courses)))
}
