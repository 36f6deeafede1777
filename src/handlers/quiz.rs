// src/handlers/quiz.rs

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::DEFAULT_LEADERBOARD_PAGE_SIZE,
    engine::{
        leaderboard,
        ledger::{self, ModuleTotals},
        scoring::resolve_score,
        sequencer::QuizSession,
    },
    error::AppError,
    models::{
        leaderboard::LeaderboardParams,
        profile::QuizResult,
        question::{AnswerSet, Quiz},
        submission::{AnswerStepRequest, AnswerStepResponse, SubmitQuizRequest},
    },
    state::AppState,
    utils::jwt::{AttemptClaims, Claims, sign_attempt, verify_attempt},
};

/// Folds a completed answer set into the learner's profile and commits it once.
///
/// A finalized `attempt_id` is answered with its recorded result and nothing
/// is written.
async fn finalize(
    state: &AppState,
    learner_id: &str,
    quiz: &Quiz,
    answers: &AnswerSet,
    attempt_id: Option<&str>,
) -> Result<QuizResult, AppError> {
    let profile = state.profiles.get_profile(learner_id).await?;
    if let Some(result) = attempt_id.and_then(|id| ledger::replayed_result(&profile, quiz, id)) {
        tracing::info!("Learner {} replayed a finished attempt of quiz {}", learner_id, quiz.id);
        return Ok(result);
    }

    let course = state.catalog.get_course(&quiz.course_id).await?;
    let courses = state.catalog.list_courses().await?;

    let score = resolve_score(state.scorer.as_deref(), quiz, answers).await;
    let (next, result) = ledger::finalize_quiz(
        &profile,
        quiz,
        &course,
        score,
        attempt_id,
        &ModuleTotals::from_courses(&courses),
        Utc::now().date_naive(),
    )?;

    state.profiles.put_profile(next).await?;
    tracing::info!(
        "Learner {} finished quiz {}: {}% (+{} pts)",
        learner_id,
        quiz.id,
        result.percent,
        result.points_earned
    );

    Ok(result)
}

/// Returns a quiz without correct answers or explanations.
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(quiz_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = state.catalog.get_quiz(&quiz_id).await?;
    Ok(Json(quiz.to_public()))
}

/// Answers the current question of an adaptive session.
///
/// * Without an attempt token a new attempt starts at the first question.
/// * Judges the answer and picks the next question adaptively.
/// * When the session completes, grades it and updates the profile once per attempt.
pub async fn answer_question(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(quiz_id): Path<String>,
    Json(req): Json<AnswerStepRequest>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = state.catalog.get_quiz(&quiz_id).await?;
    let secret = &state.config.jwt_secret;

    let (mut session, attempt_id) = match req.attempt_token.as_deref() {
        Some(token) => {
            let attempt = verify_attempt(token, secret, &claims.sub, &quiz.id)?;
            let session = QuizSession::resume(&quiz, attempt.answers, attempt.current_index)?;
            (session, attempt.attempt_id)
        }
        None => (QuizSession::start(&quiz), Uuid::new_v4().to_string()),
    };

    // Only a quiz without questions is complete before its first answer.
    if session.is_complete() {
        let result = finalize(&state, &claims.sub, &quiz, session.answers(), Some(&attempt_id)).await?;
        return Ok(Json(AnswerStepResponse {
            attempt_id,
            attempt_token: None,
            correct: false,
            explanation: String::new(),
            next_index: session.current_index(),
            next_question: None,
            answers: session.into_answers(),
            result: Some(result),
        }));
    }

    let answer = req
        .answer
        .ok_or_else(|| AppError::BadRequest("Missing answer".to_string()))?;
    let explanation = session
        .current_question()
        .map(|q| q.explanation.clone())
        .unwrap_or_default();
    let outcome = session.answer(answer)?;

    let (result, attempt_token) = if outcome.complete {
        let result = finalize(&state, &claims.sub, &quiz, session.answers(), Some(&attempt_id)).await?;
        (Some(result), None)
    } else {
        let next = AttemptClaims::new(
            &claims.sub,
            &quiz.id,
            &attempt_id,
            session.answers().clone(),
            session.current_index(),
        )?;
        (None, Some(sign_attempt(&next, secret)?))
    };

    Ok(Json(AnswerStepResponse {
        attempt_id,
        attempt_token,
        correct: outcome.correct,
        explanation,
        next_index: outcome.next_index,
        next_question: session.current_question().map(|q| q.to_public()),
        answers: session.into_answers(),
        result,
    }))
}

/// Submits a full answer set and finalizes the quiz.
pub async fn submit_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(quiz_id): Path<String>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = state.catalog.get_quiz(&quiz_id).await?;
    let result = finalize(&state, &claims.sub, &quiz, &req.answers, req.attempt_id.as_deref()).await?;
    Ok(Json(result))
}

/// Paginated, searchable ranking of all learners by points.
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let profiles = state.profiles.list_profiles().await?;
    let page = leaderboard::rank(
        &profiles,
        params.page.unwrap_or(1),
        params.page_size.unwrap_or(DEFAULT_LEADERBOARD_PAGE_SIZE),
        params.search.as_deref().unwrap_or(""),
    )?;

    Ok(Json(page))
}
