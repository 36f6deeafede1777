// src/models/submission.rs

use serde::{Deserialize, Serialize};

use crate::models::{
    profile::QuizResult,
    question::{Answer, AnswerSet, PublicQuestion},
};

/// DTO for submitting a full quiz attempt.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    /// Key: question id, value: option index or boolean.
    #[serde(default)]
    pub answers: AnswerSet,

    /// Optional idempotency key. Resubmitting with the same key returns the
    /// recorded result instead of grading again.
    #[serde(default)]
    pub attempt_id: Option<String>,
}

/// DTO for answering one question of an adaptive session.
///
/// Without `attempt_token` a new attempt starts at the first question. Every
/// response carries the token for the next step.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerStepRequest {
    #[serde(default)]
    pub attempt_token: Option<String>,
    /// Ignored for a quiz without questions.
    #[serde(default)]
    pub answer: Option<Answer>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerStepResponse {
    pub attempt_id: String,
    /// Absent once the attempt is complete.
    pub attempt_token: Option<String>,
    pub correct: bool,
    pub explanation: String,
    /// Answers including the one just recorded.
    pub answers: AnswerSet,
    pub next_index: usize,
    pub next_question: Option<PublicQuestion>,
    /// Present once the session is complete.
    pub result: Option<QuizResult>,
}
