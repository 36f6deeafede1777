// src/engine/scoring.rs

//! Quiz grading.
//!
//! Scores are computed locally or by a delegated scoring service. Both paths
//! produce the same `ScoreOutcome`; when a delegate is configured and answers,
//! its result is authoritative.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    config::POINTS_PER_CORRECT,
    error::AppError,
    models::question::{AnswerSet, Quiz},
};

/// Percentage and points for one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreOutcome {
    pub percent: u32,
    pub points_earned: u64,
}

/// Counts correct answers. Unanswered questions count as incorrect.
pub fn count_correct(quiz: &Quiz, answers: &AnswerSet) -> usize {
    quiz.questions
        .iter()
        .filter(|q| answers.get(&q.id).is_some_and(|a| q.is_correct(a)))
        .count()
}

/// `round(100 * correct / total)`, or 0 for an empty quiz.
pub fn percent(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((correct as f64 / total as f64) * 100.0).round() as u32
}

/// Grades a submission without any collaborator.
pub fn score_locally(quiz: &Quiz, answers: &AnswerSet) -> ScoreOutcome {
    let correct = count_correct(quiz, answers);
    ScoreOutcome {
        percent: percent(correct, quiz.questions.len()),
        points_earned: correct as u64 * POINTS_PER_CORRECT,
    }
}

#[async_trait]
pub trait QuizScorer: Send + Sync {
    async fn score(&self, quiz: &Quiz, answers: &AnswerSet) -> Result<ScoreOutcome, AppError>;
}

pub struct LocalScorer;

#[async_trait]
impl QuizScorer for LocalScorer {
    async fn score(&self, quiz: &Quiz, answers: &AnswerSet) -> Result<ScoreOutcome, AppError> {
        Ok(score_locally(quiz, answers))
    }
}

#[derive(Serialize)]
struct RemoteSubmitRequest<'a> {
    answers: &'a AnswerSet,
}

/// Delegates grading to `POST {base_url}/api/quizzes/{quiz_id}/submit`.
pub struct RemoteScorer {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteScorer {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl QuizScorer for RemoteScorer {
    async fn score(&self, quiz: &Quiz, answers: &AnswerSet) -> Result<ScoreOutcome, AppError> {
        let url = format!("{}/api/quizzes/{}/submit", self.base_url, quiz.id);
        let outcome = self
            .client
            .post(&url)
            .json(&RemoteSubmitRequest { answers })
            .send()
            .await?
            .error_for_status()?
            .json::<ScoreOutcome>()
            .await?;

        if outcome.percent > 100 {
            return Err(AppError::InternalServerError(format!(
                "Scoring service returned percent {} for quiz '{}'",
                outcome.percent, quiz.id
            )));
        }

        Ok(outcome)
    }
}

/// Uses the delegate when one is configured, falling back to local grading if it fails.
pub async fn resolve_score(
    delegate: Option<&dyn QuizScorer>,
    quiz: &Quiz,
    answers: &AnswerSet,
) -> ScoreOutcome {
    if let Some(scorer) = delegate {
        match scorer.score(quiz, answers).await {
            Ok(outcome) => return outcome,
            Err(e) => {
                tracing::warn!("Delegated scoring failed for quiz {}, scoring locally: {}", quiz.id, e);
            }
        }
    }
    score_locally(quiz, answers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{Answer, Difficulty, Question, QuestionKind};

    fn ten_question_quiz() -> Quiz {
        let questions = (0..10)
            .map(|i| Question {
                id: format!("q{}", i),
                kind: if i % 2 == 0 {
                    QuestionKind::MultipleChoice {
                        options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                        answer: i % 4,
                    }
                } else {
                    QuestionKind::TrueFalse { answer: i % 3 != 0 }
                },
                prompt: format!("Q{}", i + 1),
                difficulty: Difficulty::Easy,
                explanation: String::new(),
            })
            .collect();
        Quiz {
            id: "quiz_ten".into(),
            course_id: "c_ten".into(),
            questions,
        }
    }

    fn correct_answer(q: &Question) -> Answer {
        match q.kind {
            QuestionKind::MultipleChoice { answer, .. } => Answer::Choice(answer),
            QuestionKind::TrueFalse { answer } => Answer::Boolean(answer),
        }
    }

    #[test]
    fn seven_of_ten_is_seventy_percent() {
        let quiz = ten_question_quiz();
        let answers: AnswerSet = quiz
            .questions
            .iter()
            .take(7)
            .map(|q| (q.id.clone(), correct_answer(q)))
            .collect();

        let outcome = score_locally(&quiz, &answers);
        assert_eq!(outcome.percent, 70);
        assert_eq!(outcome.points_earned, 70);
    }

    #[test]
    fn wrong_shapes_and_unanswered_count_as_incorrect() {
        let quiz = ten_question_quiz();
        let answers: AnswerSet = quiz
            .questions
            .iter()
            .map(|q| {
                let wrong_shape = match q.kind {
                    QuestionKind::MultipleChoice { .. } => Answer::Boolean(true),
                    QuestionKind::TrueFalse { .. } => Answer::Choice(1),
                };
                (q.id.clone(), wrong_shape)
            })
            .collect();
        assert_eq!(count_correct(&quiz, &answers), 0);
        assert_eq!(score_locally(&quiz, &AnswerSet::new()).percent, 0);
    }

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(3, 3), 100);
        assert_eq!(percent(0, 0), 0);
    }

    struct FixedScorer(Result<ScoreOutcome, AppError>);

    #[async_trait]
    impl QuizScorer for FixedScorer {
        async fn score(&self, _: &Quiz, _: &AnswerSet) -> Result<ScoreOutcome, AppError> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn delegated_result_is_authoritative() {
        let quiz = ten_question_quiz();
        let delegate = FixedScorer(Ok(ScoreOutcome {
            percent: 90,
            points_earned: 45,
        }));
        let outcome = resolve_score(Some(&delegate), &quiz, &AnswerSet::new()).await;
        assert_eq!(outcome.percent, 90);
        assert_eq!(outcome.points_earned, 45);
    }

    #[tokio::test]
    async fn delegate_failure_falls_back_to_local() {
        let quiz = ten_question_quiz();
        let delegate = FixedScorer(Err(AppError::InternalServerError("down".into())));
        let answers: AnswerSet = [("q0".to_string(), Answer::Choice(0))].into_iter().collect();
        let outcome = resolve_score(Some(&delegate), &quiz, &answers).await;
        assert_eq!(outcome, ScoreOutcome { percent: 10, points_earned: 10 });
    }

    #[tokio::test]
    async fn local_scorer_matches_pure_function() {
        let quiz = ten_question_quiz();
        let outcome = LocalScorer.score(&quiz, &AnswerSet::new()).await.unwrap();
        assert_eq!(outcome, score_locally(&quiz, &AnswerSet::new()));
    }
}
