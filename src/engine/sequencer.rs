// src/engine/sequencer.rs

//! Adaptive question ordering.
//!
//! A correct answer advances linearly. A wrong answer jumps forward to the
//! next unanswered easy question, then to the next unanswered question of the
//! same difficulty, and otherwise falls through to the next index. Returned
//! indices are strictly increasing, so every question is presented at most
//! once and a quiz of N questions finishes in at most N steps.

use crate::{
    error::AppError,
    models::question::{Answer, AnswerSet, Difficulty, Question, Quiz},
};

/// Chooses the index of the next question to present.
///
/// A result `>= questions.len()` means the session is complete.
pub fn next_index(
    questions: &[Question],
    answers: &AnswerSet,
    current: usize,
    was_correct: bool,
) -> usize {
    let fallthrough = current.saturating_add(1);
    if was_correct {
        return fallthrough;
    }

    let unanswered_with = |difficulty: Difficulty| {
        questions
            .iter()
            .enumerate()
            .skip(fallthrough)
            .find(|(_, q)| q.difficulty == difficulty && !answers.is_answered(&q.id))
            .map(|(i, _)| i)
    };

    if let Some(i) = unanswered_with(Difficulty::Easy) {
        return i;
    }

    let Some(current_question) = questions.get(current) else {
        return fallthrough;
    };

    unanswered_with(current_question.difficulty).unwrap_or(fallthrough)
}

/// Result of answering the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub question_id: String,
    pub correct: bool,
    pub next_index: usize,
    pub complete: bool,
}

/// Drives one learner through a quiz until completion.
#[derive(Debug, Clone)]
pub struct QuizSession<'a> {
    quiz: &'a Quiz,
    answers: AnswerSet,
    current: usize,
}

impl<'a> QuizSession<'a> {
    /// Starts at the first question. A quiz without questions is complete immediately.
    pub fn start(quiz: &'a Quiz) -> Self {
        Self {
            quiz,
            answers: AnswerSet::new(),
            current: 0,
        }
    }

    /// Rebuilds a session from the state held by the caller between requests.
    pub fn resume(quiz: &'a Quiz, answers: AnswerSet, current: usize) -> Result<Self, AppError> {
        if let Some(unknown) = answers
            .iter()
            .map(|(id, _)| id)
            .find(|id| !quiz.questions.iter().any(|q| &q.id == *id))
        {
            return Err(AppError::BadRequest(format!(
                "Question '{}' is not part of quiz '{}'",
                unknown, quiz.id
            )));
        }

        let session = Self {
            quiz,
            answers,
            current,
        };

        if let Some(question) = session.current_question() {
            if session.answers.is_answered(&question.id) {
                return Err(AppError::BadRequest(format!(
                    "Question '{}' has already been answered",
                    question.id
                )));
            }
        } else if !quiz.questions.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Question index {} is out of range",
                current
            )));
        }

        Ok(session)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&'a Question> {
        self.quiz.questions.get(self.current)
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.quiz.questions.len()
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn into_answers(self) -> AnswerSet {
        self.answers
    }

    /// Records the answer to the current question and moves to the next one.
    pub fn answer(&mut self, answer: Answer) -> Result<AnswerOutcome, AppError> {
        let question = self
            .current_question()
            .ok_or_else(|| AppError::BadRequest("Quiz is already complete".to_string()))?;

        if !self.answers.record(&question.id, answer) {
            return Err(AppError::BadRequest(format!(
                "Question '{}' has already been answered",
                question.id
            )));
        }

        let correct = question.is_correct(&answer);
        let next = next_index(&self.quiz.questions, &self.answers, self.current, correct);
        tracing::debug!(
            quiz_id = %self.quiz.id,
            question_id = %question.id,
            correct,
            from = self.current,
            to = next,
            "sequenced next question"
        );
        self.current = next;

        Ok(AnswerOutcome {
            question_id: question.id.clone(),
            correct,
            next_index: next,
            complete: self.is_complete(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::QuestionKind;

    fn tf(id: &str, difficulty: Difficulty) -> Question {
        Question {
            id: id.to_string(),
            kind: QuestionKind::TrueFalse { answer: true },
            prompt: format!("{} is true", id),
            difficulty,
            explanation: String::new(),
        }
    }

    fn quiz(difficulties: &[Difficulty]) -> Quiz {
        Quiz {
            id: "quiz_test".to_string(),
            course_id: "c_test".to_string(),
            questions: difficulties
                .iter()
                .enumerate()
                .map(|(i, d)| tf(&format!("q{}", i + 1), *d))
                .collect(),
        }
    }

    use Difficulty::{Easy, Hard, Medium};

    #[test]
    fn index_at_the_numeric_limit_does_not_overflow() {
        let quiz = quiz(&[Easy, Medium]);
        let answers = AnswerSet::new();
        assert_eq!(next_index(&quiz.questions, &answers, usize::MAX, true), usize::MAX);
        assert_eq!(next_index(&quiz.questions, &answers, usize::MAX, false), usize::MAX);
    }

    #[test]
    fn empty_quiz_session_is_complete_at_start() {
        let empty = quiz(&[]);
        assert!(QuizSession::start(&empty).is_complete());
        assert!(QuizSession::resume(&empty, AnswerSet::new(), 0).unwrap().is_complete());
    }

    #[test]
    fn correct_answer_advances_linearly() {
        let quiz = quiz(&[Easy, Medium, Hard]);
        let mut answers = AnswerSet::new();
        answers.record("q1", Answer::Boolean(true));
        assert_eq!(next_index(&quiz.questions, &answers, 0, true), 1);
    }

    #[test]
    fn wrong_answer_prefers_next_unanswered_easy() {
        let quiz = quiz(&[Medium, Hard, Medium, Easy]);
        let mut answers = AnswerSet::new();
        answers.record("q1", Answer::Boolean(false));
        assert_eq!(next_index(&quiz.questions, &answers, 0, false), 3);
    }

    #[test]
    fn wrong_answer_skips_answered_easy_questions() {
        let quiz = quiz(&[Medium, Easy, Medium, Easy]);
        let mut answers = AnswerSet::new();
        answers.record("q1", Answer::Boolean(false));
        answers.record("q2", Answer::Boolean(true));
        assert_eq!(next_index(&quiz.questions, &answers, 0, false), 3);
    }

    #[test]
    fn wrong_answer_falls_back_to_same_difficulty() {
        let quiz = quiz(&[Easy, Medium, Hard, Medium]);
        let mut answers = AnswerSet::new();
        answers.record("q1", Answer::Boolean(true));
        answers.record("q2", Answer::Boolean(false));
        assert_eq!(next_index(&quiz.questions, &answers, 1, false), 3);
    }

    #[test]
    fn wrong_answer_without_candidates_falls_through() {
        let quiz = quiz(&[Easy, Medium, Hard]);
        let mut answers = AnswerSet::new();
        answers.record("q1", Answer::Boolean(true));
        answers.record("q2", Answer::Boolean(false));
        assert_eq!(next_index(&quiz.questions, &answers, 1, false), 2);

        answers.record("q3", Answer::Boolean(false));
        assert_eq!(next_index(&quiz.questions, &answers, 2, false), 3);
    }

    #[test]
    fn empty_quiz_completes_immediately() {
        let quiz = quiz(&[]);
        let mut session = QuizSession::start(&quiz);
        assert!(session.is_complete());
        assert!(session.current_question().is_none());
        assert!(session.answer(Answer::Boolean(true)).is_err());
        assert!(session.into_answers().is_empty());
    }

    #[test]
    fn every_question_visited_at_most_once_and_terminates() {
        let layouts: [&[Difficulty]; 4] = [
            &[Easy, Medium, Hard, Easy, Medium, Hard, Easy, Medium, Hard, Easy],
            &[Hard, Hard, Easy, Medium, Easy, Hard],
            &[Medium],
            &[Hard, Medium, Easy],
        ];

        for layout in layouts {
            let quiz = quiz(layout);
            // All-wrong runs exercise the remediation scans.
            for always_wrong in [true, false] {
                let mut session = QuizSession::start(&quiz);
                let mut visited = Vec::new();
                let mut steps = 0;
                while let Some(question) = session.current_question() {
                    assert!(!visited.contains(&question.id));
                    visited.push(question.id.clone());
                    session.answer(Answer::Boolean(!always_wrong)).unwrap();
                    steps += 1;
                    assert!(steps <= quiz.questions.len());
                }
                assert!(session.is_complete());
                assert_eq!(session.answers().len(), visited.len());
            }
        }
    }

    #[test]
    fn resume_rejects_already_answered_question() {
        let quiz = quiz(&[Easy, Medium]);
        let answers: AnswerSet = [("q1".to_string(), Answer::Boolean(true))].into_iter().collect();
        assert!(QuizSession::resume(&quiz, answers.clone(), 0).is_err());

        let mut session = QuizSession::resume(&quiz, answers, 1).unwrap();
        let outcome = session.answer(Answer::Boolean(true)).unwrap();
        assert!(outcome.correct);
        assert!(outcome.complete);
        assert_eq!(session.answers().len(), 2);
    }

    #[test]
    fn resume_rejects_unknown_question_and_bad_index() {
        let quiz = quiz(&[Easy, Medium]);
        let answers: AnswerSet = [("qx".to_string(), Answer::Boolean(true))].into_iter().collect();
        assert!(QuizSession::resume(&quiz, answers, 0).is_err());
        assert!(QuizSession::resume(&quiz, AnswerSet::new(), 5).is_err());
    }
}
