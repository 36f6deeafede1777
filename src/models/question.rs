// src/models/question.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Question difficulty used by adaptive sequencing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// The kind of a question together with its correct answer.
/// Serialized with a `type` tag: `mcq` or `tf`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QuestionKind {
    #[serde(rename = "mcq")]
    MultipleChoice {
        options: Vec<String>,
        /// Index into `options`.
        answer: usize,
    },
    #[serde(rename = "tf")]
    TrueFalse { answer: bool },
}

/// An authored quiz question. Immutable once authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,

    #[serde(flatten)]
    pub kind: QuestionKind,

    /// The prompt shown to the learner.
    #[serde(rename = "question")]
    pub prompt: String,

    pub difficulty: Difficulty,

    #[serde(default)]
    pub explanation: String,
}

impl Question {
    /// Type-appropriate equality: index for multiple choice, boolean for true/false.
    /// An answer of the wrong shape is never correct.
    pub fn is_correct(&self, answer: &Answer) -> bool {
        match (&self.kind, answer) {
            (QuestionKind::MultipleChoice { answer: expected, .. }, Answer::Choice(given)) => {
                expected == given
            }
            (QuestionKind::TrueFalse { answer: expected }, Answer::Boolean(given)) => {
                expected == given
            }
            (QuestionKind::MultipleChoice { .. }, Answer::Boolean(_))
            | (QuestionKind::TrueFalse { .. }, Answer::Choice(_)) => false,
        }
    }

    /// Strips the correct answer and explanation for delivery to a learner.
    pub fn to_public(&self) -> PublicQuestion {
        let (question_type, options) = match &self.kind {
            QuestionKind::MultipleChoice { options, .. } => ("mcq", options.clone()),
            QuestionKind::TrueFalse { .. } => ("tf", Vec::new()),
        };

        PublicQuestion {
            id: self.id.clone(),
            question_type: question_type.to_string(),
            prompt: self.prompt.clone(),
            options,
            difficulty: self.difficulty,
        }
    }
}

/// A learner's submitted answer. On the wire this is a bare number or boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Choice(usize),
    Boolean(bool),
}

/// Answers keyed by question id. Entries are only ever added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, Answer>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an answer. Returns `false` and keeps the first answer if the
    /// question was already answered.
    pub fn record(&mut self, question_id: &str, answer: Answer) -> bool {
        if self.0.contains_key(question_id) {
            return false;
        }
        self.0.insert(question_id.to_string(), answer);
        true
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.0.get(question_id)
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.0.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Answer)> {
        self.0.iter()
    }
}

impl FromIterator<(String, Answer)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (String, Answer)>>(iter: I) -> Self {
        let mut set = AnswerSet::new();
        for (id, answer) in iter {
            set.record(&id, answer);
        }
        set
    }
}

/// An ordered sequence of questions belonging to one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub course_id: String,
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn to_public(&self) -> PublicQuiz {
        PublicQuiz {
            id: self.id.clone(),
            course_id: self.course_id.clone(),
            questions: self.questions.iter().map(Question::to_public).collect(),
        }
    }
}

/// DTO for sending a question to the learner (excludes answer and explanation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: String,
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub options: Vec<String>,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuiz {
    pub id: String,
    pub course_id: String,
    pub questions: Vec<PublicQuestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_wire_shape() {
        let mcq: Question = serde_json::from_value(serde_json::json!({
            "id": "q1",
            "type": "mcq",
            "question": "Pick B",
            "options": ["A", "B", "C"],
            "answer": 1,
            "difficulty": "medium"
        }))
        .unwrap();
        assert_eq!(mcq.difficulty, Difficulty::Medium);
        assert!(mcq.explanation.is_empty());
        assert!(mcq.is_correct(&Answer::Choice(1)));
        assert!(!mcq.is_correct(&Answer::Choice(0)));
        assert!(!mcq.is_correct(&Answer::Boolean(true)));

        let tf: Question = serde_json::from_value(serde_json::json!({
            "id": "q2",
            "type": "tf",
            "question": "Rust has a borrow checker",
            "answer": true,
            "difficulty": "easy",
            "explanation": "It does."
        }))
        .unwrap();
        assert!(tf.is_correct(&Answer::Boolean(true)));
        assert!(!tf.is_correct(&Answer::Choice(1)));
    }

    #[test]
    fn answers_parse_from_numbers_and_booleans() {
        let answers: AnswerSet =
            serde_json::from_value(serde_json::json!({"q1": 2, "q2": false})).unwrap();
        assert_eq!(answers.get("q1"), Some(&Answer::Choice(2)));
        assert_eq!(answers.get("q2"), Some(&Answer::Boolean(false)));
    }

    #[test]
    fn answer_set_never_overwrites() {
        let mut answers = AnswerSet::new();
        assert!(answers.record("q1", Answer::Choice(0)));
        assert!(!answers.record("q1", Answer::Choice(3)));
        assert_eq!(answers.get("q1"), Some(&Answer::Choice(0)));
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn public_view_hides_answer() {
        let q = Question {
            id: "q1".into(),
            kind: QuestionKind::MultipleChoice {
                options: vec!["A".into(), "B".into()],
                answer: 1,
            },
            prompt: "?".into(),
            difficulty: Difficulty::Hard,
            explanation: "because".into(),
        };
        let value = serde_json::to_value(q.to_public()).unwrap();
        assert_eq!(value["type"], "mcq");
        assert!(value.get("answer").is_none());
        assert!(value.get("explanation").is_none());
    }
}
