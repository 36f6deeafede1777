// src/models/dataset.rs

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    models::{
        course::Course,
        profile::LearnerProfile,
        question::{QuestionKind, Quiz},
    },
};

/// A full snapshot of learners and catalog, as loaded at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(alias = "users")]
    pub learners: Vec<LearnerProfile>,
    pub courses: Vec<Course>,
    pub quizzes: Vec<Quiz>,
}

impl Dataset {
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let dataset: Dataset = serde_json::from_str(raw)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Rejects datasets that would break engine invariants.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut quiz_ids = HashSet::new();
        for quiz in &self.quizzes {
            if !quiz_ids.insert(quiz.id.as_str()) {
                return Err(invalid(format!("duplicate quiz id '{}'", quiz.id)));
            }
            for question in &quiz.questions {
                if let QuestionKind::MultipleChoice { options, answer } = &question.kind {
                    if *answer >= options.len() {
                        return Err(invalid(format!(
                            "question '{}' answer index {} is out of range",
                            question.id, answer
                        )));
                    }
                }
            }
        }

        let mut courses: HashMap<&str, &Course> = HashMap::new();
        for course in &self.courses {
            if courses.insert(course.id.as_str(), course).is_some() {
                return Err(invalid(format!("duplicate course id '{}'", course.id)));
            }
            if !quiz_ids.contains(course.quiz_id.as_str()) {
                return Err(invalid(format!(
                    "course '{}' references unknown quiz '{}'",
                    course.id, course.quiz_id
                )));
            }
        }

        for quiz in &self.quizzes {
            match courses.get(quiz.course_id.as_str()) {
                None => {
                    return Err(invalid(format!(
                        "quiz '{}' belongs to unknown course '{}'",
                        quiz.id, quiz.course_id
                    )));
                }
                Some(course) if course.quiz_id != quiz.id => {
                    return Err(invalid(format!(
                        "quiz '{}' claims course '{}', which uses quiz '{}'",
                        quiz.id, course.id, course.quiz_id
                    )));
                }
                Some(_) => {}
            }
        }

        let mut learner_ids = HashSet::new();
        for learner in &self.learners {
            if !learner_ids.insert(learner.id.as_str()) {
                return Err(invalid(format!("duplicate learner id '{}'", learner.id)));
            }
            for (course_id, enrollment) in &learner.enrollments {
                let Some(course) = courses.get(course_id.as_str()) else {
                    return Err(invalid(format!(
                        "learner '{}' is enrolled in unknown course '{}'",
                        learner.id, course_id
                    )));
                };
                if let Some(module_id) = enrollment.completed.iter().find(|m| !course.has_module(m)) {
                    return Err(invalid(format!(
                        "learner '{}' completed module '{}' outside course '{}'",
                        learner.id, module_id, course_id
                    )));
                }
            }
        }

        Ok(())
    }
}

fn invalid(msg: String) -> AppError {
    AppError::BadRequest(format!("Invalid dataset: {}", msg))
}
