// src/models/profile.rs

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::course::Course;

/// Named achievements. Once granted a badge is never revoked by play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Badge {
    #[serde(rename = "First Quiz")]
    FirstQuiz,
    #[serde(rename = "High Scorer")]
    HighScorer,
    #[serde(rename = "Course Starter")]
    CourseStarter,
    #[serde(rename = "Course Master")]
    CourseMaster,
    #[serde(rename = "Consistency Star")]
    ConsistencyStar,
}

/// One entry of an enrollment's quiz history. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizScore {
    pub quiz_id: String,
    /// Percentage correct, 0..=100.
    #[serde(rename = "score")]
    pub percent: u32,
    pub date: NaiveDate,
    #[serde(default)]
    pub points_earned: u64,
    /// Set when the result came from an adaptive attempt; a replayed
    /// completion of the same attempt is answered from this entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_id: Option<String>,
}

/// A learner's progress state within one course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    /// Completed module ids in completion order, without duplicates.
    #[serde(default)]
    pub completed: Vec<String>,
    #[serde(default)]
    pub last_module_id: Option<String>,
    #[serde(default)]
    pub quiz_scores: Vec<QuizScore>,
}

impl Enrollment {
    /// Percentage of the course's modules completed, 0 for a course without modules.
    pub fn progress(&self, course: &Course) -> u32 {
        let total = course.modules.len();
        if total == 0 {
            return 0;
        }
        ((self.completed.len() as f64 / total as f64) * 100.0).round() as u32
    }

    pub fn latest_score(&self) -> Option<&QuizScore> {
        self.quiz_scores.last()
    }

    pub fn attempt(&self, attempt_id: &str) -> Option<&QuizScore> {
        self.quiz_scores
            .iter()
            .find(|s| s.attempt_id.as_deref() == Some(attempt_id))
    }
}

/// The persistent record of one learner.
///
/// `version` is bumped by the store on each committed write and is used to
/// detect lost updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerProfile {
    pub id: String,

    /// Display name.
    pub name: String,

    /// Login identifier (email).
    pub username: String,

    #[serde(default)]
    pub interests: Vec<String>,

    #[serde(default)]
    pub daily_goal_min: u32,

    #[serde(default)]
    pub points: u64,

    #[serde(default)]
    pub badges: BTreeSet<Badge>,

    /// Calendar days with tracked activity.
    #[serde(default, rename = "lastActive")]
    pub activity: BTreeSet<NaiveDate>,

    /// Enrollments keyed by course id.
    #[serde(default)]
    pub enrollments: BTreeMap<String, Enrollment>,

    #[serde(default)]
    pub version: u64,
}

impl LearnerProfile {
    pub fn new(id: &str, name: &str, username: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            username: username.to_string(),
            interests: Vec::new(),
            daily_goal_min: 0,
            points: 0,
            badges: BTreeSet::new(),
            activity: BTreeSet::new(),
            enrollments: BTreeMap::new(),
            version: 0,
        }
    }
}

/// Outcome of one quiz submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub percent: u32,
    pub points_earned: u64,
    pub total_points: u64,
    /// Badge set at completion time.
    pub badges: Vec<Badge>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    pub course_id: String,
    pub progress: u32,
    pub last_score: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub count: u32,
}

/// Aggregated profile data for the current learner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    #[serde(flatten)]
    pub profile: LearnerProfile,
    pub streak: u32,
    pub courses: Vec<CourseProgress>,
    pub weekly_activity: Vec<DayActivity>,
}

/// DTO for editing learner preferences. Fields are optional.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesRequest {
    #[validate(length(min = 1, max = 50, message = "Name length must be between 1 and 50 characters."))]
    pub name: Option<String>,

    #[validate(custom(function = validate_interests))]
    pub interests: Option<Vec<String>>,

    #[validate(range(max = 600, message = "Daily goal must be at most 600 minutes."))]
    pub daily_goal_min: Option<u32>,
}

fn validate_interests(interests: &[String]) -> Result<(), validator::ValidationError> {
    if interests.len() > 20 {
        return Err(validator::ValidationError::new("too_many_interests"));
    }
    for tag in interests {
        if tag.trim().is_empty() || tag.len() > 40 {
            return Err(validator::ValidationError::new("invalid_interest_tag"));
        }
    }
    Ok(())
}

/// DTO for completing a module within a course.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleCompletionResponse {
    pub progress: u32,
    pub points: u64,
    pub badges: Vec<Badge>,
}
