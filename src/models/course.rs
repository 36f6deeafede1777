// src/models/course.rs

use serde::{Deserialize, Serialize};

/// Course difficulty tier. Unrecognized tiers are kept verbatim so a dataset
/// round-trips, and rank like `Advanced` for recommendation purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DifficultyTier {
    Beginner,
    Intermediate,
    Advanced,
    Other(String),
}

impl From<String> for DifficultyTier {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Beginner" => DifficultyTier::Beginner,
            "Intermediate" => DifficultyTier::Intermediate,
            "Advanced" => DifficultyTier::Advanced,
            _ => DifficultyTier::Other(value),
        }
    }
}

impl From<DifficultyTier> for String {
    fn from(tier: DifficultyTier) -> Self {
        match tier {
            DifficultyTier::Beginner => "Beginner".to_string(),
            DifficultyTier::Intermediate => "Intermediate".to_string(),
            DifficultyTier::Advanced => "Advanced".to_string(),
            DifficultyTier::Other(other) => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseModule {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub estimated_min: u32,
}

/// A catalog course. Read-only from the engine's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: DifficultyTier,
    #[serde(default)]
    pub tags: Vec<String>,

    /// Popularity counter (number of enrollments).
    #[serde(default)]
    pub enroll_count: u64,

    pub quiz_id: String,

    #[serde(default)]
    pub modules: Vec<CourseModule>,

    #[serde(default)]
    pub outcomes: Vec<String>,
}

impl Course {
    pub fn has_module(&self, module_id: &str) -> bool {
        self.modules.iter().any(|m| m.id == module_id)
    }
}
