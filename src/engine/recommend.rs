// src/engine/recommend.rs

//! Weighted linear course recommendation.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    config::{NEEDS_IMPROVEMENT_BELOW, POPULARITY_SATURATION, RECOMMENDATION_LIMIT},
    models::{
        course::{Course, DifficultyTier},
        profile::LearnerProfile,
    },
};

const INTEREST_WEIGHT: f64 = 0.50;
const NEEDS_IMPROVEMENT_WEIGHT: f64 = 0.25;
const POPULARITY_WEIGHT: f64 = 0.10;
const DIFFICULTY_FIT_WEIGHT: f64 = 0.15;

/// Per-course factor values, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreFactors {
    pub interest_match: f64,
    pub needs_improvement: f64,
    pub popularity: f64,
    pub difficulty_fit: f64,
}

impl ScoreFactors {
    pub fn weighted(&self) -> f64 {
        INTEREST_WEIGHT * self.interest_match
            + NEEDS_IMPROVEMENT_WEIGHT * self.needs_improvement
            + POPULARITY_WEIGHT * self.popularity
            + DIFFICULTY_FIT_WEIGHT * self.difficulty_fit
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub course: Course,
    pub score: f64,
    pub factors: ScoreFactors,
}

pub fn difficulty_fit(tier: &DifficultyTier) -> f64 {
    match tier {
        DifficultyTier::Beginner => 1.0,
        DifficultyTier::Intermediate => 0.7,
        DifficultyTier::Advanced | DifficultyTier::Other(_) => 0.4,
    }
}

/// Scores one course for a learner. `recent` maps course id to the learner's
/// most recent quiz percentage in that course.
fn factors(profile: &LearnerProfile, recent: &HashMap<&str, u32>, course: &Course) -> ScoreFactors {
    let matched = course
        .tags
        .iter()
        .filter(|tag| profile.interests.contains(tag))
        .count();
    let interest_match = matched as f64 / course.tags.len().max(1) as f64;

    let needs_improvement = match recent.get(course.id.as_str()) {
        Some(percent) if *percent < NEEDS_IMPROVEMENT_BELOW => 1.0,
        _ => 0.0,
    };

    let popularity = (course.enroll_count as f64 / POPULARITY_SATURATION).min(1.0);

    ScoreFactors {
        interest_match,
        needs_improvement,
        popularity,
        difficulty_fit: difficulty_fit(&course.difficulty),
    }
}

/// Ranks the catalog for a learner and keeps the top entries.
///
/// Ties keep catalog order. The result never repeats a course id.
pub fn recommend(profile: &LearnerProfile, courses: &[Course]) -> Vec<Recommendation> {
    let recent: HashMap<&str, u32> = profile
        .enrollments
        .iter()
        .filter_map(|(course_id, e)| e.latest_score().map(|s| (course_id.as_str(), s.percent)))
        .collect();

    let mut seen = std::collections::HashSet::new();
    let mut scored: Vec<Recommendation> = courses
        .iter()
        .filter(|c| seen.insert(c.id.as_str()))
        .map(|course| {
            let factors = factors(profile, &recent, course);
            Recommendation {
                course: course.clone(),
                score: factors.weighted(),
                factors,
            }
        })
        .collect();

    // sort_by is stable, so equal scores stay in catalog order
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(RECOMMENDATION_LIMIT);
    scored
}
