// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Points awarded for each correctly answered question.
pub const POINTS_PER_CORRECT: u64 = 10;
/// Points awarded for completing a course module.
pub const MODULE_COMPLETION_POINTS: u64 = 5;
/// Minimum percentage that earns the "High Scorer" badge.
pub const HIGH_SCORE_PERCENT: u32 = 80;
/// A most recent course result below this percentage flags the course for improvement.
pub const NEEDS_IMPROVEMENT_BELOW: u32 = 70;
/// Streak length that earns the "Consistency Star" badge.
pub const CONSISTENCY_STREAK_DAYS: u32 = 3;

pub const RECOMMENDATION_LIMIT: usize = 4;
/// Enrollment count at which a course counts as fully popular.
pub const POPULARITY_SATURATION: f64 = 600.0;

pub const DEFAULT_LEADERBOARD_PAGE_SIZE: usize = 25;

/// Number of calendar days covered by the weekly activity histogram.
pub const WEEKLY_ACTIVITY_DAYS: i64 = 7;

/// Lifetime of a signed adaptive attempt token.
pub const ATTEMPT_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub rust_log: String,
    pub bind_addr: String,
    /// JSON dataset loaded into the in-memory store at startup.
    pub dataset_path: Option<String>,
    /// Base URL of the delegated scoring service, if any.
    pub scoring_service_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set");

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let dataset_path = env::var("DATASET_PATH").ok().filter(|p| !p.is_empty());

        let scoring_service_url = env::var("SCORING_SERVICE_URL")
            .ok()
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Self {
            jwt_secret,
            rust_log,
            bind_addr,
            dataset_path,
            scoring_service_url,
        }
    }
}
