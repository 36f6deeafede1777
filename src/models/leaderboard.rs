// src/models/leaderboard.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::profile::{Badge, LearnerProfile};

/// One ranked row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: String,
    pub name: String,
    pub username: String,
    pub points: u64,
    pub badges: Vec<Badge>,
}

impl From<&LearnerProfile> for LeaderboardEntry {
    fn from(profile: &LearnerProfile) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            username: profile.username.clone(),
            points: profile.points,
            badges: profile.badges.iter().copied().collect(),
        }
    }
}

/// A page of the leaderboard plus the filtered (pre-pagination) total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardPage {
    pub rows: Vec<LeaderboardEntry>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

/// Query parameters for the leaderboard.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardParams {
    /// 1-based page number (default: 1).
    #[validate(range(min = 1))]
    pub page: Option<usize>,

    /// Rows per page (default: 25, max: 100).
    #[validate(range(min = 1, max = 100))]
    pub page_size: Option<usize>,

    /// Case-insensitive match on display name or login.
    pub search: Option<String>,
}
