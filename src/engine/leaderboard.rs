// src/engine/leaderboard.rs

use crate::{
    error::AppError,
    models::{
        leaderboard::{LeaderboardEntry, LeaderboardPage},
        profile::LearnerProfile,
    },
};

/// Case-insensitive substring match on display name or login.
fn matches(profile: &LearnerProfile, needle: &str) -> bool {
    needle.is_empty()
        || profile.name.to_lowercase().contains(needle)
        || profile.username.to_lowercase().contains(needle)
}

/// Filters, ranks by points (descending) and paginates learner records.
///
/// `page` is 1-based. A page past the end is empty but still reports `total`.
pub fn rank(
    profiles: &[LearnerProfile],
    page: usize,
    page_size: usize,
    search: &str,
) -> Result<LeaderboardPage, AppError> {
    if page_size == 0 {
        return Err(AppError::BadRequest("pageSize must be positive".to_string()));
    }
    if page == 0 {
        return Err(AppError::BadRequest("page must be at least 1".to_string()));
    }

    let needle = search.trim().to_lowercase();
    let mut filtered: Vec<&LearnerProfile> =
        profiles.iter().filter(|p| matches(p, &needle)).collect();
    let total = filtered.len();

    filtered.sort_by(|a, b| b.points.cmp(&a.points));

    let start = (page - 1).saturating_mul(page_size);
    let rows = filtered
        .into_iter()
        .skip(start)
        .take(page_size)
        .map(LeaderboardEntry::from)
        .collect();

    Ok(LeaderboardPage {
        rows,
        total,
        page,
        page_size,
    })
}
