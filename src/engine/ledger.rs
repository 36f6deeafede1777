// src/engine/ledger.rs

//! Points, badges, streaks and enrollment history.
//!
//! Every profile mutation is an event applied by a pure function
//! `(profile, event) -> profile'`. Callers compute the full next state first
//! and commit it once through the profile store.

use std::collections::{BTreeSet, HashMap};

use chrono::{Duration, NaiveDate};

use crate::{
    config::{
        CONSISTENCY_STREAK_DAYS, HIGH_SCORE_PERCENT, MODULE_COMPLETION_POINTS, WEEKLY_ACTIVITY_DAYS,
    },
    engine::scoring::ScoreOutcome,
    error::AppError,
    models::{
        course::Course,
        profile::{Badge, DayActivity, LearnerProfile, QuizResult, QuizScore},
        question::Quiz,
    },
};

/// Module counts per course id, needed to judge course mastery.
#[derive(Debug, Clone, Default)]
pub struct ModuleTotals(HashMap<String, usize>);

impl ModuleTotals {
    pub fn from_courses<'a>(courses: impl IntoIterator<Item = &'a Course>) -> Self {
        Self(
            courses
                .into_iter()
                .map(|c| (c.id.clone(), c.modules.len()))
                .collect(),
        )
    }

    pub fn get(&self, course_id: &str) -> Option<usize> {
        self.0.get(course_id).copied()
    }
}

/// A single logical change to a learner profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEvent {
    QuizFinalized {
        course_id: String,
        quiz_id: String,
        score: ScoreOutcome,
        date: NaiveDate,
        attempt_id: Option<String>,
    },
    ModuleCompleted {
        course_id: String,
        module_id: String,
        date: NaiveDate,
    },
    Enrolled {
        course_id: String,
    },
    Unenrolled {
        course_id: String,
    },
    PreferencesUpdated {
        name: Option<String>,
        interests: Option<Vec<String>>,
        daily_goal_min: Option<u32>,
    },
}

/// Applies one event and returns the next profile state.
///
/// Points only grow and badges are only ever added. The caller's version is
/// carried through unchanged so the store can detect lost updates.
pub fn apply(profile: &LearnerProfile, event: ProfileEvent, totals: &ModuleTotals) -> LearnerProfile {
    let mut next = profile.clone();

    match event {
        ProfileEvent::QuizFinalized {
            course_id,
            quiz_id,
            score,
            date,
            attempt_id,
        } => {
            let enrollment = next.enrollments.entry(course_id).or_default();
            if let Some(id) = attempt_id.as_deref() {
                if enrollment.attempt(id).is_some() {
                    return next;
                }
            }
            enrollment.quiz_scores.push(QuizScore {
                quiz_id,
                percent: score.percent,
                date,
                points_earned: score.points_earned,
                attempt_id,
            });
            next.points = next.points.saturating_add(score.points_earned);
            next.activity.insert(date);
            next.badges = evaluate_badges(&next, totals, date);
        }
        ProfileEvent::ModuleCompleted {
            course_id,
            module_id,
            date,
        } => {
            let enrollment = next.enrollments.entry(course_id).or_default();
            if !enrollment.completed.contains(&module_id) {
                enrollment.completed.push(module_id.clone());
            }
            enrollment.last_module_id = Some(module_id);
            next.points = next.points.saturating_add(MODULE_COMPLETION_POINTS);
            next.activity.insert(date);
            next.badges = evaluate_badges(&next, totals, date);
        }
        ProfileEvent::Enrolled { course_id } => {
            next.enrollments.entry(course_id).or_default();
        }
        ProfileEvent::Unenrolled { course_id } => {
            next.enrollments.remove(&course_id);
        }
        ProfileEvent::PreferencesUpdated {
            name,
            interests,
            daily_goal_min,
        } => {
            if let Some(name) = name {
                next.name = name;
            }
            if let Some(interests) = interests {
                let mut seen = BTreeSet::new();
                next.interests = interests
                    .into_iter()
                    .map(|tag| tag.trim().to_string())
                    .filter(|tag| seen.insert(tag.clone()))
                    .collect();
            }
            if let Some(goal) = daily_goal_min {
                next.daily_goal_min = goal;
            }
        }
    }

    next
}

/// The result already recorded for an adaptive attempt, if it was finalized.
pub fn replayed_result(
    profile: &LearnerProfile,
    quiz: &Quiz,
    attempt_id: &str,
) -> Option<QuizResult> {
    let recorded = profile
        .enrollments
        .get(&quiz.course_id)?
        .attempt(attempt_id)
        .filter(|s| s.quiz_id == quiz.id)?;

    Some(QuizResult {
        percent: recorded.percent,
        points_earned: recorded.points_earned,
        total_points: profile.points,
        badges: profile.badges.iter().copied().collect(),
    })
}

/// Grades a finished quiz into the profile.
///
/// Returns the next profile state and the result to show the learner. Nothing
/// is persisted here. An attempt that was already finalized leaves the
/// profile unchanged and yields its recorded result.
pub fn finalize_quiz(
    profile: &LearnerProfile,
    quiz: &Quiz,
    course: &Course,
    score: ScoreOutcome,
    attempt_id: Option<&str>,
    totals: &ModuleTotals,
    today: NaiveDate,
) -> Result<(LearnerProfile, QuizResult), AppError> {
    if quiz.course_id != course.id || course.quiz_id != quiz.id {
        return Err(AppError::BadRequest(format!(
            "Quiz '{}' does not belong to course '{}'",
            quiz.id, course.id
        )));
    }

    if let Some(result) = attempt_id.and_then(|id| replayed_result(profile, quiz, id)) {
        return Ok((profile.clone(), result));
    }

    let next = apply(
        profile,
        ProfileEvent::QuizFinalized {
            course_id: course.id.clone(),
            quiz_id: quiz.id.clone(),
            score,
            date: today,
            attempt_id: attempt_id.map(str::to_string),
        },
        totals,
    );

    let result = QuizResult {
        percent: score.percent,
        points_earned: score.points_earned,
        total_points: next.points,
        badges: next.badges.iter().copied().collect(),
    };

    Ok((next, result))
}

/// Marks a module of `course` complete, auto-enrolling if needed.
pub fn complete_module(
    profile: &LearnerProfile,
    course: &Course,
    module_id: &str,
    totals: &ModuleTotals,
    today: NaiveDate,
) -> Result<LearnerProfile, AppError> {
    if !course.has_module(module_id) {
        return Err(AppError::NotFound(format!(
            "Module '{}' not found in course '{}'",
            module_id, course.id
        )));
    }

    Ok(apply(
        profile,
        ProfileEvent::ModuleCompleted {
            course_id: course.id.clone(),
            module_id: module_id.to_string(),
            date: today,
        },
        totals,
    ))
}

/// The current badge set plus every badge the profile now qualifies for.
pub fn evaluate_badges(
    profile: &LearnerProfile,
    totals: &ModuleTotals,
    today: NaiveDate,
) -> BTreeSet<Badge> {
    let mut badges = profile.badges.clone();
    let enrollments = || profile.enrollments.iter();

    if enrollments().any(|(_, e)| !e.quiz_scores.is_empty()) {
        badges.insert(Badge::FirstQuiz);
    }

    if enrollments()
        .flat_map(|(_, e)| e.quiz_scores.iter())
        .any(|s| s.percent >= HIGH_SCORE_PERCENT)
    {
        badges.insert(Badge::HighScorer);
    }

    if enrollments().any(|(_, e)| !e.completed.is_empty()) {
        badges.insert(Badge::CourseStarter);
    }

    let mastered = enrollments().any(|(course_id, e)| {
        totals
            .get(course_id)
            .is_some_and(|total| total > 0 && e.completed.len() == total)
    });
    if mastered {
        badges.insert(Badge::CourseMaster);
    }

    if current_streak(&profile.activity, today) >= CONSISTENCY_STREAK_DAYS {
        badges.insert(Badge::ConsistencyStar);
    }

    badges
}

/// Consecutive active days ending today. Zero when today has no activity.
pub fn current_streak(activity: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = today;
    while activity.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

/// Activity over the last week, oldest day first.
pub fn weekly_activity(activity: &BTreeSet<NaiveDate>, today: NaiveDate) -> Vec<DayActivity> {
    (0..WEEKLY_ACTIVITY_DAYS)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            DayActivity {
                date,
                count: u32::from(activity.contains(&date)),
            }
        })
        .collect()
}
