// src/store/memory.rs

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::AppError,
    models::{course::Course, dataset::Dataset, profile::LearnerProfile, question::Quiz},
    store::{CatalogProvider, ProfileStore},
};

/// Single-process store backing both contracts.
///
/// Learner order follows the dataset; each lock is released before returning.
pub struct InMemoryStore {
    profiles: RwLock<Vec<LearnerProfile>>,
    courses: Vec<Course>,
    quizzes: HashMap<String, Quiz>,
}

impl InMemoryStore {
    /// Builds the store from a dataset, rejecting it if it is inconsistent.
    pub fn from_dataset(dataset: Dataset) -> Result<Self, AppError> {
        dataset.validate()?;
        Ok(Self {
            profiles: RwLock::new(dataset.learners),
            courses: dataset.courses,
            quizzes: dataset
                .quizzes
                .into_iter()
                .map(|q| (q.id.clone(), q))
                .collect(),
        })
    }

    /// Adds a learner record. Fails with `Conflict` if the id is taken.
    pub async fn insert_profile(&self, profile: LearnerProfile) -> Result<(), AppError> {
        let mut profiles = self.profiles.write().await;
        if profiles.iter().any(|p| p.id == profile.id) {
            return Err(AppError::Conflict(format!(
                "Learner '{}' already exists",
                profile.id
            )));
        }
        profiles.push(profile);
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn get_profile(&self, id: &str) -> Result<LearnerProfile, AppError> {
        self.profiles
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Learner '{}' not found", id)))
    }

    async fn put_profile(&self, mut profile: LearnerProfile) -> Result<LearnerProfile, AppError> {
        let mut profiles = self.profiles.write().await;
        let stored = profiles
            .iter_mut()
            .find(|p| p.id == profile.id)
            .ok_or_else(|| AppError::NotFound(format!("Learner '{}' not found", profile.id)))?;

        if stored.version != profile.version {
            return Err(AppError::Conflict(format!(
                "Learner '{}' was modified concurrently (expected version {}, found {})",
                profile.id, profile.version, stored.version
            )));
        }

        profile.version += 1;
        *stored = profile.clone();
        Ok(profile)
    }

    async fn list_profiles(&self) -> Result<Vec<LearnerProfile>, AppError> {
        Ok(self.profiles.read().await.clone())
    }
}

#[async_trait]
impl CatalogProvider for InMemoryStore {
    async fn get_course(&self, id: &str) -> Result<Course, AppError> {
        self.courses
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Course '{}' not found", id)))
    }

    async fn get_quiz(&self, id: &str) -> Result<Quiz, AppError> {
        self.quizzes
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Quiz '{}' not found", id)))
    }

    async fn list_courses(&self) -> Result<Vec<Course>, AppError> {
        Ok(self.courses.clone())
    }
}
