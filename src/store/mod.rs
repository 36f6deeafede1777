// src/store/mod.rs

//! Contracts for the external profile store and catalog provider.

pub mod memory;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{course::Course, profile::LearnerProfile, question::Quiz},
};

pub use memory::InMemoryStore;

/// Durable learner records.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, id: &str) -> Result<LearnerProfile, AppError>;

    /// Commits a profile computed from a previous read.
    ///
    /// Fails with `Conflict` if the stored version moved since that read. On
    /// success returns the stored profile with its new version.
    async fn put_profile(&self, profile: LearnerProfile) -> Result<LearnerProfile, AppError>;

    async fn list_profiles(&self) -> Result<Vec<LearnerProfile>, AppError>;
}

/// Read-only course and quiz definitions.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn get_course(&self, id: &str) -> Result<Course, AppError>;

    async fn get_quiz(&self, id: &str) -> Result<Quiz, AppError>;

    /// All courses in catalog order.
    async fn list_courses(&self) -> Result<Vec<Course>, AppError>;
}
