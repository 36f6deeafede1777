// src/models/mod.rs

pub mod course;
pub mod dataset;
pub mod leaderboard;
pub mod profile;
pub mod question;
pub mod submission;
