// src/handlers/mod.rs

pub mod enrollment;
pub mod profile;
pub mod quiz;
