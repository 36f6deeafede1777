// src/engine/mod.rs

pub mod leaderboard;
pub mod ledger;
pub mod recommend;
pub mod scoring;
pub mod sequencer;
