//! # Playoff Scenarios
//!
//! Playoff magic numbers and clinch/elimination scenarios for a fantasy
//! league, computed by brute force over every outcome of the week's matchups.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (teams, schedules, standings, scenarios)
//! - **calculate**: Standings ranking and magic-number computation
//! - **scenario**: Permutation generation, simulation, classification, reduction
//! - **report**: Plain-text rendering and season records
//! - **storage**: League snapshot input, JSON reports, run history
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod models;
pub mod report;
pub mod scenario;
pub mod storage;

pub use models::*;
