//! Core data models for the scenario engine.

mod ids;
mod league;
mod scenario;
mod schedule;
mod standings;
mod team;

pub use ids::*;
pub use league::*;
pub use scenario::*;
pub use schedule::*;
pub use standings::*;
pub use team::*;
