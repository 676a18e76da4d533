//! Domain models and pure screening logic.

pub mod assessment;
pub mod extraction;
pub mod prompt;
pub mod rules;
pub mod schedule;
pub mod transcript;
