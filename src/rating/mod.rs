//! Seed-based rating system
//!
//! This module provides the expected-rank estimator, the per-contest rating
//! update built on it, and the persistent rating state threaded through a
//! replay.

pub mod calculator;
pub mod elo;
pub mod seed;
pub mod storage;

// Re-export commonly used types
pub use calculator::{MockRatingCalculator, RatingCalculationResult, RatingCalculator};
pub use elo::EloRatingCalculator;
pub use seed::{estimate_seed, RatingHistogram, SeedEstimator};
pub use storage::{RatingBook, RatingEntry};
