//! School Rating - seed-based Elo ratings over a contest history
//!
//! This crate replays contest results in chronological order and maintains
//! a persistent rating for every participating school, producing the full
//! rating history after each contest.

pub mod config;
pub mod error;
pub mod rating;
pub mod replay;
pub mod standings;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use rating::{EloRatingCalculator, RatingBook, RatingCalculator};
pub use replay::{ReplayDriver, ReplayResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
