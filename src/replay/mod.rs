//! Contest replay
//!
//! This module orders contests, resolves their outcomes, folds them over the
//! persistent rating state and records the resulting rating history.

pub mod driver;
pub mod history;
pub mod provider;
pub mod schedule;
pub mod sink;

// Re-export commonly used types
pub use driver::{replay, ReplayDriver, ReplayResult};
pub use history::{HistoryEntry, HistoryTable, RatingHistory};
pub use provider::{DirectoryOutcomeProvider, OutcomeProvider, StaticOutcomeProvider};
pub use schedule::{ContestOrdering, ContestSchedule, ScheduledContest};
pub use sink::{HistorySink, JsonHistorySink, MemoryHistorySink};
