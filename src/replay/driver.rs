//! Chronological replay of a contest history
//!
//! The driver folds contests in order over a single `RatingBook`. Each
//! contest's update sees the ratings left by every earlier contest, so the
//! fold is strictly sequential.

use crate::error::Result;
use crate::rating::calculator::{RatingCalculationResult, RatingCalculator};
use crate::rating::storage::RatingBook;
use crate::replay::history::{HistoryTable, RatingHistory};
use crate::replay::provider::OutcomeProvider;
use crate::types::{ContestId, ContestOutcome};
use indicatif::ProgressBar;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything a finished replay produced
#[derive(Debug, Clone)]
pub struct ReplayResult {
    /// Contests that had data, in replay order
    pub valid_contests: Vec<ContestId>,
    /// Contests skipped for lack of data
    pub skipped_contests: Vec<ContestId>,
    /// One snapshot per valid contest
    pub history: RatingHistory,
    /// Ratings after the last contest
    pub book: RatingBook,
}

impl ReplayResult {
    /// Dense entity × contest table for the history sink
    pub fn table(&self) -> HistoryTable {
        self.history.to_table()
    }
}

/// Replay driver owning the persistent rating state
pub struct ReplayDriver {
    calculator: Arc<dyn RatingCalculator>,
    book: RatingBook,
    history: RatingHistory,
    valid_contests: Vec<ContestId>,
    skipped_contests: Vec<ContestId>,
    progress: Option<ProgressBar>,
}

impl ReplayDriver {
    /// Create a driver starting from an empty rating book
    pub fn new(calculator: Arc<dyn RatingCalculator>) -> Self {
        let book = RatingBook::new(calculator.initial_rating());
        Self::with_book(calculator, book)
    }

    /// Create a driver continuing from existing ratings
    pub fn with_book(calculator: Arc<dyn RatingCalculator>, book: RatingBook) -> Self {
        Self {
            history: RatingHistory::new(book.default_rating()),
            calculator,
            book,
            valid_contests: Vec::new(),
            skipped_contests: Vec::new(),
            progress: None,
        }
    }

    /// Advance `bar` once per processed contest
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = Some(bar);
        self
    }

    pub fn book(&self) -> &RatingBook {
        &self.book
    }

    pub fn history(&self) -> &RatingHistory {
        &self.history
    }

    /// Apply one contest. `None` means the contest has no data and is skipped.
    pub fn process_contest(
        &mut self,
        contest_id: &ContestId,
        outcome: Option<&ContestOutcome>,
    ) -> Result<Option<RatingCalculationResult>> {
        let Some(outcome) = outcome else {
            debug!("Skipping {}: no contest data", contest_id);
            self.skipped_contests.push(contest_id.clone());
            return Ok(None);
        };

        let added = self.book.ensure_participants(outcome);
        let prior = self.book.ratings();
        let result = self.calculator.calculate_ratings(outcome, &prior)?;

        self.book.apply(contest_id, &result.new_ratings());
        self.history.push(contest_id.clone(), self.book.snapshot());
        self.valid_contests.push(contest_id.clone());

        debug!(
            contest = %contest_id,
            participants = outcome.len(),
            new_entities = added,
            zero_sum_correction = result.zero_sum_correction,
            inflation_correction = result.inflation_correction,
            "Processed contest"
        );

        Ok(Some(result))
    }

    /// Replay `contests` in order, resolving each through `provider`
    pub fn run(&mut self, contests: &[ContestId], provider: &dyn OutcomeProvider) -> Result<()> {
        for contest_id in contests {
            let outcome = match provider.outcome(contest_id) {
                Ok(Some(outcome)) => Some(outcome),
                Ok(None) => {
                    warn!("Contest {} has no usable data, skipping", contest_id);
                    None
                }
                Err(e) => {
                    warn!("Skipping {}: {:#}", contest_id, e);
                    None
                }
            };

            self.process_contest(contest_id, outcome.as_ref())?;

            if let Some(bar) = &self.progress {
                bar.inc(1);
            }
        }

        Ok(())
    }

    /// Finish the replay and hand over its products
    pub fn finish(self) -> ReplayResult {
        if let Some(bar) = &self.progress {
            bar.finish_and_clear();
        }

        info!(
            "Replay finished: {} valid contests, {} skipped, {} rated entities",
            self.valid_contests.len(),
            self.skipped_contests.len(),
            self.book.len()
        );

        ReplayResult {
            valid_contests: self.valid_contests,
            skipped_contests: self.skipped_contests,
            history: self.history,
            book: self.book,
        }
    }
}

/// Replay an already resolved contest sequence
pub fn replay(
    calculator: Arc<dyn RatingCalculator>,
    contests: &[(ContestId, Option<ContestOutcome>)],
) -> Result<ReplayResult> {
    let mut driver = ReplayDriver::new(calculator);
    for (contest_id, outcome) in contests {
        driver.process_contest(contest_id, outcome.as_ref())?;
    }
    Ok(driver.finish())
}
