//! Seed-based Elo rating update
//!
//! For every participant the calculator finds the rating whose expected rank
//! matches the geometric mean of its expected and achieved rank, moves halfway
//! there, and then shifts the whole contest by two corrections: one pinning
//! the mean delta to -1 and a bounded clamp derived from the lowest-rated
//! participants.

use crate::config::RatingConfig;
use crate::error::RatingError;
use crate::rating::calculator::{RatingCalculationResult, RatingCalculator};
use crate::rating::seed::{RatingHistogram, SeedEstimator};
use crate::types::{ContestOutcome, EntityId, Rank, Rating, RatingChange, RatingMap};
use rayon::prelude::*;
use tracing::debug;

/// A contest participant with its effective prior rating
#[derive(Debug, Clone)]
struct Participant {
    entity: EntityId,
    rank: Rank,
    prior: Rating,
}

/// Outcome of the performance search for one participant
#[derive(Debug, Clone, Copy)]
struct Performance {
    expected_seed: f64,
    rating: Rating,
}

/// Elo rating calculator driven by expected-rank inversion
#[derive(Debug, Clone)]
pub struct EloRatingCalculator {
    config: RatingConfig,
    estimator: SeedEstimator,
}

impl Default for EloRatingCalculator {
    fn default() -> Self {
        let config = RatingConfig::default();
        Self {
            estimator: SeedEstimator::new(config.logistic_scale),
            config,
        }
    }
}

impl EloRatingCalculator {
    /// Create a new calculator
    pub fn new(config: RatingConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self {
            estimator: SeedEstimator::new(config.logistic_scale),
            config,
        })
    }

    pub fn rating_config(&self) -> &RatingConfig {
        &self.config
    }

    /// Largest rating in the search bounds whose expected rank, with the
    /// participant fixed at `prior`, is still at least `target`.
    ///
    /// Saturates at the search bounds.
    pub fn performance_rating(
        &self,
        histogram: &RatingHistogram,
        prior: Rating,
        target: f64,
    ) -> Rating {
        let mut lo = self.config.min_search_rating;
        let mut hi = self.config.max_search_rating;

        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if self.estimator.estimate(histogram, mid, Some(prior)) < target {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        lo
    }

    fn evaluate(&self, histogram: &RatingHistogram, participant: &Participant) -> Performance {
        let expected_seed = self
            .estimator
            .estimate(histogram, participant.prior, None);
        let target = (expected_seed * participant.rank as f64).sqrt();

        Performance {
            expected_seed,
            rating: self.performance_rating(histogram, participant.prior, target),
        }
    }

    /// New ratings of the outcome's participants
    pub fn update_ratings(
        &self,
        outcome: &ContestOutcome,
        prior_ratings: &RatingMap,
    ) -> RatingMap {
        self.calculate(outcome, prior_ratings).new_ratings()
    }

    /// Full per-contest update with the applied corrections
    pub fn calculate(
        &self,
        outcome: &ContestOutcome,
        prior_ratings: &RatingMap,
    ) -> RatingCalculationResult {
        if outcome.is_empty() {
            return RatingCalculationResult::default();
        }

        let mut participants: Vec<Participant> = outcome
            .iter()
            .map(|(entity, rank)| Participant {
                entity: entity.clone(),
                rank,
                prior: prior_ratings
                    .get(entity)
                    .copied()
                    .unwrap_or(self.config.default_rating),
            })
            .collect();

        // This ordering also selects the participants of the inflation clamp
        participants.sort_by(|a, b| {
            a.prior
                .cmp(&b.prior)
                .then_with(|| a.rank.cmp(&b.rank))
                .then_with(|| a.entity.cmp(&b.entity))
        });

        let histogram: RatingHistogram = participants.iter().map(|p| p.prior).collect();

        let performances: Vec<Performance> = if self.config.parallel {
            participants
                .par_iter()
                .map(|participant| self.evaluate(&histogram, participant))
                .collect()
        } else {
            participants
                .iter()
                .map(|participant| self.evaluate(&histogram, participant))
                .collect()
        };

        let raw_deltas: Vec<Rating> = participants
            .iter()
            .zip(&performances)
            .map(|(participant, performance)| (performance.rating - participant.prior).div_euclid(2))
            .collect();

        let count = participants.len() as f64;
        let raw_sum: Rating = raw_deltas.iter().sum();
        let zero_sum_correction = -(raw_sum as f64 / count) - 1.0;

        let mut deltas: Vec<f64> = raw_deltas
            .iter()
            .map(|delta| *delta as f64 + zero_sum_correction)
            .collect();

        // At least one participant whenever the outcome is non-empty
        let clamp_size = count.min(4.0 * count.sqrt()).floor().max(1.0) as usize;
        let lowest_sum: f64 = deltas.iter().take(clamp_size).sum();
        let inflation_correction = (-(lowest_sum / clamp_size as f64).floor())
            .clamp(-(self.config.max_inflation_correction as f64), 0.0);

        for delta in &mut deltas {
            *delta += inflation_correction;
        }

        debug!(
            participants = participants.len(),
            buckets = histogram.bucket_count(),
            zero_sum_correction,
            inflation_correction,
            "Computed contest rating update"
        );

        let rating_changes = participants
            .into_iter()
            .zip(performances)
            .zip(deltas)
            .map(|((participant, performance), delta)| RatingChange {
                new_rating: (participant.prior as f64 + delta).floor() as Rating,
                old_rating: participant.prior,
                entity: participant.entity,
                rank: participant.rank,
                expected_seed: performance.expected_seed,
                performance_rating: performance.rating,
            })
            .collect();

        RatingCalculationResult {
            rating_changes,
            zero_sum_correction,
            inflation_correction,
        }
    }
}

impl RatingCalculator for EloRatingCalculator {
    fn calculate_ratings(
        &self,
        outcome: &ContestOutcome,
        prior_ratings: &RatingMap,
    ) -> crate::error::Result<RatingCalculationResult> {
        Ok(self.calculate(outcome, prior_ratings))
    }

    fn initial_rating(&self) -> Rating {
        self.config.default_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }

    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()> {
        let new_config: RatingConfig =
            serde_json::from_value(config).map_err(|e| RatingError::ConfigurationError {
                message: format!("Invalid rating configuration: {}", e),
            })?;

        new_config.validate()?;
        self.estimator = SeedEstimator::new(new_config.logistic_scale);
        self.config = new_config;
        Ok(())
    }
}
