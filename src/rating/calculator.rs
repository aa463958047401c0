//! Rating calculator trait and implementations
//!
//! This module defines the interface for per-contest rating updates and a
//! recording mock used to exercise callers.

use crate::types::{ContestOutcome, Rating, RatingChange, RatingMap, DEFAULT_RATING};
use serde::{Deserialize, Serialize};

/// Result of a rating calculation for one contest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingCalculationResult {
    /// Rating changes for every contest participant, ascending by prior rating
    pub rating_changes: Vec<RatingChange>,
    /// Uniform shift pinning the mean delta to -1
    pub zero_sum_correction: f64,
    /// Uniform shift from the inflation clamp
    pub inflation_correction: f64,
}

impl RatingCalculationResult {
    /// New ratings of the contest participants only
    pub fn new_ratings(&self) -> RatingMap {
        self.rating_changes
            .iter()
            .map(|change| (change.entity.clone(), change.new_rating))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rating_changes.is_empty()
    }
}

/// Trait for calculating rating changes after a contest
pub trait RatingCalculator: Send + Sync {
    /// Calculate new ratings for the participants of one contest
    ///
    /// # Arguments
    /// * `outcome` - Achieved rank of every participant, 1 = first place
    /// * `prior_ratings` - Ratings before the contest; participants missing
    ///   here start from the initial rating
    ///
    /// # Returns
    /// Result containing one rating change per participant
    fn calculate_ratings(
        &self,
        outcome: &ContestOutcome,
        prior_ratings: &RatingMap,
    ) -> crate::error::Result<RatingCalculationResult>;

    /// Get the initial rating for new entities
    fn initial_rating(&self) -> Rating;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;

    /// Update configuration from JSON
    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()>;
}

/// Mock rating calculator for testing
#[derive(Debug)]
pub struct MockRatingCalculator {
    calculation_calls: std::sync::Mutex<Vec<(ContestOutcome, RatingMap)>>,
    fixed_delta: std::sync::RwLock<Option<Rating>>,
    initial_rating: Rating,
}

impl Default for MockRatingCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRatingCalculator {
    pub fn new() -> Self {
        Self {
            calculation_calls: std::sync::Mutex::new(Vec::new()),
            fixed_delta: std::sync::RwLock::new(None),
            initial_rating: DEFAULT_RATING,
        }
    }

    /// Shift every participant by a fixed delta instead of leaving ratings unchanged
    pub fn set_fixed_delta(&self, delta: Rating) {
        if let Ok(mut fixed) = self.fixed_delta.write() {
            *fixed = Some(delta);
        }
    }

    /// Get all calculation calls made (for testing)
    pub fn get_calculation_calls(&self) -> Vec<(ContestOutcome, RatingMap)> {
        self.calculation_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Clear recorded calls
    pub fn clear_calls(&self) {
        if let Ok(mut calls) = self.calculation_calls.lock() {
            calls.clear();
        }
    }
}

impl RatingCalculator for MockRatingCalculator {
    fn calculate_ratings(
        &self,
        outcome: &ContestOutcome,
        prior_ratings: &RatingMap,
    ) -> crate::error::Result<RatingCalculationResult> {
        // Record the call
        if let Ok(mut calls) = self.calculation_calls.lock() {
            calls.push((outcome.clone(), prior_ratings.clone()));
        }

        let delta = self
            .fixed_delta
            .read()
            .map(|fixed| fixed.unwrap_or(0))
            .unwrap_or(0);

        let mut rating_changes: Vec<RatingChange> = outcome
            .iter()
            .map(|(entity, rank)| {
                let old_rating = prior_ratings
                    .get(entity)
                    .copied()
                    .unwrap_or(self.initial_rating);

                RatingChange {
                    entity: entity.clone(),
                    old_rating,
                    new_rating: old_rating + delta,
                    rank,
                    expected_seed: 0.0,
                    performance_rating: old_rating,
                }
            })
            .collect();
        rating_changes.sort_by(|a, b| {
            a.old_rating
                .cmp(&b.old_rating)
                .then_with(|| a.entity.cmp(&b.entity))
        });

        Ok(RatingCalculationResult {
            rating_changes,
            zero_sum_correction: 0.0,
            inflation_correction: 0.0,
        })
    }

    fn initial_rating(&self) -> Rating {
        self.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "mock",
            "initial_rating": self.initial_rating,
        })
    }

    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()> {
        if let Some(rating) = config.get("initial_rating").and_then(|v| v.as_i64()) {
            self.initial_rating = rating;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(entries: &[(&str, u32)]) -> ContestOutcome {
        entries.iter().map(|(entity, rank)| (*entity, *rank)).collect()
    }

    #[test]
    fn test_rating_calculation_result_new_ratings() {
        let result = RatingCalculationResult {
            rating_changes: vec![RatingChange {
                entity: "thu".to_string(),
                old_rating: 1400,
                new_rating: 1450,
                rank: 1,
                expected_seed: 1.5,
                performance_rating: 1500,
            }],
            zero_sum_correction: -1.0,
            inflation_correction: 0.0,
        };

        let ratings = result.new_ratings();
        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings["thu"], 1450);
        assert!(!result.is_empty());
        assert!(RatingCalculationResult::default().is_empty());
    }

    #[test]
    fn test_mock_calculator_defaults_missing_entities() {
        let calculator = MockRatingCalculator::new();
        let mut prior = RatingMap::new();
        prior.insert("a".to_string(), 1500);

        let result = calculator
            .calculate_ratings(&outcome(&[("a", 1), ("b", 2)]), &prior)
            .unwrap();

        let ratings = result.new_ratings();
        assert_eq!(ratings["a"], 1500);
        assert_eq!(ratings["b"], DEFAULT_RATING);

        // Ascending by prior rating
        assert_eq!(result.rating_changes[0].entity, "b");

        let calls = calculator.get_calculation_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.len(), 2);
        assert_eq!(calls[0].1.len(), 1);

        calculator.clear_calls();
        assert!(calculator.get_calculation_calls().is_empty());
    }

    #[test]
    fn test_mock_calculator_fixed_delta() {
        let calculator = MockRatingCalculator::new();
        calculator.set_fixed_delta(-5);

        let result = calculator
            .calculate_ratings(&outcome(&[("a", 1)]), &RatingMap::new())
            .unwrap();
        assert_eq!(result.new_ratings()["a"], DEFAULT_RATING - 5);
    }

    #[test]
    fn test_mock_calculator_config() {
        let mut calculator = MockRatingCalculator::new();
        assert_eq!(calculator.initial_rating(), 1400);

        calculator
            .update_config(serde_json::json!({ "initial_rating": 1200 }))
            .unwrap();
        assert_eq!(calculator.initial_rating(), 1200);
        assert_eq!(calculator.config()["type"], "mock");
    }
}
