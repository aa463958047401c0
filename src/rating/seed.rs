//! Expected-rank ("seed") estimation against a rating population
//!
//! Entities sharing a rating are interchangeable when estimating seed, so the
//! population is kept as a histogram of distinct rating values.

use crate::types::Rating;
use std::collections::BTreeMap;

/// Count of contest participants at each distinct rating
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingHistogram {
    buckets: BTreeMap<Rating, usize>,
}

impl RatingHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, rating: Rating) {
        *self.buckets.entry(rating).or_insert(0) += 1;
    }

    /// Number of distinct rating values
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of entities across all buckets
    pub fn population(&self) -> usize {
        self.buckets.values().sum()
    }

    pub fn count_at(&self, rating: Rating) -> usize {
        self.buckets.get(&rating).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Rating, usize)> + '_ {
        self.buckets.iter().map(|(rating, count)| (*rating, *count))
    }
}

impl FromIterator<Rating> for RatingHistogram {
    fn from_iter<I: IntoIterator<Item = Rating>>(iter: I) -> Self {
        let mut histogram = Self::new();
        for rating in iter {
            histogram.add(rating);
        }
        histogram
    }
}

/// Seed estimator parameterized by the logistic scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedEstimator {
    scale: f64,
}

impl Default for SeedEstimator {
    fn default() -> Self {
        Self::new(400.0)
    }
}

impl SeedEstimator {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    /// Probability that an opponent rated `opponent` finishes ahead of a
    /// participant rated `rating`.
    pub fn loss_probability(&self, rating: Rating, opponent: Rating) -> f64 {
        1.0 / (1.0 + 10f64.powf((rating - opponent) as f64 / self.scale))
    }

    /// Expected rank of a participant rated `candidate` against `histogram`.
    ///
    /// The histogram includes the participant itself at `self_rating`, whose
    /// comparison term is removed again. Callers searching over `candidate`
    /// must keep passing the participant's real prior rating here.
    pub fn estimate(
        &self,
        histogram: &RatingHistogram,
        candidate: Rating,
        self_rating: Option<Rating>,
    ) -> f64 {
        let self_rating = self_rating.unwrap_or(candidate);
        let mut seed = 1.0;
        for (rating, count) in histogram.iter() {
            seed += count as f64 * self.loss_probability(candidate, rating);
        }
        seed - self.loss_probability(candidate, self_rating)
    }
}

/// Expected rank with the standard 400-point logistic scale
pub fn estimate_seed(
    histogram: &RatingHistogram,
    candidate: Rating,
    self_rating: Option<Rating>,
) -> f64 {
    SeedEstimator::default().estimate(histogram, candidate, self_rating)
}
