//! Rating engine configuration

use crate::error::{RatingError, Result};
use crate::types::{Rating, DEFAULT_RATING};
use serde::{Deserialize, Serialize};

/// Parameters of the seed-based rating update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Rating assigned to entities on first appearance
    pub default_rating: Rating,
    /// Lower bound of the performance-rating search
    pub min_search_rating: Rating,
    /// Upper bound of the performance-rating search
    pub max_search_rating: Rating,
    /// Rating difference that makes a win ten times as likely
    pub logistic_scale: f64,
    /// Largest downward shift the inflation clamp may apply
    pub max_inflation_correction: Rating,
    /// Run the per-entity search on the rayon pool
    pub parallel: bool,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            default_rating: DEFAULT_RATING,
            min_search_rating: 1,
            max_search_rating: 8000,
            logistic_scale: 400.0,
            max_inflation_correction: 10,
            parallel: true,
        }
    }
}

impl RatingConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !(self.logistic_scale.is_finite() && self.logistic_scale > 0.0) {
            return Err(RatingError::ConfigurationError {
                message: "Logistic scale must be a positive finite number".to_string(),
            }
            .into());
        }

        if self.min_search_rating >= self.max_search_rating {
            return Err(RatingError::ConfigurationError {
                message: format!(
                    "Search bounds are empty: [{}, {}]",
                    self.min_search_rating, self.max_search_rating
                ),
            }
            .into());
        }

        if self.default_rating < self.min_search_rating
            || self.default_rating > self.max_search_rating
        {
            return Err(RatingError::ConfigurationError {
                message: format!(
                    "Default rating {} lies outside the search bounds [{}, {}]",
                    self.default_rating, self.min_search_rating, self.max_search_rating
                ),
            }
            .into());
        }

        if self.max_inflation_correction < 0 {
            return Err(RatingError::ConfigurationError {
                message: "Max inflation correction must be non-negative".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RatingConfig::default();
        assert_eq!(config.default_rating, 1400);
        assert_eq!(config.min_search_rating, 1);
        assert_eq!(config.max_search_rating, 8000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = RatingConfig::default();
        config.logistic_scale = 0.0;
        assert!(config.validate().is_err());

        config = RatingConfig::default();
        config.logistic_scale = f64::NAN;
        assert!(config.validate().is_err());

        config = RatingConfig::default();
        config.min_search_rating = 8000;
        assert!(config.validate().is_err());

        config = RatingConfig::default();
        config.default_rating = 9000;
        assert!(config.validate().is_err());

        config = RatingConfig::default();
        config.max_inflation_correction = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: RatingConfig = toml::from_str("max_search_rating = 5000").unwrap();
        assert_eq!(config.max_search_rating, 5000);
        assert_eq!(config.default_rating, 1400);
        assert!(config.parallel);
    }
}
