//! Stochastic inputs: metal price and metallurgical recovery.
//!
//! Draws are deliberately unbounded. A sampled recovery below 0% or above
//! 100%, or a negative price, flows through the trial arithmetic and into
//! the cell mean; clamping would change the statistical distribution of
//! results relative to the source model.

use rand::{Rng, distr::Distribution};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, MarketError};

/// How one stochastic input (price or recovery) is drawn per trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SamplingProfile {
    /// Always the same value (equivalent to Normal with zero deviation)
    Fixed(f64),
    /// Independent normal draw each trial
    Normal { mean: f64, std_dev: f64 },
}

impl SamplingProfile {
    /// The distribution mean; what a noiseless trial would see.
    #[must_use]
    pub fn mean(&self) -> f64 {
        match self {
            SamplingProfile::Fixed(value) => *value,
            SamplingProfile::Normal { mean, .. } => *mean,
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64, MarketError> {
        match self {
            SamplingProfile::Fixed(value) => Ok(*value),
            SamplingProfile::Normal { mean, std_dev } => {
                rand_distr::Normal::new(*mean, *std_dev)
                    .map(|d| d.sample(rng))
                    .map_err(|_| MarketError::InvalidDistributionParameters {
                        profile_type: "Normal",
                        mean: *mean,
                        std_dev: *std_dev,
                        reason: "mean must be finite and std_dev non-negative",
                    })
            }
        }
    }

    /// Pre-sweep parameter check so bad distributions fail before any cell runs.
    pub fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        match self {
            SamplingProfile::Fixed(value) => {
                if !value.is_finite() {
                    return Err(ConfigError::NonFinite {
                        field,
                        value: *value,
                    });
                }
            }
            SamplingProfile::Normal { mean, std_dev } => {
                if !mean.is_finite() {
                    return Err(ConfigError::NonFinite {
                        field,
                        value: *mean,
                    });
                }
                if !std_dev.is_finite() {
                    return Err(ConfigError::NonFinite {
                        field,
                        value: *std_dev,
                    });
                }
                if *std_dev < 0.0 {
                    return Err(ConfigError::Negative {
                        field,
                        value: *std_dev,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_fixed_sample() {
        let mut rng = SmallRng::seed_from_u64(1);
        let profile = SamplingProfile::Fixed(4000.0);
        assert_eq!(profile.sample(&mut rng).unwrap(), 4000.0);
    }

    #[test]
    fn test_zero_deviation_normal_is_degenerate() {
        let mut rng = SmallRng::seed_from_u64(1);
        let profile = SamplingProfile::Normal {
            mean: 85.0,
            std_dev: 0.0,
        };
        for _ in 0..10 {
            assert_eq!(profile.sample(&mut rng).unwrap(), 85.0);
        }
    }

    #[test]
    fn test_draws_are_not_clamped() {
        // A wide distribution around a small mean must produce negative draws
        let mut rng = SmallRng::seed_from_u64(7);
        let profile = SamplingProfile::Normal {
            mean: 1.0,
            std_dev: 100.0,
        };
        let saw_negative = (0..100).any(|_| profile.sample(&mut rng).unwrap() < 0.0);
        assert!(saw_negative, "unbounded draws should go negative");
    }

    #[test]
    fn test_validate_rejects_negative_std_dev() {
        let profile = SamplingProfile::Normal {
            mean: 10.0,
            std_dev: -1.0,
        };
        assert!(matches!(
            profile.validate("price"),
            Err(ConfigError::Negative { field: "price", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_nan_mean() {
        let profile = SamplingProfile::Normal {
            mean: f64::NAN,
            std_dev: 1.0,
        };
        assert!(profile.validate("recovery").is_err());
    }
}
