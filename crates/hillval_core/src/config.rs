//! Engine configuration: grid axes, distributions, economics, curves.
//!
//! An `EngineConfig` is constructed once per run and validated before any
//! grid evaluation happens. The engine is a pure function of this config
//! plus a seed.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{CapexPoint, GradeTonnagePoint, SamplingProfile};

/// One axis of the decision grid, expanded as an inclusive range walk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridAxis {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl GridAxis {
    #[must_use]
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Expand the axis into grid values, rounded to two decimals.
    ///
    /// The walk is inclusive of `max` with a small epsilon so an axis like
    /// 0.2..=1.0 step 0.1 yields 9 values ending exactly at 1.0. Rounding
    /// happens here, before any evaluation, so exported grids carry the
    /// axis values a caller asked for rather than accumulated float drift.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        if self.step <= 0.0 || !self.step.is_finite() {
            return Vec::new();
        }
        let mut values = Vec::new();
        let mut i = 0u32;
        loop {
            let v = self.min + self.step * f64::from(i);
            if v > self.max + 0.01 {
                break;
            }
            values.push((v * 100.0).round() / 100.0);
            i += 1;
        }
        values
    }
}

/// Complete configuration for one grid sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cut-off grade axis (%), values must be strictly positive
    pub cutoff: GridAxis,
    /// Production rate axis (Mtpa), values must be strictly positive
    pub production: GridAxis,
    /// Metal price distribution ($/t)
    pub price: SamplingProfile,
    /// Metallurgical recovery distribution (%); draws are not clamped to [0, 100]
    pub recovery: SamplingProfile,
    /// Operating cost per tonne of ore ($/t)
    pub opex_per_tonne: f64,
    /// Discount rate, in percent
    pub discount_rate_pct: f64,
    /// Monte Carlo trials per grid cell
    pub trials_per_cell: usize,
    /// User-supplied grade-tonnage curve; analytic model when absent
    pub grade_tonnage_curve: Option<Vec<GradeTonnagePoint>>,
    /// User-supplied CAPEX curve; analytic model when absent
    pub capex_curve: Option<Vec<CapexPoint>>,
    /// Base RNG seed; `None` draws one from OS entropy
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cutoff: GridAxis::new(0.2, 1.0, 0.1),
            production: GridAxis::new(2.0, 6.0, 0.5),
            price: SamplingProfile::Normal {
                mean: 4000.0,
                std_dev: 0.0,
            },
            recovery: SamplingProfile::Normal {
                mean: 85.0,
                std_dev: 0.0,
            },
            opex_per_tonne: 40.0,
            discount_rate_pct: 8.0,
            trials_per_cell: 1,
            grade_tonnage_curve: None,
            capex_curve: None,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Validate the configuration before a sweep.
    ///
    /// Errors here are fatal and reported before any grid cell is evaluated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_axis("cutoff", &self.cutoff)?;
        validate_axis("production", &self.production)?;

        validate_scalar("opex_per_tonne", self.opex_per_tonne)?;
        validate_scalar("discount_rate_pct", self.discount_rate_pct)?;
        self.price.validate("price")?;
        self.recovery.validate("recovery")?;

        if self.trials_per_cell < 1 {
            return Err(ConfigError::TooFewTrials(self.trials_per_cell));
        }

        if let Some(curve) = &self.grade_tonnage_curve {
            if curve.is_empty() {
                return Err(ConfigError::EmptyCurve {
                    curve: "grade-tonnage",
                });
            }
            for p in curve {
                for (field, value) in [
                    ("grade-tonnage curve cutoff", p.cutoff),
                    ("grade-tonnage curve tonnage", p.tonnage),
                    ("grade-tonnage curve grade", p.grade),
                ] {
                    if !value.is_finite() {
                        return Err(ConfigError::NonFinite { field, value });
                    }
                }
            }
        }
        if let Some(curve) = &self.capex_curve {
            if curve.is_empty() {
                return Err(ConfigError::EmptyCurve { curve: "capex" });
            }
            for p in curve {
                for (field, value) in [
                    ("capex curve production", p.production),
                    ("capex curve capex", p.capex),
                ] {
                    if !value.is_finite() {
                        return Err(ConfigError::NonFinite { field, value });
                    }
                }
            }
        }

        Ok(())
    }

    /// Total number of grid cells this config will evaluate.
    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.cutoff.values().len() * self.production.values().len()
    }
}

fn validate_axis(axis: &'static str, range: &GridAxis) -> Result<(), ConfigError> {
    for (field, value) in [(axis, range.min), (axis, range.max)] {
        if !value.is_finite() {
            return Err(ConfigError::NonFinite { field, value });
        }
    }
    if range.step <= 0.0 || !range.step.is_finite() {
        return Err(ConfigError::NonPositiveStep {
            axis,
            step: range.step,
        });
    }
    let values = range.values();
    if values.is_empty() {
        return Err(ConfigError::EmptyAxis { axis });
    }
    for &value in &values {
        if value <= 0.0 {
            return Err(ConfigError::NonPositiveValue { axis, value });
        }
    }
    Ok(())
}

fn validate_scalar(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field, value });
    }
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}
