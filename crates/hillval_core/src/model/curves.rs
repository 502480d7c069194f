//! Deposit and capital-cost models.
//!
//! Both models own their optional user-supplied curve as immutable data
//! injected at construction; nothing mutates shared state mid-sweep. Curve
//! lookups are nearest-neighbor by linear scan: curves are small (typically
//! under 100 rows) and the exact tie rule matters more than asymptotics.
//! Ties break to the first row in input order.

use serde::{Deserialize, Serialize};

/// One row of a user-supplied grade-tonnage curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeTonnagePoint {
    /// Cut-off grade (%)
    pub cutoff: f64,
    /// Ore tonnage above cut-off (Mt)
    pub tonnage: f64,
    /// Average grade above cut-off (%)
    pub grade: f64,
}

/// One row of a user-supplied CAPEX curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapexPoint {
    /// Production rate (Mtpa)
    pub production: f64,
    /// Total capital cost ($M)
    pub capex: f64,
}

/// Nearest row by absolute difference on `key`; first match wins ties.
fn nearest_by<T>(rows: &[T], query: f64, key: impl Fn(&T) -> f64) -> Option<&T> {
    let mut best: Option<(&T, f64)> = None;
    for row in rows {
        let dist = (key(row) - query).abs();
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((row, dist)),
        }
    }
    best.map(|(row, _)| row)
}

/// Resolves a cut-off grade to recoverable (tonnage, grade).
#[derive(Debug, Clone, Default)]
pub struct GradeTonnageModel {
    curve: Option<Vec<GradeTonnagePoint>>,
}

impl GradeTonnageModel {
    /// Analytic tonnage shape constant
    const TONNAGE_SCALE: f64 = 500.0;
    /// Analytic tonnage decay exponent
    const TONNAGE_EXPONENT: f64 = 0.7;
    /// Grade floor at high cut-off
    const GRADE_FLOOR: f64 = 0.2;

    #[must_use]
    pub fn new(curve: Option<Vec<GradeTonnagePoint>>) -> Self {
        Self { curve }
    }

    /// Resolve a cut-off grade to `(tonnage, grade)`.
    ///
    /// With a curve configured, returns the nearest row's tonnage and grade
    /// verbatim, no interpolation. Otherwise uses the analytic model
    /// `tonnage = 500 * cutoff^-0.7`, `grade = max(1.5 - 0.5 * cutoff, 0.2)`.
    ///
    /// Callers guarantee `cutoff > 0`; grid values are validated before any
    /// sweep reaches this model.
    #[must_use]
    pub fn resolve(&self, cutoff: f64) -> (f64, f64) {
        if let Some(curve) = &self.curve
            && let Some(point) = nearest_by(curve, cutoff, |p| p.cutoff)
        {
            return (point.tonnage, point.grade);
        }
        let tonnage = Self::TONNAGE_SCALE * cutoff.powf(-Self::TONNAGE_EXPONENT);
        let grade = (1.5 - 0.5 * cutoff).max(Self::GRADE_FLOOR);
        (tonnage, grade)
    }
}

/// Resolves a production rate to total CAPEX and its time-phased schedule.
#[derive(Debug, Clone, Default)]
pub struct CapexModel {
    curve: Option<Vec<CapexPoint>>,
}

impl CapexModel {
    /// Analytic fixed capital component ($M)
    const BASE_CAPEX: f64 = 1000.0;
    /// Analytic per-Mtpa capital component ($M)
    const CAPEX_PER_MTPA: f64 = 150.0;

    #[must_use]
    pub fn new(curve: Option<Vec<CapexPoint>>) -> Self {
        Self { curve }
    }

    /// Total capital cost for a production rate.
    #[must_use]
    pub fn estimate(&self, production: f64) -> f64 {
        if let Some(curve) = &self.curve
            && let Some(point) = nearest_by(curve, production, |p| p.production)
        {
            return point.capex;
        }
        Self::BASE_CAPEX + Self::CAPEX_PER_MTPA * production
    }

    /// Spread capital over the first two periods of mine life.
    ///
    /// `ceil(years)` periods total, half the capital in each of periods 0
    /// and 1, zero after. When `ceil(years) < 2` only the periods that exist
    /// receive an allocation; the remainder is NOT reallocated, so very
    /// short mine lives understate invested capital. Known edge case,
    /// reproduced from the source model as observed.
    #[must_use]
    pub fn schedule(&self, total_capex: f64, years: f64) -> Vec<f64> {
        let periods = years.ceil() as usize;
        (0..periods)
            .map(|t| if t < 2 { total_capex / 2.0 } else { 0.0 })
            .collect()
    }
}
