//! Engine output types: per-trial results, grid cells, and the scenario
//! table with its derived Hill of Value surface.

use serde::{Deserialize, Serialize};

use crate::error::SurfaceError;

/// Outcome of one stochastic trial. Ephemeral: produced by the trial
/// evaluator, folded into the cell mean, never retained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialResult {
    pub npv: f64,
    pub mine_life_years: f64,
    pub capex: f64,
}

/// Aggregated result for one (cutoff, production) grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioCell {
    pub cutoff: f64,
    pub production: f64,
    pub avg_npv: f64,
    pub avg_mine_life_years: f64,
    pub avg_capex: f64,
}

impl ScenarioCell {
    /// Whether this cell passes the valid-only consumer filter:
    /// finite values, positive NPV, positive CAPEX.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.avg_npv.is_finite()
            && self.avg_mine_life_years.is_finite()
            && self.avg_capex.is_finite()
            && self.avg_npv > 0.0
            && self.avg_capex > 0.0
    }
}

/// The full sweep output: one cell per grid point, cutoff-major then
/// production-minor. This flat table is the canonical engine artifact;
/// filtered views and surface pivots are derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioTable {
    pub cells: Vec<ScenarioCell>,
}

impl ScenarioTable {
    #[must_use]
    pub fn new(cells: Vec<ScenarioCell>) -> Self {
        Self { cells }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The valid-only view used by CSV/plot consumers. Filtering can leave
    /// holes in the grid; the full table stays canonical.
    #[must_use]
    pub fn valid_cells(&self) -> Vec<ScenarioCell> {
        self.cells.iter().copied().filter(ScenarioCell::is_valid).collect()
    }

    /// A table containing only the valid cells.
    #[must_use]
    pub fn valid_only(&self) -> ScenarioTable {
        ScenarioTable::new(self.valid_cells())
    }

    /// Pivot into a rectangular cutoff x production NPV matrix.
    ///
    /// Fails with `SurfaceError::MissingCells` when the table does not cover
    /// the full Cartesian product of its axis values (typically after
    /// valid-only filtering). Callers surface that as a warning for the
    /// affected view; the table itself is unaffected.
    pub fn to_surface(&self) -> Result<NpvSurface, SurfaceError> {
        if self.cells.is_empty() {
            return Err(SurfaceError::Empty);
        }

        let cutoffs = sorted_unique(self.cells.iter().map(|c| c.cutoff));
        let productions = sorted_unique(self.cells.iter().map(|c| c.production));
        let expected = cutoffs.len() * productions.len();

        let mut npv = vec![None; expected];
        for cell in &self.cells {
            // Axis values are exact (rounded at grid construction), so
            // positional lookup by equality is sound.
            let row = cutoffs.iter().position(|&c| c == cell.cutoff);
            let col = productions.iter().position(|&p| p == cell.production);
            if let (Some(row), Some(col)) = (row, col) {
                npv[row * productions.len() + col] = Some(cell.avg_npv);
            }
        }

        let found = npv.iter().filter(|v| v.is_some()).count();
        if found < expected {
            return Err(SurfaceError::MissingCells { expected, found });
        }

        Ok(NpvSurface {
            cutoffs,
            productions,
            npv: npv.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect(),
        })
    }
}

fn sorted_unique(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut out: Vec<f64> = values.collect();
    out.sort_by(f64::total_cmp);
    out.dedup();
    out
}

/// The Hill of Value: average NPV over the cutoff x production plane,
/// row-major with cutoff as the row axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpvSurface {
    pub cutoffs: Vec<f64>,
    pub productions: Vec<f64>,
    pub npv: Vec<f64>,
}

impl NpvSurface {
    #[must_use]
    pub fn npv_at(&self, cutoff_idx: usize, production_idx: usize) -> Option<f64> {
        if cutoff_idx >= self.cutoffs.len() || production_idx >= self.productions.len() {
            return None;
        }
        Some(self.npv[cutoff_idx * self.productions.len() + production_idx])
    }

    /// The grid point with the highest NPV, as (cutoff, production, npv).
    #[must_use]
    pub fn peak(&self) -> Option<(f64, f64, f64)> {
        let cols = self.productions.len();
        self.npv
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, &npv)| (self.cutoffs[i / cols], self.productions[i % cols], npv))
    }
}
