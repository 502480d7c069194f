//! Grid sweep: evaluate every (cutoff, production) pair with parallel
//! Monte Carlo aggregation.
//!
//! Cells are independent, so the sweep is embarrassingly parallel. Each
//! cell gets its own RNG seeded from the base seed plus the cell's grid
//! index, which makes results bit-identical for a fixed seed regardless of
//! how rayon schedules the work.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::model::{ScenarioCell, ScenarioTable};
use crate::simulation::{CellModels, aggregate_cell};

/// Progress tracking for a grid sweep.
///
/// Shared atomics so a caller on another thread can watch completion or
/// request cancellation; the sweep itself only increments the counter once
/// per finished cell and checks the flag once per cell, never per trial.
#[derive(Debug, Clone)]
pub struct SweepProgress {
    /// Completed cells counter
    completed: Arc<AtomicUsize>,
    /// Total cells
    total: Arc<AtomicUsize>,
    /// Cancellation flag
    cancelled: Arc<AtomicBool>,
}

impl SweepProgress {
    /// Create a new progress tracker
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            completed: Arc::new(AtomicUsize::new(0)),
            total: Arc::new(AtomicUsize::new(total)),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the number of completed cells
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    /// Get the total number of cells
    #[must_use]
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    /// Increment the completed counter
    pub fn increment(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Reset the progress
    pub fn reset(&self, total: usize) {
        self.completed.store(0, Ordering::Relaxed);
        self.total.store(total, Ordering::Relaxed);
    }

    /// Cancel the sweep
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Check if cancelled
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl Default for SweepProgress {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Evaluate the full cutoff x production grid.
///
/// Validates the configuration first: configuration errors abort before any
/// cell is evaluated. Returns the complete, unfiltered table in
/// cutoff-major, production-minor order; valid-only filtering is a consumer
/// view on the result, never applied here.
///
/// `progress` is optional and a `None` caller loses nothing: completion is
/// tracked per cell and cancellation (checked between cells) surfaces as
/// `EngineError::Cancelled`.
pub fn sweep_evaluate(
    config: &EngineConfig,
    progress: Option<&SweepProgress>,
) -> Result<ScenarioTable, EngineError> {
    config.validate()?;

    let cutoffs = config.cutoff.values();
    let productions = config.production.values();
    let models = CellModels::from_config(config);

    let base_seed = config.seed.unwrap_or_else(|| rand::rng().next_u64());

    // Cutoff-major enumeration; the pair's grid index doubles as its seed
    // offset so per-cell RNG streams are independent of scheduling order.
    let pairs: Vec<(usize, f64, f64)> = cutoffs
        .iter()
        .flat_map(|&cutoff| productions.iter().map(move |&production| (cutoff, production)))
        .enumerate()
        .map(|(idx, (cutoff, production))| (idx, cutoff, production))
        .collect();

    if let Some(p) = progress {
        p.reset(pairs.len());
    }

    let evaluate_pair = |&(idx, cutoff, production): &(usize, f64, f64)| {
        if let Some(p) = progress
            && p.is_cancelled()
        {
            return Err(EngineError::Cancelled);
        }

        let mut rng = SmallRng::seed_from_u64(base_seed.wrapping_add(idx as u64));
        let cell = aggregate_cell(cutoff, production, config, &models, &mut rng)?;

        if let Some(p) = progress {
            p.increment();
        }
        Ok(cell)
    };

    #[cfg(feature = "parallel")]
    let results: Result<Vec<ScenarioCell>, EngineError> =
        pairs.par_iter().map(evaluate_pair).collect();

    #[cfg(not(feature = "parallel"))]
    let results: Result<Vec<ScenarioCell>, EngineError> =
        pairs.iter().map(evaluate_pair).collect();

    Ok(ScenarioTable::new(results?))
}
