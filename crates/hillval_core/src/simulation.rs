//! Monte Carlo aggregation for a single grid cell.
//!
//! A cell's deposit is deterministic given its cut-off; only price and
//! recovery are stochastic. Each cell draws `trials_per_cell` independent
//! (price, recovery) pairs, evaluates one DCF trial per draw, and reduces
//! the trials to arithmetic means.

use rand::Rng;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::evaluate::{Economics, evaluate_trial};
use crate::model::{CapexModel, GradeTonnageModel, ScenarioCell};

/// Deposit and capital models built once per sweep and shared read-only by
/// every cell; curve data is loaded before the hot loop starts.
#[derive(Debug, Clone)]
pub struct CellModels {
    pub grade_tonnage: GradeTonnageModel,
    pub capex: CapexModel,
    pub economics: Economics,
}

impl CellModels {
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            grade_tonnage: GradeTonnageModel::new(config.grade_tonnage_curve.clone()),
            capex: CapexModel::new(config.capex_curve.clone()),
            economics: Economics {
                opex_per_tonne: config.opex_per_tonne,
                discount_rate_pct: config.discount_rate_pct,
            },
        }
    }
}

/// Run all trials for one (cutoff, production) grid point and reduce them
/// to a `ScenarioCell` of per-trial means.
///
/// Draws are unbounded: a negative price or an out-of-range recovery is a
/// degenerate trial, included in the mean like any other.
pub fn aggregate_cell<R: Rng + ?Sized>(
    cutoff: f64,
    production: f64,
    config: &EngineConfig,
    models: &CellModels,
    rng: &mut R,
) -> Result<ScenarioCell, EngineError> {
    let (tonnage, grade) = models.grade_tonnage.resolve(cutoff);

    let trials = config.trials_per_cell;
    let mut npv_sum = 0.0;
    let mut life_sum = 0.0;
    let mut capex_sum = 0.0;

    for _ in 0..trials {
        let price = config.price.sample(rng)?;
        let recovery = config.recovery.sample(rng)?;

        let trial = evaluate_trial(
            tonnage,
            grade,
            price,
            recovery,
            production,
            &models.economics,
            &models.capex,
        );

        npv_sum += trial.npv;
        life_sum += trial.mine_life_years;
        capex_sum += trial.capex;
    }

    let n = trials as f64;
    Ok(ScenarioCell {
        cutoff,
        production,
        avg_npv: npv_sum / n,
        avg_mine_life_years: life_sum / n,
        avg_capex: capex_sum / n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SamplingProfile;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_mine_life_and_capex_are_trial_invariant() {
        // Price/recovery noise must not touch life or capex: the deposit is
        // deterministic given cutoff and capex depends only on production.
        let config = EngineConfig {
            price: SamplingProfile::Normal {
                mean: 4000.0,
                std_dev: 500.0,
            },
            recovery: SamplingProfile::Normal {
                mean: 85.0,
                std_dev: 10.0,
            },
            trials_per_cell: 64,
            ..Default::default()
        };
        let models = CellModels::from_config(&config);
        let mut rng = SmallRng::seed_from_u64(3);

        let cell = aggregate_cell(0.5, 4.0, &config, &models, &mut rng).unwrap();
        let (tonnage, _) = models.grade_tonnage.resolve(0.5);
        assert!((cell.avg_mine_life_years - tonnage / 4.0).abs() < 1e-9);
        assert!((cell.avg_capex - 1600.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_noiseless_trial_matches_evaluator() {
        let config = EngineConfig::default();
        let models = CellModels::from_config(&config);
        let mut rng = SmallRng::seed_from_u64(1);

        let cell = aggregate_cell(0.5, 4.0, &config, &models, &mut rng).unwrap();
        let (tonnage, grade) = models.grade_tonnage.resolve(0.5);
        let trial = evaluate_trial(
            tonnage,
            grade,
            4000.0,
            85.0,
            4.0,
            &models.economics,
            &models.capex,
        );
        assert_eq!(cell.avg_npv, trial.npv);
        assert_eq!(cell.avg_mine_life_years, trial.mine_life_years);
    }
}
