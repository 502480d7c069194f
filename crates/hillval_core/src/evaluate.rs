//! Single-trial discounted-cash-flow evaluation.
//!
//! One trial takes a resolved deposit (tonnage, grade), one sampled
//! (price, recovery) pair, and the fixed economics, and produces NPV, mine
//! life, and CAPEX. The cashflow model is deliberately simple: one flat
//! annual cashflow across the whole mine life, no ramp-up or ramp-down.

use crate::model::{CapexModel, TrialResult};

/// Fixed economic inputs shared by every trial in a sweep.
#[derive(Debug, Clone, Copy)]
pub struct Economics {
    /// Operating cost per tonne of ore ($/t)
    pub opex_per_tonne: f64,
    /// Discount rate, in percent
    pub discount_rate_pct: f64,
}

/// Evaluate one stochastic trial for a (cutoff, production) grid point.
///
/// `production` is guaranteed positive by grid validation, so mine life is
/// always finite. Negative cashflows and negative NPV are valid economic
/// outcomes, not failures, and are returned as-is.
///
/// Discounting is end-of-period: the cashflow of period `t` (zero-based) is
/// divided by `(1 + r/100)^(t+1)`, so even the first period's cashflow is
/// discounted one full year.
#[must_use]
pub fn evaluate_trial(
    tonnage: f64,
    grade: f64,
    price: f64,
    recovery_pct: f64,
    production: f64,
    economics: &Economics,
    capex_model: &CapexModel,
) -> TrialResult {
    let metal_content = tonnage * grade / 100.0;
    let revenue = metal_content * recovery_pct / 100.0 * price;

    let years = tonnage / production;
    let annual_cashflow = (revenue - economics.opex_per_tonne * tonnage) / years;

    let capex = capex_model.estimate(production);
    let capex_schedule = capex_model.schedule(capex, years);

    let discount_base = 1.0 + economics.discount_rate_pct / 100.0;
    let npv = capex_schedule
        .iter()
        .enumerate()
        .map(|(t, outlay)| (annual_cashflow - outlay) / discount_base.powi(t as i32 + 1))
        .sum();

    TrialResult {
        npv,
        mine_life_years: years,
        capex,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ECONOMICS: Economics = Economics {
        opex_per_tonne: 40.0,
        discount_rate_pct: 8.0,
    };

    #[test]
    fn test_mine_life_is_tonnage_over_production() {
        let result = evaluate_trial(
            800.0,
            1.2,
            4000.0,
            85.0,
            4.0,
            &ECONOMICS,
            &CapexModel::default(),
        );
        assert!((result.mine_life_years - 200.0).abs() < 1e-12);
    }

    #[test]
    fn test_capex_comes_from_model() {
        let result = evaluate_trial(
            800.0,
            1.2,
            4000.0,
            85.0,
            4.0,
            &ECONOMICS,
            &CapexModel::default(),
        );
        assert!((result.capex - 1600.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_period_hand_check() {
        // tonnage 4, grade 100%, production 4 => one period, one year.
        // metal = 4 * 100 / 100 = 4; revenue = 4 * 1 * 100 = 400
        // cashflow = (400 - 40*4) / 1 = 240; capex 1600, schedule [800]
        // npv = (240 - 800) / 1.08
        let result = evaluate_trial(
            4.0,
            100.0,
            100.0,
            100.0,
            4.0,
            &ECONOMICS,
            &CapexModel::default(),
        );
        let expected = (240.0 - 800.0) / 1.08;
        assert!(
            (result.npv - expected).abs() < 1e-9,
            "expected {expected}, got {}",
            result.npv
        );
    }

    #[test]
    fn test_negative_price_flows_through() {
        // A negative sampled price is an allowed degenerate trial; it must
        // produce an ordinary (deeply negative) NPV, not an error.
        let result = evaluate_trial(
            800.0,
            1.2,
            -500.0,
            85.0,
            4.0,
            &ECONOMICS,
            &CapexModel::default(),
        );
        assert!(result.npv.is_finite());
        assert!(result.npv < 0.0);
    }

    #[test]
    fn test_higher_discount_rate_lowers_npv() {
        // With capex only in early periods and positive cashflow after,
        // discounting harder must strictly reduce NPV.
        let cheap = Economics {
            opex_per_tonne: 10.0,
            discount_rate_pct: 5.0,
        };
        let dear = Economics {
            opex_per_tonne: 10.0,
            discount_rate_pct: 12.0,
        };
        let capex_model = CapexModel::default();
        let low = evaluate_trial(500.0, 2.0, 4000.0, 85.0, 5.0, &cheap, &capex_model);
        let high = evaluate_trial(500.0, 2.0, 4000.0, 85.0, 5.0, &dear, &capex_model);
        assert!(low.npv > high.npv);
    }
}
