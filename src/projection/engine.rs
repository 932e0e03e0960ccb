//! Core valuation engine for monthly lease projections

use crate::error::{LeaseError, LeaseResult};
use crate::lease::{LeaseParameters, SLC_ADVANCE_RATE};
use super::cashflows::{CalculationSummary, MonthlyProjectionRow, ProjectionResult};
use super::discount::PVCalculator;
use super::state::ProjectionState;

/// Configuration for a valuation run
#[derive(Debug, Clone)]
pub struct ValuationConfig {
    /// Share of the full rental advanced into the securitized stream
    pub advance_rate: f64,
}

impl ValuationConfig {
    pub fn validate(&self) -> LeaseResult<()> {
        if !self.advance_rate.is_finite() || !(0.0..=1.0).contains(&self.advance_rate) {
            return Err(LeaseError::invalid(
                "advance_rate",
                format!("must be between 0 and 1, got {}", self.advance_rate),
            ));
        }
        Ok(())
    }
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            advance_rate: SLC_ADVANCE_RATE,
        }
    }
}

/// Main valuation engine. Holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct ValuationEngine {
    config: ValuationConfig,
}

impl ValuationEngine {
    /// Create a new valuation engine with the given config
    pub fn new(config: ValuationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Project every month of the lease term
    pub fn project(&self, params: &LeaseParameters) -> LeaseResult<Vec<MonthlyProjectionRow>> {
        self.config.validate()?;
        params.validate()?;

        let term = params.term();
        let slc_nper = params.slc_periods();
        let securitized_rental = params.securitized_rental(self.config.advance_rate);
        let slc_rate = params.slc_monthly_rate();
        let inhouse_rate = params.inhouse_monthly_rate();

        let mut state = ProjectionState::from_params(params);
        let mut rows = Vec::with_capacity(term as usize);

        for t in 0..term {
            if !state.enter_period(params, t) {
                return Err(LeaseError::invalid(
                    "start_date",
                    format!("period {} falls outside the supported calendar", t),
                ));
            }

            // Securitized stream: constant payment, discounted to inception
            let (slc_npv, slc_paydown) = if t < slc_nper {
                (
                    PVCalculator::pv_deferred_stream(securitized_rental, t, slc_nper, slc_rate),
                    PVCalculator::level_sum(securitized_rental, slc_nper - t),
                )
            } else {
                (0.0, 0.0)
            };

            let remaining = term - t;
            let cbr = state.current_full_rental * remaining as f64;

            // In-house: fresh ordinary annuity at the original rental
            let inhouse_pv = PVCalculator::pv_annuity_ordinary(params.full_rental, remaining, inhouse_rate);

            state.collect(params.full_rental);

            rows.push(MonthlyProjectionRow {
                period: t,
                date: state.date,
                current_full_rental: state.current_full_rental,
                slc_npv,
                slc_paydown,
                cbr,
                inhouse_pv,
                cumulative_rental: state.cumulative_rental,
                cumulative_rental_with_increase: state.cumulative_rental_with_increase,
            });
        }

        log::debug!(
            "Projected {} periods ({} securitized, {} escalations)",
            rows.len(),
            slc_nper,
            state.escalations
        );

        Ok(rows)
    }

    /// Project and summarize in one call
    pub fn calculate(&self, params: &LeaseParameters) -> LeaseResult<ProjectionResult> {
        let rows = self.project(params)?;
        ProjectionResult::new(rows)
    }
}

/// Project with the default configuration
pub fn project(params: &LeaseParameters) -> LeaseResult<Vec<MonthlyProjectionRow>> {
    ValuationEngine::default().project(params)
}

/// Reduce a projection to its headline figures
pub fn summarize(rows: &[MonthlyProjectionRow]) -> LeaseResult<CalculationSummary> {
    CalculationSummary::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Datelike, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_params() -> LeaseParameters {
        LeaseParameters::new(1000.0, 0.06, 0.08, 12, 24, date(2024, 1, 1), 5.0, 1).unwrap()
    }

    #[test]
    fn test_projection_runs() {
        let rows = project(&test_params()).unwrap();

        assert_eq!(rows.len(), 24);
        for (t, row) in rows.iter().enumerate() {
            assert_eq!(row.period, t as u32);
        }
        assert_eq!(rows[0].date, date(2024, 1, 1));
        assert_eq!(rows[23].date, date(2025, 12, 1));
    }

    #[test]
    fn test_reference_first_period() {
        let rows = project(&test_params()).unwrap();
        let first = &rows[0];

        assert_relative_eq!(first.cbr, 24_000.0);
        assert_relative_eq!(first.slc_paydown, 11_520.0, epsilon = 1e-9);
        assert_relative_eq!(first.current_full_rental, 1000.0);

        let expected_npv: f64 = (0..12).map(|i| 960.0 / 1.005_f64.powi(i)).sum();
        assert_relative_eq!(first.slc_npv, expected_npv, max_relative = 1e-10);

        let q: f64 = 0.08 / 12.0;
        let expected_pv: f64 = (1..=24).map(|i| 1000.0 / (1.0 + q).powi(i)).sum();
        assert_relative_eq!(first.inhouse_pv, expected_pv, max_relative = 1e-10);
    }

    #[test]
    fn test_escalation_at_january_2025() {
        let rows = project(&test_params()).unwrap();

        // Start month matches the escalation month but t = 0 never escalates
        assert_relative_eq!(rows[11].current_full_rental, 1000.0);
        assert_eq!(rows[12].date.month(), 1);
        assert_relative_eq!(rows[12].current_full_rental, 1050.0, epsilon = 1e-9);
        assert_relative_eq!(rows[23].current_full_rental, 1050.0, epsilon = 1e-9);

        // CBR uses the escalated rental
        assert_relative_eq!(rows[12].cbr, 1050.0 * 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_escalation_compounds_each_year() {
        let mut params = test_params();
        params.full_term = 40;
        params.rental_increase_month = 3;
        let rows = project(&params).unwrap();

        // March 2024 (t=2), March 2025 (t=14), March 2026 (t=26), March 2027 (t=38)
        assert_relative_eq!(rows[1].current_full_rental, 1000.0);
        assert_relative_eq!(rows[2].current_full_rental, 1050.0, epsilon = 1e-9);
        assert_relative_eq!(rows[14].current_full_rental, 1102.5, epsilon = 1e-9);
        assert_relative_eq!(rows[26].current_full_rental, 1157.625, epsilon = 1e-9);
        assert_relative_eq!(rows[37].current_full_rental, 1157.625, epsilon = 1e-9);
        assert_relative_eq!(rows[38].current_full_rental, 1000.0 * 1.05_f64.powi(4), epsilon = 1e-9);
        assert_relative_eq!(rows[39].current_full_rental, 1000.0 * 1.05_f64.powi(4), epsilon = 1e-9);
    }

    #[test]
    fn test_securitized_stream_ends_at_slc_nper() {
        let rows = project(&test_params()).unwrap();

        assert!(rows[11].slc_npv > 0.0);
        assert_relative_eq!(rows[11].slc_paydown, 960.0, epsilon = 1e-9);
        for row in &rows[12..] {
            assert_eq!(row.slc_npv, 0.0);
            assert_eq!(row.slc_paydown, 0.0);
        }
        for pair in rows.windows(2) {
            assert!(pair[1].slc_npv <= pair[0].slc_npv);
            assert!(pair[1].slc_paydown <= pair[0].slc_paydown);
        }
    }

    #[test]
    fn test_securitized_npv_discounts_to_inception() {
        let rows = project(&test_params()).unwrap();

        let expected: f64 = (5..12).map(|i| 960.0 / 1.005_f64.powi(i)).sum();
        assert_relative_eq!(rows[5].slc_npv, expected, max_relative = 1e-10);
    }

    #[test]
    fn test_zero_slc_nper() {
        let mut params = test_params();
        params.slc_nper = 0;
        let rows = project(&params).unwrap();

        assert!(rows.iter().all(|r| r.slc_npv == 0.0 && r.slc_paydown == 0.0));
    }

    #[test]
    fn test_single_period() {
        let params = LeaseParameters::new(800.0, 0.06, 0.08, 1, 1, date(2024, 5, 20), 3.0, 5).unwrap();
        let result = ValuationEngine::default().calculate(&params).unwrap();

        assert_eq!(result.len(), 1);
        let s = result.summary;
        assert_relative_eq!(s.first_slc_npv, 768.0, epsilon = 1e-9);
        assert_relative_eq!(s.last_slc_paydown, 768.0, epsilon = 1e-9);
        assert_relative_eq!(s.first_cbr, 800.0);
        assert_relative_eq!(s.first_inhouse_pv, 800.0 / (1.0 + 0.08 / 12.0), max_relative = 1e-10);
        assert_relative_eq!(s.last_cumulative_rental, 800.0);
        assert_relative_eq!(s.last_cumulative_rental_with_increase, 800.0);
    }

    #[test]
    fn test_cumulative_collections() {
        let rows = project(&test_params()).unwrap();
        let last = rows.last().unwrap();

        assert_relative_eq!(last.cumulative_rental, 24_000.0, epsilon = 1e-9);
        assert_relative_eq!(last.cumulative_rental_with_increase, 12_000.0 + 12_600.0, epsilon = 1e-9);
        for row in &rows {
            assert!(row.cumulative_rental_with_increase >= row.cumulative_rental);
        }
    }

    #[test]
    fn test_zero_rates_are_undiscounted() {
        let params = LeaseParameters::new(100.0, 0.0, 0.0, 6, 6, date(2024, 1, 1), 0.0, 7).unwrap();
        let rows = project(&params).unwrap();

        assert_relative_eq!(rows[0].slc_npv, 576.0, epsilon = 1e-9);
        assert_relative_eq!(rows[0].inhouse_pv, 600.0, epsilon = 1e-9);
        assert_relative_eq!(rows[3].slc_npv, 288.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let mut params = test_params();
        params.slc_nper = 10;
        params.full_term = 5;

        match project(&params) {
            Err(LeaseError::InvalidParameter { field, .. }) => assert_eq!(field, "slc_nper"),
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_advance_rate_override() {
        let engine = ValuationEngine::new(ValuationConfig { advance_rate: 0.9 });
        let rows = engine.project(&test_params()).unwrap();
        assert_relative_eq!(rows[0].slc_paydown, 10_800.0, epsilon = 1e-9);

        let bad = ValuationEngine::new(ValuationConfig { advance_rate: 1.5 });
        assert!(bad.project(&test_params()).is_err());
    }

    #[test]
    fn test_deterministic() {
        let params = test_params();
        let a = summarize(&project(&params).unwrap()).unwrap();
        let b = summarize(&project(&params).unwrap()).unwrap();
        assert_eq!(a, b);
    }
}
