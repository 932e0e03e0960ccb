//! Present value helpers for level monthly payment streams

/// Helper functions for present value calculations
pub struct PVCalculator;

impl PVCalculator {
    /// Discount factor for `n_months` periods at a monthly rate
    pub fn discount_factor(n_months: u32, monthly_rate: f64) -> f64 {
        (1.0 + monthly_rate).powi(-(n_months as i32))
    }

    /// Calculate PV of a level annuity
    /// Payments of `amount` for `n_months`, first payment immediate
    pub fn pv_annuity_due(amount: f64, n_months: u32, monthly_rate: f64) -> f64 {
        if monthly_rate.abs() < 1e-12 {
            return amount * n_months as f64;
        }

        let v = 1.0 / (1.0 + monthly_rate);
        amount * (1.0 - v.powi(n_months as i32)) / (1.0 - v)
    }

    /// Calculate PV of a level annuity (ordinary - payments at end of period)
    pub fn pv_annuity_ordinary(amount: f64, n_months: u32, monthly_rate: f64) -> f64 {
        Self::pv_annuity_due(amount, n_months, monthly_rate) / (1.0 + monthly_rate)
    }

    /// PV at inception of a level stream paid at absolute periods `start..end`
    pub fn pv_deferred_stream(amount: f64, start: u32, end: u32, monthly_rate: f64) -> f64 {
        if start >= end {
            return 0.0;
        }
        Self::discount_factor(start, monthly_rate)
            * Self::pv_annuity_due(amount, end - start, monthly_rate)
    }

    /// Undiscounted total of a level stream
    pub fn level_sum(amount: f64, n_months: u32) -> f64 {
        amount * n_months as f64
    }
}
