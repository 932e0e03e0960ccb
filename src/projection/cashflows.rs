//! Projection output structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LeaseError, LeaseResult};

/// A single row of projection output for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProjectionRow {
    // Timing
    pub period: u32,
    pub date: NaiveDate,

    // Rental
    pub current_full_rental: f64,

    // Securitized stream
    pub slc_npv: f64,
    pub slc_paydown: f64,

    // Contract balance remaining (undiscounted)
    pub cbr: f64,

    // In-house valuation
    pub inhouse_pv: f64,

    // Cash collections
    pub cumulative_rental: f64,
    pub cumulative_rental_with_increase: f64,
}

/// Headline figures taken from the first and last projection rows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationSummary {
    pub first_slc_npv: f64,
    pub first_cbr: f64,
    pub first_inhouse_pv: f64,
    pub last_slc_paydown: f64,
    pub last_cumulative_rental: f64,
    pub last_cumulative_rental_with_increase: f64,
}

impl CalculationSummary {
    /// Extract the summary from an ordered projection
    pub fn from_rows(rows: &[MonthlyProjectionRow]) -> LeaseResult<Self> {
        let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
            return Err(LeaseError::EmptyProjection);
        };

        Ok(Self {
            first_slc_npv: first.slc_npv,
            first_cbr: first.cbr,
            first_inhouse_pv: first.inhouse_pv,
            last_slc_paydown: last.slc_paydown,
            last_cumulative_rental: last.cumulative_rental,
            last_cumulative_rental_with_increase: last.cumulative_rental_with_increase,
        })
    }

    /// Labelled values in display order
    pub fn labelled(&self) -> [(&'static str, f64); 6] {
        [
            ("First SLC NPV", self.first_slc_npv),
            ("First CBR", self.first_cbr),
            ("First Inhouse PV", self.first_inhouse_pv),
            ("Last SLC Paydown", self.last_slc_paydown),
            ("Last Cash Collection (@Original Rental)", self.last_cumulative_rental),
            ("Last Cash Collection (@Escalated Rental)", self.last_cumulative_rental_with_increase),
        ]
    }
}

/// Complete projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Monthly rows ordered by period
    pub rows: Vec<MonthlyProjectionRow>,

    /// Summary extracted from `rows`
    pub summary: CalculationSummary,
}

impl ProjectionResult {
    pub fn new(rows: Vec<MonthlyProjectionRow>) -> LeaseResult<Self> {
        let summary = CalculationSummary::from_rows(&rows)?;
        Ok(Self { rows, summary })
    }

    /// Number of periods projected
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
