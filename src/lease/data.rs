//! Lease parameter set supplied to the valuation engine

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{LeaseError, LeaseResult};

/// Share of the full rental advanced into the securitized stream
pub const SLC_ADVANCE_RATE: f64 = 0.96;

/// Periods per year; annual rates are converted to monthly by simple division
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Inputs for one lease calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseParameters {
    /// Rental amount per period before escalation
    pub full_rental: f64,

    /// Annual securitized (SLC) discount rate as a fraction (0.05 = 5%)
    pub slc_interest_rate: f64,

    /// Annual in-house discount rate as a fraction
    pub inhouse_interest_rate: f64,

    /// Number of periods in the securitized stream
    pub slc_nper: i32,

    /// Total number of monthly periods
    pub full_term: i32,

    /// Anchor date of the first period (only year and month are used)
    pub start_date: NaiveDate,

    /// Percentage increase applied when the escalation month comes round (5.0 = 5%)
    pub rental_increase_percentage: f64,

    /// Calendar month (1-12) in which escalation applies
    pub rental_increase_month: u32,
}

impl LeaseParameters {
    /// Build and validate a parameter set
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        full_rental: f64,
        slc_interest_rate: f64,
        inhouse_interest_rate: f64,
        slc_nper: i32,
        full_term: i32,
        start_date: NaiveDate,
        rental_increase_percentage: f64,
        rental_increase_month: u32,
    ) -> LeaseResult<Self> {
        let params = Self {
            full_rental,
            slc_interest_rate,
            inhouse_interest_rate,
            slc_nper,
            full_term,
            start_date,
            rental_increase_percentage,
            rental_increase_month,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check every range constraint. Values are never clamped.
    pub fn validate(&self) -> LeaseResult<()> {
        let result = self.check();
        if let Err(ref e) = result {
            log::warn!("Rejected lease parameters: {}", e);
        }
        result
    }

    fn check(&self) -> LeaseResult<()> {
        require_finite("full_rental", self.full_rental)?;
        require_finite("slc_interest_rate", self.slc_interest_rate)?;
        require_finite("inhouse_interest_rate", self.inhouse_interest_rate)?;
        require_finite("rental_increase_percentage", self.rental_increase_percentage)?;

        if self.full_rental <= 0.0 {
            return Err(LeaseError::invalid(
                "full_rental",
                format!("must be greater than 0, got {}", self.full_rental),
            ));
        }
        // At -100% or below the escalated rental stops being positive
        if self.rental_increase_percentage <= -100.0 {
            return Err(LeaseError::invalid(
                "rental_increase_percentage",
                format!("must be greater than -100, got {}", self.rental_increase_percentage),
            ));
        }
        if self.full_term <= 0 {
            return Err(LeaseError::invalid(
                "full_term",
                format!("must be at least 1 period, got {}", self.full_term),
            ));
        }
        if self.slc_nper < 0 {
            return Err(LeaseError::invalid(
                "slc_nper",
                format!("must not be negative, got {}", self.slc_nper),
            ));
        }
        if self.slc_nper > self.full_term {
            return Err(LeaseError::invalid(
                "slc_nper",
                format!(
                    "must not exceed full_term ({}), got {}",
                    self.full_term, self.slc_nper
                ),
            ));
        }
        if self.slc_interest_rate < 0.0 {
            return Err(LeaseError::invalid(
                "slc_interest_rate",
                format!("must not be negative, got {}", self.slc_interest_rate),
            ));
        }
        if self.inhouse_interest_rate < 0.0 {
            return Err(LeaseError::invalid(
                "inhouse_interest_rate",
                format!("must not be negative, got {}", self.inhouse_interest_rate),
            ));
        }
        if !(1..=12).contains(&self.rental_increase_month) {
            return Err(LeaseError::invalid(
                "rental_increase_month",
                format!("must be between 1 and 12, got {}", self.rental_increase_month),
            ));
        }
        if self.period_date(self.term() - 1).is_none() {
            return Err(LeaseError::invalid(
                "start_date",
                format!(
                    "a {}-month term starting {} runs past the supported calendar",
                    self.full_term, self.start_date
                ),
            ));
        }

        Ok(())
    }

    /// Number of projection periods (0 if the term is not positive)
    pub fn term(&self) -> u32 {
        self.full_term.max(0) as u32
    }

    /// Number of securitized periods (0 if negative)
    pub fn slc_periods(&self) -> u32 {
        self.slc_nper.max(0) as u32
    }

    /// Securitized rental at the standard 96% advance rate
    pub fn slc_securitized_rental(&self) -> f64 {
        self.securitized_rental(SLC_ADVANCE_RATE)
    }

    /// Securitized rental at an arbitrary advance rate
    pub fn securitized_rental(&self, advance_rate: f64) -> f64 {
        advance_rate * self.full_rental
    }

    pub fn slc_monthly_rate(&self) -> f64 {
        self.slc_interest_rate / MONTHS_PER_YEAR
    }

    pub fn inhouse_monthly_rate(&self) -> f64 {
        self.inhouse_interest_rate / MONTHS_PER_YEAR
    }

    /// Multiplier applied to the running rental at each escalation
    pub fn escalation_factor(&self) -> f64 {
        1.0 + self.rental_increase_percentage / 100.0
    }

    /// First day of the start month; periods step from here
    pub fn anchor_date(&self) -> NaiveDate {
        self.start_date.with_day(1).unwrap_or(self.start_date)
    }

    /// Date of period `t` (0-indexed), None past the calendar's range
    pub fn period_date(&self, t: u32) -> Option<NaiveDate> {
        self.anchor_date().checked_add_months(Months::new(t))
    }

    /// Whether escalation fires in period `t` falling on `date`
    pub fn escalates_at(&self, t: u32, date: NaiveDate) -> bool {
        t > 0 && date.month() == self.rental_increase_month
    }
}

fn require_finite(field: &str, value: f64) -> LeaseResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LeaseError::invalid(field, format!("must be a finite number, got {}", value)))
    }
}
