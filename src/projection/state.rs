//! Running state carried from one projection period to the next

use chrono::NaiveDate;

use crate::lease::LeaseParameters;

/// State of the lease at a point in time during projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current period (0-indexed)
    pub period: u32,

    /// Calendar date of the current period (first of the month)
    pub date: NaiveDate,

    /// Full rental after all escalations so far
    pub current_full_rental: f64,

    /// Running total of the original rental
    pub cumulative_rental: f64,

    /// Running total of the escalated rental
    pub cumulative_rental_with_increase: f64,

    /// Number of escalations applied so far
    pub escalations: u32,
}

impl ProjectionState {
    /// Initialize state at period 0, before any collections are recorded
    pub fn from_params(params: &LeaseParameters) -> Self {
        Self {
            period: 0,
            date: params.anchor_date(),
            current_full_rental: params.full_rental,
            cumulative_rental: 0.0,
            cumulative_rental_with_increase: 0.0,
            escalations: 0,
        }
    }

    /// Move to period `t`, applying escalation if its month matches.
    /// Returns false if the date falls outside the calendar.
    pub fn enter_period(&mut self, params: &LeaseParameters, t: u32) -> bool {
        let Some(date) = params.period_date(t) else {
            return false;
        };
        self.period = t;
        self.date = date;

        if params.escalates_at(t, date) {
            self.current_full_rental *= params.escalation_factor();
            self.escalations += 1;
            log::debug!(
                "Escalation #{} at period {} ({}): rental now {:.4}",
                self.escalations, t, date, self.current_full_rental
            );
        }
        true
    }

    /// Record this period's collections at both the original and escalated rental
    pub fn collect(&mut self, original_rental: f64) {
        self.cumulative_rental += original_rental;
        self.cumulative_rental_with_increase += self.current_full_rental;
    }
}
