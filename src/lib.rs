//! Lease Valuation - monthly projection engine for securitized lease rentals
//!
//! This library provides:
//! - Validated lease parameter sets (rental, rates, term, escalation rule)
//! - Month-by-month projection of securitized NPV, paydown, contract balance
//!   remaining, in-house PV and cumulative collections
//! - Summary extraction for the headline figures
//! - A framework-free presentation layer for the web form

pub mod error;
pub mod lease;
pub mod projection;
pub mod web;

// Re-export commonly used types
pub use error::{LeaseError, LeaseResult};
pub use lease::LeaseParameters;
pub use projection::{
    project, summarize, CalculationSummary, MonthlyProjectionRow, ProjectionResult,
    ValuationConfig, ValuationEngine,
};
