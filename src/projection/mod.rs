//! Valuation engine for monthly lease projections

mod state;
mod engine;
mod cashflows;
mod discount;

pub use state::ProjectionState;
pub use engine::{ValuationEngine, ValuationConfig, project, summarize};
pub use cashflows::{MonthlyProjectionRow, CalculationSummary, ProjectionResult};
pub use discount::PVCalculator;
