//! Lease parameter structures and loading

mod data;
pub mod loader;

pub use data::{LeaseParameters, SLC_ADVANCE_RATE, MONTHS_PER_YEAR};
pub use loader::{load_parameters, load_parameters_from_reader};
