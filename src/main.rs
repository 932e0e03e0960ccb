//! Lease Valuation CLI
//!
//! Command-line interface for running a single lease valuation

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use lease_valuation::{
    lease::load_parameters,
    web::render::format_amount,
    LeaseParameters, ValuationConfig, ValuationEngine,
};
use lease_valuation::lease::SLC_ADVANCE_RATE;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "lease-valuation", version, about = "Value a securitized lease rental stream")]
struct Cli {
    /// JSON file holding a full parameter set (rates as fractions)
    #[arg(long, conflicts_with_all = ["full_rental", "slc_rate", "inhouse_rate", "slc_nper", "full_term", "start_date", "increase_pct", "increase_month"])]
    params: Option<PathBuf>,

    /// Rental per period before escalation
    #[arg(long, required_unless_present = "params")]
    full_rental: Option<f64>,

    /// Annual securitized rate in percent (6 = 6%)
    #[arg(long, required_unless_present = "params")]
    slc_rate: Option<f64>,

    /// Annual in-house rate in percent
    #[arg(long, required_unless_present = "params")]
    inhouse_rate: Option<f64>,

    /// Number of securitized periods
    #[arg(long, required_unless_present = "params", allow_hyphen_values = true)]
    slc_nper: Option<i32>,

    /// Total term in months
    #[arg(long, required_unless_present = "params", allow_hyphen_values = true)]
    full_term: Option<i32>,

    /// First period (YYYY-MM-DD)
    #[arg(long, required_unless_present = "params")]
    start_date: Option<NaiveDate>,

    /// Rental increase in percent applied at each escalation
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    increase_pct: f64,

    /// Calendar month (1-12) in which the increase applies
    #[arg(long, default_value_t = 1)]
    increase_month: u32,

    /// Share of the rental advanced into the securitized stream
    #[arg(long, default_value_t = SLC_ADVANCE_RATE)]
    advance_rate: f64,

    /// Number of monthly rows to print
    #[arg(long, default_value_t = 12)]
    rows: usize,

    /// Write the full monthly projection to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the summary as JSON instead of text
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn parameters(&self) -> Result<LeaseParameters> {
        if let Some(path) = &self.params {
            return load_parameters(path)
                .map_err(|e| anyhow!("{}", e))
                .with_context(|| format!("Failed to load parameters from {}", path.display()));
        }

        let missing = |name: &str| anyhow!("--{} is required without --params", name);
        let params = LeaseParameters::new(
            self.full_rental.ok_or_else(|| missing("full-rental"))?,
            self.slc_rate.ok_or_else(|| missing("slc-rate"))? / 100.0,
            self.inhouse_rate.ok_or_else(|| missing("inhouse-rate"))? / 100.0,
            self.slc_nper.ok_or_else(|| missing("slc-nper"))?,
            self.full_term.ok_or_else(|| missing("full-term"))?,
            self.start_date.ok_or_else(|| missing("start-date"))?,
            self.increase_pct,
            self.increase_month,
        )?;
        Ok(params)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let params = cli.parameters()?;

    let engine = ValuationEngine::new(ValuationConfig {
        advance_rate: cli.advance_rate,
    });
    let result = engine.calculate(&params)?;

    if let Some(path) = &cli.csv {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Unable to create {}", path.display()))?;
        for row in &result.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        log::info!("Wrote {} rows to {}", result.len(), path.display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result.summary)?);
        return Ok(());
    }

    println!("Lease Valuation v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");

    println!("Parameters:");
    println!("  Full Rental: {:.2}", params.full_rental);
    println!("  SLC Rate: {:.4}%  In-house Rate: {:.4}%",
        params.slc_interest_rate * 100.0, params.inhouse_interest_rate * 100.0);
    println!("  SLC NPER: {}  Full Term: {}", params.slc_nper, params.full_term);
    println!("  Start: {}  Increase: {}% in month {}",
        params.start_date, params.rental_increase_percentage, params.rental_increase_month);
    println!();

    if cli.rows > 0 {
        println!("{:>6} {:>10} {:>12} {:>14} {:>14} {:>14} {:>14} {:>14} {:>14}",
            "Period", "Date", "Rental", "SLC NPV", "SLC Paydown", "CBR", "Inhouse PV", "Cum Rental", "Cum Escalated");
        println!("{}", "-".repeat(122));

        for row in result.rows.iter().take(cli.rows) {
            println!("{:>6} {:>10} {:>12.2} {:>14.2} {:>14.2} {:>14.2} {:>14.2} {:>14.2} {:>14.2}",
                row.period,
                row.date,
                row.current_full_rental,
                row.slc_npv,
                row.slc_paydown,
                row.cbr,
                row.inhouse_pv,
                row.cumulative_rental,
                row.cumulative_rental_with_increase,
            );
        }

        if result.len() > cli.rows {
            println!("... ({} more months)", result.len() - cli.rows);
        }
        println!();
    }

    println!("Summary:");
    for (label, value) in result.summary.labelled() {
        println!("  {}: {}", label, format_amount(value));
    }

    Ok(())
}
