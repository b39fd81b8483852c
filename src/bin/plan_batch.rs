//! Plan installment schedules for every contract in a CSV file
//!
//! Usage: plan_batch [contracts.csv]
//! Config via environment variables:
//!   PLANNER_TODAY   schedule start date (YYYY-MM-DD), defaults to today
//!   PLANNER_OUTPUT  output CSV path, defaults to installment_schedule_output.csv
//!   PLANNER_TARIFF  CSV of credit hour price overrides
//! Set PLANNER_STRICT=1 to reject invalid contracts instead of planning them

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rayon::prelude::*;
use std::env;
use std::fs::File;
use std::path::Path;
use std::time::Instant;
use tuition_planner::contract::{load_contracts, loader::DEFAULT_CONTRACTS_PATH};
use tuition_planner::{report, InstallmentPlanner, InstallmentStatus, PlanResult, Tariff, ValidationPolicy};

const DEFAULT_OUTPUT_PATH: &str = "installment_schedule_output.csv";

/// Totals across all planned contracts
#[derive(Debug, Default)]
struct BlockTotals {
    contracts: usize,
    total_fees: f64,
    total_paid: f64,
    total_remaining: f64,
    paid: usize,
    partial: usize,
    pending: usize,
}

impl BlockTotals {
    fn from_results(results: &[PlanResult]) -> Self {
        let mut totals = Self {
            contracts: results.len(),
            ..Default::default()
        };

        for result in results {
            let distribution = result.distribution();
            totals.total_fees += result.summary.total_amount;
            totals.total_paid += distribution.paid_total;
            totals.total_remaining += distribution.remaining_total;

            for row in &result.installments {
                match row.status {
                    InstallmentStatus::Paid => totals.paid += 1,
                    InstallmentStatus::Partial => totals.partial += 1,
                    InstallmentStatus::Pending => totals.pending += 1,
                }
            }
        }

        totals
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let start = Instant::now();

    let contracts_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONTRACTS_PATH.to_string());
    let output_path = env::var("PLANNER_OUTPUT").unwrap_or_else(|_| DEFAULT_OUTPUT_PATH.to_string());

    let policy = if env::var("PLANNER_STRICT").is_ok() {
        ValidationPolicy::Strict
    } else {
        ValidationPolicy::Lenient
    };

    let today: NaiveDate = match env::var("PLANNER_TODAY") {
        Ok(value) => value
            .parse()
            .with_context(|| format!("PLANNER_TODAY is not a YYYY-MM-DD date: {}", value))?,
        Err(_) => chrono::Local::now().date_naive(),
    };

    let tariff = match env::var("PLANNER_TARIFF") {
        Ok(path) => Tariff::from_csv_path(Path::new(&path))
            .with_context(|| format!("Failed to load tariff from {}", path))?,
        Err(_) => Tariff::standard(),
    };

    println!("Loading contracts from {}...", contracts_path);
    let contracts = load_contracts(&contracts_path, policy)
        .with_context(|| format!("Failed to load contracts from {}", contracts_path))?;
    println!("Loaded {} contracts in {:?}", contracts.len(), start.elapsed());

    let planner = InstallmentPlanner::new(tariff, policy);

    // Contracts are independent; plan them in parallel
    let outcomes: Vec<_> = contracts
        .par_iter()
        .map(|contract| planner.plan(contract, today))
        .collect();

    let mut results = Vec::with_capacity(outcomes.len());
    for (line, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(result) => results.push(result),
            // Row numbers are 1-based after the header
            Err(err) => log::error!("Skipping contract on row {}: {}", line + 1, err),
        }
    }

    let file = File::create(&output_path)
        .with_context(|| format!("Failed to create output file {}", output_path))?;
    report::write_schedule_csv(file, &results)?;
    println!("Output written to {}", output_path);

    let totals = BlockTotals::from_results(&results);
    println!("\nBlock Summary (schedules starting {}):", today.format("%Y-%m-%d"));
    println!("  Contracts planned: {}", totals.contracts);
    println!("  Total Tuition Fees: {:.2} JOD", totals.total_fees);
    println!("  Total Paid:         {:.2} JOD", totals.total_paid);
    println!("  Total Remaining:    {:.2} JOD", totals.total_remaining);
    println!(
        "  Installments: {} paid, {} partial, {} pending",
        totals.paid, totals.partial, totals.pending
    );

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
