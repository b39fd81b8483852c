//! Tuition Planner CLI
//!
//! Computes the fee summary and installment schedule for a single contract.
//! `PLANNER_TODAY` (YYYY-MM-DD) overrides the schedule start date when
//! `--today` is not given.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::env;
use std::path::PathBuf;
use tuition_planner::{
    report, ContractInput, FundingType, InstallmentPlanner, PaymentOption, Tariff, ValidationPolicy,
};

/// Tuition fee and installment schedule planner
#[derive(Parser, Debug)]
#[command(name = "tuition_planner")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of credit hours
    #[arg(short = 'c', long, default_value_t = 15)]
    credit_hours: u32,

    /// Funding type (e.g. "Royal Grant", "Teachers Grant", "Loans & Grants")
    #[arg(short, long, default_value = "Regular")]
    funding_type: String,

    /// Payment type (full or partial)
    #[arg(short, long, default_value = "full")]
    payment: PaymentOption,

    /// Amount paid now in JOD (partial payments only)
    #[arg(short, long, default_value_t = 0.0)]
    amount_paid: f64,

    /// Schedule start date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    today: Option<NaiveDate>,

    /// Student name shown on the summary
    #[arg(short, long)]
    student: Option<String>,

    /// Reject invalid hours, amounts, funding types and overpayments
    #[arg(long)]
    strict: bool,

    /// CSV file of credit hour price overrides (FundingType,CreditHourPrice)
    #[arg(long)]
    tariff: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let policy = if cli.strict {
        ValidationPolicy::Strict
    } else {
        ValidationPolicy::Lenient
    };

    let tariff = match &cli.tariff {
        Some(path) => Tariff::from_csv_path(path)
            .with_context(|| format!("Failed to load tariff from {}", path.display()))?,
        None => Tariff::standard(),
    };

    let funding_type = if policy.is_strict() {
        cli.funding_type.parse::<FundingType>()?
    } else {
        FundingType::parse_or_default(&cli.funding_type)
    };

    let today = match cli.today {
        Some(date) => date,
        None => schedule_start_from_env()?,
    };

    let input = ContractInput {
        student_name: cli.student,
        credit_hours: cli.credit_hours,
        funding_type,
        payment_option: cli.payment,
        amount_paid_now: cli.amount_paid,
    };
    log::info!("Planning {:?} from {}", input, today);

    let planner = InstallmentPlanner::new(tariff, policy);
    let result = planner.plan(&input, today).context("Failed to plan contract")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::render_summary(&result));
        println!("\nInstallment Schedule:\n");
        print!("{}", report::render_schedule(&result));
    }

    Ok(())
}

fn schedule_start_from_env() -> Result<NaiveDate> {
    match env::var("PLANNER_TODAY") {
        Ok(value) => value
            .parse()
            .with_context(|| format!("PLANNER_TODAY is not a YYYY-MM-DD date: {}", value)),
        Err(_) => Ok(chrono::Local::now().date_naive()),
    }
}
