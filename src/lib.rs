//! Tuition Planner - fee calculation and installment schedules for student contracts
//!
//! This library provides:
//! - Credit hour pricing by funding type with fixed university fees
//! - A three-installment schedule with due and reminder dates
//! - Greedy allocation of a payment across installments, earliest first
//! - CSV loading of contracts and tariff overrides, text and CSV reports

pub mod contract;
pub mod error;
pub mod report;
pub mod schedule;
pub mod tariff;

// Re-export commonly used types
pub use contract::{ContractInput, FundingType, PaymentOption};
pub use error::{PlannerError, ValidationPolicy};
pub use schedule::{FeeSummary, Installment, InstallmentPlanner, InstallmentStatus, PlanResult};
pub use tariff::Tariff;
