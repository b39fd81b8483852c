//! Error types and input validation policy

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while validating contracts or loading planner data
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Credit hours must be at least 1")]
    ZeroCreditHours,

    #[error("Amount paid cannot be negative: {0}")]
    NegativePayment(f64),

    #[error("Amount paid must be a finite number")]
    NonFinitePayment,

    #[error("Unknown funding type: {0}")]
    UnknownFundingType(String),

    #[error("Unknown payment option: {0}. Must be one of: full, partial")]
    UnknownPaymentOption(String),

    #[error("Amount paid {paid:.2} exceeds total tuition fee {total:.2}")]
    Overpayment { paid: f64, total: f64 },

    #[error("Invalid tariff row: {0}")]
    InvalidTariffRow(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;

/// How strictly contract inputs are checked before planning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Accept inputs as given: unknown funding falls back to the Regular
    /// price and any overpayment is dropped after the last installment
    #[default]
    Lenient,
    /// Reject zero hours, negative or non-finite amounts, unknown funding
    /// labels and payments above the total fee
    Strict,
}

impl ValidationPolicy {
    pub fn is_strict(&self) -> bool {
        matches!(self, ValidationPolicy::Strict)
    }
}
