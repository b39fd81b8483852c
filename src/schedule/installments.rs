//! Output structures for fee summaries and installment schedules

use crate::contract::{FundingType, PaymentOption};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cost summary derived from a contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSummary {
    pub funding_type: FundingType,
    pub payment_option: PaymentOption,
    pub credit_hours: u32,

    /// Price per credit hour for the funding type
    pub credit_hour_price: f64,

    /// credit_hour_price * credit_hours
    pub hour_fees: f64,

    /// University fixed fee
    pub fixed_fee: f64,

    /// hour_fees + fixed_fee
    pub total_amount: f64,

    /// Covered by the university; not part of total_amount
    pub gas_fee: f64,

    /// Amount allocated across the installments
    pub effective_payment: f64,
}

/// Settlement state of a single installment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallmentStatus {
    Paid,
    Partial,
    Pending,
}

impl fmt::Display for InstallmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallmentStatus::Paid => f.write_str("Paid"),
            InstallmentStatus::Partial => f.write_str("Partial"),
            InstallmentStatus::Pending => f.write_str("Pending"),
        }
    }
}

/// One row of the installment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based position in the schedule
    pub index: u32,
    pub due_date: NaiveDate,
    pub reminder_date: NaiveDate,
    pub installment_amount: f64,
    pub paid_amount: f64,

    /// Unpaid part of this installment
    pub remaining_after_payment: f64,

    /// Contract balance still owed after this installment's payment
    pub outstanding_balance: f64,

    pub status: InstallmentStatus,
}

impl Installment {
    pub fn is_settled(&self) -> bool {
        self.status == InstallmentStatus::Paid
    }
}

/// Complete planning result for one contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    /// Student name from the contract, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,

    /// Date the schedule was generated for
    pub generated_on: NaiveDate,

    pub summary: FeeSummary,
    pub installments: Vec<Installment>,
}

impl PlanResult {
    /// Paid versus remaining split of the total fee
    ///
    /// A full payment on a rounded-up schedule pays a cent more across the
    /// rows than the fee itself; the paid side is capped at the fee.
    pub fn distribution(&self) -> PaymentDistribution {
        let total_cents = super::to_cents(self.summary.total_amount);
        let paid_cents: i64 = self.installments.iter().map(|i| super::to_cents(i.paid_amount)).sum();
        let paid_cents = paid_cents.min(total_cents);

        PaymentDistribution {
            paid_total: super::from_cents(paid_cents),
            remaining_total: super::from_cents((total_cents - paid_cents).max(0)),
        }
    }

    /// Sum of the scheduled installment amounts (may differ from the total
    /// fee by a rounding remainder)
    pub fn scheduled_total(&self) -> f64 {
        self.installments.iter().map(|i| i.installment_amount).sum()
    }

    /// First installment that is not fully paid
    pub fn next_due(&self) -> Option<&Installment> {
        self.installments.iter().find(|i| !i.is_settled())
    }
}

/// Paid and remaining amounts of a plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentDistribution {
    pub paid_total: f64,
    pub remaining_total: f64,
}
