//! Contract data structures for a single student enrolment

use crate::error::PlannerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Funding tier of the student, which sets the credit hour price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FundingType {
    RoyalGrant,
    TeachersGrant,
    StaffGrant,
    LoansAndGrants,
    Regular,
    Parallel,
}

impl FundingType {
    pub const ALL: [FundingType; 6] = [
        FundingType::RoyalGrant,
        FundingType::TeachersGrant,
        FundingType::StaffGrant,
        FundingType::LoansAndGrants,
        FundingType::Regular,
        FundingType::Parallel,
    ];

    /// Display label as shown on the contract form
    pub fn label(&self) -> &'static str {
        match self {
            FundingType::RoyalGrant => "Royal Grant",
            FundingType::TeachersGrant => "Teachers Grant",
            FundingType::StaffGrant => "Staff Grant",
            FundingType::LoansAndGrants => "Loans & Grants",
            FundingType::Regular => "Regular",
            FundingType::Parallel => "Parallel",
        }
    }

    /// Parse a label, falling back to Regular for anything unrecognised
    pub fn parse_or_default(label: &str) -> Self {
        label.parse().unwrap_or_else(|_| {
            log::warn!("Unrecognised funding type {:?}, using Regular pricing", label);
            FundingType::Regular
        })
    }
}

impl FromStr for FundingType {
    type Err = PlannerError;

    /// Accepts form labels ("Loans & Grants"), variant names ("LoansAndGrants")
    /// and kebab/snake forms, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "royalgrant" => Ok(FundingType::RoyalGrant),
            "teachersgrant" => Ok(FundingType::TeachersGrant),
            "staffgrant" => Ok(FundingType::StaffGrant),
            "loansgrants" | "loansandgrants" => Ok(FundingType::LoansAndGrants),
            "regular" => Ok(FundingType::Regular),
            "parallel" => Ok(FundingType::Parallel),
            _ => Err(PlannerError::UnknownFundingType(s.to_string())),
        }
    }
}

impl fmt::Display for FundingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether the whole fee is settled now or only part of it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentOption {
    #[default]
    Full,
    Partial,
}

impl FromStr for PaymentOption {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(PaymentOption::Full),
            "partial" => Ok(PaymentOption::Partial),
            _ => Err(PlannerError::UnknownPaymentOption(s.to_string())),
        }
    }
}

impl fmt::Display for PaymentOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentOption::Full => f.write_str("Full"),
            PaymentOption::Partial => f.write_str("Partial"),
        }
    }
}

/// Snapshot of the contract form for one student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractInput {
    /// Student name, carried through to reports only
    #[serde(default)]
    pub student_name: Option<String>,

    /// Enrolled credit hours (at least 1)
    pub credit_hours: u32,

    /// Funding tier
    pub funding_type: FundingType,

    /// Full or partial payment
    pub payment_option: PaymentOption,

    /// Amount paid now; ignored unless the payment option is Partial
    #[serde(default)]
    pub amount_paid_now: f64,
}

impl ContractInput {
    /// Contract settled in full
    pub fn full(credit_hours: u32, funding_type: FundingType) -> Self {
        Self {
            student_name: None,
            credit_hours,
            funding_type,
            payment_option: PaymentOption::Full,
            amount_paid_now: 0.0,
        }
    }

    /// Contract with a partial payment made now
    pub fn partial(credit_hours: u32, funding_type: FundingType, amount_paid_now: f64) -> Self {
        Self {
            student_name: None,
            credit_hours,
            funding_type,
            payment_option: PaymentOption::Partial,
            amount_paid_now,
        }
    }

    pub fn with_student_name(mut self, name: impl Into<String>) -> Self {
        self.student_name = Some(name.into());
        self
    }

    pub fn is_partial(&self) -> bool {
        matches!(self.payment_option, PaymentOption::Partial)
    }
}
