//! Fee computation and installment allocation

mod installments;
mod planner;

pub use installments::{FeeSummary, Installment, InstallmentStatus, PaymentDistribution, PlanResult};
pub use planner::{
    InstallmentPlanner, INSTALLMENTS_COUNT, INSTALLMENT_SPACING_DAYS, REMINDER_LEAD_DAYS,
};

/// Round a monetary amount to 2 decimal places
pub fn round_money(amount: f64) -> f64 {
    from_cents(to_cents(amount))
}

/// Whole cents nearest to an amount; NaN maps to 0
pub(crate) fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

pub(crate) fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}
