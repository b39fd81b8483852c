//! Plain-text and CSV rendering of planning results

use crate::schedule::{Installment, PlanResult};
use serde::Serialize;
use std::fmt::Write;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Payment summary block, one field per line
pub fn render_summary(result: &PlanResult) -> String {
    let s = &result.summary;
    let mut out = String::new();

    let _ = writeln!(out, "Payment Summary:");
    if let Some(name) = &result.student_name {
        let _ = writeln!(out, "  Student: {}", name);
    }
    let _ = writeln!(out, "  Funding Type: {}", s.funding_type);
    let _ = writeln!(out, "  Credit Hour Price (JOD): {:.2}", s.credit_hour_price);
    let _ = writeln!(out, "  Total Credit Hours: {}", s.credit_hours);
    let _ = writeln!(out, "  Hour Fees (JOD): {:.2}", s.hour_fees);
    let _ = writeln!(out, "  University Fixed Fee (JOD): {:.2}", s.fixed_fee);
    let _ = writeln!(out, "  Total Tuition Fee (JOD): {:.2}", s.total_amount);
    let _ = writeln!(out, "  Gas Fee covered by university (JOD): {:.2}", s.gas_fee);
    let _ = writeln!(out, "  Payment Type: {}", s.payment_option);
    let _ = writeln!(out, "  Amount Paid by Student (JOD): {:.2}", s.effective_payment);
    let _ = writeln!(out, "  Generated On: {}", result.generated_on.format(DATE_FORMAT));

    out
}

/// Installment schedule as a fixed-width table
pub fn render_schedule(result: &PlanResult) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:>3} {:>10} {:>10} {:>12} {:>12} {:>12} {:>12} {:>8}",
        "#", "Due", "Reminder", "Amount", "Paid", "Remaining", "Balance", "Status"
    );
    let _ = writeln!(out, "{}", "-".repeat(86));

    for row in &result.installments {
        let _ = writeln!(
            out,
            "{:>3} {:>10} {:>10} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>8}",
            row.index,
            row.due_date.format(DATE_FORMAT),
            row.reminder_date.format(DATE_FORMAT),
            row.installment_amount,
            row.paid_amount,
            row.remaining_after_payment,
            row.outstanding_balance,
            row.status,
        );
    }

    let distribution = result.distribution();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Paid: {:.2} JOD  Remaining: {:.2} JOD",
        distribution.paid_total, distribution.remaining_total
    );

    out
}

/// One installment of one contract, flattened for CSV output
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleCsvRow {
    #[serde(rename = "StudentName")]
    pub student_name: String,
    #[serde(rename = "FundingType")]
    pub funding_type: String,
    #[serde(rename = "CreditHours")]
    pub credit_hours: u32,
    #[serde(rename = "TotalAmount")]
    pub total_amount: String,
    #[serde(rename = "Installment")]
    pub index: u32,
    #[serde(rename = "DueDate")]
    pub due_date: String,
    #[serde(rename = "ReminderDate")]
    pub reminder_date: String,
    #[serde(rename = "InstallmentAmount")]
    pub installment_amount: String,
    #[serde(rename = "PaidAmount")]
    pub paid_amount: String,
    #[serde(rename = "RemainingAfterPayment")]
    pub remaining_after_payment: String,
    #[serde(rename = "OutstandingBalance")]
    pub outstanding_balance: String,
    #[serde(rename = "Status")]
    pub status: String,
}

impl ScheduleCsvRow {
    fn from_installment(result: &PlanResult, row: &Installment) -> Self {
        Self {
            student_name: result.student_name.clone().unwrap_or_default(),
            funding_type: result.summary.funding_type.label().to_string(),
            credit_hours: result.summary.credit_hours,
            total_amount: format!("{:.2}", result.summary.total_amount),
            index: row.index,
            due_date: row.due_date.format(DATE_FORMAT).to_string(),
            reminder_date: row.reminder_date.format(DATE_FORMAT).to_string(),
            installment_amount: format!("{:.2}", row.installment_amount),
            paid_amount: format!("{:.2}", row.paid_amount),
            remaining_after_payment: format!("{:.2}", row.remaining_after_payment),
            outstanding_balance: format!("{:.2}", row.outstanding_balance),
            status: row.status.to_string(),
        }
    }
}

/// Flatten a plan into one CSV row per installment
pub fn csv_rows(result: &PlanResult) -> Vec<ScheduleCsvRow> {
    result
        .installments
        .iter()
        .map(|row| ScheduleCsvRow::from_installment(result, row))
        .collect()
}

/// Write plans as CSV to any writer
pub fn write_schedule_csv<W: std::io::Write>(writer: W, results: &[PlanResult]) -> crate::error::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for result in results {
        for row in csv_rows(result) {
            csv_writer.serialize(row)?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}
