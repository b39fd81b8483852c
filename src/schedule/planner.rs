//! Installment planner: fee summary and greedy payment waterfall

use super::installments::{FeeSummary, Installment, InstallmentStatus, PlanResult};
use super::{from_cents, to_cents};
use crate::contract::{ContractInput, PaymentOption};
use crate::error::{PlannerError, Result, ValidationPolicy};
use crate::tariff::Tariff;
use chrono::{Duration, NaiveDate};

/// Number of installments in every schedule
pub const INSTALLMENTS_COUNT: u32 = 3;

/// Days between consecutive due dates
pub const INSTALLMENT_SPACING_DAYS: i64 = 30;

/// Days before a due date that the reminder is sent
pub const REMINDER_LEAD_DAYS: i64 = 14;

/// Computes fee summaries and installment schedules for contracts
#[derive(Debug, Clone, Default)]
pub struct InstallmentPlanner {
    tariff: Tariff,
    policy: ValidationPolicy,
}

impl InstallmentPlanner {
    /// Create a planner with the given tariff and validation policy
    pub fn new(tariff: Tariff, policy: ValidationPolicy) -> Self {
        Self { tariff, policy }
    }

    pub fn tariff(&self) -> &Tariff {
        &self.tariff
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Validate a contract and compute its summary and schedule
    pub fn plan(&self, input: &ContractInput, today: NaiveDate) -> Result<PlanResult> {
        self.validate(input)?;

        let summary = self.compute_fee_summary(input, today);
        if summary.effective_payment > summary.total_amount {
            if self.policy.is_strict() {
                return Err(PlannerError::Overpayment {
                    paid: summary.effective_payment,
                    total: summary.total_amount,
                });
            }
            log::warn!(
                "Payment {:.2} exceeds total fee {:.2}; excess {:.2} is not carried forward",
                summary.effective_payment,
                summary.total_amount,
                summary.effective_payment - summary.total_amount,
            );
        }

        let installments = self.build_installment_schedule(&summary, today);

        Ok(PlanResult {
            student_name: input.student_name.clone(),
            generated_on: today,
            summary,
            installments,
        })
    }

    /// Check a contract against the strict policy; lenient planners accept
    /// anything
    pub fn validate(&self, input: &ContractInput) -> Result<()> {
        if !self.policy.is_strict() {
            return Ok(());
        }

        if input.credit_hours == 0 {
            return Err(PlannerError::ZeroCreditHours);
        }
        if input.is_partial() {
            if !input.amount_paid_now.is_finite() {
                return Err(PlannerError::NonFinitePayment);
            }
            if input.amount_paid_now < 0.0 {
                return Err(PlannerError::NegativePayment(input.amount_paid_now));
            }
        }

        Ok(())
    }

    /// Compute the cost summary for a contract
    pub fn compute_fee_summary(&self, input: &ContractInput, today: NaiveDate) -> FeeSummary {
        let credit_hour_price = self.tariff.price_for(input.funding_type);
        let hour_fees = credit_hour_price * input.credit_hours as f64;
        let total_amount = hour_fees + self.tariff.fixed_fee;

        let effective_payment = match input.payment_option {
            PaymentOption::Full => total_amount,
            PaymentOption::Partial => input.amount_paid_now,
        };

        log::debug!(
            "Fee summary on {}: {} x {} h @ {:.2} = {:.2} + {:.2} fixed = {:.2}, paying {:.2}",
            today,
            input.funding_type,
            input.credit_hours,
            credit_hour_price,
            hour_fees,
            self.tariff.fixed_fee,
            total_amount,
            effective_payment,
        );

        FeeSummary {
            funding_type: input.funding_type,
            payment_option: input.payment_option,
            credit_hours: input.credit_hours,
            credit_hour_price,
            hour_fees,
            fixed_fee: self.tariff.fixed_fee,
            total_amount,
            gas_fee: self.tariff.gas_fee,
            effective_payment,
        }
    }

    /// Split the total fee into installments and allocate the effective
    /// payment to them earliest first
    ///
    /// The waterfall runs in whole cents, so a payment that lands exactly on
    /// an installment boundary settles that installment. The installment
    /// amounts can still sum to the total fee plus or minus a cent or two.
    pub fn build_installment_schedule(&self, summary: &FeeSummary, today: NaiveDate) -> Vec<Installment> {
        let installment_cents = to_cents(summary.total_amount / INSTALLMENTS_COUNT as f64);
        let total_cents = to_cents(summary.total_amount);

        // A full payment settles every row, including a rounded-up last cent
        let settles_all = summary.payment_option == PaymentOption::Full;

        let mut remaining_cents = to_cents(summary.effective_payment);
        let mut paid_so_far = 0;
        let mut installments = Vec::with_capacity(INSTALLMENTS_COUNT as usize);

        for i in 0..INSTALLMENTS_COUNT {
            let due_date = today + Duration::days(INSTALLMENT_SPACING_DAYS * i as i64);
            let reminder_date = due_date - Duration::days(REMINDER_LEAD_DAYS);

            let (paid, status) = if settles_all || remaining_cents >= installment_cents {
                (installment_cents, InstallmentStatus::Paid)
            } else if remaining_cents > 0 {
                (remaining_cents, InstallmentStatus::Partial)
            } else {
                (0, InstallmentStatus::Pending)
            };

            remaining_cents -= paid;
            paid_so_far += paid;

            installments.push(Installment {
                index: i + 1,
                due_date,
                reminder_date,
                installment_amount: from_cents(installment_cents),
                paid_amount: from_cents(paid),
                remaining_after_payment: from_cents(installment_cents - paid),
                outstanding_balance: from_cents((total_cents - paid_so_far).max(0)),
                status,
            });
        }

        installments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::FundingType;
    use crate::schedule::round_money;
    use approx::assert_abs_diff_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn planner() -> InstallmentPlanner {
        InstallmentPlanner::default()
    }

    fn strict_planner() -> InstallmentPlanner {
        InstallmentPlanner::new(Tariff::standard(), ValidationPolicy::Strict)
    }

    #[test]
    fn test_total_amount_formula() {
        let planner = planner();
        let today = date(2024, 1, 15);

        for funding in FundingType::ALL {
            let price = planner.tariff().price_for(funding);
            for hours in 1..=24 {
                let summary = planner.compute_fee_summary(&ContractInput::full(hours, funding), today);
                assert_eq!(summary.credit_hour_price, price);
                assert_eq!(summary.hour_fees, price * hours as f64);
                assert_eq!(summary.total_amount, price * hours as f64 + 60.0);
                assert_eq!(summary.gas_fee, 13.5);
            }
        }
    }

    #[test]
    fn test_teachers_grant_partial_example() {
        let input = ContractInput::partial(15, FundingType::TeachersGrant, 400.0);
        let result = planner().plan(&input, date(2024, 1, 15)).unwrap();

        assert_eq!(result.summary.hour_fees, 600.0);
        assert_eq!(result.summary.total_amount, 660.0);
        assert_eq!(result.summary.effective_payment, 400.0);

        let rows = &result.installments;
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.installment_amount == 220.0));

        assert_eq!(rows[0].paid_amount, 220.0);
        assert_eq!(rows[0].status, InstallmentStatus::Paid);
        assert_eq!(rows[0].remaining_after_payment, 0.0);

        assert_eq!(rows[1].paid_amount, 180.0);
        assert_eq!(rows[1].status, InstallmentStatus::Partial);
        assert_eq!(rows[1].remaining_after_payment, 40.0);

        assert_eq!(rows[2].paid_amount, 0.0);
        assert_eq!(rows[2].status, InstallmentStatus::Pending);
        assert_eq!(rows[2].remaining_after_payment, 220.0);

        // Running contract balance
        assert_eq!(rows[0].outstanding_balance, 440.0);
        assert_eq!(rows[1].outstanding_balance, 260.0);
        assert_eq!(rows[2].outstanding_balance, 260.0);
    }

    #[test]
    fn test_loans_and_grants_full_example() {
        let input = ContractInput::full(6, FundingType::LoansAndGrants);
        let result = planner().plan(&input, date(2024, 1, 15)).unwrap();

        assert_eq!(result.summary.total_amount, 60.0);
        for row in &result.installments {
            assert_eq!(row.installment_amount, 20.0);
            assert_eq!(row.paid_amount, 20.0);
            assert_eq!(row.remaining_after_payment, 0.0);
            assert_eq!(row.status, InstallmentStatus::Paid);
        }
    }

    #[test]
    fn test_full_payment_settles_everything() {
        let planner = planner();
        for funding in FundingType::ALL {
            for hours in [1, 3, 10, 15, 24] {
                let result = planner
                    .plan(&ContractInput::full(hours, funding), date(2024, 6, 1))
                    .unwrap();
                for row in &result.installments {
                    assert_eq!(row.status, InstallmentStatus::Paid, "{} {} h", funding, hours);
                    assert_eq!(row.remaining_after_payment, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_zero_partial_payment_is_all_pending() {
        let input = ContractInput::partial(12, FundingType::Regular, 0.0);
        let result = planner().plan(&input, date(2024, 1, 15)).unwrap();

        for row in &result.installments {
            assert_eq!(row.status, InstallmentStatus::Pending);
            assert_eq!(row.paid_amount, 0.0);
            assert_eq!(row.remaining_after_payment, row.installment_amount);
        }
        assert!(result.next_due().is_some_and(|i| i.index == 1));
    }

    #[test]
    fn test_installment_sum_within_rounding() {
        let planner = planner();
        for funding in FundingType::ALL {
            for hours in 1..=24 {
                let result = planner
                    .plan(&ContractInput::full(hours, funding), date(2024, 1, 15))
                    .unwrap();
                assert_abs_diff_eq!(
                    result.scheduled_total(),
                    result.summary.total_amount,
                    epsilon = 0.02 + 1e-9
                );
            }
        }

        // 10 h Regular: 560 / 3 = 186.67, sums to 560.01
        let result = planner
            .plan(&ContractInput::full(10, FundingType::Regular), date(2024, 1, 15))
            .unwrap();
        assert_eq!(result.installments[0].installment_amount, 186.67);
        assert_abs_diff_eq!(result.scheduled_total(), 560.01, epsilon = 1e-9);
        assert!(result.installments.iter().all(|r| r.status == InstallmentStatus::Paid));
        assert_eq!(result.installments[2].outstanding_balance, 0.0);

        // Rows pay 560.01 in total, the distribution stays within the fee
        let distribution = result.distribution();
        assert_eq!(distribution.paid_total, 560.0);
        assert_eq!(distribution.remaining_total, 0.0);
    }

    #[test]
    fn test_partial_payment_of_full_total_leaves_rounding_cent() {
        // Paying the exact total as a partial payment runs one cent short
        // on the last rounded-up installment
        let input = ContractInput::partial(10, FundingType::Regular, 560.0);
        let rows = planner().plan(&input, date(2024, 1, 15)).unwrap().installments;

        assert_eq!(rows[0].status, InstallmentStatus::Paid);
        assert_eq!(rows[1].status, InstallmentStatus::Paid);
        assert_eq!(rows[2].status, InstallmentStatus::Partial);
        assert_abs_diff_eq!(rows[2].paid_amount, 186.66, epsilon = 1e-9);
        assert_abs_diff_eq!(rows[2].remaining_after_payment, 0.01, epsilon = 1e-9);
    }

    #[test]
    fn test_due_and_reminder_dates() {
        let input = ContractInput::partial(15, FundingType::TeachersGrant, 400.0);
        let rows = planner().plan(&input, date(2024, 1, 15)).unwrap().installments;

        let due: Vec<_> = rows.iter().map(|r| r.due_date.format("%Y-%m-%d").to_string()).collect();
        assert_eq!(due, ["2024-01-15", "2024-02-14", "2024-03-15"]);

        let reminders: Vec<_> =
            rows.iter().map(|r| r.reminder_date.format("%Y-%m-%d").to_string()).collect();
        assert_eq!(reminders, ["2024-01-01", "2024-01-31", "2024-03-01"]);

        assert_eq!(rows.iter().map(|r| r.index).collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn test_allocation_is_monotonic() {
        let planner = planner();
        let today = date(2024, 1, 15);
        let mut previous: Option<Vec<Installment>> = None;

        let mut amount = 0.0;
        while amount <= 800.0 {
            let input = ContractInput::partial(15, FundingType::TeachersGrant, amount);
            let rows = planner.plan(&input, today).unwrap().installments;

            if let Some(prev) = &previous {
                for (before, after) in prev.iter().zip(&rows) {
                    assert!(after.paid_amount >= before.paid_amount, "amount {}", amount);
                    if before.status == InstallmentStatus::Paid {
                        assert_eq!(after.status, InstallmentStatus::Paid);
                    }
                }
            }
            previous = Some(rows);
            amount += 7.25;
        }
    }

    #[test]
    fn test_overpayment_is_discarded_when_lenient() {
        let input = ContractInput::partial(15, FundingType::TeachersGrant, 1000.0);
        let result = planner().plan(&input, date(2024, 1, 15)).unwrap();

        assert!(result.installments.iter().all(|r| r.status == InstallmentStatus::Paid));
        let distribution = result.distribution();
        assert_eq!(distribution.paid_total, 660.0);
        assert_eq!(distribution.remaining_total, 0.0);
        assert!(result.next_due().is_none());
    }

    #[test]
    fn test_payment_on_installment_boundary() {
        // 10 h Teachers Grant: 460 / 3 = 153.33, sums to 459.99
        let planner = planner();
        let today = date(2024, 1, 15);

        let rows = planner
            .plan(&ContractInput::partial(10, FundingType::TeachersGrant, 459.99), today)
            .unwrap()
            .installments;
        for row in &rows {
            assert_eq!(row.installment_amount, 153.33);
            assert_eq!(row.paid_amount, 153.33);
            assert_eq!(row.remaining_after_payment, 0.0);
            assert_eq!(row.status, InstallmentStatus::Paid);
        }
        assert_eq!(rows[2].outstanding_balance, 0.01);

        let rows = planner
            .plan(&ContractInput::partial(10, FundingType::TeachersGrant, 306.66), today)
            .unwrap()
            .installments;
        assert_eq!(rows[0].status, InstallmentStatus::Paid);
        assert_eq!(rows[1].status, InstallmentStatus::Paid);
        assert_eq!(rows[1].remaining_after_payment, 0.0);
        assert_eq!(rows[2].status, InstallmentStatus::Pending);
        assert_eq!(rows[2].remaining_after_payment, 153.33);
    }

    #[test]
    fn test_boundary_payments_for_rounded_down_totals() {
        let planner = planner();
        let today = date(2024, 1, 15);

        for funding in FundingType::ALL {
            for hours in 1..=24 {
                let summary = planner.compute_fee_summary(&ContractInput::full(hours, funding), today);
                let amount = round_money(summary.total_amount / 3.0);

                for settled in 1..=3usize {
                    let paid_now = amount * settled as f64;
                    let input = ContractInput::partial(hours, funding, paid_now);
                    let rows = planner.plan(&input, today).unwrap().installments;

                    for (i, row) in rows.iter().enumerate() {
                        let expected = if i < settled {
                            InstallmentStatus::Paid
                        } else {
                            InstallmentStatus::Pending
                        };
                        assert_eq!(
                            row.status, expected,
                            "{} {} h paying {} row {}",
                            funding, hours, paid_now, row.index
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_partial_payment_with_cents() {
        // 10 h Regular: 186.67 per installment
        let input = ContractInput::partial(10, FundingType::Regular, 200.0);
        let rows = planner().plan(&input, date(2024, 1, 15)).unwrap().installments;

        assert_eq!(rows[0].paid_amount, 186.67);
        assert_eq!(rows[1].status, InstallmentStatus::Partial);
        assert_abs_diff_eq!(rows[1].paid_amount, 13.33, epsilon = 1e-9);
        assert_abs_diff_eq!(rows[1].remaining_after_payment, 173.34, epsilon = 1e-9);
        assert_eq!(rows[2].status, InstallmentStatus::Pending);
    }

    #[test]
    fn test_distribution() {
        let input = ContractInput::partial(15, FundingType::TeachersGrant, 400.0);
        let distribution = planner().plan(&input, date(2024, 1, 15)).unwrap().distribution();
        assert_eq!(distribution.paid_total, 400.0);
        assert_eq!(distribution.remaining_total, 260.0);
    }

    #[test]
    fn test_strict_policy_rejections() {
        let planner = strict_planner();
        let today = date(2024, 1, 15);

        let err = planner.plan(&ContractInput::full(0, FundingType::Regular), today).unwrap_err();
        assert!(matches!(err, PlannerError::ZeroCreditHours));

        let err = planner
            .plan(&ContractInput::partial(9, FundingType::Regular, -10.0), today)
            .unwrap_err();
        assert!(matches!(err, PlannerError::NegativePayment(_)));

        let err = planner
            .plan(&ContractInput::partial(9, FundingType::Regular, f64::NAN), today)
            .unwrap_err();
        assert!(matches!(err, PlannerError::NonFinitePayment));

        let err = planner
            .plan(&ContractInput::partial(15, FundingType::TeachersGrant, 700.0), today)
            .unwrap_err();
        assert!(matches!(err, PlannerError::Overpayment { .. }));

        assert!(planner
            .plan(&ContractInput::partial(15, FundingType::TeachersGrant, 660.0), today)
            .is_ok());
    }

    #[test]
    fn test_lenient_negative_payment_is_pending() {
        let input = ContractInput::partial(9, FundingType::StaffGrant, -25.0);
        let rows = planner().plan(&input, date(2024, 1, 15)).unwrap().installments;
        assert!(rows.iter().all(|r| r.status == InstallmentStatus::Pending));
    }

    #[test]
    fn test_full_payment_ignores_amount_paid() {
        let mut input = ContractInput::full(3, FundingType::Parallel);
        input.amount_paid_now = 5.0;
        let summary = planner().compute_fee_summary(&input, date(2024, 1, 15));
        assert_eq!(summary.effective_payment, 240.0);
    }
}
