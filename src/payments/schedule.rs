use chrono::{DateTime, Duration, Months, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::types::PaymentFrequency;

/// one scheduled installment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based sequence, ordered by due date
    pub payment_number: u32,
    pub due_date: DateTime<Utc>,
    pub principal_due: Money,
    pub interest_due: Money,
    pub total_due: Money,
    pub remaining_balance_after: Money,
    /// overdue surcharge, recomputed on demand by penalty assessment
    pub penalty: Money,
    pub paid_amount: Money,
    pub is_paid: bool,
}

/// amortization schedule for a loan
///
/// the final entry absorbs the rounding residual so that principal portions
/// sum exactly to the loan principal and the balance ends at 0.00
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub entries: Vec<ScheduleEntry>,
    pub level_payment: Money,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl AmortizationSchedule {
    /// generate the full schedule
    ///
    /// deterministic given identical inputs; all date arithmetic is UTC and
    /// monthly due dates use calendar months (day-of-month clamped at
    /// shorter month ends), not fixed 30-day steps
    pub fn generate(
        principal: Money,
        monthly_rate: Rate,
        tenure_months: u32,
        frequency: PaymentFrequency,
        start_date: DateTime<Utc>,
    ) -> Result<Self> {
        let n = payment_count(tenure_months, frequency);
        if n == 0 {
            return Err(LoanError::InvalidConfiguration {
                message: format!("tenure of {tenure_months} months yields no payments"),
            });
        }

        let period_rate = monthly_rate.per_period(frequency.periods_per_month());
        let emi = level_payment(principal, period_rate, n);
        let r = period_rate.as_decimal();

        let mut entries = Vec::with_capacity(n as usize);
        let mut balance = principal;

        for i in 1..=n {
            let due_date = due_date_for(start_date, frequency, i)?;
            let interest_due = balance * r;

            let (principal_due, total_due) = if i == n {
                // final entry absorbs the rounding residual
                (balance, balance + interest_due)
            } else {
                (emi - interest_due, emi)
            };

            balance = (balance - principal_due).max(Money::ZERO);

            entries.push(ScheduleEntry {
                payment_number: i,
                due_date,
                principal_due,
                interest_due,
                total_due,
                remaining_balance_after: balance,
                penalty: Money::ZERO,
                paid_amount: Money::ZERO,
                is_paid: false,
            });
        }

        let total_interest = entries
            .iter()
            .map(|e| e.interest_due)
            .fold(Money::ZERO, |acc, x| acc + x);

        let total_payment = entries
            .iter()
            .map(|e| e.total_due)
            .fold(Money::ZERO, |acc, x| acc + x);

        Ok(Self {
            entries,
            level_payment: emi,
            total_interest,
            total_payment,
        })
    }

    /// get entry for a specific payment number
    pub fn get_entry(&self, payment_number: u32) -> Option<&ScheduleEntry> {
        self.entries.get((payment_number - 1) as usize)
    }

    /// first entry not yet fully paid
    pub fn next_unpaid_entry(&self) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| !e.is_paid)
    }
}

/// number of payments for a tenure at a given frequency
fn payment_count(tenure_months: u32, frequency: PaymentFrequency) -> u32 {
    let periods = Decimal::from(tenure_months) * frequency.periods_per_month();
    periods.ceil().to_u32().unwrap_or(0)
}

/// due date of the i-th payment
fn due_date_for(
    start_date: DateTime<Utc>,
    frequency: PaymentFrequency,
    payment_number: u32,
) -> Result<DateTime<Utc>> {
    match frequency.day_step() {
        Some(days) => Ok(start_date + Duration::days(days * payment_number as i64)),
        None => start_date
            .checked_add_months(Months::new(payment_number))
            .ok_or_else(|| LoanError::InvalidConfiguration {
                message: format!("due date overflow at payment {payment_number}"),
            }),
    }
}

/// level payment amount per period
///
/// A = P * r * (1 + r)^n / ((1 + r)^n - 1), falling back to straight-line
/// P / n when the rate is zero
pub fn level_payment(principal: Money, period_rate: Rate, periods: u32) -> Money {
    if periods == 0 {
        return principal;
    }

    let r = period_rate.as_decimal();
    if r.is_zero() {
        return principal / Decimal::from(periods);
    }

    let mut compound = Decimal::ONE;
    let base = Decimal::ONE + r;
    for _ in 0..periods {
        compound *= base;
    }

    let numerator = principal.as_decimal() * r * compound;
    let denominator = compound - Decimal::ONE;

    Money::from_decimal(numerator / denominator)
}
