use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// unique identifier for a collection agent
pub type AgentId = Uuid;

/// unique identifier for a payment event
pub type PaymentId = Uuid;

/// unique identifier for a cashout request
pub type CashoutId = Uuid;

/// how often a borrower pays against the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    /// every 7 days
    Weekly,
    /// every 15 days
    BiMonthly,
    /// every calendar month
    Monthly,
}

impl PaymentFrequency {
    /// number of payment periods in one month
    ///
    /// weekly uses the 4-weeks-per-month convention; see
    /// `config::WEEKS_PER_MONTH`
    pub fn periods_per_month(&self) -> Decimal {
        match self {
            PaymentFrequency::Weekly => crate::config::WEEKS_PER_MONTH,
            PaymentFrequency::BiMonthly => dec!(2),
            PaymentFrequency::Monthly => Decimal::ONE,
        }
    }

    /// fixed day step between due dates, or None for calendar-month stepping
    pub fn day_step(&self) -> Option<i64> {
        match self {
            PaymentFrequency::Weekly => Some(7),
            PaymentFrequency::BiMonthly => Some(15),
            PaymentFrequency::Monthly => None,
        }
    }
}

/// loan lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    /// schedule generated, waiting for admin decision
    PendingApproval,
    /// approved but not yet disbursed to the borrower
    Approved,
    /// disbursed and collecting payments
    Active,
    /// balance fully repaid
    Closed,
    /// declined, terminal with a stored reason
    Rejected,
}

/// cashout request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashoutStatus {
    Pending,
    Approved,
    Rejected,
}

/// how a payment was distributed across outstanding balances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PaymentAllocation {
    pub to_penalty: Money,
    pub to_interest: Money,
    pub to_principal: Money,
}

impl PaymentAllocation {
    pub fn total(&self) -> Money {
        self.to_penalty + self.to_interest + self.to_principal
    }
}
