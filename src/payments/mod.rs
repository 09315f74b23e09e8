pub mod allocation;
pub mod schedule;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{LoanId, PaymentAllocation, PaymentId};

pub use schedule::{level_payment, AmortizationSchedule, ScheduleEntry};

/// a collection event, immutable once created
///
/// the applied amounts record how the allocator distributed it; they sum to
/// `amount` within rounding tolerance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub loan_id: LoanId,
    pub amount: Money,
    pub payment_date: DateTime<Utc>,
    pub applied_to_principal: Money,
    pub applied_to_interest: Money,
    pub applied_to_penalty: Money,
}

impl Payment {
    pub fn allocation(&self) -> PaymentAllocation {
        PaymentAllocation {
            to_penalty: self.applied_to_penalty,
            to_interest: self.applied_to_interest,
            to_principal: self.applied_to_principal,
        }
    }
}
