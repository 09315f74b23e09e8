use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::commission::commission;
use crate::config::CashoutConfig;
use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::events::{Event, EventStore};
use crate::payments::Payment;
use crate::types::{AgentId, CashoutId, CashoutStatus, LoanId, PaymentId};

/// one commission credit, traceable back to the payment that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningEntry {
    pub loan_id: LoanId,
    pub payment_id: PaymentId,
    pub interest_amount: Money,
    pub commission_amount: Money,
    pub earned_date: DateTime<Utc>,
}

/// an agent's running commission ledger
///
/// `total_earnings` only ever grows; `collectible_earnings` is what remains
/// after approved cashouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Earnings {
    pub agent_id: AgentId,
    pub total_earnings: Money,
    pub collectible_earnings: Money,
    pub cashed_out_amount: Money,
    pub commission_percentage: Decimal,
    pub entries: Vec<EarningEntry>,
}

/// a pending withdrawal of collectible earnings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashoutRequest {
    pub id: CashoutId,
    pub agent_id: AgentId,
    pub amount: Money,
    pub status: CashoutStatus,
    pub request_date: DateTime<Utc>,
    pub decision_date: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

impl Earnings {
    pub fn new(agent_id: AgentId, commission_percentage: Decimal) -> Self {
        Earnings {
            agent_id,
            total_earnings: Money::ZERO,
            collectible_earnings: Money::ZERO,
            cashed_out_amount: Money::ZERO,
            commission_percentage,
            entries: Vec::new(),
        }
    }

    /// credit commission on the interest portion of a payment
    ///
    /// returns the updated ledger and the commission amount; payments with
    /// no interest component earn nothing and leave the ledger unchanged
    pub fn record_commission(&self, payment: &Payment, events: &mut EventStore) -> (Earnings, Money) {
        if !payment.applied_to_interest.is_positive() {
            return (self.clone(), Money::ZERO);
        }

        let earned = commission(payment.applied_to_interest, self.commission_percentage);

        events.emit(Event::CommissionEarned {
            agent_id: self.agent_id,
            loan_id: payment.loan_id,
            payment_id: payment.id,
            interest_amount: payment.applied_to_interest,
            commission: earned,
            timestamp: payment.payment_date,
        });

        let mut updated = self.clone();
        updated.total_earnings += earned;
        updated.collectible_earnings += earned;
        updated.entries.push(EarningEntry {
            loan_id: payment.loan_id,
            payment_id: payment.id,
            interest_amount: payment.applied_to_interest,
            commission_amount: earned,
            earned_date: payment.payment_date,
        });

        (updated, earned)
    }

    /// open a cashout request against collectible earnings
    pub fn request_cashout(
        &self,
        amount: Money,
        config: &CashoutConfig,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<CashoutRequest> {
        if amount < config.minimum_amount {
            return Err(LoanError::CashoutBelowMinimum {
                minimum: config.minimum_amount,
                requested: amount,
            });
        }
        if amount > self.collectible_earnings {
            return Err(LoanError::InsufficientCollectible {
                available: self.collectible_earnings,
                requested: amount,
            });
        }

        let request = CashoutRequest {
            id: Uuid::new_v4(),
            agent_id: self.agent_id,
            amount,
            status: CashoutStatus::Pending,
            request_date: time_provider.now(),
            decision_date: None,
            rejection_reason: None,
        };

        events.emit(Event::CashoutRequested {
            cashout_id: request.id,
            agent_id: request.agent_id,
            amount,
            timestamp: request.request_date,
        });

        Ok(request)
    }

    /// settle an approved cashout: collectible shrinks, cashed-out grows
    ///
    /// the collectible balance is re-checked at approval time because other
    /// cashouts may have settled since the request was opened
    pub fn approve_cashout(
        &self,
        request: &CashoutRequest,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<(Earnings, CashoutRequest)> {
        if request.status != CashoutStatus::Pending {
            return Err(LoanError::CashoutNotPending {
                status: request.status,
            });
        }
        if request.amount > self.collectible_earnings {
            return Err(LoanError::InsufficientCollectible {
                available: self.collectible_earnings,
                requested: request.amount,
            });
        }

        let now = time_provider.now();
        events.emit(Event::CashoutApproved {
            cashout_id: request.id,
            agent_id: request.agent_id,
            amount: request.amount,
            timestamp: now,
        });

        let mut updated = self.clone();
        updated.collectible_earnings -= request.amount;
        updated.cashed_out_amount += request.amount;

        let mut approved = request.clone();
        approved.status = CashoutStatus::Approved;
        approved.decision_date = Some(now);

        Ok((updated, approved))
    }
}

impl CashoutRequest {
    /// decline a pending request with a stored reason; the ledger is
    /// untouched
    pub fn reject(
        &self,
        reason: impl Into<String>,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<CashoutRequest> {
        if self.status != CashoutStatus::Pending {
            return Err(LoanError::CashoutNotPending {
                status: self.status,
            });
        }

        let reason = reason.into();
        let now = time_provider.now();
        events.emit(Event::CashoutRejected {
            cashout_id: self.id,
            agent_id: self.agent_id,
            reason: reason.clone(),
            timestamp: now,
        });

        let mut rejected = self.clone();
        rejected.status = CashoutStatus::Rejected;
        rejected.decision_date = Some(now);
        rejected.rejection_reason = Some(reason);
        Ok(rejected)
    }
}
