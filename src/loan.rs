use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{EngineConfig, PenaltyConfig};
use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::events::{Event, EventStore};
use crate::payments::allocation::{allocate, mark_paid_entries};
use crate::payments::{AmortizationSchedule, Payment};
use crate::penalty::PenaltyEngine;
use crate::types::{AgentId, LoanId, LoanStatus, PaymentFrequency};
use crate::validation::validate_terms;

/// immutable origination parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub monthly_rate: Rate,
    pub tenure_months: u32,
    pub frequency: PaymentFrequency,
    pub start_date: DateTime<Utc>,
}

/// loan aggregate
///
/// operations never mutate in place: each returns a new snapshot for the
/// caller to persist (write-back concurrency is the persistence layer's
/// responsibility)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub agent_id: AgentId,
    pub terms: LoanTerms,
    pub schedule: AmortizationSchedule,
    pub status: LoanStatus,
    pub outstanding_balance: Money,
    pub total_paid: Money,
    pub total_penalties_outstanding: Money,
    pub rejection_reason: Option<String>,
    pub payment_count: u32,
    pub last_payment_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub status_changed_at: DateTime<Utc>,
}

/// result of applying a payment: the immutable payment record plus the
/// updated loan snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub payment: Payment,
    pub loan: Loan,
}

impl Loan {
    /// originate a loan: validate terms, generate the schedule, start in
    /// pending approval
    pub fn originate(
        agent_id: AgentId,
        terms: LoanTerms,
        config: &EngineConfig,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<Loan> {
        let violations = validate_terms(
            terms.principal,
            terms.monthly_rate,
            terms.tenure_months,
            &config.validation,
        );
        if !violations.is_empty() {
            return Err(LoanError::ValidationFailed { violations });
        }

        let schedule = AmortizationSchedule::generate(
            terms.principal,
            terms.monthly_rate,
            terms.tenure_months,
            terms.frequency,
            terms.start_date,
        )?;

        let loan_id = Uuid::new_v4();
        let now = time_provider.now();

        events.emit(Event::LoanOriginated {
            loan_id,
            principal: terms.principal,
            monthly_rate: terms.monthly_rate,
            tenure_months: terms.tenure_months,
            frequency: terms.frequency,
            timestamp: now,
        });

        Ok(Loan {
            id: loan_id,
            agent_id,
            outstanding_balance: terms.principal,
            terms,
            schedule,
            status: LoanStatus::PendingApproval,
            total_paid: Money::ZERO,
            total_penalties_outstanding: Money::ZERO,
            rejection_reason: None,
            payment_count: 0,
            last_payment_date: None,
            created_at: now,
            status_changed_at: now,
        })
    }

    /// admin approval of a pending loan
    pub fn approve(
        &self,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<Loan> {
        self.require_status(LoanStatus::PendingApproval)?;

        let now = time_provider.now();
        events.emit(Event::LoanApproved {
            loan_id: self.id,
            timestamp: now,
        });

        Ok(self.with_status(LoanStatus::Approved, now, events))
    }

    /// disbursement: the loan starts collecting
    pub fn activate(
        &self,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<Loan> {
        self.require_status(LoanStatus::Approved)?;

        let now = time_provider.now();
        events.emit(Event::LoanActivated {
            loan_id: self.id,
            timestamp: now,
        });

        Ok(self.with_status(LoanStatus::Active, now, events))
    }

    /// admin rejection, terminal with a stored reason
    pub fn reject(
        &self,
        reason: impl Into<String>,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<Loan> {
        self.require_status(LoanStatus::PendingApproval)?;

        let reason = reason.into();
        let now = time_provider.now();
        events.emit(Event::LoanRejected {
            loan_id: self.id,
            reason: reason.clone(),
            timestamp: now,
        });

        let mut rejected = self.with_status(LoanStatus::Rejected, now, events);
        rejected.rejection_reason = Some(reason);
        Ok(rejected)
    }

    /// recompute every unpaid entry's penalty as of a date and refresh the
    /// outstanding penalty total
    pub fn assess_penalties(
        &self,
        as_of: DateTime<Utc>,
        config: &PenaltyConfig,
        events: &mut EventStore,
    ) -> Loan {
        let engine = PenaltyEngine::new(config.clone());
        let assessment = engine.assess_schedule(&self.schedule.entries, as_of);

        events.emit(Event::PenaltiesAssessed {
            loan_id: self.id,
            total_penalties: assessment.total_penalties,
            overdue_entries: assessment.overdue_entries,
            as_of,
        });

        let mut assessed = self.clone();
        assessed.schedule.entries = assessment.entries;
        assessed.total_penalties_outstanding = assessment.total_penalties;
        assessed
    }

    /// assess penalties as of the system clock
    pub fn assess_penalties_now(&self, config: &PenaltyConfig, events: &mut EventStore) -> Loan {
        let time = SafeTimeProvider::new(hourglass_rs::TimeSource::System);
        self.assess_penalties(time.now(), config, events)
    }

    /// apply a collection against the loan
    ///
    /// distributes the amount penalty-first, then the current schedule
    /// entry, then overflow to principal; closes the loan when the balance
    /// reaches zero
    pub fn apply_payment(
        &self,
        amount: Money,
        payment_date: DateTime<Utc>,
        events: &mut EventStore,
    ) -> Result<PaymentReceipt> {
        if !amount.is_positive() {
            return Err(LoanError::InvalidPaymentAmount { amount });
        }
        if self.status != LoanStatus::Active {
            return Err(LoanError::LoanNotActive {
                status: self.status,
            });
        }

        let allocation = allocate(
            &self.schedule.entries,
            self.total_paid,
            self.total_penalties_outstanding,
            amount,
        );

        // components must reconstruct the payment; a mismatch means the
        // allocator itself is broken, so abort before any state is derived
        let allocated = allocation.total();
        if (allocated - amount).abs() > Money::CENT {
            return Err(LoanError::ArithmeticInconsistency {
                payment_amount: amount,
                allocated,
            });
        }

        let payment = Payment {
            id: Uuid::new_v4(),
            loan_id: self.id,
            amount,
            payment_date,
            applied_to_principal: allocation.to_principal,
            applied_to_interest: allocation.to_interest,
            applied_to_penalty: allocation.to_penalty,
        };

        let mut updated = self.clone();
        updated.outstanding_balance =
            (self.outstanding_balance - allocation.to_principal).max(Money::ZERO);
        updated.total_paid = self.total_paid + amount;
        updated.total_penalties_outstanding =
            (self.total_penalties_outstanding - allocation.to_penalty).max(Money::ZERO);
        updated.payment_count = self.payment_count + 1;
        updated.last_payment_date = Some(payment_date);
        mark_paid_entries(&mut updated.schedule.entries, updated.total_paid);

        events.emit(Event::PaymentReceived {
            loan_id: self.id,
            payment_id: payment.id,
            amount,
            applied_to_penalty: allocation.to_penalty,
            applied_to_interest: allocation.to_interest,
            applied_to_principal: allocation.to_principal,
            timestamp: payment_date,
        });

        if updated.outstanding_balance.is_zero() {
            updated = updated.with_status(LoanStatus::Closed, payment_date, events);
            events.emit(Event::LoanClosed {
                loan_id: updated.id,
                total_paid: updated.total_paid,
                timestamp: payment_date,
            });
        }

        Ok(PaymentReceipt {
            payment,
            loan: updated,
        })
    }

    /// apply a collection dated by the system clock
    pub fn apply_payment_now(&self, amount: Money, events: &mut EventStore) -> Result<PaymentReceipt> {
        let time = SafeTimeProvider::new(hourglass_rs::TimeSource::System);
        self.apply_payment(amount, time.now(), events)
    }

    pub fn is_closed(&self) -> bool {
        self.status == LoanStatus::Closed
    }

    fn require_status(&self, expected: LoanStatus) -> Result<()> {
        if self.status != expected {
            return Err(LoanError::InvalidTransition {
                current: self.status,
                expected,
            });
        }
        Ok(())
    }

    fn with_status(
        &self,
        new_status: LoanStatus,
        timestamp: DateTime<Utc>,
        events: &mut EventStore,
    ) -> Loan {
        events.emit(Event::StatusChanged {
            loan_id: self.id,
            old_status: self.status,
            new_status,
            timestamp,
        });

        let mut updated = self.clone();
        updated.status = new_status;
        updated.status_changed_at = timestamp;
        updated
    }
}
