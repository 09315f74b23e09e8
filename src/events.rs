use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::{AgentId, CashoutId, LoanId, LoanStatus, PaymentFrequency, PaymentId};

/// all events recorded by the engine during aggregate operations
///
/// delivery (notifications, transaction logs) is the caller's concern; the
/// engine only collects what happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // lifecycle events
    LoanOriginated {
        loan_id: LoanId,
        principal: Money,
        monthly_rate: Rate,
        tenure_months: u32,
        frequency: PaymentFrequency,
        timestamp: DateTime<Utc>,
    },
    LoanApproved {
        loan_id: LoanId,
        timestamp: DateTime<Utc>,
    },
    LoanActivated {
        loan_id: LoanId,
        timestamp: DateTime<Utc>,
    },
    LoanRejected {
        loan_id: LoanId,
        reason: String,
        timestamp: DateTime<Utc>,
    },
    LoanClosed {
        loan_id: LoanId,
        total_paid: Money,
        timestamp: DateTime<Utc>,
    },
    StatusChanged {
        loan_id: LoanId,
        old_status: LoanStatus,
        new_status: LoanStatus,
        timestamp: DateTime<Utc>,
    },

    // payment events
    PaymentReceived {
        loan_id: LoanId,
        payment_id: PaymentId,
        amount: Money,
        applied_to_penalty: Money,
        applied_to_interest: Money,
        applied_to_principal: Money,
        timestamp: DateTime<Utc>,
    },
    PenaltiesAssessed {
        loan_id: LoanId,
        total_penalties: Money,
        overdue_entries: u32,
        as_of: DateTime<Utc>,
    },

    // earnings events
    CommissionEarned {
        agent_id: AgentId,
        loan_id: LoanId,
        payment_id: PaymentId,
        interest_amount: Money,
        commission: Money,
        timestamp: DateTime<Utc>,
    },
    CashoutRequested {
        cashout_id: CashoutId,
        agent_id: AgentId,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    CashoutApproved {
        cashout_id: CashoutId,
        agent_id: AgentId,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    CashoutRejected {
        cashout_id: CashoutId,
        agent_id: AgentId,
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_event_store_collects_and_drains() {
        let mut store = EventStore::new();
        let loan_id = Uuid::new_v4();

        store.emit(Event::LoanApproved {
            loan_id,
            timestamp: Utc::now(),
        });
        store.emit(Event::LoanActivated {
            loan_id,
            timestamp: Utc::now(),
        });

        assert_eq!(store.events().len(), 2);

        let drained = store.take_events();
        assert_eq!(drained.len(), 2);
        assert!(store.events().is_empty());
    }
}
