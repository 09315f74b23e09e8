//! # loan-engine-rs
//!
//! Core calculation engine for agent-originated microloans: amortization
//! schedule generation, penalty assessment, payment allocation, agent
//! commission accrual, and cashout handling.
//!
//! All monetary arithmetic uses [`Money`], a two-decimal fixed-point
//! wrapper over `rust_decimal` that rounds half-up after every operation,
//! so results are exact and reproducible. Operations on [`Loan`] and
//! [`Earnings`] are pure: they validate, compute, and return new snapshots
//! plus domain events, leaving persistence to the caller.
//!
//! ## Example
//!
//! ```
//! use loan_engine_rs::{
//!     chrono::{TimeZone, Utc},
//!     config::EngineConfig,
//!     events::EventStore,
//!     loan::{Loan, LoanTerms},
//!     types::PaymentFrequency,
//!     Money, Rate, SafeTimeProvider, TimeSource, Uuid,
//! };
//! use rust_decimal_macros::dec;
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let time = SafeTimeProvider::new(TimeSource::Test(start));
//! let mut events = EventStore::new();
//!
//! let loan = Loan::originate(
//!     Uuid::new_v4(),
//!     LoanTerms {
//!         principal: Money::from_major(10_000),
//!         monthly_rate: Rate::from_percentage(dec!(4)),
//!         tenure_months: 3,
//!         frequency: PaymentFrequency::Monthly,
//!         start_date: start,
//!     },
//!     &EngineConfig::default(),
//!     &time,
//!     &mut events,
//! )
//! .unwrap();
//!
//! assert_eq!(loan.schedule.entries.len(), 3);
//! assert_eq!(loan.schedule.level_payment, Money::from_str_exact("3603.49").unwrap());
//! ```

pub mod commission;
pub mod config;
pub mod decimal;
pub mod earnings;
pub mod errors;
pub mod events;
pub mod loan;
pub mod payments;
pub mod penalty;
pub mod types;
pub mod validation;

pub use commission::{
    commission, projected_commission, total_commission, total_commission_per_payment,
};
pub use config::{CashoutConfig, CommissionConfig, EngineConfig, PenaltyConfig, ValidationBounds};
pub use decimal::{Money, Rate};
pub use earnings::{CashoutRequest, EarningEntry, Earnings};
pub use errors::{LoanError, Result};
pub use events::{Event, EventStore};
pub use loan::{Loan, LoanTerms, PaymentReceipt};
pub use payments::{AmortizationSchedule, Payment, ScheduleEntry};
pub use penalty::{PenaltyBreakdown, PenaltyEngine, ScheduleAssessment};
pub use types::{
    AgentId, CashoutId, CashoutStatus, LoanId, LoanStatus, PaymentAllocation, PaymentFrequency,
    PaymentId,
};
pub use validation::{validate_terms, RuleViolation};

// re-export foundation crates so callers share the exact versions
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
