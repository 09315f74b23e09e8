use thiserror::Error;

use crate::decimal::Money;
use crate::types::{CashoutStatus, LoanStatus};
use crate::validation::RuleViolation;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("loan parameters out of bounds: {}", crate::validation::describe(.violations))]
    ValidationFailed {
        violations: Vec<RuleViolation>,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("loan not active: current status is {status:?}")]
    LoanNotActive {
        status: LoanStatus,
    },

    #[error("invalid loan state: current {current:?}, expected {expected:?}")]
    InvalidTransition {
        current: LoanStatus,
        expected: LoanStatus,
    },

    #[error("allocation components sum to {allocated}, payment was {payment_amount}")]
    ArithmeticInconsistency {
        payment_amount: Money,
        allocated: Money,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("cashout below minimum: minimum {minimum}, requested {requested}")]
    CashoutBelowMinimum {
        minimum: Money,
        requested: Money,
    },

    #[error("insufficient collectible earnings: available {available}, requested {requested}")]
    InsufficientCollectible {
        available: Money,
        requested: Money,
    },

    #[error("cashout request already decided: status is {status:?}")]
    CashoutNotPending {
        status: CashoutStatus,
    },
}

pub type Result<T> = std::result::Result<T, LoanError>;
