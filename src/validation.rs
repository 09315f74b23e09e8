use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ValidationBounds;
use crate::decimal::{Money, Rate};

/// a single violated business rule
///
/// returned as data, never as an error: the caller decides whether a
/// violation is fatal or just shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleViolation {
    NonPositivePrincipal {
        principal: Money,
    },
    RateOutOfBounds {
        rate: Rate,
        min: Rate,
        max: Rate,
    },
    TenureOutOfBounds {
        tenure_months: u32,
        min: u32,
        max: u32,
    },
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleViolation::NonPositivePrincipal { principal } => {
                write!(f, "principal amount must be greater than 0, got {principal}")
            }
            RuleViolation::RateOutOfBounds { rate, min, max } => {
                write!(f, "interest rate must be between {min} and {max} per month, got {rate}")
            }
            RuleViolation::TenureOutOfBounds { tenure_months, min, max } => {
                write!(f, "tenure must be between {min} and {max} months, got {tenure_months}")
            }
        }
    }
}

/// render a violation list for error messages
pub(crate) fn describe(violations: &[RuleViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// check loan parameters against the configured bounds
///
/// returns every violated rule, not just the first
pub fn validate_terms(
    principal: Money,
    monthly_rate: Rate,
    tenure_months: u32,
    bounds: &ValidationBounds,
) -> Vec<RuleViolation> {
    let mut violations = Vec::new();

    if !principal.is_positive() {
        violations.push(RuleViolation::NonPositivePrincipal { principal });
    }

    if monthly_rate < bounds.min_monthly_rate || monthly_rate > bounds.max_monthly_rate {
        violations.push(RuleViolation::RateOutOfBounds {
            rate: monthly_rate,
            min: bounds.min_monthly_rate,
            max: bounds.max_monthly_rate,
        });
    }

    if tenure_months < bounds.min_tenure_months || tenure_months > bounds.max_tenure_months {
        violations.push(RuleViolation::TenureOutOfBounds {
            tenure_months,
            min: bounds.min_tenure_months,
            max: bounds.max_tenure_months,
        });
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bounds() -> ValidationBounds {
        ValidationBounds::default()
    }

    #[test]
    fn test_valid_terms() {
        let violations = validate_terms(
            Money::from_major(10_000),
            Rate::from_percentage(dec!(4)),
            6,
            &bounds(),
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        for (rate, tenure) in [(dec!(3), 2), (dec!(5), 12)] {
            let violations = validate_terms(
                Money::from_major(500),
                Rate::from_percentage(rate),
                tenure,
                &bounds(),
            );
            assert!(violations.is_empty(), "rate {rate} tenure {tenure}");
        }
    }

    #[test]
    fn test_zero_principal() {
        let violations = validate_terms(Money::ZERO, Rate::from_percentage(dec!(4)), 6, &bounds());
        assert_eq!(violations.len(), 1);
        assert!(matches!(violations[0], RuleViolation::NonPositivePrincipal { .. }));
    }

    #[test]
    fn test_rate_out_of_bounds() {
        let violations = validate_terms(
            Money::from_major(1_000),
            Rate::from_percentage(dec!(5.5)),
            6,
            &bounds(),
        );
        assert_eq!(violations.len(), 1);
        assert!(matches!(violations[0], RuleViolation::RateOutOfBounds { .. }));
    }

    #[test]
    fn test_all_violations_reported() {
        let violations = validate_terms(
            Money::ZERO,
            Rate::from_percentage(dec!(1)),
            18,
            &bounds(),
        );
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_violation_messages() {
        let violations = validate_terms(
            Money::from_major(1_000),
            Rate::from_percentage(dec!(2)),
            1,
            &bounds(),
        );
        let rendered = describe(&violations);
        assert!(rendered.contains("interest rate must be between"));
        assert!(rendered.contains("tenure must be between 2 and 12 months"));
    }
}
