use rust_decimal::Decimal;

use crate::decimal::Money;
use crate::payments::AmortizationSchedule;

/// commission on a single interest amount
///
/// agents earn only on the interest portion of collections, never on
/// principal or penalties
pub fn commission(interest_amount: Money, commission_percentage: Decimal) -> Money {
    interest_amount.percentage(commission_percentage)
}

/// total commission across collections: pool the interest, then apply the
/// percentage once
///
/// this is the canonical aggregation; rounding happens a single time so the
/// agent is not shortchanged by per-payment truncation
pub fn total_commission<I>(interest_amounts: I, commission_percentage: Decimal) -> Money
where
    I: IntoIterator<Item = Money>,
{
    let pooled = interest_amounts
        .into_iter()
        .fold(Money::ZERO, |acc, x| acc + x);
    commission(pooled, commission_percentage)
}

/// total commission rounding each payment separately, then summing
///
/// kept as an explicit alternative because statements produced this way
/// must be reproducible; differs from `total_commission` by at most a cent
/// per payment
pub fn total_commission_per_payment<I>(interest_amounts: I, commission_percentage: Decimal) -> Money
where
    I: IntoIterator<Item = Money>,
{
    interest_amounts
        .into_iter()
        .fold(Money::ZERO, |acc, x| acc + commission(x, commission_percentage))
}

/// commission an agent stands to earn if a loan runs to term
pub fn projected_commission(schedule: &AmortizationSchedule, commission_percentage: Decimal) -> Money {
    commission(schedule.total_interest, commission_percentage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    use crate::decimal::Rate;
    use crate::types::PaymentFrequency;

    #[test]
    fn test_commission_worked_example() {
        assert_eq!(commission(Money::from_major(300), dec!(5)), Money::from_major(15));
    }

    #[test]
    fn test_commission_is_monotonic() {
        let base = commission(Money::from_major(200), dec!(4));
        assert!(commission(Money::from_major(250), dec!(4)) >= base);
        assert!(commission(Money::from_major(200), dec!(5)) >= base);
        assert_eq!(commission(Money::ZERO, dec!(5)), Money::ZERO);
        assert_eq!(commission(Money::from_major(200), dec!(0)), Money::ZERO);
    }

    #[test]
    fn test_aggregation_order_divergence() {
        // 3 x 0.09 interest at 5%: each payment alone rounds to zero, the
        // pooled total does not; both behaviors stay available and pinned
        let interests = [Money::from_minor(9), Money::from_minor(9), Money::from_minor(9)];

        let pooled = total_commission(interests, dec!(5));
        let per_payment = total_commission_per_payment(interests, dec!(5));

        assert_eq!(pooled, Money::from_minor(1));
        assert_eq!(per_payment, Money::ZERO);
    }

    #[test]
    fn test_aggregations_agree_on_round_amounts() {
        let interests = [Money::from_major(300), Money::from_major(100), Money::from_major(40)];

        assert_eq!(total_commission(interests, dec!(5)), Money::from_major(22));
        assert_eq!(total_commission_per_payment(interests, dec!(5)), Money::from_major(22));
    }

    #[test]
    fn test_projected_commission() {
        let schedule = AmortizationSchedule::generate(
            Money::from_major(10_000),
            Rate::from_percentage(dec!(4)),
            3,
            PaymentFrequency::Monthly,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
        .unwrap();

        // 5% of 810.46 in scheduled interest
        assert_eq!(
            projected_commission(&schedule, dec!(5)),
            Money::from_str_exact("40.52").unwrap(),
        );
    }
}
