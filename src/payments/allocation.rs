use crate::decimal::Money;
use crate::types::PaymentAllocation;

use super::schedule::ScheduleEntry;

/// distribute a payment across outstanding balances in priority order:
/// penalties first, then the current schedule entry (split proportionally
/// between interest and principal), then any overflow straight to principal
///
/// `total_paid` is the loan's lifetime collected amount; the current entry
/// is the first one whose cumulative due exceeds it
pub(crate) fn allocate(
    entries: &[ScheduleEntry],
    total_paid: Money,
    total_penalties: Money,
    amount: Money,
) -> PaymentAllocation {
    let mut remaining = amount;
    let mut allocation = PaymentAllocation::default();

    // penalties first
    allocation.to_penalty = remaining.min(total_penalties.max(Money::ZERO));
    remaining -= allocation.to_penalty;

    if remaining.is_positive() {
        // walk cumulative dues to find the current entry
        let mut cumulative = Money::ZERO;
        for entry in entries {
            cumulative += entry.total_due;
            if cumulative > total_paid {
                let due_on_entry = cumulative - total_paid;
                let portion = remaining.min(due_on_entry);

                let interest_ratio = if entry.total_due.is_zero() {
                    rust_decimal::Decimal::ZERO
                } else {
                    entry.interest_due.as_decimal() / entry.total_due.as_decimal()
                };

                allocation.to_interest = portion * interest_ratio;
                allocation.to_principal = portion - allocation.to_interest;
                remaining -= portion;
                break;
            }
        }

        // payment exceeds what is currently due
        if remaining.is_positive() {
            allocation.to_principal += remaining;
        }
    }

    allocation
}

/// rederive per-entry paid amounts and flags from the loan's lifetime total
pub(crate) fn mark_paid_entries(entries: &mut [ScheduleEntry], total_paid: Money) {
    let mut cumulative_before = Money::ZERO;
    for entry in entries.iter_mut() {
        let paid = (total_paid - cumulative_before)
            .max(Money::ZERO)
            .min(entry.total_due);
        entry.paid_amount = paid;
        entry.is_paid = paid >= entry.total_due;
        cumulative_before += entry.total_due;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(number: u32, principal: i64, interest: i64) -> ScheduleEntry {
        ScheduleEntry {
            payment_number: number,
            due_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            principal_due: Money::from_major(principal),
            interest_due: Money::from_major(interest),
            total_due: Money::from_major(principal + interest),
            remaining_balance_after: Money::ZERO,
            penalty: Money::ZERO,
            paid_amount: Money::ZERO,
            is_paid: false,
        }
    }

    #[test]
    fn test_priority_order_with_overflow() {
        // penalties 50, entry due 1000 with 300 interest, payment 1200:
        // 50 penalty, 300 interest, 700 + 150 overflow = 850 principal
        let entries = vec![entry(1, 700, 300), entry(2, 700, 300)];

        let allocation = allocate(
            &entries,
            Money::ZERO,
            Money::from_major(50),
            Money::from_major(1_200),
        );

        assert_eq!(allocation.to_penalty, Money::from_major(50));
        assert_eq!(allocation.to_interest, Money::from_major(300));
        assert_eq!(allocation.to_principal, Money::from_major(850));
        assert_eq!(allocation.total(), Money::from_major(1_200));
    }

    #[test]
    fn test_payment_smaller_than_penalties() {
        let entries = vec![entry(1, 700, 300)];

        let allocation = allocate(
            &entries,
            Money::ZERO,
            Money::from_major(80),
            Money::from_major(30),
        );

        assert_eq!(allocation.to_penalty, Money::from_major(30));
        assert_eq!(allocation.to_interest, Money::ZERO);
        assert_eq!(allocation.to_principal, Money::ZERO);
    }

    #[test]
    fn test_partial_entry_keeps_proportional_split() {
        // 400 against a 1000-due entry with 30% interest share
        let entries = vec![entry(1, 700, 300)];

        let allocation = allocate(&entries, Money::ZERO, Money::ZERO, Money::from_major(400));

        assert_eq!(allocation.to_interest, Money::from_major(120));
        assert_eq!(allocation.to_principal, Money::from_major(280));
    }

    #[test]
    fn test_current_entry_found_from_total_paid() {
        // 1500 already collected: entry 1 (1000) is covered, 500 of entry 2
        // remains; a 500 payment settles exactly entry 2's remainder
        let entries = vec![entry(1, 700, 300), entry(2, 700, 300), entry(3, 700, 300)];

        let allocation = allocate(
            &entries,
            Money::from_major(1_500),
            Money::ZERO,
            Money::from_major(500),
        );

        assert_eq!(allocation.to_interest, Money::from_major(150));
        assert_eq!(allocation.to_principal, Money::from_major(350));
    }

    #[test]
    fn test_allocation_sums_to_amount() {
        let entries = vec![entry(1, 333, 77), entry(2, 333, 77)];

        for minor in [1_i64, 999, 10_000, 41_001, 123_456] {
            let amount = Money::from_minor(minor);
            let allocation = allocate(&entries, Money::ZERO, Money::from_minor(1_234), amount);
            let difference = (allocation.total() - amount).abs();
            assert!(difference <= Money::CENT, "amount {amount}: off by {difference}");
        }
    }

    #[test]
    fn test_mark_paid_entries() {
        let mut entries = vec![entry(1, 700, 300), entry(2, 700, 300), entry(3, 700, 300)];

        mark_paid_entries(&mut entries, Money::from_major(1_500));

        assert!(entries[0].is_paid);
        assert_eq!(entries[0].paid_amount, Money::from_major(1_000));
        assert!(!entries[1].is_paid);
        assert_eq!(entries[1].paid_amount, Money::from_major(500));
        assert!(!entries[2].is_paid);
        assert_eq!(entries[2].paid_amount, Money::ZERO);
    }
}
