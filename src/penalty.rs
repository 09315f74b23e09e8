use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::config::PenaltyConfig;
use crate::decimal::Money;
use crate::payments::ScheduleEntry;

/// engine for computing overdue penalties
///
/// a penalty accrues daily at `monthly_rate / days_in_month` of the entry's
/// scheduled amount, starting the day after the due date
pub struct PenaltyEngine {
    pub config: PenaltyConfig,
}

impl PenaltyEngine {
    pub fn new(config: PenaltyConfig) -> Self {
        Self { config }
    }

    /// whole days overdue, 0 when not past due
    pub fn days_overdue(&self, due_date: DateTime<Utc>, as_of: DateTime<Utc>) -> u32 {
        let days = (as_of - due_date).num_days();
        days.max(0) as u32
    }

    /// penalty on an overdue amount as of a given date
    pub fn penalty(
        &self,
        due_amount: Money,
        due_date: DateTime<Utc>,
        as_of: DateTime<Utc>,
    ) -> Money {
        let days = self.days_overdue(due_date, as_of);
        if days == 0 {
            return Money::ZERO;
        }

        let daily_rate =
            self.config.monthly_rate.as_decimal() / Decimal::from(self.config.days_in_month);
        Money::from_decimal(due_amount.as_decimal() * daily_rate * Decimal::from(days))
    }

    /// penalty detail for display to collectors
    pub fn breakdown(
        &self,
        due_amount: Money,
        due_date: DateTime<Utc>,
        as_of: DateTime<Utc>,
    ) -> PenaltyBreakdown {
        let days_overdue = self.days_overdue(due_date, as_of);
        if days_overdue == 0 {
            return PenaltyBreakdown {
                days_overdue: 0,
                penalty_per_day: Money::ZERO,
                total_penalty: Money::ZERO,
                is_past_due: false,
            };
        }

        let daily_rate =
            self.config.monthly_rate.as_decimal() / Decimal::from(self.config.days_in_month);

        PenaltyBreakdown {
            days_overdue,
            penalty_per_day: Money::from_decimal(due_amount.as_decimal() * daily_rate),
            total_penalty: self.penalty(due_amount, due_date, as_of),
            is_past_due: true,
        }
    }

    /// what it takes to settle an entry today: unpaid remainder plus penalty
    pub fn total_due_with_penalty(&self, entry: &ScheduleEntry, as_of: DateTime<Utc>) -> Money {
        entry.total_due - entry.paid_amount + self.penalty(entry.total_due, entry.due_date, as_of)
    }

    /// recompute every unpaid entry's penalty as of a date
    pub fn assess_schedule(
        &self,
        entries: &[ScheduleEntry],
        as_of: DateTime<Utc>,
    ) -> ScheduleAssessment {
        let mut assessed = entries.to_vec();
        let mut total_penalties = Money::ZERO;
        let mut overdue_entries = 0;

        for entry in assessed.iter_mut() {
            if entry.is_paid {
                entry.penalty = Money::ZERO;
                continue;
            }

            entry.penalty = self.penalty(entry.total_due, entry.due_date, as_of);
            if entry.penalty.is_positive() {
                overdue_entries += 1;
            }
            total_penalties += entry.penalty;
        }

        ScheduleAssessment {
            entries: assessed,
            total_penalties,
            overdue_entries,
        }
    }
}

/// penalty detail result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PenaltyBreakdown {
    pub days_overdue: u32,
    pub penalty_per_day: Money,
    pub total_penalty: Money,
    pub is_past_due: bool,
}

/// schedule-wide penalty assessment result
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleAssessment {
    pub entries: Vec<ScheduleEntry>,
    pub total_penalties: Money,
    pub overdue_entries: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn engine() -> PenaltyEngine {
        PenaltyEngine::new(PenaltyConfig::default())
    }

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_ten_days_overdue_worked_example() {
        // 1000 * 0.03 / 30 * 10 = 10.00
        let penalty = engine().penalty(
            Money::from_major(1_000),
            date(2024, 1, 1),
            date(2024, 1, 11),
        );
        assert_eq!(penalty, Money::from_major(10));
    }

    #[test]
    fn test_no_penalty_at_or_before_due_date() {
        let due = date(2024, 1, 15);
        let e = engine();

        assert_eq!(e.penalty(Money::from_major(1_000), due, due), Money::ZERO);
        assert_eq!(
            e.penalty(Money::from_major(1_000), due, date(2024, 1, 10)),
            Money::ZERO,
        );
    }

    #[test]
    fn test_penalty_strictly_increases_with_days_overdue() {
        let e = engine();
        let due = date(2024, 1, 1);
        let amount = Money::from_major(500);

        let mut previous = Money::ZERO;
        for day in 2..30 {
            let penalty = e.penalty(amount, due, date(2024, 1, day));
            assert!(penalty > previous, "day {day}");
            previous = penalty;
        }
    }

    #[test]
    fn test_small_amounts_do_not_vanish() {
        // daily accrual on 3.00 is 0.003/day; ten days must not round to zero
        let penalty = engine().penalty(Money::from_major(3), date(2024, 1, 1), date(2024, 1, 11));
        assert_eq!(penalty, Money::from_str_exact("0.03").unwrap());
    }

    #[test]
    fn test_breakdown() {
        let breakdown = engine().breakdown(
            Money::from_major(1_000),
            date(2024, 1, 1),
            date(2024, 1, 11),
        );

        assert!(breakdown.is_past_due);
        assert_eq!(breakdown.days_overdue, 10);
        assert_eq!(breakdown.penalty_per_day, Money::ONE);
        assert_eq!(breakdown.total_penalty, Money::from_major(10));

        let current = engine().breakdown(
            Money::from_major(1_000),
            date(2024, 1, 11),
            date(2024, 1, 1),
        );
        assert!(!current.is_past_due);
        assert_eq!(current.total_penalty, Money::ZERO);
    }

    #[test]
    fn test_total_due_with_penalty() {
        let entry = ScheduleEntry {
            payment_number: 1,
            due_date: date(2024, 1, 1),
            principal_due: Money::from_major(700),
            interest_due: Money::from_major(300),
            total_due: Money::from_major(1_000),
            remaining_balance_after: Money::ZERO,
            penalty: Money::ZERO,
            paid_amount: Money::from_major(200),
            is_paid: false,
        };

        // 800 remaining + 10.00 penalty on the full scheduled amount
        let total = engine().total_due_with_penalty(&entry, date(2024, 1, 11));
        assert_eq!(total, Money::from_major(810));
    }

    #[test]
    fn test_assess_schedule_skips_paid_entries() {
        let mut entries = Vec::new();
        for (number, due_day, is_paid) in [(1, 1, true), (2, 11, false), (3, 21, false)] {
            entries.push(ScheduleEntry {
                payment_number: number,
                due_date: date(2024, 1, due_day),
                principal_due: Money::from_major(700),
                interest_due: Money::from_major(300),
                total_due: Money::from_major(1_000),
                remaining_balance_after: Money::ZERO,
                penalty: Money::ZERO,
                paid_amount: Money::ZERO,
                is_paid,
            });
        }

        let assessment = engine().assess_schedule(&entries, date(2024, 1, 21));

        // paid entry stays clean, entry 2 is 10 days overdue, entry 3 due today
        assert_eq!(assessment.entries[0].penalty, Money::ZERO);
        assert_eq!(assessment.entries[1].penalty, Money::from_major(10));
        assert_eq!(assessment.entries[2].penalty, Money::ZERO);
        assert_eq!(assessment.total_penalties, Money::from_major(10));
        assert_eq!(assessment.overdue_entries, 1);
    }
}
