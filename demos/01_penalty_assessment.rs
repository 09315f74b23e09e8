/// penalty assessment - overdue entries accrue daily penalties that are
/// settled first on the next collection
use loan_engine_rs::{
    chrono::{Duration, TimeZone, Utc},
    loan::{Loan, LoanTerms},
    EngineConfig, EventStore, Money, PaymentFrequency, PenaltyConfig, Rate, SafeTimeProvider,
    TimeSource, Uuid,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let time = SafeTimeProvider::new(TimeSource::Test(start));
    let mut events = EventStore::new();

    let loan = Loan::originate(
        Uuid::new_v4(),
        LoanTerms {
            principal: Money::from_major(5_000),
            monthly_rate: Rate::from_percentage(dec!(3)),
            tenure_months: 4,
            frequency: PaymentFrequency::Monthly,
            start_date: start,
        },
        &EngineConfig::default(),
        &time,
        &mut events,
    )?;
    let loan = loan.approve(&time, &mut events)?;
    let loan = loan.activate(&time, &mut events)?;

    // first installment due 2024-02-01, borrower shows up 15 days late
    let first_due = loan.schedule.entries[0].due_date;
    let late = first_due + Duration::days(15);

    let loan = loan.assess_penalties(late, &PenaltyConfig::default(), &mut events);
    println!(
        "penalties after 15 days: {}",
        loan.total_penalties_outstanding
    );

    let receipt = loan.apply_payment(Money::from_major(1_500), late, &mut events)?;
    println!(
        "collection of {} -> penalty {}, interest {}, principal {}",
        receipt.payment.amount,
        receipt.payment.applied_to_penalty,
        receipt.payment.applied_to_interest,
        receipt.payment.applied_to_principal,
    );
    println!(
        "penalties outstanding: {}",
        receipt.loan.total_penalties_outstanding
    );

    Ok(())
}
