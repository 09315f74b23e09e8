/// agent earnings - commissions accrue on collected interest and are
/// withdrawn through cashout requests
use loan_engine_rs::{
    chrono::{TimeZone, Utc},
    loan::{Loan, LoanTerms},
    CashoutConfig, Earnings, EngineConfig, EventStore, Money, PaymentFrequency, Rate,
    SafeTimeProvider, TimeSource, Uuid,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let time = SafeTimeProvider::new(TimeSource::Test(start));
    let mut events = EventStore::new();

    let agent_id = Uuid::new_v4();
    let loan = Loan::originate(
        agent_id,
        LoanTerms {
            principal: Money::from_major(10_000),
            monthly_rate: Rate::from_percentage(dec!(4)),
            tenure_months: 3,
            frequency: PaymentFrequency::Monthly,
            start_date: start,
        },
        &EngineConfig::default(),
        &time,
        &mut events,
    )?;
    let loan = loan.approve(&time, &mut events)?;
    let loan = loan.activate(&time, &mut events)?;

    // agent earns 5% of interest collected
    let earnings = Earnings::new(agent_id, dec!(5));

    let receipt = loan.apply_payment(loan.schedule.level_payment, start, &mut events)?;
    let (earnings, earned) = earnings.record_commission(&receipt.payment, &mut events);
    println!(
        "interest {} -> commission {}",
        receipt.payment.applied_to_interest, earned
    );
    println!("collectible: {}", earnings.collectible_earnings);

    // withdraw what is collectible
    let request = earnings.request_cashout(
        earnings.collectible_earnings,
        &CashoutConfig::default(),
        &time,
        &mut events,
    )?;
    let (earnings, approved) = earnings.approve_cashout(&request, &time, &mut events)?;
    println!(
        "cashout {} approved, remaining collectible {}",
        approved.amount, earnings.collectible_earnings
    );

    Ok(())
}
