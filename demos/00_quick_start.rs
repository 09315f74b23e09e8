/// quick start - originate, activate, and pay down a loan
use loan_engine_rs::{
    chrono::{TimeZone, Utc},
    loan::{Loan, LoanTerms},
    EngineConfig, EventStore, Money, PaymentFrequency, Rate, SafeTimeProvider, TimeSource, Uuid,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let time = SafeTimeProvider::new(TimeSource::Test(start));
    let mut events = EventStore::new();

    // a 10,000 loan at 4% monthly over 3 months
    let loan = Loan::originate(
        Uuid::new_v4(),
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

    println!("level payment: {}", loan.schedule.level_payment);
    println!("total interest: {}", loan.schedule.total_interest);

    let loan = loan.approve(&time, &mut events)?;
    let loan = loan.activate(&time, &mut events)?;

    // pay the first installment
    let receipt = loan.apply_payment(loan.schedule.level_payment, start, &mut events)?;
    println!(
        "paid {} -> interest {}, principal {}",
        receipt.payment.amount,
        receipt.payment.applied_to_interest,
        receipt.payment.applied_to_principal,
    );
    println!("outstanding: {}", receipt.loan.outstanding_balance);

    println!("\n{}", serde_json::to_string_pretty(&receipt.loan)?);

    Ok(())
}
