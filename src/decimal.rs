use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};
use std::str::FromStr;

/// rounding applied after every monetary arithmetic step
///
/// round-half-up (away from zero), applied uniformly so independently
/// computed fields agree to the centavo
const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// money type with 2 decimal places of precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const ONE: Money = Money(Decimal::ONE);
    /// smallest representable amount (one centavo)
    pub const CENT: Money = Money(Decimal::from_parts(1, 0, 0, false, 2));

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp_with_strategy(2, ROUNDING))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s)?.round_dp_with_strategy(2, ROUNDING)))
    }

    /// create from whole currency units
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from minor units (centavos)
    pub fn from_minor(amount: i64) -> Self {
        Money(Decimal::new(amount, 2))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// check if strictly positive
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// check if negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// absolute value
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// minimum of two values
    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    /// maximum of two values
    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// percentage of this amount (e.g., 5% of 100.00)
    pub fn percentage(&self, percent: Decimal) -> Self {
        Money((self.0 * percent / Decimal::from(100)).round_dp_with_strategy(2, ROUNDING))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl From<i32> for Money {
    fn from(i: i32) -> Self {
        Money::from_major(i as i64)
    }
}

impl From<u32> for Money {
    fn from(i: u32) -> Self {
        Money::from_major(i as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money((self.0 + other.0).round_dp_with_strategy(2, ROUNDING))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 = (self.0 + other.0).round_dp_with_strategy(2, ROUNDING);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money((self.0 - other.0).round_dp_with_strategy(2, ROUNDING))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 = (self.0 - other.0).round_dp_with_strategy(2, ROUNDING);
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, other: Decimal) -> Money {
        Money((self.0 * other).round_dp_with_strategy(2, ROUNDING))
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, other: Decimal) -> Money {
        Money((self.0 / other).round_dp_with_strategy(2, ROUNDING))
    }
}

/// rate type for interest rates, percentages, and ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from decimal (e.g., 0.04 for 4%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from percentage (e.g., 4 for 4%, 3.5 for 3.5%)
    pub fn from_percentage(p: Decimal) -> Self {
        Rate(p / Decimal::from(100))
    }

    /// get as decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// get as percentage
    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::from(100)
    }

    /// scale a monthly rate down to a shorter payment period
    pub fn per_period(&self, periods_per_month: Decimal) -> Rate {
        Rate(self.0 / periods_per_month)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage())
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_decimal(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.123").unwrap();
        assert_eq!(m.to_string(), "100.12");

        let m = Money::from_str_exact("100.125").unwrap();
        assert_eq!(m.to_string(), "100.13"); // half-up
    }

    #[test]
    fn test_money_arithmetic_rounds_every_step() {
        let m = Money::from_str_exact("10.01").unwrap();
        let third = m / dec!(3);
        assert_eq!(third.to_string(), "3.34");

        let product = Money::from_major(6796) * dec!(0.04);
        assert_eq!(product.to_string(), "271.84");
    }

    #[test]
    fn test_minor_units() {
        assert_eq!(Money::from_minor(1050), Money::from_str_exact("10.50").unwrap());
        assert_eq!(Money::CENT, Money::from_minor(1));
    }

    #[test]
    fn test_percentage() {
        let m = Money::from_major(300);
        assert_eq!(m.percentage(dec!(5)), Money::from_major(15));
    }

    #[test]
    fn test_rate_conversions() {
        let r = Rate::from_percentage(dec!(4));
        assert_eq!(r.as_decimal(), dec!(0.04));
        assert_eq!(r.as_percentage(), dec!(4.00));

        let weekly = r.per_period(dec!(4));
        assert_eq!(weekly.as_decimal(), dec!(0.01));
    }
}
