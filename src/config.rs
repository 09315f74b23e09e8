use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};

/// weeks per month used for weekly payment frequency
///
/// the product convention is 4 payment weeks per month (12 weekly payments
/// on a 3-month loan), not the astronomical 4.33; changing this constant
/// changes both the payment count and the per-period rate
pub const WEEKS_PER_MONTH: Decimal = dec!(4);

/// engine configuration with product defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    pub validation: ValidationBounds,
    pub penalty: PenaltyConfig,
    pub commission: CommissionConfig,
    pub cashout: CashoutConfig,
}

/// business-rule bounds checked before a schedule is generated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationBounds {
    pub min_monthly_rate: Rate,
    pub max_monthly_rate: Rate,
    pub min_tenure_months: u32,
    pub max_tenure_months: u32,
}

impl Default for ValidationBounds {
    fn default() -> Self {
        Self {
            min_monthly_rate: Rate::from_percentage(dec!(3)),
            max_monthly_rate: Rate::from_percentage(dec!(5)),
            min_tenure_months: 2,
            max_tenure_months: 12,
        }
    }
}

/// penalty accrual constants
///
/// penalties accrue daily at `monthly_rate / days_in_month` of the overdue
/// scheduled amount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenaltyConfig {
    pub monthly_rate: Rate,
    pub days_in_month: u32,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            monthly_rate: Rate::from_percentage(dec!(3)),
            days_in_month: 30,
        }
    }
}

/// agent commission defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionConfig {
    /// percentage of collected interest credited to the agent, 0-100
    pub default_percentage: Decimal,
}

impl Default for CommissionConfig {
    fn default() -> Self {
        Self {
            default_percentage: dec!(5),
        }
    }
}

/// cashout request limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashoutConfig {
    pub minimum_amount: Money,
}

impl Default for CashoutConfig {
    fn default() -> Self {
        Self {
            minimum_amount: Money::from_major(10),
        }
    }
}
