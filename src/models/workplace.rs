//! Workplace model and pay model types.
//!
//! A workplace carries the base rate and the unit basis (the pay model)
//! that the resolver uses to turn segment durations into amounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

/// The unit basis by which a workplace's rate is converted into an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayModel {
    /// The rate is per hour worked.
    Hourly,
    /// The rate is a flat amount for the whole shift.
    PerTurn,
    /// The rate is a flat monthly amount spread over the expected hours.
    Monthly,
}

impl std::fmt::Display for PayModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayModel::Hourly => write!(f, "hourly"),
            PayModel::PerTurn => write!(f, "per_turn"),
            PayModel::Monthly => write!(f, "monthly"),
        }
    }
}

fn default_currency() -> String {
    "EUR".to_string()
}

/// A place where shifts are worked, read-only to the engine.
///
/// # Example
///
/// ```
/// use shift_earnings::models::{PayModel, Workplace};
/// use shift_earnings::money::Money;
/// use uuid::Uuid;
///
/// let workplace = Workplace {
///     id: Uuid::nil(),
///     name: "Hospital Santa Maria".to_string(),
///     pay_model: PayModel::Hourly,
///     base_rate: Money::from_cents(2_500),
///     currency: "EUR".to_string(),
///     monthly_expected_hours: None,
///     has_consultation_pay: false,
///     has_outside_visit_pay: false,
/// };
/// assert!(workplace.monthly_hourly_divisor().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workplace {
    /// Unique identifier for the workplace.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// How the base rate is applied.
    pub pay_model: PayModel,
    /// Base rate per hour, per turn or per month depending on `pay_model`.
    #[serde(rename = "base_rate_cents")]
    pub base_rate: Money,
    /// ISO currency label. Never used for conversion.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Hours a monthly salary is expected to cover.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_expected_hours: Option<Decimal>,
    /// Whether patients seen during a shift are paid on top of the rate.
    #[serde(default)]
    pub has_consultation_pay: bool,
    /// Whether outside visits during a shift are paid on top of the rate.
    #[serde(default)]
    pub has_outside_visit_pay: bool,
}

impl Workplace {
    /// Returns the expected monthly hours if they can divide a monthly rate.
    ///
    /// `None` when the value is unset, zero or negative.
    pub fn monthly_hourly_divisor(&self) -> Option<Decimal> {
        self.monthly_expected_hours
            .filter(|hours| *hours > Decimal::ZERO)
    }
}
