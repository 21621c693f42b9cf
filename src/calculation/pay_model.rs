//! Conversion of a priced segment into an amount.
//!
//! The same rate means different things under each [`PayModel`]: a price per
//! hour, a flat price for the whole shift, or a flat price for a month of
//! expected hours. Every formula multiplies before dividing and truncates
//! once, toward zero.

use rust_decimal::Decimal;

use crate::models::{PayModel, Workplace};
use crate::money::Money;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Computes the amount earned for one segment.
///
/// * `rate` - the resolved rate for the segment
/// * `segment_millis` - the segment's duration
/// * `shift_millis` - the whole shift's duration (used by the per-turn model)
///
/// A zero shift duration, or a monthly workplace without positive expected
/// hours, yields zero.
///
/// # Example
///
/// ```
/// use shift_earnings::calculation::segment_amount;
/// use shift_earnings::models::{PayModel, Workplace};
/// use shift_earnings::money::Money;
/// use uuid::Uuid;
///
/// let workplace = Workplace {
///     id: Uuid::nil(),
///     name: "Clinic".to_string(),
///     pay_model: PayModel::PerTurn,
///     base_rate: Money::from_cents(10_000),
///     currency: "EUR".to_string(),
///     monthly_expected_hours: None,
///     has_consultation_pay: false,
///     has_outside_visit_pay: false,
/// };
///
/// let two_hours = 2 * 3_600_000;
/// let eight_hours = 8 * 3_600_000;
/// let amount = segment_amount(&workplace, workplace.base_rate, two_hours, eight_hours);
/// assert_eq!(amount, Money::from_cents(2_500));
/// ```
pub fn segment_amount(
    workplace: &Workplace,
    rate: Money,
    segment_millis: i64,
    shift_millis: i64,
) -> Money {
    let segment = Decimal::from(segment_millis);

    match workplace.pay_model {
        PayModel::Hourly => rate.scale(segment, Decimal::from(MILLIS_PER_HOUR)),
        PayModel::PerTurn => rate.scale(segment, Decimal::from(shift_millis)),
        PayModel::Monthly => match workplace.monthly_hourly_divisor() {
            Some(hours) => Decimal::from(MILLIS_PER_HOUR)
                .checked_mul(hours)
                .map(|divisor| rate.scale(segment, divisor))
                .unwrap_or(Money::ZERO),
            None => Money::ZERO,
        },
    }
}
