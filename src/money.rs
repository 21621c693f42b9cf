//! Fixed-point monetary values.
//!
//! Every amount the engine produces is a whole number of minor currency
//! units (cents). Rates and ratios are applied through [`Decimal`] and the
//! result is truncated toward zero, so chained computations never drift the
//! way binary floats do.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A monetary amount in minor currency units (cents).
///
/// The currency itself is a label owned by the workplace; `Money` never
/// converts between currencies.
///
/// # Example
///
/// ```
/// use shift_earnings::money::Money;
/// use rust_decimal::Decimal;
///
/// let rate = Money::from_cents(2550);
/// assert_eq!(rate.to_string(), "25.50");
/// assert_eq!(rate.mul_decimal(Decimal::new(15, 1)), Money::from_cents(3825));
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero cents.
    pub const ZERO: Money = Money(0);

    /// Creates an amount from cents.
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates an amount from whole major units (e.g. euros), saturating
    /// at the `i64` bounds.
    pub const fn from_major(units: i64) -> Self {
        Money(units.saturating_mul(100))
    }

    /// Returns the amount in cents.
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns the amount in major units as an exact decimal.
    pub fn to_major(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Returns `true` if the amount is below zero.
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a decimal factor, truncating toward zero.
    ///
    /// ```
    /// use shift_earnings::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// // 1001 * 0.125 = 125.125 -> 125
    /// assert_eq!(Money::from_cents(1001).mul_decimal(Decimal::new(125, 3)).cents(), 125);
    /// ```
    pub fn mul_decimal(self, factor: Decimal) -> Money {
        match Decimal::from(self.0).checked_mul(factor) {
            Some(product) => Money::from_decimal_trunc(product),
            None => Money::saturated(self.is_negative() != factor.is_sign_negative()),
        }
    }

    /// Computes `self * numerator / denominator`, truncating toward zero.
    ///
    /// The multiplication happens before the division so proportional
    /// shares of a flat amount stay exact. A zero denominator yields zero.
    ///
    /// ```
    /// use shift_earnings::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let flat = Money::from_cents(10_000);
    /// assert_eq!(flat.scale(Decimal::from(2), Decimal::from(8)), Money::from_cents(2_500));
    /// assert_eq!(flat.scale(Decimal::from(2), Decimal::ZERO), Money::ZERO);
    /// ```
    pub fn scale(self, numerator: Decimal, denominator: Decimal) -> Money {
        if denominator.is_zero() {
            return Money::ZERO;
        }
        let negative =
            self.is_negative() != (numerator.is_sign_negative() != denominator.is_sign_negative());
        Decimal::from(self.0)
            .checked_mul(numerator)
            .and_then(|product| product.checked_div(denominator))
            .map(Money::from_decimal_trunc)
            .unwrap_or_else(|| Money::saturated(negative))
    }

    fn from_decimal_trunc(value: Decimal) -> Money {
        let truncated = value.trunc();
        truncated
            .to_i64()
            .map(Money)
            .unwrap_or_else(|| Money::saturated(truncated.is_sign_negative()))
    }

    fn saturated(negative: bool) -> Money {
        if negative {
            Money(i64::MIN)
        } else {
            Money(i64::MAX)
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(self.0.saturating_neg())
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, rhs: i64) -> Money {
        Money(self.0.saturating_mul(rhs))
    }
}

/// Integer division truncating toward zero. Dividing by zero yields zero.
impl Div<i64> for Money {
    type Output = Money;

    fn div(self, rhs: i64) -> Money {
        self.0.checked_div(rhs).map(Money).unwrap_or(Money::ZERO)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}
