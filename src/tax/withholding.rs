//! Invoice-level withholding and VAT.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::money::Money;

/// Computes the tax withheld on a gross amount, truncating toward zero.
///
/// ```
/// use shift_earnings::money::Money;
/// use shift_earnings::tax::calculate_withholding;
/// use rust_decimal::Decimal;
///
/// let withheld = calculate_withholding(Money::from_cents(100_001), Decimal::new(25, 2));
/// assert_eq!(withheld, Money::from_cents(25_000));
/// ```
pub fn calculate_withholding(gross_amount: Money, rate: Decimal) -> Money {
    gross_amount.mul_decimal(rate)
}

/// The amounts printed on an invoice for a gross fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceAmounts {
    /// The invoiced fee before taxes.
    pub gross: Money,
    /// Withholding rate applied.
    pub withholding_rate: Decimal,
    /// Income tax withheld by the client.
    pub withholding: Money,
    /// VAT rate applied.
    pub vat_rate: Decimal,
    /// VAT charged on top of the fee.
    pub vat: Money,
    /// What the client actually pays: `gross - withholding + vat`.
    pub net: Money,
}

/// Computes withholding, VAT and the net amount for an invoice.
///
/// # Errors
///
/// Returns [`EngineError::NegativeIncome`] for a negative gross and
/// [`EngineError::InvalidRate`] if either rate lies outside `[0, 1]`.
///
/// # Example
///
/// ```
/// use shift_earnings::money::Money;
/// use shift_earnings::tax::calculate_invoice;
/// use rust_decimal::Decimal;
///
/// let rate = Decimal::new(25, 2);
/// let invoice = calculate_invoice(Money::from_cents(100_000), rate, Decimal::ZERO)?;
/// assert_eq!(invoice.withholding, Money::from_cents(25_000));
/// assert_eq!(invoice.net, Money::from_cents(75_000));
/// # Ok::<(), shift_earnings::error::EngineError>(())
/// ```
pub fn calculate_invoice(
    gross: Money,
    withholding_rate: Decimal,
    vat_rate: Decimal,
) -> EngineResult<InvoiceAmounts> {
    if gross.is_negative() {
        return Err(EngineError::NegativeIncome { amount: gross });
    }
    check_rate("withholding_rate", withholding_rate)?;
    check_rate("vat_rate", vat_rate)?;

    let withholding = calculate_withholding(gross, withholding_rate);
    let vat = gross.mul_decimal(vat_rate);

    Ok(InvoiceAmounts {
        gross,
        withholding_rate,
        withholding,
        vat_rate,
        vat,
        net: gross - withholding + vat,
    })
}

fn check_rate(field: &str, rate: Decimal) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(EngineError::InvalidRate {
            field: field.to_string(),
            message: format!("must be between 0 and 1, got {}", rate),
        });
    }
    Ok(())
}
