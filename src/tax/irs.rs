//! Progressive personal income tax (IRS).
//!
//! Taxable income is taxed bracket by bracket at each bracket's marginal
//! rate. A solidarity surcharge is added above fixed high-income
//! thresholds, and the result is capped so that the taxpayer always keeps
//! the configured minimum existence income.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::YearConfig;
use crate::error::{EngineError, EngineResult};
use crate::money::Money;

/// Taxable income above which the first solidarity surcharge applies.
pub const SOLIDARITY_LOWER_THRESHOLD: Money = Money::from_major(80_000);

/// Taxable income above which the second solidarity surcharge applies.
pub const SOLIDARITY_UPPER_THRESHOLD: Money = Money::from_major(250_000);

/// Surcharge on taxable income between the two thresholds.
pub const SOLIDARITY_LOWER_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 3);

/// Surcharge on taxable income above the upper threshold.
pub const SOLIDARITY_UPPER_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// How gross professional income becomes taxable income.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    /// Only the configured simplified coefficient of gross is taxable.
    #[default]
    Simplified,
    /// The full gross is taxable.
    OrganizedAccounting,
}

/// Tax computed within one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketResult {
    /// The bracket rate as a percentage, e.g. `"12.5%"`.
    pub label: String,
    /// Portion of taxable income that fell in this bracket.
    pub taxable_in_bracket: Money,
    /// The bracket's marginal rate.
    pub rate: Decimal,
    /// Tax due on `taxable_in_bracket`.
    pub tax_amount: Money,
}

/// The outcome of an income tax computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrsResult {
    /// The regime used to derive taxable income.
    pub regime: TaxRegime,
    /// Income subject to the brackets.
    pub taxable_income: Money,
    /// Sum of the per-bracket taxes.
    pub bracket_tax: Money,
    /// Solidarity surcharge on top of the bracket tax.
    pub solidarity_surcharge: Money,
    /// Whether the minimum existence floor reduced the tax.
    pub min_existence_applied: bool,
    /// Tax due after surcharge and floor.
    pub total_tax: Money,
    /// `total_tax / taxable_income`, zero when nothing is taxable.
    pub effective_rate: Decimal,
    /// Rate of the bracket the next unit of taxable income falls in.
    pub marginal_rate: Decimal,
    /// One entry per bracket the income reached.
    pub bracket_breakdown: Vec<BracketResult>,
}

/// Computes income tax under the simplified regime.
///
/// # Errors
///
/// Returns [`EngineError::NegativeIncome`] for a negative gross.
///
/// # Example
///
/// ```no_run
/// use shift_earnings::config::TaxConfigLoader;
/// use shift_earnings::money::Money;
/// use shift_earnings::tax::calculate_irs;
///
/// let loader = TaxConfigLoader::load("./config/tax")?;
/// let result = calculate_irs(loader.year(2026)?, Money::from_major(40_000))?;
/// assert_eq!(result.taxable_income, Money::from_major(30_000));
/// # Ok::<(), shift_earnings::error::EngineError>(())
/// ```
pub fn calculate_irs(config: &YearConfig, annual_gross_income: Money) -> EngineResult<IrsResult> {
    calculate_irs_for_regime(config, annual_gross_income, TaxRegime::Simplified)
}

/// Computes income tax under the given regime.
pub fn calculate_irs_for_regime(
    config: &YearConfig,
    annual_gross_income: Money,
    regime: TaxRegime,
) -> EngineResult<IrsResult> {
    if annual_gross_income.is_negative() {
        return Err(EngineError::NegativeIncome {
            amount: annual_gross_income,
        });
    }

    let taxable_income = match regime {
        TaxRegime::Simplified => annual_gross_income.mul_decimal(config.simplified_coefficient),
        TaxRegime::OrganizedAccounting => annual_gross_income,
    };

    let mut remaining = taxable_income;
    let mut bracket_tax = Money::ZERO;
    let mut bracket_breakdown = Vec::new();

    for bracket in &config.brackets {
        if remaining <= Money::ZERO {
            break;
        }

        let taxable_in_bracket = bracket.width().map_or(remaining, |width| remaining.min(width));
        let tax_amount = taxable_in_bracket.mul_decimal(bracket.rate);
        trace!(
            rate = %bracket.rate,
            taxable = %taxable_in_bracket,
            tax = %tax_amount,
            "Taxed bracket"
        );

        bracket_tax += tax_amount;
        remaining -= taxable_in_bracket;
        bracket_breakdown.push(BracketResult {
            label: bracket_label(bracket.rate),
            taxable_in_bracket,
            rate: bracket.rate,
            tax_amount,
        });
    }

    let solidarity = solidarity_surcharge(taxable_income);
    let mut total_tax = bracket_tax + solidarity;

    let min_existence_applied = annual_gross_income - total_tax < config.min_existence;
    if min_existence_applied {
        total_tax = (annual_gross_income - config.min_existence).max(Money::ZERO);
    }

    let effective_rate = if taxable_income > Money::ZERO {
        Decimal::from(total_tax.cents()) / Decimal::from(taxable_income.cents())
    } else {
        Decimal::ZERO
    };

    let marginal_rate = config
        .bracket_for(taxable_income)
        .map_or(Decimal::ZERO, |bracket| bracket.rate);

    debug!(
        fiscal_year = config.fiscal_year,
        gross = %annual_gross_income,
        taxable = %taxable_income,
        total_tax = %total_tax,
        min_existence_applied,
        "Calculated IRS"
    );

    Ok(IrsResult {
        regime,
        taxable_income,
        bracket_tax,
        solidarity_surcharge: solidarity,
        min_existence_applied,
        total_tax,
        effective_rate,
        marginal_rate,
        bracket_breakdown,
    })
}

/// Computes the solidarity surcharge on an amount of taxable income.
///
/// ```
/// use shift_earnings::money::Money;
/// use shift_earnings::tax::solidarity_surcharge;
///
/// assert_eq!(solidarity_surcharge(Money::from_major(80_000)), Money::ZERO);
/// // 2.5% of 70 000
/// assert_eq!(solidarity_surcharge(Money::from_major(150_000)), Money::from_major(1_750));
/// ```
pub fn solidarity_surcharge(taxable_income: Money) -> Money {
    let mut surcharge = Money::ZERO;
    if taxable_income > SOLIDARITY_LOWER_THRESHOLD {
        let band = taxable_income.min(SOLIDARITY_UPPER_THRESHOLD) - SOLIDARITY_LOWER_THRESHOLD;
        surcharge += band.mul_decimal(SOLIDARITY_LOWER_RATE);
    }
    if taxable_income > SOLIDARITY_UPPER_THRESHOLD {
        surcharge +=
            (taxable_income - SOLIDARITY_UPPER_THRESHOLD).mul_decimal(SOLIDARITY_UPPER_RATE);
    }
    surcharge
}

fn bracket_label(rate: Decimal) -> String {
    format!("{:.1}%", rate * Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TaxConfigLoader;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn config_2026() -> YearConfig {
        TaxConfigLoader::load("./config/tax")
            .unwrap()
            .year(2026)
            .unwrap()
            .clone()
    }

    #[test]
    fn test_zero_income() {
        let result = calculate_irs(&config_2026(), Money::ZERO).unwrap();
        assert_eq!(result.taxable_income, Money::ZERO);
        assert_eq!(result.total_tax, Money::ZERO);
        assert_eq!(result.effective_rate, Decimal::ZERO);
        assert!(result.bracket_breakdown.is_empty());
        assert_eq!(result.marginal_rate, dec("0.125"));
    }

    #[test]
    fn test_low_income_is_fully_exempt() {
        // 10 000.00 gross keeps less than the minimum existence after tax
        let result = calculate_irs(&config_2026(), Money::from_cents(1_000_000)).unwrap();
        assert_eq!(result.taxable_income, Money::from_cents(750_000));
        assert_eq!(result.bracket_tax, Money::from_cents(93_750));
        assert!(result.min_existence_applied);
        assert_eq!(result.total_tax, Money::ZERO);
    }

    #[test]
    fn test_min_existence_floor_clamps_tax() {
        let result = calculate_irs(&config_2026(), Money::from_cents(1_300_000)).unwrap();
        assert!(result.bracket_tax > Money::from_cents(12_000));
        assert!(result.min_existence_applied);
        assert_eq!(result.total_tax, Money::from_cents(12_000));
    }

    #[test]
    fn test_progressive_brackets() {
        let result = calculate_irs(&config_2026(), Money::from_cents(4_000_000)).unwrap();

        assert_eq!(result.taxable_income, Money::from_cents(3_000_000));
        assert_eq!(result.bracket_breakdown.len(), 6);
        assert_eq!(result.bracket_breakdown[0].label, "12.5%");
        assert_eq!(result.bracket_breakdown[0].tax_amount, Money::from_cents(96_287));
        assert_eq!(result.bracket_breakdown[5].label, "35.0%");
        assert_eq!(result.bracket_breakdown[5].taxable_in_bracket, Money::from_cents(285_400));
        assert_eq!(result.solidarity_surcharge, Money::ZERO);
        assert!(!result.min_existence_applied);
        assert_eq!(result.total_tax, Money::from_cents(654_772));
        assert_eq!(
            result.effective_rate,
            Decimal::from(654_772) / Decimal::from(3_000_000)
        );
        assert_eq!(result.marginal_rate, dec("0.35"));
    }

    #[test]
    fn test_marginal_rate_switches_at_bracket_limit() {
        let config = config_2026();
        // Taxable income is 75% of gross; the first limit is 7 703.00
        let below = calculate_irs(&config, Money::from_cents(1_027_066)).unwrap();
        assert_eq!(below.taxable_income, Money::from_cents(770_299));
        assert_eq!(below.marginal_rate, dec("0.125"));

        let at = calculate_irs_for_regime(
            &config,
            Money::from_cents(770_300),
            TaxRegime::OrganizedAccounting,
        )
        .unwrap();
        assert_eq!(at.marginal_rate, dec("0.165"));

        let top = calculate_irs(&config, Money::from_major(200_000)).unwrap();
        assert_eq!(top.marginal_rate, dec("0.48"));
    }

    #[test]
    fn test_breakdown_covers_taxable_income() {
        let result = calculate_irs(&config_2026(), Money::from_cents(12_345_678)).unwrap();
        let covered: Money = result
            .bracket_breakdown
            .iter()
            .map(|b| b.taxable_in_bracket)
            .sum();
        assert_eq!(covered, result.taxable_income);
    }

    #[test]
    fn test_solidarity_surcharge_tiers() {
        assert_eq!(solidarity_surcharge(Money::from_major(50_000)), Money::ZERO);
        assert_eq!(
            solidarity_surcharge(Money::from_major(250_000)),
            Money::from_cents(425_000)
        );
        // 425 000 + 5% of 150 000.00
        assert_eq!(
            solidarity_surcharge(Money::from_major(400_000)),
            Money::from_cents(1_175_000)
        );
    }

    #[test]
    fn test_organized_accounting_taxes_full_gross() {
        let result = calculate_irs_for_regime(
            &config_2026(),
            Money::from_major(400_000),
            TaxRegime::OrganizedAccounting,
        )
        .unwrap();
        assert_eq!(result.regime, TaxRegime::OrganizedAccounting);
        assert_eq!(result.taxable_income, Money::from_major(400_000));
        assert_eq!(result.solidarity_surcharge, Money::from_cents(1_175_000));
        assert_eq!(result.total_tax, result.bracket_tax + result.solidarity_surcharge);
    }

    #[test]
    fn test_negative_income_is_rejected() {
        let result = calculate_irs(&config_2026(), Money::from_cents(-1));
        assert!(matches!(result, Err(EngineError::NegativeIncome { .. })));
    }

    #[test]
    fn test_bracket_label_format() {
        assert_eq!(bracket_label(dec("0.125")), "12.5%");
        assert_eq!(bracket_label(dec("0.48")), "48.0%");
    }
}
