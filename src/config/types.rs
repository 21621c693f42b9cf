//! Configuration types for tax computation.
//!
//! This module contains the strongly-typed fiscal year structures that are
//! deserialized from YAML configuration files, together with the checks a
//! configuration must pass before the tax engine will use it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::money::Money;

/// One income tax bracket, covering `[lower_limit, upper_limit)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrsBracket {
    /// Inclusive lower bound of the bracket, in cents.
    pub lower_limit: Money,
    /// Exclusive upper bound, in cents. `None` for the open-ended top bracket.
    pub upper_limit: Option<Money>,
    /// Marginal rate applied to income inside the bracket.
    pub rate: Decimal,
    /// Cumulative-formula deduction. Carried for reference only; the engine
    /// taxes bracket by bracket.
    #[serde(default)]
    pub deduction: Money,
}

impl IrsBracket {
    /// The width of the bracket, or `None` if it is unbounded.
    pub fn width(&self) -> Option<Money> {
        self.upper_limit.map(|upper| upper - self.lower_limit)
    }

    /// Returns `true` if the amount falls inside the bracket.
    pub fn contains(&self, amount: Money) -> bool {
        amount >= self.lower_limit && self.upper_limit.is_none_or(|upper| amount < upper)
    }
}

/// The complete tax configuration for one fiscal year.
///
/// # Example
///
/// ```
/// use shift_earnings::config::{IrsBracket, YearConfig};
/// use shift_earnings::money::Money;
/// use rust_decimal::Decimal;
///
/// let config = YearConfig {
///     fiscal_year: 2026,
///     brackets: vec![IrsBracket {
///         lower_limit: Money::ZERO,
///         upper_limit: None,
///         rate: Decimal::new(25, 2),
///         deduction: Money::ZERO,
///     }],
///     ss_rate: Decimal::new(214, 3),
///     ss_income_coefficient: Decimal::new(70, 2),
///     ias_value: Money::from_cents(53_713),
///     default_withholding_rate: Decimal::new(25, 2),
///     min_existence: Money::from_cents(1_288_000),
///     simplified_coefficient: Decimal::new(75, 2),
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearConfig {
    /// The fiscal year this configuration applies to.
    pub fiscal_year: i32,
    /// Brackets in ascending order, spanning `[0, ∞)` without gaps.
    pub brackets: Vec<IrsBracket>,
    /// Social security contribution rate.
    pub ss_rate: Decimal,
    /// Fraction of quarterly gross that counts as relevant income.
    pub ss_income_coefficient: Decimal,
    /// Social security index unit (IAS), in cents.
    #[serde(rename = "ias_value_cents")]
    pub ias_value: Money,
    /// Withholding rate applied to invoices by default.
    pub default_withholding_rate: Decimal,
    /// Minimum untaxed annual income, in cents.
    #[serde(rename = "min_existence_cents")]
    pub min_existence: Money,
    /// Fraction of gross taxed under the simplified regime.
    pub simplified_coefficient: Decimal,
}

impl YearConfig {
    /// Checks the configuration for internal consistency.
    ///
    /// Brackets must start at zero, be contiguous, have positive width and
    /// end with a single unbounded bracket. Every rate and coefficient must
    /// lie in `[0, 1]` and the money thresholds must not be negative.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidTaxConfig {
            year: self.fiscal_year,
            message,
        };

        let first = self
            .brackets
            .first()
            .ok_or_else(|| invalid("at least one bracket is required".to_string()))?;
        if first.lower_limit != Money::ZERO {
            return Err(invalid(format!(
                "first bracket must start at 0, starts at {}",
                first.lower_limit
            )));
        }

        let last_index = self.brackets.len() - 1;
        for (index, bracket) in self.brackets.iter().enumerate() {
            check_fraction(&format!("bracket {} rate", index + 1), bracket.rate).map_err(&invalid)?;
            if bracket.deduction.is_negative() {
                return Err(invalid(format!("bracket {} deduction is negative", index + 1)));
            }

            match (bracket.upper_limit, index == last_index) {
                (None, true) => {}
                (None, false) => {
                    return Err(invalid(format!(
                        "only the last bracket may be unbounded, bracket {} is",
                        index + 1
                    )));
                }
                (Some(_), true) => {
                    return Err(invalid("the last bracket must be unbounded".to_string()));
                }
                (Some(upper), false) => {
                    if upper <= bracket.lower_limit {
                        return Err(invalid(format!(
                            "bracket {} has an empty range {} - {}",
                            index + 1,
                            bracket.lower_limit,
                            upper
                        )));
                    }
                    let next = &self.brackets[index + 1];
                    if next.lower_limit != upper {
                        return Err(invalid(format!(
                            "bracket {} ends at {} but bracket {} starts at {}",
                            index + 1,
                            upper,
                            index + 2,
                            next.lower_limit
                        )));
                    }
                }
            }
        }

        for (field, value) in [
            ("ss_rate", self.ss_rate),
            ("ss_income_coefficient", self.ss_income_coefficient),
            ("default_withholding_rate", self.default_withholding_rate),
            ("simplified_coefficient", self.simplified_coefficient),
        ] {
            check_fraction(field, value).map_err(&invalid)?;
        }

        if self.ias_value.is_negative() {
            return Err(invalid("ias_value_cents is negative".to_string()));
        }
        if self.min_existence.is_negative() {
            return Err(invalid("min_existence_cents is negative".to_string()));
        }

        Ok(())
    }

    /// Returns the bracket an amount of taxable income falls in.
    pub fn bracket_for(&self, taxable: Money) -> Option<&IrsBracket> {
        self.brackets.iter().find(|bracket| bracket.contains(taxable))
    }
}

fn check_fraction(field: &str, value: Decimal) -> Result<(), String> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(format!("{} must be between 0 and 1, got {}", field, value));
    }
    Ok(())
}
