//! Social security contributions for independent workers.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::YearConfig;
use crate::error::{EngineError, EngineResult};
use crate::money::Money;

/// Number of IAS units that cap the monthly contributory base.
pub const SS_BASE_CEILING_IAS_UNITS: i64 = 12;

/// The outcome of a social security computation for one quarter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsResult {
    /// Quarterly gross times the income coefficient.
    pub relevant_income: Money,
    /// Monthly contributory base after the IAS floor and ceiling.
    pub monthly_base: Money,
    /// Contribution due each month.
    pub monthly_contribution: Money,
    /// Contribution due for the quarter.
    pub quarterly_payment: Money,
    /// The monthly contribution projected over a year.
    pub annual_estimate: Money,
}

/// Computes social security contributions from one quarter's gross income.
///
/// The monthly base is a third of the relevant income, raised to at least
/// one IAS and capped at twelve.
///
/// # Errors
///
/// Returns [`EngineError::NegativeIncome`] for a negative gross.
pub fn calculate_social_security(
    config: &YearConfig,
    quarterly_gross_income: Money,
) -> EngineResult<SsResult> {
    if quarterly_gross_income.is_negative() {
        return Err(EngineError::NegativeIncome {
            amount: quarterly_gross_income,
        });
    }

    let relevant_income = quarterly_gross_income.mul_decimal(config.ss_income_coefficient);
    let ceiling = config.ias_value * SS_BASE_CEILING_IAS_UNITS;
    let monthly_base = (relevant_income / 3).max(config.ias_value).min(ceiling);

    let monthly_contribution = monthly_base.mul_decimal(config.ss_rate);

    debug!(
        fiscal_year = config.fiscal_year,
        quarterly_gross = %quarterly_gross_income,
        monthly_base = %monthly_base,
        monthly_contribution = %monthly_contribution,
        "Calculated social security"
    );

    Ok(SsResult {
        relevant_income,
        monthly_base,
        monthly_contribution,
        quarterly_payment: monthly_contribution * 3,
        annual_estimate: monthly_contribution * 12,
    })
}
