//! Consolidated annual tax estimate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::YearConfig;
use crate::error::EngineResult;
use crate::money::Money;

use super::irs::{BracketResult, TaxRegime, calculate_irs_for_regime};
use super::social_security::calculate_social_security;
use super::withholding::calculate_withholding;

/// Income tax, social security and net income for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualSummary {
    /// The fiscal year of the configuration used.
    pub fiscal_year: i32,
    /// Annual gross income.
    pub gross_income: Money,
    /// Income subject to the tax brackets.
    pub taxable_income: Money,
    /// Income tax due.
    pub irs_amount: Money,
    /// Income tax over taxable income.
    pub irs_effective_rate: Decimal,
    /// Per-bracket detail of the income tax.
    pub bracket_breakdown: Vec<BracketResult>,
    /// Monthly social security base, estimated from an average quarter.
    pub ss_monthly_base: Money,
    /// Social security due each quarter.
    pub ss_quarterly_payment: Money,
    /// Social security due over the year.
    pub ss_annual: Money,
    /// Tax withheld on the year's invoices at the default rate.
    pub withholding_total: Money,
    /// Gross minus income tax and social security.
    pub net_income: Money,
    /// A twelfth of the net income.
    pub monthly_net: Money,
}

/// Builds the annual summary under the simplified regime.
///
/// Social security is estimated from an average quarter (a quarter of the
/// annual gross) rather than from real quarterly figures.
///
/// # Example
///
/// ```no_run
/// use shift_earnings::config::TaxConfigLoader;
/// use shift_earnings::money::Money;
/// use shift_earnings::tax::calculate_annual_summary;
///
/// let loader = TaxConfigLoader::load("./config/tax")?;
/// let summary = calculate_annual_summary(loader.year(2026)?, Money::from_major(40_000))?;
/// assert_eq!(summary.net_income, summary.gross_income - summary.irs_amount - summary.ss_annual);
/// # Ok::<(), shift_earnings::error::EngineError>(())
/// ```
pub fn calculate_annual_summary(
    config: &YearConfig,
    annual_gross_income: Money,
) -> EngineResult<AnnualSummary> {
    calculate_annual_summary_for_regime(config, annual_gross_income, TaxRegime::Simplified)
}

/// Builds the annual summary under the given regime.
pub fn calculate_annual_summary_for_regime(
    config: &YearConfig,
    annual_gross_income: Money,
    regime: TaxRegime,
) -> EngineResult<AnnualSummary> {
    let irs = calculate_irs_for_regime(config, annual_gross_income, regime)?;
    let ss = calculate_social_security(config, annual_gross_income / 4)?;
    let withholding_total =
        calculate_withholding(annual_gross_income, config.default_withholding_rate);

    let net_income = annual_gross_income - irs.total_tax - ss.annual_estimate;

    debug!(
        fiscal_year = config.fiscal_year,
        gross = %annual_gross_income,
        irs = %irs.total_tax,
        ss = %ss.annual_estimate,
        net = %net_income,
        "Calculated annual summary"
    );

    Ok(AnnualSummary {
        fiscal_year: config.fiscal_year,
        gross_income: annual_gross_income,
        taxable_income: irs.taxable_income,
        irs_amount: irs.total_tax,
        irs_effective_rate: irs.effective_rate,
        bracket_breakdown: irs.bracket_breakdown,
        ss_monthly_base: ss.monthly_base,
        ss_quarterly_payment: ss.quarterly_payment,
        ss_annual: ss.annual_estimate,
        withholding_total,
        net_income,
        monthly_net: net_income / 12,
    })
}
