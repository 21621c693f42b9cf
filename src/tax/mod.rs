//! Income tax and social security estimates.
//!
//! Every function here is a pure computation over a [`YearConfig`] and an
//! income figure. Negative income is rejected; zero income yields zero or
//! floor values.
//!
//! [`YearConfig`]: crate::config::YearConfig

mod irs;
mod social_security;
mod summary;
mod withholding;

pub use irs::{
    BracketResult, IrsResult, SOLIDARITY_LOWER_RATE, SOLIDARITY_LOWER_THRESHOLD,
    SOLIDARITY_UPPER_RATE, SOLIDARITY_UPPER_THRESHOLD, TaxRegime, calculate_irs,
    calculate_irs_for_regime, solidarity_surcharge,
};
pub use social_security::{SS_BASE_CEILING_IAS_UNITS, SsResult, calculate_social_security};
pub use summary::{AnnualSummary, calculate_annual_summary, calculate_annual_summary_for_regime};
pub use withholding::{InvoiceAmounts, calculate_invoice, calculate_withholding};
