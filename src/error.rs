//! Error types for the shift earnings engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every input the engine refuses to compute on. Degenerate but valid
//! inputs (no matching rule, zero income, unconfigured monthly hours) are
//! not errors and never reach this type.

use thiserror::Error;

use crate::money::Money;

/// The main error type for the shift earnings engine.
///
/// # Example
///
/// ```
/// use shift_earnings::error::EngineError;
///
/// let error = EngineError::TaxYearNotConfigured { year: 2019 };
/// assert_eq!(error.to_string(), "No tax configuration for fiscal year 2019");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file or directory was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A fiscal year configuration was parsed but is not usable.
    #[error("Invalid tax configuration for fiscal year {year}: {message}")]
    InvalidTaxConfig {
        /// The fiscal year of the offending configuration.
        year: i32,
        /// A description of what made the configuration invalid.
        message: String,
    },

    /// Two configuration files declared the same fiscal year.
    #[error("Fiscal year {year} is configured more than once")]
    DuplicateFiscalYear {
        /// The duplicated fiscal year.
        year: i32,
    },

    /// No configuration exists for the requested fiscal year.
    #[error("No tax configuration for fiscal year {year}")]
    TaxYearNotConfigured {
        /// The requested fiscal year.
        year: i32,
    },

    /// A shift was invalid or contained inconsistent data.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// A pricing rule was malformed.
    #[error("Invalid pricing rule '{rule}': {message}")]
    InvalidPricingRule {
        /// The name of the rule (or its position when unnamed).
        rule: String,
        /// A description of what made the rule invalid.
        message: String,
    },

    /// A clock-time window could not be parsed or was empty.
    #[error("Invalid time window '{window}': {message}")]
    InvalidTimeWindow {
        /// The window as supplied, `start-end`.
        window: String,
        /// A description of the problem.
        message: String,
    },

    /// An income figure handed to the tax engine was negative.
    #[error("Income must not be negative, got {amount}")]
    NegativeIncome {
        /// The rejected amount.
        amount: Money,
    },

    /// A rate supplied by the caller was outside its allowed range.
    #[error("Invalid {field}: {message}")]
    InvalidRate {
        /// The name of the rate field.
        field: String,
        /// A description of the problem.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/2026.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/2026.yaml"
        );
    }

    #[test]
    fn test_invalid_tax_config_displays_year_and_message() {
        let error = EngineError::InvalidTaxConfig {
            year: 2026,
            message: "brackets must not be empty".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid tax configuration for fiscal year 2026: brackets must not be empty"
        );
    }

    #[test]
    fn test_invalid_pricing_rule_displays_rule_and_message() {
        let error = EngineError::InvalidPricingRule {
            rule: "Night".to_string(),
            message: "set exactly one of rate_cents or rate_multiplier".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid pricing rule 'Night': set exactly one of rate_cents or rate_multiplier"
        );
    }

    #[test]
    fn test_invalid_time_window_displays_window() {
        let error = EngineError::InvalidTimeWindow {
            window: "08:00-08:00".to_string(),
            message: "window is empty".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid time window '08:00-08:00': window is empty"
        );
    }

    #[test]
    fn test_negative_income_displays_major_units() {
        let error = EngineError::NegativeIncome {
            amount: Money::from_cents(-1050),
        };
        assert_eq!(error.to_string(), "Income must not be negative, got -10.50");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_year() -> EngineResult<()> {
            Err(EngineError::TaxYearNotConfigured { year: 2030 })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_missing_year()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
