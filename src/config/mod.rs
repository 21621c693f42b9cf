//! Configuration loading and management for the tax engine.
//!
//! This module provides functionality to load fiscal year tax
//! configurations (income tax brackets, social security parameters and
//! thresholds) from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use shift_earnings::config::TaxConfigLoader;
//!
//! let loader = TaxConfigLoader::load("./config/tax").unwrap();
//! println!("Configured years: {:?}", loader.years());
//! ```

mod loader;
mod types;

pub use loader::TaxConfigLoader;
pub use types::{IrsBracket, YearConfig};
