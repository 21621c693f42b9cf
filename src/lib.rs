//! Shift Earnings Engine for freelance clinicians
//!
//! This crate turns work shifts into money. The earnings side splits a shift
//! into segments governed by prioritized workplace pricing rules and prices
//! each segment under the workplace's pay model. The tax side estimates
//! Portuguese income tax (IRS) and independent worker social security from
//! an annual or quarterly gross figure, using fiscal year tables loaded from
//! YAML.
//!
//! Both sides are pure functions over caller-supplied records. Amounts are
//! whole cents ([`money::Money`]); rates and hours are exact decimals.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod money;
pub mod tax;
