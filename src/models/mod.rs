//! Core data models for the shift earnings engine.
//!
//! These are the records a caller hands to the engine (workplaces, shifts,
//! pricing rules) and the records it gets back (earning segments and
//! per-unit extras).

mod earnings;
mod pricing_rule;
mod shift;
mod workplace;

pub use earnings::{
    BASE_RULE_NAME, EarningSegment, EarningsWarning, ExtraEarning, ExtraKind, ShiftEarnings,
};
pub use pricing_rule::{DayOfWeek, PricingRule, PricingRuleInput, RateTerm, TimeWindow};
pub use shift::{DEFAULT_TIMEZONE, Shift};
pub use workplace::{PayModel, Workplace};
