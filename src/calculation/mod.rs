//! Calculation logic for shift earnings.
//!
//! This module turns a shift, its workplace and the workplace's pricing
//! rules into priced earning segments. The work happens in stages: local
//! midnight splitting, rule window splitting, priority-ordered rule
//! matching and pay model conversion. Consultations and outside visits
//! recorded on the shift are priced separately as per-unit extras.

mod day_boundaries;
mod earnings_resolver;
mod extras;
mod pay_model;
mod rule_boundaries;
mod rule_matching;

pub use day_boundaries::{
    DayRange, hours_between, local_date, local_instant, millis_between, split_by_local_day,
};
pub use earnings_resolver::{calculate_shift_earnings, resolve_earnings, total_earnings};
pub use extras::{billable_count, resolve_extra_earnings};
pub use pay_model::segment_amount;
pub use rule_boundaries::{TimeSlice, split_by_rule_windows};
pub use rule_matching::{ResolvedRate, resolve_rate, rule_matches, sort_by_priority};
