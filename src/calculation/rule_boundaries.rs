//! Splitting a day range at pricing rule window edges.
//!
//! Within one local day, every rule's window start and end becomes a
//! potential segment boundary. The resulting slices are the smallest spans
//! over which the rule that applies can not change.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::models::PricingRule;

use super::day_boundaries::{DayRange, local_instant};

/// A candidate segment: a span of one local day with no rule edge inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlice {
    /// Slice start (inclusive).
    pub start: DateTime<Utc>,
    /// Slice end (exclusive).
    pub end: DateTime<Utc>,
    /// The local calendar date the slice belongs to.
    pub local_date: NaiveDate,
}

/// Splits a day range at every rule window edge strictly inside it.
///
/// Window edges are localized on the range's own calendar date, so an
/// overnight window 22:00-06:00 contributes both 06:00 and 22:00 of that
/// day. Boundaries are sorted and deduplicated before slicing.
pub fn split_by_rule_windows(range: &DayRange, rules: &[PricingRule], tz: Tz) -> Vec<TimeSlice> {
    let mut boundaries = vec![range.start, range.end];

    for window in rules.iter().filter_map(|rule| rule.time_window) {
        for clock in [window.start(), window.end()] {
            let edge = local_instant(tz, range.local_date.and_time(clock));
            if edge > range.start && edge < range.end {
                boundaries.push(edge);
            }
        }
    }

    boundaries.sort_unstable();
    boundaries.dedup();

    boundaries
        .windows(2)
        .map(|pair| TimeSlice {
            start: pair[0],
            end: pair[1],
            local_date: range.local_date,
        })
        .collect()
}
