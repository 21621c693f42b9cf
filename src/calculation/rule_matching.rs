//! Pricing rule ordering and matching.

use chrono::{DateTime, Datelike};
use chrono_tz::Tz;

use crate::models::{BASE_RULE_NAME, DayOfWeek, PricingRule};
use crate::money::Money;

/// The rate that applies at an instant and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRate<'a> {
    /// The rate in effect.
    pub rate: Money,
    /// The matching rule's name, or [`BASE_RULE_NAME`].
    pub rule_name: &'a str,
}

/// Orders rules by ascending priority.
///
/// The sort is stable, so rules sharing a priority keep their input order
/// and the earlier one wins.
pub fn sort_by_priority(rules: &[PricingRule]) -> Vec<&PricingRule> {
    let mut sorted: Vec<&PricingRule> = rules.iter().collect();
    sorted.sort_by_key(|rule| rule.priority);
    sorted
}

/// Returns `true` if the rule applies at the given local instant.
///
/// Specific dates, when present, replace the weekday filter rather than
/// narrowing it. The time window is checked in both cases.
///
/// # Example
///
/// ```
/// use shift_earnings::calculation::rule_matches;
/// use shift_earnings::models::{DayOfWeek, PricingRule, RateTerm};
/// use chrono::{NaiveDate, TimeZone};
/// use rust_decimal::Decimal;
///
/// let christmas = PricingRule::new("Christmas", 0, RateTerm::Multiplier(Decimal::from(2)))
///     .with_dates([NaiveDate::from_ymd_opt(2025, 12, 25).unwrap()])
///     .with_days([DayOfWeek::Mon]);
///
/// // 2025-12-25 is a Thursday.
/// let at = chrono_tz::Europe::Lisbon.with_ymd_and_hms(2025, 12, 25, 10, 0, 0).unwrap();
/// assert!(rule_matches(&christmas, &at));
/// ```
pub fn rule_matches(rule: &PricingRule, local: &DateTime<Tz>) -> bool {
    if !rule.specific_dates.is_empty() {
        if !rule.specific_dates.contains(&local.date_naive()) {
            return false;
        }
    } else if !rule.days_of_week.is_empty()
        && !rule.days_of_week.contains(&DayOfWeek::from(local.weekday()))
    {
        return false;
    }

    rule.time_window
        .is_none_or(|window| window.contains(local.time()))
}

/// Picks the first matching rule from a priority-sorted list.
///
/// Falls back to the workplace base rate when nothing matches.
pub fn resolve_rate<'a>(
    sorted_rules: &[&'a PricingRule],
    base_rate: Money,
    local: &DateTime<Tz>,
) -> ResolvedRate<'a> {
    sorted_rules
        .iter()
        .copied()
        .find(|rule| rule_matches(rule, local))
        .map(|rule| ResolvedRate {
            rate: rule.rate.apply(base_rate),
            rule_name: rule.name.as_str(),
        })
        .unwrap_or(ResolvedRate {
            rate: base_rate,
            rule_name: BASE_RULE_NAME,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RateTerm, TimeWindow};
    use chrono::{NaiveDate, TimeZone};
    use chrono_tz::Europe::Lisbon;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32) -> DateTime<Tz> {
        Lisbon.with_ymd_and_hms(y, m, d, h, mi, 0).unwrap()
    }

    fn fixed(name: &str, priority: i32, cents: i64) -> PricingRule {
        PricingRule::new(name, priority, RateTerm::FixedAmount(Money::from_cents(cents)))
    }

    #[test]
    fn test_unconditional_rule_always_matches() {
        assert!(rule_matches(&fixed("Flat", 1, 100), &at(2026, 1, 14, 3, 0)));
    }

    #[test]
    fn test_overnight_window_matching() {
        let night = fixed("Night", 1, 100)
            .with_time_window(TimeWindow::parse("22:00", "06:00").unwrap());
        assert!(rule_matches(&night, &at(2026, 1, 14, 23, 30)));
        assert!(rule_matches(&night, &at(2026, 1, 14, 2, 0)));
        assert!(!rule_matches(&night, &at(2026, 1, 14, 12, 0)));
    }

    #[test]
    fn test_weekday_filter() {
        let weekend = fixed("Weekend", 1, 100).with_days(DayOfWeek::WEEKEND);
        // 2026-01-17 is a Saturday, 2026-01-14 a Wednesday
        assert!(rule_matches(&weekend, &at(2026, 1, 17, 10, 0)));
        assert!(!rule_matches(&weekend, &at(2026, 1, 14, 10, 0)));
    }

    #[test]
    fn test_specific_dates_override_weekdays() {
        let christmas = fixed("Christmas", 0, 100)
            .with_dates([NaiveDate::from_ymd_opt(2025, 12, 25).unwrap()])
            .with_days([DayOfWeek::Mon]);

        assert!(rule_matches(&christmas, &at(2025, 12, 25, 10, 0)));
        // 2025-12-22 and 2025-12-29 are Mondays
        assert!(!rule_matches(&christmas, &at(2025, 12, 22, 10, 0)));
        assert!(!rule_matches(&christmas, &at(2025, 12, 29, 10, 0)));
    }

    #[test]
    fn test_specific_dates_still_respect_time_window() {
        let eve = fixed("Christmas Eve night", 0, 100)
            .with_dates([NaiveDate::from_ymd_opt(2025, 12, 24).unwrap()])
            .with_time_window(TimeWindow::parse("20:00", "23:59").unwrap());

        assert!(rule_matches(&eve, &at(2025, 12, 24, 21, 0)));
        assert!(!rule_matches(&eve, &at(2025, 12, 24, 10, 0)));
    }

    #[test]
    fn test_sort_is_stable_for_equal_priorities() {
        let rules = vec![fixed("B", 2, 1), fixed("A1", 1, 2), fixed("A2", 1, 3)];
        let names: Vec<&str> = sort_by_priority(&rules).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A1", "A2", "B"]);
    }

    #[test]
    fn test_lowest_priority_value_wins() {
        let rules = vec![fixed("Second", 2, 2_000), fixed("First", 1, 1_000)];
        let sorted = sort_by_priority(&rules);
        let resolved = resolve_rate(&sorted, Money::from_cents(500), &at(2026, 1, 14, 10, 0));
        assert_eq!(resolved.rule_name, "First");
        assert_eq!(resolved.rate, Money::from_cents(1_000));
    }

    #[test]
    fn test_fallback_to_base_rate() {
        let weekend = fixed("Weekend", 1, 4_000).with_days(DayOfWeek::WEEKEND);
        let rules = vec![weekend];
        let sorted = sort_by_priority(&rules);
        let resolved = resolve_rate(&sorted, Money::from_cents(2_500), &at(2026, 1, 14, 10, 0));
        assert_eq!(resolved.rule_name, BASE_RULE_NAME);
        assert_eq!(resolved.rate, Money::from_cents(2_500));
    }

    #[test]
    fn test_multiplier_applies_to_base_rate() {
        let rules = vec![PricingRule::new("Holiday", 0, RateTerm::Multiplier(dec("1.5")))];
        let sorted = sort_by_priority(&rules);
        let resolved = resolve_rate(&sorted, Money::from_cents(2_501), &at(2026, 1, 14, 10, 0));
        // 2501 * 1.5 = 3751.5, truncated
        assert_eq!(resolved.rate, Money::from_cents(3_751));
    }
}
