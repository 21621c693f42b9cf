//! Shift earnings resolution.
//!
//! This is the entry point of the earnings side of the engine. A shift is
//! cut at every local midnight, each day is cut again at every rule window
//! edge, and each resulting slice is priced by the first matching rule in
//! priority order. The slices are then converted to amounts according to
//! the workplace's pay model.

use tracing::{debug, trace, warn};

use crate::error::EngineResult;
use crate::models::{
    EarningSegment, EarningsWarning, ExtraKind, PayModel, PricingRule, Shift, ShiftEarnings,
    Workplace,
};
use crate::money::Money;

use super::day_boundaries::{hours_between, millis_between, split_by_local_day};
use super::extras::{billable_count, resolve_extra_earnings};
use super::pay_model::segment_amount;
use super::rule_boundaries::split_by_rule_windows;
use super::rule_matching::{resolve_rate, sort_by_priority};

/// Splits a shift into priced earning segments.
///
/// The returned segments are chronological, contiguous and cover exactly
/// `[shift.start_time, shift.end_time)`. Segments priced without a matching
/// rule carry the rule name `"base"`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidShift`](crate::error::EngineError::InvalidShift)
/// if the shift does not end after it starts.
///
/// # Example
///
/// ```
/// use shift_earnings::calculation::resolve_earnings;
/// use shift_earnings::models::{PayModel, Shift, Workplace};
/// use shift_earnings::money::Money;
/// use chrono::{TimeZone, Utc};
/// use uuid::Uuid;
///
/// let workplace = Workplace {
///     id: Uuid::nil(),
///     name: "Clinic".to_string(),
///     pay_model: PayModel::Hourly,
///     base_rate: Money::from_cents(2_500),
///     currency: "EUR".to_string(),
///     monthly_expected_hours: None,
///     has_consultation_pay: false,
///     has_outside_visit_pay: false,
/// };
/// let shift = Shift {
///     id: Uuid::nil(),
///     workplace_id: workplace.id,
///     start_time: Utc.with_ymd_and_hms(2026, 1, 14, 9, 0, 0).unwrap(),
///     end_time: Utc.with_ymd_and_hms(2026, 1, 14, 17, 0, 0).unwrap(),
///     timezone: chrono_tz::Europe::Lisbon,
///     patients_seen: None,
///     outside_visits: None,
/// };
///
/// let segments = resolve_earnings(&shift, &workplace, &[]).unwrap();
/// assert_eq!(segments.len(), 1);
/// assert_eq!(segments[0].amount, Money::from_cents(20_000));
/// assert_eq!(segments[0].rule_name, "base");
/// ```
pub fn resolve_earnings(
    shift: &Shift,
    workplace: &Workplace,
    rules: &[PricingRule],
) -> EngineResult<Vec<EarningSegment>> {
    shift.validate()?;

    let tz = shift.timezone;
    let sorted_rules = sort_by_priority(rules);
    let shift_millis = shift.duration_millis();
    let mut segments = Vec::new();

    for day in split_by_local_day(shift.start_time, shift.end_time, tz) {
        for slice in split_by_rule_windows(&day, rules, tz) {
            let local_start = slice.start.with_timezone(&tz);
            let resolved = resolve_rate(&sorted_rules, workplace.base_rate, &local_start);
            let amount = segment_amount(
                workplace,
                resolved.rate,
                millis_between(slice.start, slice.end),
                shift_millis,
            );

            trace!(
                shift_id = %shift.id,
                start = %slice.start,
                end = %slice.end,
                rule = resolved.rule_name,
                rate = %resolved.rate,
                amount = %amount,
                "Priced segment"
            );

            segments.push(EarningSegment {
                start: slice.start,
                end: slice.end,
                local_date: slice.local_date,
                hours: hours_between(slice.start, slice.end),
                rate: resolved.rate,
                amount,
                rule_name: resolved.rule_name.to_string(),
            });
        }
    }

    debug!(
        shift_id = %shift.id,
        workplace_id = %workplace.id,
        pay_model = %workplace.pay_model,
        rules = rules.len(),
        segments = segments.len(),
        "Resolved shift earnings"
    );

    Ok(segments)
}

/// Resolves a shift and bundles the segments and extras with their total.
///
/// The total is the sum of every segment amount plus every extra line
/// item. Degenerate but valid inputs are reported in `warnings` instead of
/// failing:
/// - a monthly workplace without positive expected hours prices every
///   segment at zero and adds [`EarningsWarning::MonthlyHoursNotConfigured`]
/// - billable consultations or outside visits with no rate on any rule
///   matching the shift start add
///   [`EarningsWarning::ConsultationRateNotConfigured`] or
///   [`EarningsWarning::OutsideVisitRateNotConfigured`]
pub fn calculate_shift_earnings(
    shift: &Shift,
    workplace: &Workplace,
    rules: &[PricingRule],
) -> EngineResult<ShiftEarnings> {
    let segments = resolve_earnings(shift, workplace, rules)?;
    let extras = resolve_extra_earnings(shift, workplace, rules)?;
    let extras_total: Money = extras.iter().map(|extra| extra.amount).sum();
    let total = total_earnings(&segments) + extras_total;

    let mut warnings = Vec::new();
    if workplace.pay_model == PayModel::Monthly && workplace.monthly_hourly_divisor().is_none() {
        warn!(
            workplace_id = %workplace.id,
            monthly_expected_hours = ?workplace.monthly_expected_hours,
            "Monthly workplace has no expected hours, earnings are zero"
        );
        warnings.push(EarningsWarning::MonthlyHoursNotConfigured);
    }

    for (kind, warning) in [
        (ExtraKind::Consultation, EarningsWarning::ConsultationRateNotConfigured),
        (ExtraKind::OutsideVisit, EarningsWarning::OutsideVisitRateNotConfigured),
    ] {
        let count = billable_count(shift, workplace, kind);
        if count > 0 && !extras.iter().any(|extra| extra.kind == kind) {
            warn!(
                shift_id = %shift.id,
                workplace_id = %workplace.id,
                kind = %kind,
                count,
                "No pricing rule carries a rate for recorded extras"
            );
            warnings.push(warning);
        }
    }

    Ok(ShiftEarnings {
        shift_id: shift.id,
        segments,
        extras,
        total,
        warnings,
    })
}

/// Sums the amounts of a list of segments.
pub fn total_earnings(segments: &[EarningSegment]) -> Money {
    segments.iter().map(|segment| segment.amount).sum()
}
