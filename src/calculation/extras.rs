//! Consultation and outside visit pay.
//!
//! Some workplaces pay per patient seen or per outside visit on top of the
//! time-based rate. The per-unit rate comes from the pricing rules: the
//! highest-priority rule that matches the shift's local start instant and
//! carries a rate for that kind prices every unit recorded on the shift.

use tracing::trace;

use crate::error::EngineResult;
use crate::models::{ExtraEarning, ExtraKind, PricingRule, Shift, Workplace};
use crate::money::Money;

use super::rule_matching::{rule_matches, sort_by_priority};

const EXTRA_KINDS: [ExtraKind; 2] = [ExtraKind::Consultation, ExtraKind::OutsideVisit];

/// Returns the number of units of `kind` the workplace pays for on this
/// shift.
///
/// Zero when the workplace does not pay for the kind or nothing was
/// recorded.
pub fn billable_count(shift: &Shift, workplace: &Workplace, kind: ExtraKind) -> u32 {
    let (enabled, count) = match kind {
        ExtraKind::Consultation => (workplace.has_consultation_pay, shift.patients_seen),
        ExtraKind::OutsideVisit => (workplace.has_outside_visit_pay, shift.outside_visits),
    };
    if enabled { count.unwrap_or(0) } else { 0 }
}

fn per_unit_rate(rule: &PricingRule, kind: ExtraKind) -> Option<Money> {
    match kind {
        ExtraKind::Consultation => rule.consultation_rate,
        ExtraKind::OutsideVisit => rule.outside_visit_rate,
    }
}

/// Prices the consultations and outside visits recorded on a shift.
///
/// Returns at most one line item per kind, in the order consultations then
/// outside visits. A kind is skipped when the workplace does not pay for
/// it, when its count is zero or unset, or when no rule matching the shift
/// start carries a rate for it.
///
/// # Errors
///
/// Returns [`EngineError::InvalidShift`](crate::error::EngineError::InvalidShift)
/// if the shift does not end after it starts.
///
/// # Example
///
/// ```
/// use shift_earnings::calculation::resolve_extra_earnings;
/// use shift_earnings::models::{ExtraKind, PayModel, PricingRule, RateTerm, Shift, Workplace};
/// use shift_earnings::money::Money;
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let workplace = Workplace {
///     id: Uuid::nil(),
///     name: "USF Lumiar".to_string(),
///     pay_model: PayModel::PerTurn,
///     base_rate: Money::from_cents(20_000),
///     currency: "EUR".to_string(),
///     monthly_expected_hours: None,
///     has_consultation_pay: true,
///     has_outside_visit_pay: false,
/// };
/// let shift = Shift {
///     id: Uuid::nil(),
///     workplace_id: workplace.id,
///     start_time: Utc.with_ymd_and_hms(2026, 1, 14, 9, 0, 0).unwrap(),
///     end_time: Utc.with_ymd_and_hms(2026, 1, 14, 17, 0, 0).unwrap(),
///     timezone: chrono_tz::Europe::Lisbon,
///     patients_seen: Some(12),
///     outside_visits: Some(3),
/// };
/// let rules = vec![
///     PricingRule::new("Clinic", 1, RateTerm::Multiplier(Decimal::ONE))
///         .with_consultation_rate(Money::from_cents(500))
///         .with_outside_visit_rate(Money::from_cents(2_000)),
/// ];
///
/// let extras = resolve_extra_earnings(&shift, &workplace, &rules).unwrap();
/// assert_eq!(extras.len(), 1);
/// assert_eq!(extras[0].kind, ExtraKind::Consultation);
/// assert_eq!(extras[0].amount, Money::from_cents(6_000));
/// ```
pub fn resolve_extra_earnings(
    shift: &Shift,
    workplace: &Workplace,
    rules: &[PricingRule],
) -> EngineResult<Vec<ExtraEarning>> {
    shift.validate()?;

    let local_start = shift.start_time.with_timezone(&shift.timezone);
    let sorted_rules = sort_by_priority(rules);
    let mut extras = Vec::new();

    for kind in EXTRA_KINDS {
        let count = billable_count(shift, workplace, kind);
        if count == 0 {
            continue;
        }

        let priced = sorted_rules.iter().find_map(|rule| {
            per_unit_rate(rule, kind)
                .filter(|_| rule_matches(rule, &local_start))
                .map(|rate| (rule, rate))
        });

        if let Some((rule, rate)) = priced {
            let amount = rate * i64::from(count);
            trace!(
                shift_id = %shift.id,
                kind = %kind,
                count,
                rule = %rule.name,
                rate = %rate,
                amount = %amount,
                "Priced extra"
            );
            extras.push(ExtraEarning {
                kind,
                count,
                rate,
                amount,
                rule_name: rule.name.clone(),
            });
        }
    }

    Ok(extras)
}
