//! Earnings output models.
//!
//! This module contains the [`EarningSegment`] produced for every priced
//! slice of a shift and the [`ShiftEarnings`] aggregate returned to callers.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

/// Rule name reported on segments priced at the workplace base rate.
pub const BASE_RULE_NAME: &str = "base";

/// A contiguous slice of a shift priced by a single rule.
///
/// # Example
///
/// ```
/// use shift_earnings::models::{EarningSegment, BASE_RULE_NAME};
/// use shift_earnings::money::Money;
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let segment = EarningSegment {
///     start: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
///     end: Utc.with_ymd_and_hms(2026, 1, 15, 17, 0, 0).unwrap(),
///     local_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     hours: Decimal::from(8),
///     rate: Money::from_cents(2_500),
///     amount: Money::from_cents(20_000),
///     rule_name: BASE_RULE_NAME.to_string(),
/// };
/// assert!(segment.is_base_rate());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningSegment {
    /// Segment start (inclusive).
    pub start: DateTime<Utc>,
    /// Segment end (exclusive).
    pub end: DateTime<Utc>,
    /// Calendar date of the segment in the shift's timezone.
    pub local_date: NaiveDate,
    /// Duration in hours.
    pub hours: Decimal,
    /// The resolved rate for this segment.
    #[serde(rename = "rate_cents")]
    pub rate: Money,
    /// The amount earned in this segment.
    #[serde(rename = "amount_cents")]
    pub amount: Money,
    /// Name of the rule that priced the segment, or [`BASE_RULE_NAME`].
    pub rule_name: String,
}

impl EarningSegment {
    /// Returns true if no pricing rule matched this segment.
    pub fn is_base_rate(&self) -> bool {
        self.rule_name == BASE_RULE_NAME
    }
}

/// Per-unit work paid on top of a shift's time-based earnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraKind {
    /// Patients seen during the shift.
    Consultation,
    /// Visits made outside the workplace.
    OutsideVisit,
}

impl std::fmt::Display for ExtraKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtraKind::Consultation => write!(f, "consultation"),
            ExtraKind::OutsideVisit => write!(f, "outside_visit"),
        }
    }
}

/// A count-based line item priced by a single rule.
///
/// # Example
///
/// ```
/// use shift_earnings::models::{ExtraEarning, ExtraKind};
/// use shift_earnings::money::Money;
///
/// let consultations = ExtraEarning {
///     kind: ExtraKind::Consultation,
///     count: 12,
///     rate: Money::from_cents(500),
///     amount: Money::from_cents(6_000),
///     rule_name: "Weekday clinic".to_string(),
/// };
/// assert_eq!(consultations.amount, consultations.rate * 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraEarning {
    /// What was counted.
    pub kind: ExtraKind,
    /// How many units were recorded on the shift.
    pub count: u32,
    /// The per-unit rate.
    #[serde(rename = "rate_cents")]
    pub rate: Money,
    /// `count * rate`.
    #[serde(rename = "amount_cents")]
    pub amount: Money,
    /// Name of the rule that supplied the rate.
    pub rule_name: String,
}

/// A condition under which the engine returned a defined but possibly
/// surprising result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarningsWarning {
    /// The workplace uses the monthly pay model without positive expected
    /// hours, so every segment amount is zero.
    MonthlyHoursNotConfigured,
    /// Patients were recorded at a workplace that pays consultations, but
    /// no rule matching the shift start carries a consultation rate.
    ConsultationRateNotConfigured,
    /// Outside visits were recorded at a workplace that pays them, but no
    /// rule matching the shift start carries an outside visit rate.
    OutsideVisitRateNotConfigured,
}

impl EarningsWarning {
    /// A stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            EarningsWarning::MonthlyHoursNotConfigured => "MONTHLY_HOURS_NOT_CONFIGURED",
            EarningsWarning::ConsultationRateNotConfigured => "CONSULTATION_RATE_NOT_CONFIGURED",
            EarningsWarning::OutsideVisitRateNotConfigured => "OUTSIDE_VISIT_RATE_NOT_CONFIGURED",
        }
    }
}

impl std::fmt::Display for EarningsWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EarningsWarning::MonthlyHoursNotConfigured => write!(
                f,
                "monthly pay model requires positive monthly_expected_hours; amounts are zero"
            ),
            EarningsWarning::ConsultationRateNotConfigured => write!(
                f,
                "patients seen were recorded but no matching rule sets a consultation rate"
            ),
            EarningsWarning::OutsideVisitRateNotConfigured => write!(
                f,
                "outside visits were recorded but no matching rule sets an outside visit rate"
            ),
        }
    }
}

/// The priced segments and extras of one shift together with their total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftEarnings {
    /// The shift these earnings belong to.
    pub shift_id: Uuid,
    /// Segments in chronological order.
    pub segments: Vec<EarningSegment>,
    /// Consultation and outside visit line items.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<ExtraEarning>,
    /// Sum of all segment and extra amounts.
    #[serde(rename = "total_cents")]
    pub total: Money,
    /// Degenerate conditions encountered while pricing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<EarningsWarning>,
}

impl ShiftEarnings {
    /// Total hours across all segments.
    pub fn total_hours(&self) -> Decimal {
        self.segments.iter().map(|s| s.hours).sum()
    }

    /// Sum of the extra line items alone.
    pub fn extras_total(&self) -> Money {
        self.extras.iter().map(|extra| extra.amount).sum()
    }
}
