//! Pricing rule model.
//!
//! A pricing rule overrides a workplace's base rate for the instants it
//! matches. Rules arrive from callers in the loose [`PricingRuleInput`]
//! shape, where the rate and the time window are independent optional
//! fields, and are validated into a [`PricingRule`] whose types make the
//! illegal combinations unrepresentable.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime, Timelike, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::money::Money;

const TIME_FORMAT: &str = "%H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A weekday tag as used by pricing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    /// Monday.
    Mon,
    /// Tuesday.
    Tue,
    /// Wednesday.
    Wed,
    /// Thursday.
    Thu,
    /// Friday.
    Fri,
    /// Saturday.
    Sat,
    /// Sunday.
    Sun,
}

impl DayOfWeek {
    /// Saturday and Sunday.
    pub const WEEKEND: [DayOfWeek; 2] = [DayOfWeek::Sat, DayOfWeek::Sun];
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Mon,
            Weekday::Tue => DayOfWeek::Tue,
            Weekday::Wed => DayOfWeek::Wed,
            Weekday::Thu => DayOfWeek::Thu,
            Weekday::Fri => DayOfWeek::Fri,
            Weekday::Sat => DayOfWeek::Sat,
            Weekday::Sun => DayOfWeek::Sun,
        }
    }
}

/// A clock-time window, possibly wrapping past midnight.
///
/// Times are kept at minute precision. The window is half-open: it
/// contains its start and excludes its end.
///
/// # Example
///
/// ```
/// use shift_earnings::models::TimeWindow;
/// use chrono::NaiveTime;
///
/// let night = TimeWindow::parse("22:00", "06:00").unwrap();
/// assert!(night.is_overnight());
/// assert!(night.contains(NaiveTime::from_hms_opt(23, 30, 0).unwrap()));
/// assert!(night.contains(NaiveTime::from_hms_opt(2, 0, 0).unwrap()));
/// assert!(!night.contains(NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeWindow {
    /// Creates a window, truncating both ends to the minute.
    ///
    /// Returns `None` when start and end are the same minute, since such a
    /// window could never match anything.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Option<Self> {
        let start = truncate_to_minute(start);
        let end = truncate_to_minute(end);
        (start != end).then_some(Self { start, end })
    }

    /// Parses a window from two `HH:MM` strings.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTimeWindow`] if either end is not an
    /// `HH:MM` time or both ends are the same minute.
    pub fn parse(start: &str, end: &str) -> EngineResult<Self> {
        let invalid = |message: String| EngineError::InvalidTimeWindow {
            window: format!("{}-{}", start, end),
            message,
        };
        let start_time = parse_clock(start).map_err(&invalid)?;
        let end_time = parse_clock(end).map_err(&invalid)?;
        Self::new(start_time, end_time).ok_or_else(|| invalid("window is empty".to_string()))
    }

    /// The inclusive start of the window.
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// The exclusive end of the window.
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Returns `true` if the window wraps past midnight (e.g. 22:00-06:00).
    pub fn is_overnight(&self) -> bool {
        self.start > self.end
    }

    /// Returns `true` if the clock time falls inside the window.
    ///
    /// Seconds are ignored: 05:59:59 counts as 05:59.
    pub fn contains(&self, clock: NaiveTime) -> bool {
        let clock = minute_of_day(clock);
        let start = minute_of_day(self.start);
        let end = minute_of_day(self.end);

        if start <= end {
            clock >= start && clock < end
        } else {
            clock >= start || clock < end
        }
    }
}

fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

fn parse_clock(value: &str) -> Result<NaiveTime, String> {
    let not_a_time = || format!("'{}' is not an HH:MM time", value);
    if value.len() != 5 {
        return Err(not_a_time());
    }
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| not_a_time())
}

/// How a matching rule prices its segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateTerm {
    /// An absolute rate that replaces the workplace base rate.
    FixedAmount(Money),
    /// A factor applied to the workplace base rate.
    Multiplier(Decimal),
}

impl RateTerm {
    /// Resolves the term against a workplace base rate.
    ///
    /// ```
    /// use shift_earnings::models::RateTerm;
    /// use shift_earnings::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let base = Money::from_cents(2_500);
    /// let time_and_a_half = RateTerm::Multiplier(Decimal::new(15, 1));
    /// let flat = RateTerm::FixedAmount(Money::from_cents(4_000));
    /// assert_eq!(time_and_a_half.apply(base), Money::from_cents(3_750));
    /// assert_eq!(flat.apply(base), Money::from_cents(4_000));
    /// ```
    pub fn apply(&self, base_rate: Money) -> Money {
        match self {
            RateTerm::FixedAmount(rate) => *rate,
            RateTerm::Multiplier(multiplier) => base_rate.mul_decimal(*multiplier),
        }
    }
}

/// A validated, prioritized override of a workplace's base rate.
///
/// Rules deserialize from the [`PricingRuleInput`] wire shape and are
/// validated on the way in, so an invalid rule never reaches the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PricingRuleInput", into = "PricingRuleInput")]
pub struct PricingRule {
    /// Unique identifier for the rule.
    pub id: Uuid,
    /// Label reported on the segments this rule prices.
    pub name: String,
    /// Lower values take precedence.
    pub priority: i32,
    /// Optional clock-time window.
    pub time_window: Option<TimeWindow>,
    /// Weekdays the rule applies to. Empty means every day.
    pub days_of_week: BTreeSet<DayOfWeek>,
    /// Exact dates the rule applies to. When non-empty, replaces
    /// `days_of_week` entirely.
    pub specific_dates: BTreeSet<NaiveDate>,
    /// How the rule prices a segment.
    pub rate: RateTerm,
    /// Extra amount per patient seen, for workplaces that pay consultations.
    pub consultation_rate: Option<Money>,
    /// Extra amount per outside visit, for workplaces that pay them.
    pub outside_visit_rate: Option<Money>,
}

impl PricingRule {
    /// Creates an unconstrained rule that matches every instant.
    pub fn new(name: impl Into<String>, priority: i32, rate: RateTerm) -> Self {
        Self {
            id: Uuid::nil(),
            name: name.into(),
            priority,
            time_window: None,
            days_of_week: BTreeSet::new(),
            specific_dates: BTreeSet::new(),
            rate,
            consultation_rate: None,
            outside_visit_rate: None,
        }
    }

    /// Restricts the rule to a clock-time window.
    pub fn with_time_window(mut self, window: TimeWindow) -> Self {
        self.time_window = Some(window);
        self
    }

    /// Restricts the rule to the given weekdays.
    pub fn with_days(mut self, days: impl IntoIterator<Item = DayOfWeek>) -> Self {
        self.days_of_week = days.into_iter().collect();
        self
    }

    /// Restricts the rule to the given dates.
    pub fn with_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.specific_dates = dates.into_iter().collect();
        self
    }

    /// Sets the extra amount paid per patient seen.
    pub fn with_consultation_rate(mut self, rate: Money) -> Self {
        self.consultation_rate = Some(rate);
        self
    }

    /// Sets the extra amount paid per outside visit.
    pub fn with_outside_visit_rate(mut self, rate: Money) -> Self {
        self.outside_visit_rate = Some(rate);
        self
    }
}

/// The caller-facing shape of a pricing rule.
///
/// Mirrors what a workplace editor submits: the rate and multiplier are
/// separate optional fields and times/dates are strings.
///
/// # Example
///
/// ```
/// use shift_earnings::models::{PricingRule, PricingRuleInput, RateTerm};
/// use rust_decimal::Decimal;
///
/// let input = PricingRuleInput {
///     name: "Night".to_string(),
///     priority: 1,
///     time_start: Some("22:00".to_string()),
///     time_end: Some("06:00".to_string()),
///     rate_multiplier: Some(Decimal::new(15, 1)),
///     ..Default::default()
/// };
/// let rule = PricingRule::try_from(input).unwrap();
/// assert_eq!(rule.rate, RateTerm::Multiplier(Decimal::new(15, 1)));
///
/// let both_unset = PricingRuleInput { name: "Broken".to_string(), ..Default::default() };
/// assert!(PricingRule::try_from(both_unset).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingRuleInput {
    /// Unique identifier for the rule.
    #[serde(default)]
    pub id: Uuid,
    /// Rule label.
    pub name: String,
    /// Lower values take precedence.
    #[serde(default)]
    pub priority: i32,
    /// Window start as `HH:MM`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_start: Option<String>,
    /// Window end as `HH:MM`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_end: Option<String>,
    /// Weekday tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days_of_week: Vec<DayOfWeek>,
    /// Dates as `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specific_dates: Vec<String>,
    /// Absolute rate in cents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_cents: Option<i64>,
    /// Factor applied to the workplace base rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_multiplier: Option<Decimal>,
    /// Extra cents per patient seen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultation_rate_cents: Option<i64>,
    /// Extra cents per outside visit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outside_visit_rate_cents: Option<i64>,
}

impl TryFrom<PricingRuleInput> for PricingRule {
    type Error = EngineError;

    fn try_from(input: PricingRuleInput) -> EngineResult<Self> {
        let invalid = |message: String| EngineError::InvalidPricingRule {
            rule: if input.name.trim().is_empty() {
                "<unnamed>".to_string()
            } else {
                input.name.clone()
            },
            message,
        };

        if input.name.trim().is_empty() {
            return Err(invalid("name is required".to_string()));
        }
        if input.priority < 0 {
            return Err(invalid(format!(
                "priority must not be negative, got {}",
                input.priority
            )));
        }

        let rate = match (input.rate_cents, input.rate_multiplier) {
            (Some(cents), None) if cents < 0 => {
                return Err(invalid(format!("rate_cents must not be negative, got {}", cents)));
            }
            (Some(cents), None) => RateTerm::FixedAmount(Money::from_cents(cents)),
            (None, Some(multiplier)) if multiplier <= Decimal::ZERO => {
                return Err(invalid(format!(
                    "rate_multiplier must be positive, got {}",
                    multiplier
                )));
            }
            (None, Some(multiplier)) => RateTerm::Multiplier(multiplier),
            _ => {
                return Err(invalid(
                    "set exactly one of rate_cents or rate_multiplier".to_string(),
                ));
            }
        };

        let time_window = match (&input.time_start, &input.time_end) {
            (Some(start), Some(end)) => {
                Some(TimeWindow::parse(start, end).map_err(|e| invalid(e.to_string()))?)
            }
            (None, None) => None,
            _ => {
                return Err(invalid(
                    "time_start and time_end must be set together".to_string(),
                ));
            }
        };

        let specific_dates = input
            .specific_dates
            .iter()
            .map(|date| {
                NaiveDate::parse_from_str(date, DATE_FORMAT)
                    .map_err(|_| invalid(format!("'{}' is not a YYYY-MM-DD date", date)))
            })
            .collect::<EngineResult<BTreeSet<_>>>()?;

        let per_unit = |field: &str, cents: Option<i64>| match cents {
            Some(cents) if cents < 0 => Err(invalid(format!(
                "{} must not be negative, got {}",
                field, cents
            ))),
            other => Ok(other.map(Money::from_cents)),
        };
        let consultation_rate = per_unit("consultation_rate_cents", input.consultation_rate_cents)?;
        let outside_visit_rate =
            per_unit("outside_visit_rate_cents", input.outside_visit_rate_cents)?;

        Ok(PricingRule {
            id: input.id,
            name: input.name.clone(),
            priority: input.priority,
            time_window,
            days_of_week: input.days_of_week.iter().copied().collect(),
            specific_dates,
            rate,
            consultation_rate,
            outside_visit_rate,
        })
    }
}

impl From<PricingRule> for PricingRuleInput {
    fn from(rule: PricingRule) -> Self {
        let (rate_cents, rate_multiplier) = match rule.rate {
            RateTerm::FixedAmount(rate) => (Some(rate.cents()), None),
            RateTerm::Multiplier(multiplier) => (None, Some(multiplier)),
        };

        PricingRuleInput {
            id: rule.id,
            name: rule.name,
            priority: rule.priority,
            time_start: rule
                .time_window
                .map(|w| w.start().format(TIME_FORMAT).to_string()),
            time_end: rule
                .time_window
                .map(|w| w.end().format(TIME_FORMAT).to_string()),
            days_of_week: rule.days_of_week.into_iter().collect(),
            specific_dates: rule
                .specific_dates
                .into_iter()
                .map(|d| d.format(DATE_FORMAT).to_string())
                .collect(),
            rate_cents,
            rate_multiplier,
            consultation_rate_cents: rule.consultation_rate.map(Money::cents),
            outside_visit_rate_cents: rule.outside_visit_rate.map(Money::cents),
        }
    }
}
