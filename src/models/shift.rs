//! Shift model.
//!
//! A shift is an absolute time span plus the timezone in which its
//! calendar days, weekdays and clock times are interpreted.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Timezone applied when a shift arrives without one.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Lisbon;

fn default_timezone() -> Tz {
    DEFAULT_TIMEZONE
}

/// Represents a work shift at a workplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: Uuid,
    /// The workplace the shift was worked at.
    pub workplace_id: Uuid,
    /// The instant the shift starts.
    pub start_time: DateTime<Utc>,
    /// The instant the shift ends (exclusive).
    pub end_time: DateTime<Utc>,
    /// IANA timezone used to localize day boundaries and rule clocks.
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
    /// Patients seen during the shift, when recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patients_seen: Option<u32>,
    /// Visits made outside the workplace during the shift, when recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outside_visits: Option<u32>,
}

impl Shift {
    /// Checks that the shift ends strictly after it starts.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_earnings::models::Shift;
    /// use chrono::{TimeZone, Utc};
    /// use uuid::Uuid;
    ///
    /// let shift = Shift {
    ///     id: Uuid::nil(),
    ///     workplace_id: Uuid::nil(),
    ///     start_time: Utc.with_ymd_and_hms(2026, 1, 15, 17, 0, 0).unwrap(),
    ///     end_time: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
    ///     timezone: chrono_tz::Europe::Lisbon,
    ///     patients_seen: None,
    ///     outside_visits: None,
    /// };
    /// assert!(shift.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.end_time <= self.start_time {
            return Err(EngineError::InvalidShift {
                shift_id: self.id.to_string(),
                message: format!(
                    "end time {} must be after start time {}",
                    self.end_time, self.start_time
                ),
            });
        }
        Ok(())
    }

    /// Returns the shift duration in milliseconds.
    pub fn duration_millis(&self) -> i64 {
        (self.end_time - self.start_time).num_milliseconds()
    }

    /// Returns the shift duration in hours.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_earnings::models::Shift;
    /// use chrono::{TimeZone, Utc};
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let shift = Shift {
    ///     id: Uuid::nil(),
    ///     workplace_id: Uuid::nil(),
    ///     start_time: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
    ///     end_time: Utc.with_ymd_and_hms(2026, 1, 15, 17, 30, 0).unwrap(),
    ///     timezone: chrono_tz::Europe::Lisbon,
    ///     patients_seen: None,
    ///     outside_visits: None,
    /// };
    /// assert_eq!(shift.duration_hours(), Decimal::new(85, 1));
    /// ```
    pub fn duration_hours(&self) -> Decimal {
        Decimal::from(self.duration_millis()) / Decimal::from(MILLIS_PER_HOUR)
    }
}
