use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::calendar::Calendar;
use crate::types::Timestamp;
use crate::{FormatError, JANUARY, MIN_DAY, RANGE_SEPARATOR, prelude::*};

/// Inclusive window of selectable dates, the min/max pair of a date picker.
/// `min` is never after `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{min}/{max}")]
pub struct DateBounds {
    min: NaiveDate,
    max: NaiveDate,
}

/// Error type for date window operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Minimum is after maximum.
    #[error("Invalid date range: min ({min}) is after max ({max})")]
    InvalidRange { min: NaiveDate, max: NaiveDate },

    /// Calendar cannot represent a date.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Error parsing one end of the window.
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),

    /// Invalid window format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

fn ensure_supported(date: NaiveDate, calendar: &dyn Calendar) -> Result<(), RangeError> {
    if calendar.supports(date) {
        Ok(())
    } else {
        Err(FormatError::UnsupportedDate(date).into())
    }
}

impl DateBounds {
    /// Creates a window with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if min > max.
    pub fn new(min: NaiveDate, max: NaiveDate) -> Result<Self, RangeError> {
        if min > max {
            return Err(RangeError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Creates a window whose ends `calendar` can both represent.
    ///
    /// # Errors
    /// Returns `FormatError::UnsupportedDate` (wrapped) for an end outside the
    /// calendar, or `RangeError::InvalidRange` if min > max.
    pub fn for_calendar(min: NaiveDate, max: NaiveDate, calendar: &dyn Calendar) -> Result<Self, RangeError> {
        ensure_supported(min, calendar)?;
        ensure_supported(max, calendar)?;
        Self::new(min, max)
    }

    /// Every date `calendar` supports, from its first day to its last.
    ///
    /// # Errors
    /// Returns `RangeError::Format` if the calendar cannot convert its own ends.
    pub fn full(calendar: &dyn Calendar) -> Result<Self, RangeError> {
        let first = calendar.to_date(calendar.min_year(), JANUARY, MIN_DAY)?;
        let last_year = calendar.max_year();
        let last_month = calendar.months_in_year(last_year);
        let last = calendar.to_date(last_year, last_month, calendar.days_in_month(last_year, last_month))?;
        Self::new(first, last)
    }

    pub const fn min(&self) -> NaiveDate {
        self.min
    }

    pub const fn max(&self) -> NaiveDate {
        self.max
    }

    /// Moves the lower end.
    ///
    /// # Errors
    /// Returns `FormatError::UnsupportedDate` (wrapped) if `calendar` cannot
    /// represent `min`, or `RangeError::InvalidRange` if it is after the upper end.
    pub fn set_min(&mut self, min: NaiveDate, calendar: &dyn Calendar) -> Result<(), RangeError> {
        ensure_supported(min, calendar)?;
        *self = Self::new(min, self.max)?;
        Ok(())
    }

    /// Moves the upper end.
    ///
    /// # Errors
    /// Returns `FormatError::UnsupportedDate` (wrapped) if `calendar` cannot
    /// represent `max`, or `RangeError::InvalidRange` if it is before the lower end.
    pub fn set_max(&mut self, max: NaiveDate, calendar: &dyn Calendar) -> Result<(), RangeError> {
        ensure_supported(max, calendar)?;
        *self = Self::new(self.min, max)?;
        Ok(())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.min..=self.max).contains(&date)
    }

    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.min, self.max)
    }

    /// Pulls a value outside the window to midnight of the nearest end,
    /// keeping its kind. Values inside are returned unchanged.
    pub fn clamp_timestamp(&self, ts: Timestamp) -> Timestamp {
        if self.contains(ts.date()) {
            return ts;
        }
        Timestamp::with_kind(self.clamp(ts.date()).and_time(NaiveTime::MIN), ts.kind())
    }
}

impl FromStr for DateBounds {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (min, max) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found: {s}"))
                })?;
                Self::new(min.trim().parse()?, max.trim().parse()?)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for DateBounds {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateBounds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
