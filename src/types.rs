use crate::prelude::*;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// How a timestamp relates to a time zone.
/// Carried through edits unchanged; the engine never converts between kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeKind {
    #[default]
    #[display(fmt = "unspecified")]
    Unspecified,
    #[display(fmt = "utc")]
    Utc,
    #[display(fmt = "local")]
    Local,
}

/// A resolved date-time with second precision and a zone kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{datetime}")]
pub struct Timestamp {
    datetime: NaiveDateTime,
    #[serde(default)]
    kind: TimeKind,
}

impl Timestamp {
    /// Creates a timestamp of unspecified kind, dropping sub-second precision
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self::with_kind(datetime, TimeKind::Unspecified)
    }

    /// Creates a timestamp with an explicit kind, dropping sub-second precision
    pub fn with_kind(datetime: NaiveDateTime, kind: TimeKind) -> Self {
        let datetime = datetime.with_nanosecond(0).unwrap_or(datetime);
        Self { datetime, kind }
    }

    /// Midnight at the start of `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.and_time(NaiveTime::MIN))
    }

    #[inline]
    pub const fn datetime(&self) -> NaiveDateTime {
        self.datetime
    }

    #[inline]
    pub const fn kind(&self) -> TimeKind {
        self.kind
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.datetime.date()
    }

    #[inline]
    pub fn time(&self) -> NaiveTime {
        self.datetime.time()
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::new(datetime)
    }
}

/// One of the six independently editable components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl Field {
    pub const ALL: [Self; 6] = [
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
    ];

    /// True for hour, minute and second
    pub const fn is_time(self) -> bool {
        matches!(self, Self::Hour | Self::Minute | Self::Second)
    }
}
