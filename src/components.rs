use crate::calendar::Calendar;
use crate::consts::{JANUARY, MIN_DAY, NOON};
use crate::types::{Field, TimeKind, Timestamp};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Six independently editable date/time components.
///
/// `None` means "not entered yet". The hour is always stored 24-hour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Components {
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub day: Option<i32>,
    pub hour: Option<i32>,
    pub minute: Option<i32>,
    pub second: Option<i32>,
}

impl Components {
    /// Decomposes `ts` in `calendar`, or `None` if the calendar does not support its date
    pub fn from_timestamp(ts: &Timestamp, calendar: &dyn Calendar) -> Option<Self> {
        let (year, month, day) = calendar.from_date(ts.date())?;
        let time = ts.time();
        Some(Self {
            year: Some(year),
            month: Some(month),
            day: Some(day),
            hour: i32::try_from(time.hour()).ok(),
            minute: i32::try_from(time.minute()).ok(),
            second: i32::try_from(time.second()).ok(),
        })
    }

    pub const fn get(&self, field: Field) -> Option<i32> {
        match field {
            Field::Year => self.year,
            Field::Month => self.month,
            Field::Day => self.day,
            Field::Hour => self.hour,
            Field::Minute => self.minute,
            Field::Second => self.second,
        }
    }

    pub fn slot(&mut self, field: Field) -> &mut Option<i32> {
        match field {
            Field::Year => &mut self.year,
            Field::Month => &mut self.month,
            Field::Day => &mut self.day,
            Field::Hour => &mut self.hour,
            Field::Minute => &mut self.minute,
            Field::Second => &mut self.second,
        }
    }

    /// Morning unless an hour of noon or later is set
    pub fn is_am(&self) -> bool {
        self.hour.is_none_or(|hour| hour < NOON)
    }

    pub const fn has_date(&self) -> bool {
        self.year.is_some() && self.month.is_some() && self.day.is_some()
    }

    pub const fn has_any_time(&self) -> bool {
        self.hour.is_some() || self.minute.is_some() || self.second.is_some()
    }

    /// Time of day, only when hour, minute and second are all set
    pub fn time(&self) -> Option<NaiveTime> {
        let hour = u32::try_from(self.hour?).ok()?;
        let minute = u32::try_from(self.minute?).ok()?;
        let second = u32::try_from(self.second?).ok()?;
        NaiveTime::from_hms_opt(hour, minute, second)
    }

    /// Forgets year, month and day unless all three are set
    pub const fn without_partial_date(mut self) -> Self {
        if !self.has_date() {
            self.year = None;
            self.month = None;
            self.day = None;
        }
        self
    }

    /// Clamps the components into range and derives the resolved value.
    ///
    /// The year is clamped to the calendar's supported years, the month to
    /// the year's month count and the day to the month's day count. With a
    /// full date, unset time components count as 0 in the resolved value.
    /// Without one, a partially entered time is zero-filled in place so
    /// `11:--:--` becomes `11:00:00`.
    pub fn reconcile(mut self, calendar: &dyn Calendar, kind: TimeKind) -> (Self, Option<Timestamp>) {
        let hour = self.hour.unwrap_or(0);
        let minute = self.minute.unwrap_or(0);
        let second = self.second.unwrap_or(0);

        let mut resolved = None;
        if let Some(year) = self.year {
            let year = year.clamp(calendar.min_year(), calendar.max_year());
            self.year = Some(year);
            if let Some(month) = self.month {
                let month = month.clamp(JANUARY, calendar.months_in_year(year));
                self.month = Some(month);
                if let Some(day) = self.day {
                    let day = day.clamp(MIN_DAY, calendar.days_in_month(year, month));
                    self.day = Some(day);
                    resolved = compose(calendar, (year, month, day), (hour, minute, second), kind);
                }
            }
        }

        if resolved.is_none() && self.has_any_time() {
            self.hour = Some(hour);
            self.minute = Some(minute);
            self.second = Some(second);
        }

        (self, resolved)
    }
}

fn compose(
    calendar: &dyn Calendar,
    (year, month, day): (i32, i32, i32),
    (hour, minute, second): (i32, i32, i32),
    kind: TimeKind,
) -> Option<Timestamp> {
    let date = match calendar.to_date(year, month, day) {
        Ok(date) => date,
        Err(err) => {
            warn!("cannot compose resolved value: {err}");
            return None;
        }
    };
    let time = NaiveTime::from_hms_opt(
        u32::try_from(hour).ok()?,
        u32::try_from(minute).ok()?,
        u32::try_from(second).ok()?,
    )?;
    Some(Timestamp::with_kind(date.and_time(time), kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{GregorianCalendar, PersianCalendar};
    use chrono::NaiveDate;

    fn gregorian() -> GregorianCalendar {
        GregorianCalendar::default()
    }

    fn ts(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> Timestamp {
        Timestamp::new(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, mi, s)
                .unwrap(),
        )
    }

    fn date(year: i32, month: i32, day: i32) -> Components {
        Components {
            year: Some(year),
            month: Some(month),
            day: Some(day),
            ..Components::default()
        }
    }

    #[test]
    fn test_empty_reconciles_to_nothing() {
        let (components, resolved) = Components::default().reconcile(&gregorian(), TimeKind::default());
        assert_eq!(components, Components::default());
        assert_eq!(resolved, None);
    }

    #[test]
    fn test_full_date_resolves_with_zero_time() {
        let (components, resolved) = date(2024, 8, 15).reconcile(&gregorian(), TimeKind::Unspecified);
        assert_eq!(resolved, Some(ts(2024, 8, 15, 0, 0, 0)));
        // Time stays unset when a date resolves
        assert_eq!(components.hour, None);
    }

    #[test]
    fn test_partial_time_is_zero_filled_without_date() {
        let components = Components {
            hour: Some(11),
            ..Components::default()
        };
        let (components, resolved) = components.reconcile(&gregorian(), TimeKind::Unspecified);
        assert_eq!(resolved, None);
        assert_eq!(
            (components.hour, components.minute, components.second),
            (Some(11), Some(0), Some(0))
        );
    }

    #[test]
    fn test_day_clamped_to_month_length() {
        let (components, resolved) = date(2023, 2, 31).reconcile(&gregorian(), TimeKind::Unspecified);
        assert_eq!(components.day, Some(28));
        assert_eq!(resolved, Some(ts(2023, 2, 28, 0, 0, 0)));
    }

    #[test]
    fn test_year_and_month_clamped() {
        let (components, _) = date(12_000, 14, 40).reconcile(&gregorian(), TimeKind::Unspecified);
        assert_eq!(components.year, Some(9999));
        assert_eq!(components.month, Some(12));
        assert_eq!(components.day, Some(31));

        let components = Components {
            year: Some(-5),
            ..Components::default()
        };
        let (components, resolved) = components.reconcile(&gregorian(), TimeKind::Unspecified);
        assert_eq!(components.year, Some(1));
        assert_eq!(resolved, None);
    }

    #[test]
    fn test_kind_is_carried_into_resolved_value() {
        let (_, resolved) = date(2024, 1, 1).reconcile(&gregorian(), TimeKind::Utc);
        assert_eq!(resolved.unwrap().kind(), TimeKind::Utc);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let start = Components {
            minute: Some(7),
            ..date(2024, 2, 30)
        };
        let (once, first) = start.reconcile(&gregorian(), TimeKind::Unspecified);
        let (twice, second) = once.reconcile(&gregorian(), TimeKind::Unspecified);
        assert_eq!(once, twice);
        assert_eq!(first, second);
    }

    #[test]
    fn test_persian_esfand_clamped() {
        let calendar = PersianCalendar::default();
        let (components, resolved) = date(1402, 12, 30).reconcile(&calendar, TimeKind::Unspecified);
        assert_eq!(components.day, Some(29));
        assert_eq!(resolved, Some(ts(2024, 3, 19, 0, 0, 0)));
    }

    #[test]
    fn test_from_timestamp_round_trip() {
        let value = ts(1991, 8, 15, 21, 45, 9);
        let components = Components::from_timestamp(&value, &gregorian()).unwrap();
        assert_eq!(components, Components {
            hour: Some(21),
            minute: Some(45),
            second: Some(9),
            ..date(1991, 8, 15)
        });
        let (_, resolved) = components.reconcile(&gregorian(), TimeKind::Unspecified);
        assert_eq!(resolved, Some(value));
    }

    #[test]
    fn test_is_am() {
        let mut components = Components::default();
        assert!(components.is_am());
        components.hour = Some(11);
        assert!(components.is_am());
        components.hour = Some(12);
        assert!(!components.is_am());
        components.hour = Some(0);
        assert!(components.is_am());
    }

    #[test]
    fn test_without_partial_date() {
        let partial = Components {
            year: Some(2024),
            day: Some(3),
            hour: Some(5),
            ..Components::default()
        };
        let cleared = partial.without_partial_date();
        assert_eq!(cleared, Components {
            hour: Some(5),
            ..Components::default()
        });

        let full = date(2024, 1, 3);
        assert_eq!(full.without_partial_date(), full);
    }

    #[test]
    fn test_time_requires_all_parts() {
        let mut components = Components {
            hour: Some(9),
            minute: Some(5),
            ..Components::default()
        };
        assert_eq!(components.time(), None);
        components.second = Some(0);
        assert_eq!(components.time(), NaiveTime::from_hms_opt(9, 5, 0));
    }

    #[test]
    fn test_get_and_slot() {
        let mut components = Components::default();
        for (value, field) in (1..).zip(Field::ALL) {
            *components.slot(field) = Some(value);
        }
        assert_eq!(components.get(Field::Year), Some(1));
        assert_eq!(components.get(Field::Second), Some(6));
    }

    #[test]
    fn test_serde() {
        let components = date(2024, 2, 29);
        let json = serde_json::to_string(&components).unwrap();
        assert_eq!(
            json,
            r#"{"year":2024,"month":2,"day":29,"hour":null,"minute":null,"second":null}"#
        );
        let parsed: Components = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, components);
    }
}
