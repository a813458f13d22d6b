//! Calendar systems the component engine can edit dates in.
//!
//! Every calendar maps its own (year, month, day) triples onto proleptic
//! Gregorian [`NaiveDate`]s, so resolved values are calendar-neutral and only
//! decomposition and month arithmetic depend on the calendar in effect.

use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    GREGORIAN_MAX_YEAR, GREGORIAN_MIN_YEAR, GREGORIAN_TWO_DIGIT_YEAR_MAX, JANUARY, LEAP_YEAR_CYCLE,
    MAX_MONTH_UNBOUNDED, MAX_TWO_DIGIT_YEAR, PERSIAN_MAX_YEAR, PERSIAN_MIN_YEAR,
    PERSIAN_TWO_DIGIT_YEAR_MAX,
};
use crate::FormatError;
use chrono::{Datelike, NaiveDate};
use icu_calendar::Date;
use icu_calendar::cal::Persian;
use icu_calendar::types::RataDie;
use serde::{Deserialize, Serialize};

/// Calendar arithmetic the component engine needs.
pub trait Calendar {
    /// Smallest supported year (inclusive)
    fn min_year(&self) -> i32;

    /// Largest supported year (inclusive)
    fn max_year(&self) -> i32;

    fn months_in_year(&self, year: i32) -> i32;

    /// Day count of `month` in `year`, 0 if the month does not exist
    fn days_in_month(&self, year: i32, month: i32) -> i32;

    /// Last year of the century two-digit years are mapped into
    fn two_digit_year_max(&self) -> i32;

    /// Expands a two-digit year using [`Calendar::two_digit_year_max`] as the pivot.
    /// Years of three or more digits are returned unchanged.
    fn to_four_digit_year(&self, year: i32) -> i32 {
        if year > MAX_TWO_DIGIT_YEAR || year < 0 {
            return year;
        }
        let max = self.two_digit_year_max();
        let century = max / 100 - i32::from(year > max % 100);
        century * 100 + year
    }

    /// Builds the date for a calendar triple.
    ///
    /// # Errors
    /// Returns `FormatError::InvalidDate` if the triple does not exist in this calendar.
    fn to_date(&self, year: i32, month: i32, day: i32) -> Result<NaiveDate, FormatError>;

    /// Decomposes a date into this calendar's (year, month, day), or `None`
    /// when the date lies outside the supported years.
    fn from_date(&self, date: NaiveDate) -> Option<(i32, i32, i32)>;

    /// 1-based era index of `date`
    fn era(&self, _date: NaiveDate) -> usize {
        1
    }

    fn supports(&self, date: NaiveDate) -> bool {
        self.from_date(date).is_some()
    }

    fn supports_year(&self, year: i32) -> bool {
        (self.min_year()..=self.max_year()).contains(&year)
    }
}

/// The proleptic Gregorian calendar, limited to years 1..=9999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GregorianCalendar {
    #[serde(default = "default_gregorian_two_digit_year_max")]
    pub two_digit_year_max: i32,
}

const fn default_gregorian_two_digit_year_max() -> i32 {
    GREGORIAN_TWO_DIGIT_YEAR_MAX
}

impl Default for GregorianCalendar {
    fn default() -> Self {
        Self {
            two_digit_year_max: GREGORIAN_TWO_DIGIT_YEAR_MAX,
        }
    }
}

pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: i32, month: i32) -> i32 {
    if month < 1 || month > MAX_MONTH_UNBOUNDED {
        return 0;
    }
    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

impl Calendar for GregorianCalendar {
    fn min_year(&self) -> i32 {
        GREGORIAN_MIN_YEAR
    }

    fn max_year(&self) -> i32 {
        GREGORIAN_MAX_YEAR
    }

    fn months_in_year(&self, _year: i32) -> i32 {
        MAX_MONTH_UNBOUNDED
    }

    fn days_in_month(&self, year: i32, month: i32) -> i32 {
        days_in_month(year, month)
    }

    fn two_digit_year_max(&self) -> i32 {
        self.two_digit_year_max
    }

    fn to_date(&self, year: i32, month: i32, day: i32) -> Result<NaiveDate, FormatError> {
        let invalid = || FormatError::InvalidDate { year, month, day };
        if !self.supports_year(year) {
            return Err(invalid());
        }
        let month_u = u32::try_from(month).map_err(|_| invalid())?;
        let day_u = u32::try_from(day).map_err(|_| invalid())?;
        NaiveDate::from_ymd_opt(year, month_u, day_u).ok_or_else(invalid)
    }

    fn from_date(&self, date: NaiveDate) -> Option<(i32, i32, i32)> {
        let year = date.year();
        if !self.supports_year(year) {
            return None;
        }
        let month = i32::try_from(date.month()).ok()?;
        let day = i32::try_from(date.day()).ok()?;
        Some((year, month, day))
    }
}

/// The Persian (Solar Hijri) calendar, as computed by `icu_calendar`.
///
/// Leap years follow the 33-year rule with the corrections that keep it
/// aligned with the astronomical vernal equinox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersianCalendar {
    #[serde(default = "default_persian_two_digit_year_max")]
    pub two_digit_year_max: i32,
}

const fn default_persian_two_digit_year_max() -> i32 {
    PERSIAN_TWO_DIGIT_YEAR_MAX
}

impl Default for PersianCalendar {
    fn default() -> Self {
        Self {
            two_digit_year_max: PERSIAN_TWO_DIGIT_YEAR_MAX,
        }
    }
}

/// Day `1` of `month` in `year`, if both exist
fn persian_month_start(year: i32, month: i32) -> Option<Date<Persian>> {
    Date::try_new_persian(year, u8::try_from(month).ok()?, 1).ok()
}

impl PersianCalendar {
    pub fn is_leap_year(year: i32) -> bool {
        persian_month_start(year, JANUARY).is_some_and(|start| start.is_in_leap_year())
    }
}

impl Calendar for PersianCalendar {
    fn min_year(&self) -> i32 {
        PERSIAN_MIN_YEAR
    }

    fn max_year(&self) -> i32 {
        PERSIAN_MAX_YEAR
    }

    fn months_in_year(&self, _year: i32) -> i32 {
        MAX_MONTH_UNBOUNDED
    }

    fn days_in_month(&self, year: i32, month: i32) -> i32 {
        persian_month_start(year, month).map_or(0, |start| i32::from(start.days_in_month()))
    }

    fn two_digit_year_max(&self) -> i32 {
        self.two_digit_year_max
    }

    fn to_date(&self, year: i32, month: i32, day: i32) -> Result<NaiveDate, FormatError> {
        let invalid = || FormatError::InvalidDate { year, month, day };
        if !self.supports_year(year) {
            return Err(invalid());
        }
        let month_u8 = u8::try_from(month).map_err(|_| invalid())?;
        let day_u8 = u8::try_from(day).map_err(|_| invalid())?;
        let persian = Date::try_new_persian(year, month_u8, day_u8).map_err(|_| invalid())?;
        let days = i32::try_from(persian.to_rata_die().to_i64_date()).map_err(|_| invalid())?;
        NaiveDate::from_num_days_from_ce_opt(days).ok_or_else(invalid)
    }

    fn from_date(&self, date: NaiveDate) -> Option<(i32, i32, i32)> {
        // Rata Die day 1 is 0001-01-01, the same origin chrono counts from
        let persian = Date::from_rata_die(RataDie::new(i64::from(date.num_days_from_ce())), Persian);
        let year = persian.era_year().year;
        let month = i32::from(persian.month().ordinal);
        let day = i32::from(persian.day_of_month().0);
        self.supports_year(year).then_some((year, month, day))
    }
}

/// The calendars a [`crate::FormatInfo`] can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnyCalendar {
    Gregorian(GregorianCalendar),
    Persian(PersianCalendar),
}

impl Default for AnyCalendar {
    fn default() -> Self {
        Self::Gregorian(GregorianCalendar::default())
    }
}

impl AnyCalendar {
    fn inner(&self) -> &dyn Calendar {
        match self {
            Self::Gregorian(calendar) => calendar,
            Self::Persian(calendar) => calendar,
        }
    }
}

impl Calendar for AnyCalendar {
    fn min_year(&self) -> i32 {
        self.inner().min_year()
    }

    fn max_year(&self) -> i32 {
        self.inner().max_year()
    }

    fn months_in_year(&self, year: i32) -> i32 {
        self.inner().months_in_year(year)
    }

    fn days_in_month(&self, year: i32, month: i32) -> i32 {
        self.inner().days_in_month(year, month)
    }

    fn two_digit_year_max(&self) -> i32 {
        self.inner().two_digit_year_max()
    }

    fn to_four_digit_year(&self, year: i32) -> i32 {
        self.inner().to_four_digit_year(year)
    }

    fn to_date(&self, year: i32, month: i32, day: i32) -> Result<NaiveDate, FormatError> {
        self.inner().to_date(year, month, day)
    }

    fn from_date(&self, date: NaiveDate) -> Option<(i32, i32, i32)> {
        self.inner().from_date(date)
    }

    fn era(&self, date: NaiveDate) -> usize {
        self.inner().era(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year: i32,
            is_leap: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 2024,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2023,
                is_leap: false,
                description: "not divisible by 4",
            },
            TestCase {
                year: 1900,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2100,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2000,
                is_leap: true,
                description: "divisible by 400",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_gregorian_days_in_month() {
        let cal = GregorianCalendar::default();
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (month, days) in (1..=12).zip(expected) {
            assert_eq!(cal.days_in_month(2023, month), days, "Month {month}");
        }
        assert_eq!(cal.days_in_month(2024, 2), 29);
        assert_eq!(cal.days_in_month(2024, 0), 0);
        assert_eq!(cal.days_in_month(2024, 13), 0);
    }

    #[test]
    fn test_gregorian_two_digit_years() {
        let cal = GregorianCalendar::default();
        assert_eq!(cal.to_four_digit_year(23), 2023);
        assert_eq!(cal.to_four_digit_year(49), 2049);
        assert_eq!(cal.to_four_digit_year(50), 1950);
        assert_eq!(cal.to_four_digit_year(99), 1999);
        assert_eq!(cal.to_four_digit_year(0), 2000);
        assert_eq!(cal.to_four_digit_year(1991), 1991);

        let cal = GregorianCalendar {
            two_digit_year_max: 2029,
        };
        assert_eq!(cal.to_four_digit_year(30), 1930);
        assert_eq!(cal.to_four_digit_year(29), 2029);
    }

    #[test]
    fn test_gregorian_round_trip() {
        let cal = GregorianCalendar::default();
        let d = cal.to_date(2024, 2, 29).unwrap();
        assert_eq!(d, date(2024, 2, 29));
        assert_eq!(cal.from_date(d), Some((2024, 2, 29)));
    }

    #[test]
    fn test_gregorian_rejects_unsupported() {
        let cal = GregorianCalendar::default();
        assert!(matches!(
            cal.to_date(2023, 2, 29),
            Err(FormatError::InvalidDate {
                year: 2023,
                month: 2,
                day: 29
            })
        ));
        assert!(cal.to_date(0, 1, 1).is_err());
        assert!(cal.to_date(10_000, 1, 1).is_err());
        assert!(cal.to_date(2024, -1, 1).is_err());
        assert_eq!(cal.from_date(date(10_000, 1, 1)), None);
        assert!(!cal.supports(date(10_000, 1, 1)));
        assert!(cal.supports(date(9999, 12, 31)));
    }

    #[test]
    fn test_persian_known_dates() {
        struct TestCase {
            persian: (i32, i32, i32),
            gregorian: NaiveDate,
        }

        let cases = [
            TestCase {
                persian: (1, 1, 1),
                gregorian: date(622, 3, 21),
            },
            TestCase {
                persian: (1403, 1, 1),
                gregorian: date(2024, 3, 20),
            },
            TestCase {
                persian: (1402, 12, 29),
                gregorian: date(2024, 3, 19),
            },
            TestCase {
                persian: (1399, 12, 30),
                gregorian: date(2021, 3, 20),
            },
            TestCase {
                persian: (1400, 1, 1),
                gregorian: date(2021, 3, 21),
            },
            TestCase {
                persian: (1403, 7, 1),
                gregorian: date(2024, 9, 22),
            },
            TestCase {
                persian: (1403, 10, 11),
                gregorian: date(2024, 12, 31),
            },
            TestCase {
                persian: (1502, 12, 29),
                gregorian: date(2124, 3, 19),
            },
            TestCase {
                persian: (1503, 1, 1),
                gregorian: date(2124, 3, 20),
            },
        ];

        let cal = PersianCalendar::default();
        for case in &cases {
            let (y, m, d) = case.persian;
            assert_eq!(cal.to_date(y, m, d).unwrap(), case.gregorian, "{y}/{m}/{d}");
            assert_eq!(cal.from_date(case.gregorian), Some(case.persian), "{}", case.gregorian);
        }
    }

    #[test]
    fn test_persian_leap_years() {
        for year in [1399, 1403, 1408] {
            assert!(PersianCalendar::is_leap_year(year), "{year} should be leap");
        }
        for year in [1400, 1401, 1402, 1404, 1502] {
            assert!(!PersianCalendar::is_leap_year(year), "{year} should not be leap");
        }
    }

    #[test]
    fn test_persian_days_in_month() {
        let cal = PersianCalendar::default();
        assert_eq!(cal.days_in_month(1402, 1), 31);
        assert_eq!(cal.days_in_month(1402, 6), 31);
        assert_eq!(cal.days_in_month(1402, 7), 30);
        assert_eq!(cal.days_in_month(1402, 12), 29);
        assert_eq!(cal.days_in_month(1403, 12), 30);
        assert!(cal.to_date(1402, 12, 30).is_err());
    }

    #[test]
    fn test_persian_two_digit_years() {
        let cal = PersianCalendar::default();
        assert_eq!(cal.to_four_digit_year(3), 1403);
        assert_eq!(cal.to_four_digit_year(10), 1410);
        assert_eq!(cal.to_four_digit_year(11), 1311);
    }

    #[test]
    fn test_persian_consecutive_days_round_trip() {
        let cal = PersianCalendar::default();
        let mut day = date(2019, 1, 1);
        let mut previous = cal.from_date(day).unwrap();
        for _ in 0..(366 * 6) {
            day = day.succ_opt().unwrap();
            let current = cal.from_date(day).unwrap();
            assert_ne!(current, previous);
            assert_eq!(cal.to_date(current.0, current.1, current.2).unwrap(), day);
            previous = current;
        }
    }

    #[test]
    fn test_persian_supported_edges() {
        let cal = PersianCalendar::default();
        let first = cal.to_date(PERSIAN_MIN_YEAR, 1, 1).unwrap();
        assert_eq!(cal.from_date(first), Some((1, 1, 1)));
        assert_eq!(cal.from_date(first.pred_opt().unwrap()), None);

        let last_day = cal.days_in_month(PERSIAN_MAX_YEAR, 12);
        let last = cal.to_date(PERSIAN_MAX_YEAR, 12, last_day).unwrap();
        assert_eq!(cal.from_date(last), Some((PERSIAN_MAX_YEAR, 12, last_day)));
        assert_eq!(cal.from_date(last.succ_opt().unwrap()), None);
    }

    #[test]
    fn test_any_calendar_dispatch() {
        let gregorian = AnyCalendar::default();
        let persian = AnyCalendar::Persian(PersianCalendar::default());
        let d = date(2024, 3, 20);
        assert_eq!(gregorian.from_date(d), Some((2024, 3, 20)));
        assert_eq!(persian.from_date(d), Some((1403, 1, 1)));
        assert_eq!(persian.max_year(), PERSIAN_MAX_YEAR);
        assert_eq!(gregorian.to_four_digit_year(23), 2023);
        assert_eq!(gregorian.era(d), 1);
    }

    #[test]
    fn test_any_calendar_serde() {
        let cal = AnyCalendar::Persian(PersianCalendar::default());
        let json = serde_json::to_string(&cal).unwrap();
        assert_eq!(json, r#"{"kind":"persian","two_digit_year_max":1410}"#);

        let parsed: AnyCalendar = serde_json::from_str(r#"{"kind":"gregorian"}"#).unwrap();
        assert_eq!(parsed, AnyCalendar::default());
    }
}
