use crate::calendar::{AnyCalendar, Calendar, PersianCalendar};
use crate::consts::{DAYS_IN_WEEK, NOON};
use crate::FormatError;
use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Locale-specific names, separators and patterns, plus the calendar in effect.
///
/// Day name tables are Sunday-first. Month name tables are indexed by
/// `month - 1` and may carry a trailing empty entry for 13-month calendars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatInfo {
    pub am_designator: String,
    pub pm_designator: String,
    pub day_names: Vec<String>,
    pub abbreviated_day_names: Vec<String>,
    pub month_names: Vec<String>,
    pub abbreviated_month_names: Vec<String>,
    pub date_separator: String,
    pub time_separator: String,
    pub era_names: Vec<String>,
    pub first_day_of_week: Weekday,
    pub long_date_pattern: String,
    pub short_date_pattern: String,
    pub long_time_pattern: String,
    pub year_month_pattern: String,
    #[serde(default)]
    pub calendar: AnyCalendar,
}

/// Which pattern of a [`FormatInfo`] to use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatPreset {
    Long,
    Short,
    Time,
    YearMonth,
    Custom(String),
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|&name| name.to_owned()).collect()
}

impl FormatInfo {
    /// Culture-neutral English names on the Gregorian calendar
    pub fn invariant() -> Self {
        Self {
            am_designator: "AM".to_owned(),
            pm_designator: "PM".to_owned(),
            day_names: owned(&[
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]),
            abbreviated_day_names: owned(&["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]),
            month_names: owned(&[
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]),
            abbreviated_month_names: owned(&[
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]),
            date_separator: "/".to_owned(),
            time_separator: ":".to_owned(),
            era_names: owned(&["A.D."]),
            first_day_of_week: Weekday::Sun,
            long_date_pattern: "dddd, dd MMMM yyyy".to_owned(),
            short_date_pattern: "MM/dd/yyyy".to_owned(),
            long_time_pattern: "HH:mm:ss".to_owned(),
            year_month_pattern: "yyyy MMMM".to_owned(),
            calendar: AnyCalendar::default(),
        }
    }

    /// Persian names on the Persian calendar
    pub fn persian() -> Self {
        Self {
            am_designator: "ق.ظ".to_owned(),
            pm_designator: "ب.ظ".to_owned(),
            day_names: owned(&[
                "یکشنبه",
                "دوشنبه",
                "سه‌شنبه",
                "چهارشنبه",
                "پنجشنبه",
                "جمعه",
                "شنبه",
            ]),
            abbreviated_day_names: owned(&["ی", "د", "س", "چ", "پ", "ج", "ش"]),
            month_names: owned(&[
                "فروردین",
                "اردیبهشت",
                "خرداد",
                "تیر",
                "مرداد",
                "شهریور",
                "مهر",
                "آبان",
                "آذر",
                "دی",
                "بهمن",
                "اسفند",
            ]),
            abbreviated_month_names: owned(&[
                "فرو", "ارد", "خرد", "تیر", "مرد", "شهر", "مهر", "آبان", "آذر", "دی", "بهم", "اسف",
            ]),
            date_separator: "/".to_owned(),
            time_separator: ":".to_owned(),
            era_names: owned(&["ه.ش"]),
            first_day_of_week: Weekday::Sat,
            long_date_pattern: "dddd، dd MMMM yyyy".to_owned(),
            short_date_pattern: "yyyy/MM/dd".to_owned(),
            long_time_pattern: "HH:mm:ss".to_owned(),
            year_month_pattern: "MMMM yyyy".to_owned(),
            calendar: AnyCalendar::Persian(PersianCalendar::default()),
        }
    }

    /// Checks the name tables against the calendar.
    ///
    /// # Errors
    /// Returns `FormatError::InvalidLocale` naming the first malformed table.
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.day_names.len() != DAYS_IN_WEEK {
            return Err(FormatError::InvalidLocale(format!(
                "day_names has {} entries, expected {DAYS_IN_WEEK}",
                self.day_names.len()
            )));
        }
        if self.abbreviated_day_names.len() != DAYS_IN_WEEK {
            return Err(FormatError::InvalidLocale(format!(
                "abbreviated_day_names has {} entries, expected {DAYS_IN_WEEK}",
                self.abbreviated_day_names.len()
            )));
        }

        let calendar = &self.calendar;
        let months = calendar
            .months_in_year(calendar.min_year())
            .max(calendar.months_in_year(calendar.max_year()));
        let months = usize::try_from(months).unwrap_or_default();
        if self.month_names.len() < months {
            return Err(FormatError::InvalidLocale(format!(
                "month_names has {} entries, calendar needs {months}",
                self.month_names.len()
            )));
        }
        if self.abbreviated_month_names.len() < months {
            return Err(FormatError::InvalidLocale(format!(
                "abbreviated_month_names has {} entries, calendar needs {months}",
                self.abbreviated_month_names.len()
            )));
        }
        if self.era_names.is_empty() {
            return Err(FormatError::InvalidLocale("era_names is empty".to_owned()));
        }
        Ok(())
    }

    /// Resolves a preset to its pattern string.
    ///
    /// # Errors
    /// Returns `FormatError::EmptyPattern` if the resolved pattern is empty.
    pub fn pattern<'a>(&'a self, preset: &'a FormatPreset) -> Result<&'a str, FormatError> {
        let (name, pattern) = match preset {
            FormatPreset::Long => ("long date", self.long_date_pattern.as_str()),
            FormatPreset::Short => ("short date", self.short_date_pattern.as_str()),
            FormatPreset::Time => ("long time", self.long_time_pattern.as_str()),
            FormatPreset::YearMonth => ("year-month", self.year_month_pattern.as_str()),
            FormatPreset::Custom(pattern) => ("custom", pattern.as_str()),
        };
        if pattern.is_empty() {
            return Err(FormatError::EmptyPattern(name.to_owned()));
        }
        Ok(pattern)
    }

    pub fn calendar(&self) -> &dyn Calendar {
        &self.calendar
    }

    /// Designator for the half of the day `hour` (24-hour) falls in
    pub fn designator(&self, hour: i32) -> &str {
        if hour < NOON {
            &self.am_designator
        } else {
            &self.pm_designator
        }
    }

    pub fn day_name(&self, weekday: Weekday) -> Option<&str> {
        name_at(&self.day_names, weekday.num_days_from_sunday())
    }

    pub fn abbreviated_day_name(&self, weekday: Weekday) -> Option<&str> {
        name_at(&self.abbreviated_day_names, weekday.num_days_from_sunday())
    }

    pub fn month_name(&self, month: i32) -> Option<&str> {
        name_at(&self.month_names, u32::try_from(month - 1).ok()?)
    }

    pub fn abbreviated_month_name(&self, month: i32) -> Option<&str> {
        name_at(&self.abbreviated_month_names, u32::try_from(month - 1).ok()?)
    }

    /// Name of a 1-based era index
    pub fn era_name(&self, era: usize) -> Option<&str> {
        self.era_names.get(era.checked_sub(1)?).map(String::as_str)
    }
}

fn name_at(names: &[String], index: u32) -> Option<&str> {
    names
        .get(usize::try_from(index).ok()?)
        .map(String::as_str)
}

impl Default for FormatInfo {
    fn default() -> Self {
        Self::invariant()
    }
}
