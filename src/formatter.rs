//! The component editor behind a date/time picker.
//!
//! A [`DateTimeFormatter`] owns the six editable [`Components`] of one editing
//! session and the value they resolve to. A UI layer tokenizes its pattern
//! once with [`crate::tokenize`], then drives the formatter slot by slot:
//! typed digits go through [`DateTimeFormatter::accepts`] and
//! [`DateTimeFormatter::commit_value`], arrows and the mouse wheel through
//! [`DateTimeFormatter::increment`] and [`DateTimeFormatter::decrement`], and
//! every slot is redrawn from [`DateTimeFormatter::display_text`].

use std::fmt;

use crate::calendar::{AnyCalendar, Calendar};
use crate::components::Components;
use crate::consts::{
    MAX_DAY_UNBOUNDED, MAX_HOUR, MAX_MINUTE, MAX_MONTH_UNBOUNDED, MAX_SECOND, MAX_TWO_DIGIT_YEAR,
    MIN_DAY, NOON,
};
use crate::locale::FormatInfo;
use crate::specifier::{SpecifierDescriptor, SpecifierKind, Token, tokenize};
use crate::types::{Field, TimeKind, Timestamp};
use crate::FormatError;
use chrono::{Datelike, Local, NaiveDate, NaiveTime};

type Observer = Box<dyn FnMut(Option<&Timestamp>)>;

/// A validated edit waiting to be applied
enum Edit {
    Set(Field, i32),
    /// Accepted, but leaves the components as they are
    Keep,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Next value when stepping up: `max` wraps to `wrap_to`, unset becomes `unset`
const fn step_up(value: Option<i32>, max: i32, wrap_to: i32, unset: i32) -> i32 {
    match value {
        Some(v) if v < max => v + 1,
        Some(_) => wrap_to,
        None => unset,
    }
}

/// Next value when stepping down: `min` and unset wrap to `wrap_to`
const fn step_down(value: Option<i32>, min: i32, wrap_to: i32) -> i32 {
    match value {
        Some(v) if v > min => v - 1,
        _ => wrap_to,
    }
}

const fn to_12_hour(hour: i32) -> i32 {
    if hour > NOON { hour - NOON } else { hour }
}

/// Stateful editor for one date/time value.
pub struct DateTimeFormatter {
    info: FormatInfo,
    components: Components,
    value: Option<Timestamp>,
    clock: fn() -> NaiveDate,
    observer: Option<Observer>,
}

impl fmt::Debug for DateTimeFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateTimeFormatter")
            .field("components", &self.components)
            .field("value", &self.value)
            .field("observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

impl DateTimeFormatter {
    /// Creates an empty editor.
    ///
    /// # Errors
    /// Returns `FormatError::InvalidLocale` if `info` fails validation.
    pub fn new(info: FormatInfo) -> Result<Self, FormatError> {
        info.validate()?;
        Ok(Self {
            info,
            components: Components::default(),
            value: None,
            clock: today,
            observer: None,
        })
    }

    /// Creates an editor seeded from `value`.
    ///
    /// # Errors
    /// Returns `FormatError::InvalidLocale` if `info` fails validation, or
    /// `FormatError::UnsupportedDate` if the calendar cannot represent `value`.
    pub fn with_value(info: FormatInfo, value: Option<Timestamp>) -> Result<Self, FormatError> {
        let mut formatter = Self::new(info)?;
        formatter.set_value(value)?;
        Ok(formatter)
    }

    /// Registers the callback invoked whenever the resolved value changes,
    /// replacing any previous one.
    pub fn on_change(&mut self, observer: impl FnMut(Option<&Timestamp>) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Replaces the source of "today" used by the year fallbacks.
    pub fn set_clock(&mut self, clock: fn() -> NaiveDate) {
        self.clock = clock;
    }

    pub const fn format_info(&self) -> &FormatInfo {
        &self.info
    }

    pub const fn components(&self) -> &Components {
        &self.components
    }

    /// The resolved value, set only when year, month and day are all set
    pub const fn value(&self) -> Option<Timestamp> {
        self.value
    }

    /// Time of day, set only when hour, minute and second are all set
    pub fn time(&self) -> Option<NaiveTime> {
        self.components.time()
    }

    pub fn is_am(&self) -> bool {
        self.components.is_am()
    }

    fn calendar(&self) -> &AnyCalendar {
        &self.info.calendar
    }

    fn current_year(&self) -> i32 {
        let calendar = self.calendar();
        calendar
            .from_date((self.clock)())
            .map_or(calendar.min_year(), |(year, _, _)| year)
    }

    /// Days in the current month, or 31 while year or month is unknown
    fn day_limit(&self) -> i32 {
        match (self.components.year, self.components.month) {
            (Some(year), Some(month)) => self.calendar().days_in_month(year, month),
            _ => MAX_DAY_UNBOUNDED,
        }
    }

    /// Months in the current year, or 12 while the year is unknown
    fn month_limit(&self) -> i32 {
        self.components
            .year
            .map_or(MAX_MONTH_UNBOUNDED, |year| self.calendar().months_in_year(year))
    }

    /// Seeds all six components from `value`, or clears them.
    ///
    /// Sub-second precision is dropped. Returns whether the value changed;
    /// the change observer fires only then.
    ///
    /// # Errors
    /// Returns `FormatError::UnsupportedDate` if the calendar cannot represent `value`.
    pub fn set_value(&mut self, value: Option<Timestamp>) -> Result<bool, FormatError> {
        let value = value.map(|ts| Timestamp::with_kind(ts.datetime(), ts.kind()));
        if value == self.value {
            return Ok(false);
        }
        self.components = match &value {
            Some(ts) => Components::from_timestamp(ts, self.calendar())
                .ok_or(FormatError::UnsupportedDate(ts.date()))?,
            None => Components::default(),
        };
        Ok(self.replace_value(value))
    }

    fn replace_value(&mut self, value: Option<Timestamp>) -> bool {
        if value == self.value {
            return false;
        }
        debug!(
            "resolved value changed from {:?} to {:?}",
            self.value.map(|v| v.to_string()),
            value.map(|v| v.to_string())
        );
        self.value = value;
        if let Some(observer) = self.observer.as_mut() {
            observer(self.value.as_ref());
        }
        true
    }

    /// Clamps the components and recomputes the resolved value.
    ///
    /// Returns whether the resolved value changed.
    pub fn reconcile(&mut self) -> bool {
        let kind = self.value.map_or(TimeKind::default(), |v| v.kind());
        let (components, resolved) = self.components.reconcile(self.calendar(), kind);
        self.components = components;
        self.replace_value(resolved)
    }

    /// Unsets the component `kind` edits. Returns whether it was set.
    pub fn clear_field(&mut self, kind: SpecifierKind) -> bool {
        // t and tt render the hour but do not own it
        if matches!(kind, SpecifierKind::AmPmChar | SpecifierKind::AmPmFull) {
            return false;
        }
        let Some(field) = kind.field() else {
            return false;
        };
        if self.components.slot(field).take().is_none() {
            return false;
        }
        self.reconcile();
        true
    }

    /// Drops year, month and day unless all three are set.
    pub fn clear_invalid_combination(&mut self) {
        self.components = self.components.without_partial_date();
    }

    /// Flips between AM and PM; nothing to flip without an hour
    fn toggle_am_pm(&mut self) -> bool {
        match self.components.hour {
            Some(hour) if hour < NOON => self.components.hour = Some(hour + NOON),
            Some(hour) => self.components.hour = Some(hour - NOON),
            None => return false,
        }
        true
    }

    /// Steps the component `kind` edits up by one.
    ///
    /// Seconds, minutes and hours wrap around, day and month wrap within the
    /// current month and year. An unset year becomes the current year; a year
    /// at the calendar's maximum does not move. Returns whether anything changed.
    pub fn increment(&mut self, kind: SpecifierKind) -> bool {
        use SpecifierKind as K;

        let c = self.components;
        match kind {
            K::Second | K::SecondPadded => {
                self.components.second = Some(step_up(c.second, MAX_SECOND, 0, 1));
            }
            K::Minute | K::MinutePadded => {
                self.components.minute = Some(step_up(c.minute, MAX_MINUTE, 0, 1));
            }
            K::Hour12 | K::Hour12Padded | K::Hour24 | K::Hour24Padded => {
                self.components.hour = Some(step_up(c.hour, MAX_HOUR, 0, 0));
            }
            K::Day | K::DayPadded => {
                let limit = self.day_limit();
                self.components.day = Some(step_up(c.day, limit, MIN_DAY, MIN_DAY));
            }
            K::Month | K::MonthPadded | K::MonthNameAbbreviated | K::MonthNameFull => {
                let limit = self.month_limit();
                self.components.month = Some(step_up(c.month, limit, 1, 1));
            }
            K::Year2Digit | K::Year2DigitPadded | K::Year3Plus | K::Year4 => {
                let year = match c.year {
                    Some(year) if year < self.calendar().max_year() => year + 1,
                    Some(_) => return false,
                    None => self.current_year(),
                };
                self.components.year = Some(year);
            }
            K::AmPmChar | K::AmPmFull => {
                if !self.toggle_am_pm() {
                    return false;
                }
            }
            K::DayNameAbbreviated
            | K::DayNameFull
            | K::EraName
            | K::DateSeparator
            | K::TimeSeparator
            | K::Literal => return false,
        }
        self.reconcile();
        true
    }

    /// Steps the component `kind` edits down by one.
    ///
    /// Mirrors [`DateTimeFormatter::increment`]; unset components start from
    /// their largest value, and a year at (or unset below) the calendar's
    /// minimum jumps to the current year.
    pub fn decrement(&mut self, kind: SpecifierKind) -> bool {
        use SpecifierKind as K;

        let c = self.components;
        match kind {
            K::Second | K::SecondPadded => {
                self.components.second = Some(step_down(c.second, 0, MAX_SECOND));
            }
            K::Minute | K::MinutePadded => {
                self.components.minute = Some(step_down(c.minute, 0, MAX_MINUTE));
            }
            K::Hour12 | K::Hour12Padded | K::Hour24 | K::Hour24Padded => {
                self.components.hour = Some(step_down(c.hour, 0, MAX_HOUR));
            }
            K::Day | K::DayPadded => {
                let limit = self.day_limit();
                self.components.day = Some(step_down(c.day, MIN_DAY, limit));
            }
            K::Month | K::MonthPadded | K::MonthNameAbbreviated | K::MonthNameFull => {
                let limit = self.month_limit();
                self.components.month = Some(step_down(c.month, 1, limit));
            }
            K::Year2Digit | K::Year2DigitPadded | K::Year3Plus | K::Year4 => {
                let year = match c.year {
                    Some(year) if year > self.calendar().min_year() => year - 1,
                    _ => self.current_year(),
                };
                self.components.year = Some(year);
            }
            K::AmPmChar | K::AmPmFull => {
                if !self.toggle_am_pm() {
                    return false;
                }
            }
            K::DayNameAbbreviated
            | K::DayNameFull
            | K::EraName
            | K::DateSeparator
            | K::TimeSeparator
            | K::Literal => return false,
        }
        self.reconcile();
        true
    }

    /// Increments up to `steps` times, stopping at the first step that changes nothing.
    pub fn increment_by(&mut self, kind: SpecifierKind, steps: u32) -> bool {
        let mut changed = false;
        for _ in 0..steps {
            if !self.increment(kind) {
                break;
            }
            changed = true;
        }
        changed
    }

    /// Decrements up to `steps` times, stopping at the first step that changes nothing.
    pub fn decrement_by(&mut self, kind: SpecifierKind, steps: u32) -> bool {
        let mut changed = false;
        for _ in 0..steps {
            if !self.decrement(kind) {
                break;
            }
            changed = true;
        }
        changed
    }

    fn two_digit_year(&self, value: i32) -> Option<Edit> {
        (value <= MAX_TWO_DIGIT_YEAR)
            .then(|| Edit::Set(Field::Year, self.calendar().to_four_digit_year(value)))
    }

    /// Decides what typing `value` into the slot of `kind` would do.
    ///
    /// `None` rejects the value. `committing` loosens a few rules the way a
    /// finished entry is treated differently from a keystroke in progress.
    fn plan_edit(
        &self,
        kind: SpecifierKind,
        value: i32,
        digit_length: usize,
        committing: bool,
    ) -> Option<Edit> {
        use SpecifierKind as K;

        let c = &self.components;
        match kind {
            K::Second | K::SecondPadded => {
                (0..=MAX_SECOND).contains(&value).then_some(Edit::Set(Field::Second, value))
            }
            K::Minute | K::MinutePadded => {
                (0..=MAX_MINUTE).contains(&value).then_some(Edit::Set(Field::Minute, value))
            }
            K::Hour12 | K::Hour12Padded => {
                if !(0..=MAX_HOUR).contains(&value) {
                    return None;
                }
                let hour = if value == 0 || value >= NOON || c.is_am() {
                    value
                } else {
                    value + NOON
                };
                Some(Edit::Set(Field::Hour, hour))
            }
            K::Hour24 | K::Hour24Padded => {
                (0..=MAX_HOUR).contains(&value).then_some(Edit::Set(Field::Hour, value))
            }
            K::Day | K::DayPadded => {
                if value < MIN_DAY {
                    return None;
                }
                if let (Some(year), Some(month)) = (c.year, c.month) {
                    if value > self.calendar().days_in_month(year, month) {
                        return None;
                    }
                }
                Some(Edit::Set(Field::Day, value))
            }
            K::Month | K::MonthPadded => {
                if value < 1 {
                    return None;
                }
                if let Some(year) = c.year {
                    if value > self.calendar().months_in_year(year) {
                        return None;
                    }
                }
                Some(Edit::Set(Field::Month, value))
            }
            K::Year2Digit | K::Year2DigitPadded => {
                if value <= 0 {
                    return None;
                }
                self.two_digit_year(value)
            }
            K::Year3Plus | K::Year4 => {
                if value <= 0 {
                    return None;
                }
                if digit_length <= 2 && value <= MAX_TWO_DIGIT_YEAR {
                    return self.two_digit_year(value);
                }
                let calendar = self.calendar();
                if calendar.supports_year(value) {
                    Some(Edit::Set(Field::Year, value))
                } else if value > calendar.max_year() {
                    committing.then_some(Edit::Keep)
                } else {
                    Some(Edit::Keep)
                }
            }
            K::AmPmChar
            | K::AmPmFull
            | K::DayNameAbbreviated
            | K::DayNameFull
            | K::MonthNameAbbreviated
            | K::MonthNameFull
            | K::EraName
            | K::DateSeparator
            | K::TimeSeparator
            | K::Literal => None,
        }
    }

    /// Whether `value`, typed with `digit_length` digits, is acceptable in the
    /// slot of `kind`. Never changes state.
    pub fn accepts(&self, kind: SpecifierKind, value: i32, digit_length: usize) -> bool {
        self.plan_edit(kind, value, digit_length, false).is_some()
    }

    /// Applies a typed `value` to the slot of `kind` if it is acceptable.
    ///
    /// Typing into a 12-hour slot keeps the current half of the day for
    /// 1 through 11. A two-digit entry into a year slot is expanded with the
    /// calendar's two-digit-year window. A full year outside the calendar's
    /// range is accepted without moving the year.
    pub fn commit_value(&mut self, kind: SpecifierKind, value: i32, digit_length: usize) -> bool {
        let Some(edit) = self.plan_edit(kind, value, digit_length, true) else {
            return false;
        };
        if let Edit::Set(field, value) = edit {
            *self.components.slot(field) = Some(value);
        }
        self.reconcile();
        true
    }

    /// [`DateTimeFormatter::accepts`] or [`DateTimeFormatter::commit_value`],
    /// chosen by `commit`.
    pub fn edit_value(
        &mut self,
        kind: SpecifierKind,
        value: i32,
        commit: bool,
        digit_length: usize,
    ) -> bool {
        if commit {
            self.commit_value(kind, value, digit_length)
        } else {
            self.accepts(kind, value, digit_length)
        }
    }

    /// Whether leaving the slot of `kind` should commit a pending edit, i.e.
    /// whether its component disagrees with the resolved value.
    pub fn should_commit(&self, kind: SpecifierKind) -> bool {
        let Some(field) = kind.field() else {
            return false;
        };
        let resolved = self
            .value
            .and_then(|ts| Components::from_timestamp(&ts, self.calendar()))
            .and_then(|components| components.get(field));
        resolved != self.components.get(field)
    }

    /// Text for one token, or `None` while the data it shows is not available.
    pub fn display_text(&self, token: &Token) -> Option<String> {
        use SpecifierKind as K;

        let c = &self.components;
        let info = &self.info;
        match token.kind() {
            K::Literal => Some(token.text.clone()),
            K::Second => c.second.map(|v| v.to_string()),
            K::SecondPadded => c.second.map(|v| format!("{v:02}")),
            K::Minute => c.minute.map(|v| v.to_string()),
            K::MinutePadded => c.minute.map(|v| format!("{v:02}")),
            K::Hour12 => c.hour.map(|v| to_12_hour(v).to_string()),
            K::Hour12Padded => c.hour.map(|v| format!("{:02}", to_12_hour(v))),
            K::Hour24 => c.hour.map(|v| v.to_string()),
            K::Hour24Padded => c.hour.map(|v| format!("{v:02}")),
            K::AmPmChar => c
                .hour
                .map(|v| info.designator(v).chars().take(1).collect()),
            K::AmPmFull => c.hour.map(|v| info.designator(v).to_owned()),
            K::Day => c.day.map(|v| v.to_string()),
            K::DayPadded => c.day.map(|v| format!("{v:02}")),
            K::DayNameAbbreviated => self
                .value
                .and_then(|ts| info.abbreviated_day_name(ts.date().weekday()))
                .map(str::to_owned),
            K::DayNameFull => self
                .value
                .and_then(|ts| info.day_name(ts.date().weekday()))
                .map(str::to_owned),
            K::Month => c.month.map(|v| v.to_string()),
            K::MonthPadded => c.month.map(|v| format!("{v:02}")),
            K::MonthNameAbbreviated => c
                .month
                .and_then(|v| info.abbreviated_month_name(v))
                .map(str::to_owned),
            K::MonthNameFull => c.month.and_then(|v| info.month_name(v)).map(str::to_owned),
            K::Year2Digit => c.year.map(|v| (v % 100).to_string()),
            K::Year2DigitPadded => c.year.map(|v| format!("{:02}", v % 100)),
            K::Year3Plus => c.year.map(|v| format!("{v:03}")),
            K::Year4 => c.year.map(|v| format!("{v:04}")),
            K::EraName | K::DateSeparator | K::TimeSeparator => {
                static_text_of(token.kind(), info, self.value.as_ref())
            }
        }
    }

    /// Static text of a separator or era descriptor.
    ///
    /// # Errors
    /// Returns `FormatError::NotStatic` for any other descriptor.
    pub fn static_text(&self, descriptor: &SpecifierDescriptor) -> Result<Option<String>, FormatError> {
        static_text(descriptor, &self.info, self.value.as_ref())
    }

    /// Choices offered for the slot of `kind`.
    ///
    /// # Errors
    /// Returns `FormatError::NoItems` if `kind` is not an AM/PM or name specifier.
    pub fn items(&self, kind: SpecifierKind) -> Result<Vec<String>, FormatError> {
        items(kind, &self.info)
    }

    /// Renders every token of `pattern`, leaving unavailable pieces empty.
    pub fn format(&self, pattern: &str) -> String {
        tokenize(pattern)
            .iter()
            .filter_map(|token| self.display_text(token))
            .collect()
    }
}

fn static_text_of(kind: SpecifierKind, info: &FormatInfo, value: Option<&Timestamp>) -> Option<String> {
    match kind {
        SpecifierKind::EraName => value
            .and_then(|ts| info.era_name(info.calendar.era(ts.date())))
            .map(str::to_owned),
        SpecifierKind::DateSeparator => Some(info.date_separator.clone()),
        SpecifierKind::TimeSeparator => Some(info.time_separator.clone()),
        _ => None,
    }
}

/// Static text of a separator or era descriptor; the era needs `value`.
///
/// # Errors
/// Returns `FormatError::NotStatic` for any other descriptor.
pub fn static_text(
    descriptor: &SpecifierDescriptor,
    info: &FormatInfo,
    value: Option<&Timestamp>,
) -> Result<Option<String>, FormatError> {
    if !descriptor.is_static() {
        return Err(FormatError::NotStatic(descriptor.kind));
    }
    Ok(static_text_of(descriptor.kind, info, value))
}

/// Choices for AM/PM and name specifiers, in the locale's order.
///
/// # Errors
/// Returns `FormatError::NoItems` for any other kind.
pub fn items(kind: SpecifierKind, info: &FormatInfo) -> Result<Vec<String>, FormatError> {
    let first_char = |s: &str| s.chars().take(1).collect::<String>();
    match kind {
        SpecifierKind::AmPmChar => Ok(vec![
            first_char(&info.am_designator),
            first_char(&info.pm_designator),
        ]),
        SpecifierKind::AmPmFull => Ok(vec![info.am_designator.clone(), info.pm_designator.clone()]),
        SpecifierKind::DayNameAbbreviated => Ok(info.abbreviated_day_names.clone()),
        SpecifierKind::DayNameFull => Ok(info.day_names.clone()),
        SpecifierKind::MonthNameAbbreviated => Ok(info.abbreviated_month_names.clone()),
        SpecifierKind::MonthNameFull => Ok(info.month_names.clone()),
        _ => Err(FormatError::NoItems(kind)),
    }
}
