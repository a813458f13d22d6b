//! Format-pattern tokenizer and slot-by-slot date/time component editor.
//!
//! A date picker shows a pattern such as `dd/MM/yyyy HH:mm` as a row of
//! slots the user edits one at a time. This crate provides both halves:
//!
//! - [`tokenize`] splits a pattern into [`Token`]s, each tagged with the
//!   [`SpecifierDescriptor`] that renders and edits it.
//! - [`DateTimeFormatter`] keeps the six components being edited, validates
//!   and commits typed values, steps components up and down, clamps them into
//!   range and publishes the resolved [`Timestamp`] once a full date exists.
//!
//! Calendars are pluggable through [`Calendar`]; Gregorian and Persian are
//! bundled, as are matching [`FormatInfo`] presets.
//!
//! ```
//! use datetime_slots::{DateTimeFormatter, FormatInfo, SpecifierKind};
//!
//! let mut formatter = DateTimeFormatter::new(FormatInfo::invariant()).unwrap();
//! formatter.commit_value(SpecifierKind::Year4, 2024, 4);
//! formatter.commit_value(SpecifierKind::MonthPadded, 2, 2);
//! formatter.commit_value(SpecifierKind::DayPadded, 29, 2);
//! assert_eq!(formatter.format("yyyy-MM-dd"), "2024-02-29");
//! ```

#[macro_use]
mod logging;

mod calendar;
mod components;
mod consts;
mod formatter;
mod locale;
mod prelude;
mod range;
mod specifier;
mod types;

pub use calendar::{AnyCalendar, Calendar, GregorianCalendar, PersianCalendar, days_in_month, is_leap_year};
pub use components::Components;
pub use consts::*;
pub use formatter::{DateTimeFormatter, items, static_text};
pub use locale::{FormatInfo, FormatPreset};
pub use range::{DateBounds, RangeError};
pub use specifier::{
    LITERAL, SpecifierDescriptor, SpecifierKind, Token, ValueClass, candidates, catalog, descriptor, tokenize,
};
pub use types::{Field, TimeKind, Timestamp};

use crate::prelude::*;
use chrono::NaiveDate;

/// Configuration problems. Rejected user input is never an error; the
/// editing operations report it by returning `false`.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum FormatError {
    #[display(fmt = "Invalid locale: {_0}")]
    InvalidLocale(String),
    #[display(fmt = "Empty {_0} pattern")]
    EmptyPattern(String),
    #[display(fmt = "Date {_0} is outside the supported calendar range")]
    UnsupportedDate(NaiveDate),
    #[display(fmt = "Invalid date {year}-{month:02}-{day:02} for this calendar")]
    InvalidDate { year: i32, month: i32, day: i32 },
    #[display(fmt = "Specifier {_0:?} has no static text")]
    NotStatic(SpecifierKind),
    #[display(fmt = "Specifier {_0:?} has no item list")]
    NoItems(SpecifierKind),
}

impl std::error::Error for FormatError {}

/// Renders `value` through `pattern`. Pieces without data render empty.
///
/// # Errors
/// Returns `FormatError::InvalidLocale` if `info` fails validation, or
/// `FormatError::UnsupportedDate` if its calendar cannot represent `value`.
pub fn format(pattern: &str, info: &FormatInfo, value: Option<Timestamp>) -> Result<String, FormatError> {
    let formatter = DateTimeFormatter::with_value(info.clone(), value)?;
    Ok(formatter.format(pattern))
}
