/// Character that makes the next pattern character literal
pub const ESCAPE_CHAR: char = '\\';

/// Largest second and minute value
pub const MAX_SECOND: i32 = 59;
/// Largest minute value
pub const MAX_MINUTE: i32 = 59;
/// Largest hour value (storage is always 24-hour)
pub const MAX_HOUR: i32 = 23;
/// First PM hour; also the 12-hour display offset
pub const NOON: i32 = 12;

/// Largest value accepted by the two-digit year forms
pub const MAX_TWO_DIGIT_YEAR: i32 = 99;
/// Fallback day limit when year or month is not known yet
pub const MAX_DAY_UNBOUNDED: i32 = 31;
/// Fallback month limit when the year is not known yet
pub const MAX_MONTH_UNBOUNDED: i32 = 12;

/// First day of month, first month of year, used for lower bounds
pub const MIN_DAY: i32 = 1;
/// Month number for January
pub const JANUARY: i32 = 1;
/// Month number for February
pub const FEBRUARY: i32 = 2;

/// Smallest and largest Gregorian year the engine accepts
pub const GREGORIAN_MIN_YEAR: i32 = 1;
/// Largest Gregorian year (inclusive)
pub const GREGORIAN_MAX_YEAR: i32 = 9999;
/// Two-digit years above `2049 % 100` land in the 1900s
pub const GREGORIAN_TWO_DIGIT_YEAR_MAX: i32 = 2049;

/// First Persian year (1 Farvardin 1 AP)
pub const PERSIAN_MIN_YEAR: i32 = 1;
/// Last Persian year `icu_calendar` constructs dates for
pub const PERSIAN_MAX_YEAR: i32 = 9999;
/// Two-digit years above `1410 % 100` land in the 1300s
pub const PERSIAN_TWO_DIGIT_YEAR_MAX: i32 = 1410;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: i32 = 29;

/// Maximum days in each Gregorian month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [i32; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Number of weekday names a locale must supply
pub const DAYS_IN_WEEK: usize = 7;

/// Separates the two ends of a serialized date window
pub const RANGE_SEPARATOR: char = '/';
