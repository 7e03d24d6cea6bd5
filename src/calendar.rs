//! Gregorian calendar primitives the parser relies on.
//!
//! Dates are plain [`NaiveDate`]s. Constructing or changing fields clamps the day to the length of
//! the resulting month, so "February 31" quietly becomes the last day of February.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

const MONTH_NAMES: [&str; 12] = [
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
];

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Error raised when date arithmetic leaves the representable range.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    /// Shifting a date went out of range.
    #[error("shifting {date} by {offset:?} is out of range")]
    OutOfRange {
        /// The date being shifted.
        date: NaiveDate,
        /// The requested shift.
        offset: Offset,
    },
    /// A year/month/day triple does not name a date.
    #[error("{year}-{month}-{day} is not a representable date")]
    InvalidDate {
        /// Year.
        year: i32,
        /// Month.
        month: u32,
        /// Day.
        day: u32,
    },
}

/// Which day begins a week.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// ISO 8601 convention.
    #[default]
    Monday,
    /// US convention.
    Sunday,
}

impl WeekStart {
    fn weekday(self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Sunday => Weekday::Sun,
        }
    }
}

/// A calendar shift expressed in whole units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Offset {
    /// Years.
    pub years: i64,
    /// Months.
    pub months: i64,
    /// Weeks.
    pub weeks: i64,
    /// Days.
    pub days: i64,
}

impl Offset {
    /// A shift of `n` days.
    #[must_use]
    pub fn days(n: i64) -> Self {
        Self {
            days: n,
            ..Self::default()
        }
    }

    /// A shift of `n` weeks.
    #[must_use]
    pub fn weeks(n: i64) -> Self {
        Self {
            weeks: n,
            ..Self::default()
        }
    }

    /// A shift of `n` months.
    #[must_use]
    pub fn months(n: i64) -> Self {
        Self {
            months: n,
            ..Self::default()
        }
    }

    /// A shift of `n` years.
    #[must_use]
    pub fn years(n: i64) -> Self {
        Self {
            years: n,
            ..Self::default()
        }
    }

    /// The same shift in the opposite direction.
    #[must_use]
    pub fn negate(self) -> Self {
        Self {
            years: -self.years,
            months: -self.months,
            weeks: -self.weeks,
            days: -self.days,
        }
    }
}

/// Whether `year` is a Gregorian leap year.
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1-based) of `year`.
#[must_use]
pub fn days_in_month(month: u32, year: i32) -> u32 {
    if month == 2 && is_leap_year(year) {
        return 29;
    }
    DAYS_IN_MONTH[(month.clamp(1, 12) - 1) as usize]
}

/// Number of days in `year`.
#[must_use]
pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Build a date, clamping month and day into range.
///
/// # Errors
///
/// Returns an error if the year is outside what `chrono` can represent.
pub fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, CalendarError> {
    let month = month.clamp(1, 12);
    let day = day.clamp(1, days_in_month(month, year));
    NaiveDate::from_ymd_opt(year, month, day).ok_or(CalendarError::InvalidDate { year, month, day })
}

/// Replace some fields of `date`, clamping the result the same way as [`ymd`].
///
/// # Errors
///
/// Returns an error if the year is outside what `chrono` can represent.
pub fn set(
    date: NaiveDate,
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
) -> Result<NaiveDate, CalendarError> {
    ymd(
        year.unwrap_or(date.year()),
        month.unwrap_or(date.month()),
        day.unwrap_or(date.day()),
    )
}

/// Shift `date` by `offset`.
///
/// Years and months go first with the day clamped to the target month, then weeks and days.
///
/// # Errors
///
/// Returns an error if the result is out of range.
pub fn add(date: NaiveDate, offset: Offset) -> Result<NaiveDate, CalendarError> {
    let out_of_range = || CalendarError::OutOfRange { date, offset };

    let months = offset.years * 12 + offset.months;
    let month_count = u32::try_from(months.unsigned_abs()).map_err(|_| out_of_range())?;
    let month_count = Months::new(month_count);
    let shifted = if months >= 0 {
        date.checked_add_months(month_count)
    } else {
        date.checked_sub_months(month_count)
    }
    .ok_or_else(out_of_range)?;

    let days = offset.weeks * 7 + offset.days;
    let day_count = Days::new(days.unsigned_abs());
    if days >= 0 {
        shifted.checked_add_days(day_count)
    } else {
        shifted.checked_sub_days(day_count)
    }
    .ok_or_else(out_of_range)
}

/// Shift `date` back by `offset`.
///
/// # Errors
///
/// Returns an error if the result is out of range.
pub fn subtract(date: NaiveDate, offset: Offset) -> Result<NaiveDate, CalendarError> {
    add(date, offset.negate())
}

/// Signed number of days from `b` to `a`.
#[must_use]
pub fn compare(a: NaiveDate, b: NaiveDate) -> i64 {
    a.signed_duration_since(b).num_days()
}

/// Position of `date` within its week, 0 being `week_start`.
#[must_use]
pub fn day_of_week(date: NaiveDate, week_start: WeekStart) -> u32 {
    date.weekday().days_since(week_start.weekday())
}

/// The first day of the week containing `date`.
#[must_use]
pub fn start_of_week(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    date - Days::new(u64::from(day_of_week(date, week_start)))
}

/// Full English name of a month (1-based).
#[must_use]
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month.clamp(1, 12) - 1) as usize]
}

/// Three-letter English name of a month (1-based).
#[must_use]
pub fn month_short_name(month: u32) -> &'static str {
    &month_name(month)[..3]
}

/// Full English name of a weekday.
#[must_use]
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
