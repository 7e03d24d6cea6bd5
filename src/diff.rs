//! Distances between two dates at year, month, week and day resolution.

use chrono::{Datelike, NaiveDate};

use crate::calendar;

/// An unsigned distance plus its direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Diff {
    /// Magnitude.
    pub value: u64,
    /// Whether the first date lies before the second.
    pub past: bool,
}

impl Diff {
    fn from_signed(n: i64) -> Self {
        Self {
            value: n.unsigned_abs(),
            past: n < 0,
        }
    }
}

/// Week distance, floored, with whether it landed on a whole number of weeks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeekDiff {
    /// Whole weeks.
    pub value: u64,
    /// Whether the first date lies before the second.
    pub past: bool,
    /// Whether the day distance is a multiple of seven.
    pub exact: bool,
}

// Half-way values round towards positive infinity.
#[allow(clippy::cast_possible_truncation)]
fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// Years from `b` to `a`, rounded on month resolution.
#[must_use]
pub fn year_diff_rough(a: NaiveDate, b: NaiveDate) -> Diff {
    let years = f64::from(a.year() - b.year());
    let months = f64::from(a.month()) - f64::from(b.month());
    Diff::from_signed(round_half_up(years + months / 12.0))
}

/// Months from `b` to `a`, rounded on day resolution with 30-day months.
#[must_use]
pub fn month_diff_rough(a: NaiveDate, b: NaiveDate) -> Diff {
    let years = f64::from(a.year() - b.year());
    let months = f64::from(a.month()) - f64::from(b.month());
    let days = f64::from(a.day()) - f64::from(b.day());
    Diff::from_signed(round_half_up(years * 12.0 + months + days / 30.0))
}

/// Whole weeks from `b` to `a`.
#[must_use]
pub fn week_diff_solid(a: NaiveDate, b: NaiveDate) -> WeekDiff {
    let n = calendar::compare(a, b);
    let abs = n.unsigned_abs();
    WeekDiff {
        value: abs / 7,
        past: n < 0,
        exact: abs % 7 == 0,
    }
}

/// Exact days from `b` to `a`.
#[must_use]
pub fn day_diff(a: NaiveDate, b: NaiveDate) -> Diff {
    Diff::from_signed(calendar::compare(a, b))
}
