//! Turning a resolved candidate into a `(left, right)` pair of display strings.

use chrono::{Datelike, NaiveDate};

use crate::calendar::{month_name, month_short_name, weekday_name};
use crate::compose::{Candidate, Frame, Relative};
use crate::diff::{day_diff, month_diff_rough, week_diff_solid, year_diff_rough, Diff};
use crate::extract::Unit;

// Past these distances a finer unit stops being useful.
const MAX_YEARS_FOR_DAYS: u64 = 274;
const MAX_DAYS: u64 = 99_999;
const MAX_YEARS_FOR_WEEKS: u64 = 20;
const MAX_WEEKS: u64 = 999;
const MAX_YEARS_FOR_MONTHS: u64 = 84;
const MAX_MONTHS: u64 = 999;

/// Render `candidate` as seen from `today`.
#[must_use]
pub fn render(candidate: &Candidate, today: NaiveDate) -> (String, String) {
    let date = candidate.date;
    let weekday = weekday_name(candidate.weekday.unwrap_or_else(|| date.weekday()));
    let label = full_label(weekday, date, today);

    match candidate.frame {
        Frame::Relative(relative) => {
            let (amount, unit, past) = match relative {
                Relative::Amount { amount, unit, past } => (u64::from(amount), unit, past),
                Relative::Day => {
                    let diff = day_diff(date, today);
                    (diff.value, Unit::Day, diff.past)
                }
            };
            let left = distance(amount, unit.name(), past, "");
            let right = if unit == Unit::Day && amount < 7 {
                weekday.to_string()
            } else {
                label
            };
            (left, right)
        }
        Frame::Measure(unit) => {
            let right = measure(unit, date, today);
            (label, right)
        }
        Frame::Plain => {
            let left = if date.year() == today.year() {
                format!("{} {}", month_name(date.month()), date.day())
            } else {
                let short = month_short_name(date.month());
                format!("{short} {}, {}", date.day(), date.year())
            };
            (left, plain(weekday, date, today))
        }
    }
}

/// "Friday, Mar 14", with the year when it is not the current one.
fn full_label(weekday: &str, date: NaiveDate, today: NaiveDate) -> String {
    let short = month_short_name(date.month());
    if date.year() == today.year() {
        format!("{weekday}, {short} {}", date.day())
    } else {
        format!("{weekday}, {short} {}, {}", date.day(), date.year())
    }
}

/// "in 3 days" or "3 days ago", `prefix` going right before the number.
fn distance(value: u64, unit: &str, past: bool, prefix: &str) -> String {
    let plural = if value > 1 { "s" } else { "" };
    if past {
        format!("{prefix}{value} {unit}{plural} ago")
    } else {
        format!("in {prefix}{value} {unit}{plural}")
    }
}

fn days(date: NaiveDate, today: NaiveDate) -> String {
    let diff = day_diff(date, today);
    if diff.value == 0 {
        return "Today".to_string();
    }
    distance(diff.value, "day", diff.past, "")
}

fn years(diff: Diff) -> String {
    if diff.value > 999 {
        distance(999, "year", diff.past, "> ")
    } else {
        distance(diff.value, "year", diff.past, "~ ")
    }
}

/// The distance to `date` in the coarsest unit that still reads well, starting from `unit`.
fn measure(unit: Unit, date: NaiveDate, today: NaiveDate) -> String {
    let rough = year_diff_rough(date, today);
    match unit {
        Unit::Day if rough.value <= MAX_YEARS_FOR_DAYS => {
            if day_diff(date, today).value <= MAX_DAYS {
                return days(date, today);
            }
        }
        Unit::Week if rough.value <= MAX_YEARS_FOR_WEEKS => {
            let weeks = week_diff_solid(date, today);
            if weeks.value == 0 {
                return days(date, today);
            }
            if weeks.value <= MAX_WEEKS {
                let prefix = if weeks.exact { "" } else { "> " };
                return distance(weeks.value, "week", weeks.past, prefix);
            }
        }
        Unit::Month if rough.value <= MAX_YEARS_FOR_MONTHS => {
            let months = month_diff_rough(date, today);
            if months.value <= 1 {
                return days(date, today);
            }
            if months.value <= MAX_MONTHS {
                return distance(months.value, "month", months.past, "~ ");
            }
        }
        _ => {}
    }
    years(rough)
}

/// The weekday for upcoming dates, otherwise how long ago the date was.
fn plain(weekday: &str, date: NaiveDate, today: NaiveDate) -> String {
    let rough = year_diff_rough(date, today);
    if rough.value > 0 && !rough.past {
        return weekday.to_string();
    }
    if rough.value >= 4 {
        return years(rough);
    }

    let months = month_diff_rough(date, today);
    if months.past && months.value >= 3 {
        return distance(months.value, "month", true, "~ ");
    }
    let diff = day_diff(date, today);
    if !diff.past {
        return weekday.to_string();
    }
    distance(diff.value, "day", true, "")
}
