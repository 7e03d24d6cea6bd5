//! Date ranges implied by a month and/or year mention, and the date helpers built on them.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::calendar::{self, CalendarError, Offset};
use crate::context::Context;
use crate::segment::Span;

use super::ymd::{resolve_ymd, YmdParts};
use super::{month_certain, year, AmountDuration, OrdinalDuration, Unit};

/// A stretch of the calendar anchored at its first day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
    /// Resolution of the mention: a single day, a week, a month or a year.
    pub unit: Unit,
    /// First day of the range.
    pub start: NaiveDate,
    /// Whether the text pinned the year.
    pub year_specified: bool,
    /// Where the mention was found.
    pub span: Span,
}

/// Turn whatever parts of a date were given into a concrete date near `today`.
///
/// - A month without a year lands this year if it is at most one month back, else next year.
/// - A lone day lands this month if it is still ahead, else next month.
/// - A lone year is its January 1.
///
/// # Errors
///
/// Returns an error if the date cannot be represented.
pub fn concrete_date(
    today: NaiveDate,
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
) -> Result<NaiveDate, CalendarError> {
    if let Some(month) = month {
        let day = day.unwrap_or(1);
        if let Some(year) = year {
            return calendar::ymd(year, month, day);
        }
        let date = calendar::set(today, None, Some(month), Some(day))?;
        if i64::from(month) - i64::from(today.month()) >= -1 {
            return Ok(date);
        }
        return calendar::add(date, Offset::years(1));
    }

    // A day without a month is ignored next to a year.
    if let Some(year) = year {
        return calendar::ymd(year, 1, 1);
    }

    if let Some(day) = day {
        let date = calendar::set(today, None, None, Some(day))?;
        if date > today {
            return Ok(date);
        }
        return calendar::add(date, Offset::months(1));
    }

    Ok(today)
}

/// The "Nth week/day/month" of a month or year mentioned right next to the ordinal phrase.
///
/// # Errors
///
/// Returns an error if the start date cannot be represented.
pub fn range_from_ordinal_duration(
    input: &str,
    segments: &[Span],
    ordinal_duration: &OrdinalDuration,
    ctx: &Context,
) -> Result<Option<Range>, CalendarError> {
    let ordinal = i64::from(ordinal_duration.ordinal.value);
    let unit = ordinal_duration.unit.value;
    if unit == Unit::Year {
        return Ok(None);
    }

    let phrase = ordinal_duration.span;
    for segment in segments.iter().filter(|s| s.adjacent(phrase)) {
        let text = &input[segment.start..segment.end];
        let year = year(text);
        // "2nd month of march" makes no sense, so only a year can anchor a month count.
        let month = month_certain(text).filter(|_| unit != Unit::Month);
        let Some(base) = Span::cover([month.map(|t| t.span), year.map(|t| t.span)]) else {
            continue;
        };

        let span = if segment.end == phrase.start {
            Span::new(segment.start + base.start, phrase.end)
        } else {
            Span::new(phrase.start, segment.start + base.end)
        };
        let year_value = year.map(|t| t.value);
        let date = concrete_date(ctx.today, year_value, month.map(|t| t.value), None)?;
        let start = match unit {
            Unit::Week => calendar::add(
                calendar::start_of_week(date, ctx.week_start),
                Offset::weeks(ordinal - 1),
            )?,
            _ => calendar::add(date, unit.offset(ordinal - 1))?,
        };

        log::debug!("Resolved {ordinal} {} range starting {start}", unit.name());
        return Ok(Some(Range {
            unit,
            start,
            year_specified: year.is_some(),
            span,
        }));
    }
    Ok(None)
}

/// The first segment naming a year, month and/or day, as a range of the finest unit given.
///
/// # Errors
///
/// Returns an error if the start date cannot be represented.
pub fn range(
    input: &str,
    segments: &[Span],
    today: NaiveDate,
) -> Result<Option<Range>, CalendarError> {
    for segment in segments {
        let text = &input[segment.start..segment.end];
        let parts = YmdParts::scan(text);
        let (month, day) = match resolve_ymd(text, &parts) {
            Some(ymd) => (Some(ymd.month), Some(ymd.day)),
            None => (parts.month_certain, None),
        };
        let Some(span) = Span::cover([
            parts.year.map(|t| t.span),
            month.map(|t| t.span),
            day.map(|t| t.span),
        ]) else {
            continue;
        };

        let unit = match (month, day) {
            (Some(_), Some(_)) => Unit::Day,
            (Some(_), None) => Unit::Month,
            _ => Unit::Year,
        };
        let start = concrete_date(
            today,
            parts.year.map(|t| t.value),
            month.map(|t| t.value),
            day.map(|t| t.value),
        )?;

        log::debug!("Resolved {} range from {text:?}", unit.name());
        return Ok(Some(Range {
            unit,
            start,
            year_specified: parts.year.is_some(),
            span: span.offset(segment.start),
        }));
    }
    Ok(None)
}

/// The first `weekday` on or after `start`, plus how many of them fit in a range of `unit`.
///
/// The count is `None` when the range is a single day or absent, where it is unbounded.
///
/// # Errors
///
/// Returns an error if the date cannot be represented.
pub fn weekday_in_range(
    weekday: Weekday,
    start: NaiveDate,
    unit: Option<Unit>,
) -> Result<(NaiveDate, Option<u32>), CalendarError> {
    let ahead = weekday.days_since(start.weekday());
    let first = calendar::add(start, Offset::days(i64::from(ahead)))?;
    let max = match unit {
        None | Some(Unit::Day) => None,
        Some(Unit::Week) => Some(1),
        Some(Unit::Month) => {
            let total = calendar::days_in_month(first.month(), first.year());
            Some((total - first.day() + 1).div_ceil(7))
        }
        Some(Unit::Year) => {
            let total = calendar::days_in_year(first.year());
            Some((total - first.ordinal() + 1).div_ceil(7))
        }
    };
    Ok((first, max))
}

/// Move `date` by every term of `amount`, backwards when it was marked as past.
///
/// # Errors
///
/// Returns an error if the result cannot be represented.
pub fn shift(date: NaiveDate, amount: &AmountDuration) -> Result<NaiveDate, CalendarError> {
    let mut offset = Offset::default();
    for term in &amount.row {
        let n = i64::from(term.amount);
        match term.unit.value {
            Unit::Day => offset.days += n,
            Unit::Week => offset.weeks += n,
            Unit::Month => offset.months += n,
            Unit::Year => offset.years += n,
        }
    }
    if amount.past {
        calendar::subtract(date, offset)
    } else {
        calendar::add(date, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::WeekStart;
    use crate::extract::{amount_duration, ordinal_duration};
    use crate::segment::segment;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ctx() -> Context {
        Context {
            today: date(2025, 1, 15),
            week_start: WeekStart::Monday,
        }
    }

    #[test]
    fn places_months_near_today() {
        let today = date(2025, 1, 15);
        let place = |month, day| concrete_date(today, None, Some(month), day).unwrap();
        assert_eq!(place(3, None), date(2025, 3, 1));
        assert_eq!(place(12, Some(25)), date(2025, 12, 25));

        let today = date(2025, 6, 10);
        let place = |month, day| concrete_date(today, None, Some(month), day).unwrap();
        assert_eq!(place(5, Some(2)), date(2025, 5, 2));
        assert_eq!(place(4, Some(2)), date(2026, 4, 2));
    }

    #[test]
    fn places_days_ahead_of_today() {
        let today = date(2025, 1, 15);
        let place = |day| concrete_date(today, None, None, Some(day)).unwrap();
        assert_eq!(place(20), date(2025, 1, 20));
        assert_eq!(place(15), date(2025, 2, 15));
        assert_eq!(place(3), date(2025, 2, 3));
    }

    #[test]
    fn places_years_and_full_dates() {
        let today = date(2025, 1, 15);
        let place = |year, month, day| concrete_date(today, Some(year), month, day).unwrap();
        assert_eq!(place(2027, None, Some(9)), date(2027, 1, 1));
        assert_eq!(place(2024, Some(2), Some(31)), date(2024, 2, 29));
        assert_eq!(concrete_date(today, None, None, None).unwrap(), today);
    }

    #[test]
    fn ranges_take_finest_unit() {
        let today = date(2025, 1, 15);
        let input = "march";
        let found = range(input, &segment(input, &[]), today).unwrap().unwrap();
        assert_eq!(found.unit, Unit::Month);
        assert_eq!(found.start, date(2025, 3, 1));
        assert!(!found.year_specified);

        let input = "lunch jan 15 2026";
        let found = range(input, &segment(input, &[]), today).unwrap().unwrap();
        assert_eq!(found.unit, Unit::Day);
        assert_eq!(found.start, date(2026, 1, 15));
        assert!(found.year_specified);
        assert_eq!(found.span, Span::new(6, 17));

        let input = "2026";
        let found = range(input, &segment(input, &[]), today).unwrap().unwrap();
        assert_eq!(found.unit, Unit::Year);
        assert_eq!(found.start, date(2026, 1, 1));
    }

    #[test]
    fn ranges_skip_empty_segments() {
        let input = "hello world";
        let found = range(input, &segment(input, &[]), date(2025, 1, 15)).unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn counts_weeks_of_a_month() {
        let input = "2nd week of march";
        let od = ordinal_duration(input).unwrap();
        let segments = segment(input, &[Some(od.span)]);
        let found = range_from_ordinal_duration(input, &segments, &od, &ctx())
            .unwrap()
            .unwrap();
        assert_eq!(found.unit, Unit::Week);
        // March 1 2025 is a Saturday, its week starts Monday February 24.
        assert_eq!(found.start, date(2025, 3, 3));
        assert_eq!(found.span, Span::new(0, 17));
    }

    #[test]
    fn counts_weeks_with_sunday_start() {
        let input = "2nd week of march";
        let od = ordinal_duration(input).unwrap();
        let segments = segment(input, &[Some(od.span)]);
        let ctx = Context {
            week_start: WeekStart::Sunday,
            ..ctx()
        };
        let found = range_from_ordinal_duration(input, &segments, &od, &ctx)
            .unwrap()
            .unwrap();
        assert_eq!(found.start, date(2025, 3, 2));
    }

    #[test]
    fn counts_months_of_a_year_only() {
        let input = "2026 3rd month";
        let od = ordinal_duration(input).unwrap();
        let segments = segment(input, &[Some(od.span)]);
        let found = range_from_ordinal_duration(input, &segments, &od, &ctx())
            .unwrap()
            .unwrap();
        assert_eq!(found.unit, Unit::Month);
        assert_eq!(found.start, date(2026, 3, 1));
        assert!(found.year_specified);

        let input = "3rd month of march";
        let od = ordinal_duration(input).unwrap();
        let segments = segment(input, &[Some(od.span)]);
        assert_eq!(
            range_from_ordinal_duration(input, &segments, &od, &ctx()).unwrap(),
            None
        );
    }

    #[test]
    fn ignores_ordinal_years() {
        let input = "2nd year of 2026";
        let od = ordinal_duration(input).unwrap();
        let segments = segment(input, &[Some(od.span)]);
        assert_eq!(
            range_from_ordinal_duration(input, &segments, &od, &ctx()).unwrap(),
            None
        );
    }

    #[test]
    fn finds_weekdays_in_ranges() {
        // March 2025 starts on a Saturday.
        let start = date(2025, 3, 1);
        let (first, max) = weekday_in_range(Weekday::Fri, start, Some(Unit::Month)).unwrap();
        assert_eq!(first, date(2025, 3, 7));
        assert_eq!(max, Some(4));

        let (first, max) = weekday_in_range(Weekday::Sat, start, Some(Unit::Month)).unwrap();
        assert_eq!(first, start);
        assert_eq!(max, Some(5));

        let new_year = date(2025, 1, 1);
        let (first, max) = weekday_in_range(Weekday::Wed, new_year, Some(Unit::Year)).unwrap();
        assert_eq!(first, new_year);
        assert_eq!(max, Some(53));

        let (_, max) = weekday_in_range(Weekday::Mon, start, Some(Unit::Week)).unwrap();
        assert_eq!(max, Some(1));
        let (_, max) = weekday_in_range(Weekday::Mon, start, None).unwrap();
        assert_eq!(max, None);
    }

    #[test]
    fn shifts_by_every_term() {
        let amount = amount_duration("2 weeks and 3 days ago").unwrap();
        assert_eq!(
            shift(date(2025, 1, 15), &amount).unwrap(),
            date(2024, 12, 29)
        );

        let amount = amount_duration("1 month 1 day").unwrap();
        assert_eq!(shift(date(2025, 1, 31), &amount).unwrap(), date(2025, 3, 1));
    }
}
