//! Deciding how the extracted entities combine into dates.
//!
//! [`process`] runs a fixed cascade. The early steps each look for one combination of entities
//! that reads as a single expression ("2nd friday of march", "friday in 3 days") and stop at the
//! first that applies. When none does, every entity is read on its own and the result is a list
//! of independent readings, each either a single date or a branch of alternatives.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::calendar::{self, CalendarError, Offset};
use crate::context::Context;
use crate::extract::{
    self, concrete_date, maybe_ymd, range, range_from_ordinal_duration, shift, sole_amount,
    weekday_in_range, weekday_partial, AmountDuration, OrdinalWeekday, Range, Token, Unit,
};
use crate::segment::{in_order, segment, Span};

/// How a date relates to today when shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Relative {
    /// Show the exact day distance.
    Day,
    /// Show the amount as it was typed.
    Amount {
        /// How many units.
        amount: u32,
        /// The unit.
        unit: Unit,
        /// Whether it lies in the past.
        past: bool,
    },
}

/// The way a candidate is framed when rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Frame {
    /// Just the date.
    Plain,
    /// A distance the user typed.
    Relative(Relative),
    /// The full date, with the distance to it measured in this unit.
    Measure(Unit),
}

/// One fully resolved date with how to show it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// The date.
    pub date: NaiveDate,
    /// How to frame it.
    pub frame: Frame,
    /// Weekday to show instead of the one computed from the date.
    pub weekday: Option<Weekday>,
}

impl Candidate {
    fn plain(date: NaiveDate) -> Self {
        Self {
            date,
            frame: Frame::Plain,
            weekday: None,
        }
    }

    fn measured(date: NaiveDate, unit: Unit) -> Self {
        Self {
            date,
            frame: Frame::Measure(unit),
            weekday: None,
        }
    }
}

/// One independent interpretation of the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reading {
    /// A single date.
    Single(Candidate),
    /// Mutually exclusive alternatives, most likely first.
    Branch(Vec<Candidate>),
}

impl Reading {
    /// The candidate that stands for this reading next to other readings.
    #[must_use]
    pub fn representative(&self) -> Option<&Candidate> {
        match self {
            Self::Single(candidate) => Some(candidate),
            Self::Branch(candidates) => candidates.first(),
        }
    }
}

type Step = Result<Option<Vec<Reading>>, CalendarError>;

/// Resolve `input`, which is expected to be lower-cased, into readings.
///
/// # Errors
///
/// Returns an error if a resolved date falls outside the representable range.
pub fn process(input: &str, ctx: &Context) -> Result<Vec<Reading>, CalendarError> {
    let mut scan = Scan::new(input, ctx)?;

    if let Some(readings) = scan.ordinal_weekday_in_range()? {
        return Ok(readings);
    }
    scan.release_ordinal()?;

    if let Some(readings) = scan.weekday_with_amount()? {
        return Ok(readings);
    }
    if let Some(readings) = scan.weekday_in_range()? {
        return Ok(readings);
    }
    if let Some(readings) = scan.shifted_day()? {
        return Ok(readings);
    }
    if let Some(readings) = scan.days_of_week()? {
        return Ok(readings);
    }
    scan.parallel()
}

/// Everything found in the input, and the text still unclaimed.
struct Scan<'a> {
    input: &'a str,
    ctx: &'a Context,
    ordinal_weekday: Option<OrdinalWeekday>,
    amount: Option<AmountDuration>,
    range_od: Option<Range>,
    range: Option<Range>,
    segments: Vec<Span>,
}

impl<'a> Scan<'a> {
    fn new(input: &'a str, ctx: &'a Context) -> Result<Self, CalendarError> {
        let ordinal_weekday = extract::ordinal_weekday(input);
        let amount = extract::amount_duration(input);
        let ordinal_duration = extract::ordinal_duration(input);
        log::debug!(
            "Found {ordinal_weekday:?}, {amount:?} and {ordinal_duration:?}"
        );

        let ow_span = ordinal_weekday.map(|ow| ow.span);
        let amount_span = amount.as_ref().map(|a| a.span);
        let mut segments = segment(
            input,
            &[ow_span, amount_span, ordinal_duration.map(|od| od.span)],
        );

        let range_od = match &ordinal_duration {
            Some(od) => range_from_ordinal_duration(input, &segments, od, ctx)?,
            None => None,
        };
        let range = match range_od {
            Some(range) => Some(range),
            None => {
                segments = segment(input, &[ow_span, amount_span]);
                range(input, &segments, ctx.today)?
            }
        };

        Ok(Self {
            input,
            ctx,
            ordinal_weekday,
            amount,
            range_od,
            range,
            segments,
        })
    }

    fn weekday(&self) -> Option<Token<Weekday>> {
        self.ordinal_weekday.map(|ow| ow.weekday)
    }

    /// A weekday inside a range reads as a calendar date when the month is explicit.
    fn weekday_frame(&self, range: Range) -> Frame {
        if self.range_od.is_none() && range.unit == Unit::Month {
            Frame::Plain
        } else {
            Frame::Measure(Unit::Week)
        }
    }

    /// "2nd friday of march".
    fn ordinal_weekday_in_range(&self) -> Step {
        let (Some(range), Some(ow)) = (self.range, self.ordinal_weekday) else {
            return Ok(None);
        };
        let Some(ordinal) = ow.ordinal else {
            return Ok(None);
        };
        if !matches!(range.unit, Unit::Month | Unit::Year) {
            return Ok(None);
        }

        let (first, max) = weekday_in_range(ow.weekday.value, range.start, Some(range.unit))?;
        if max.is_some_and(|max| ordinal.value > max) {
            log::debug!(
                "Only {max:?} {:?}s fit in the {} range, ignoring ordinal {}",
                ow.weekday.value,
                range.unit.name(),
                ordinal.value
            );
            return Ok(None);
        }
        let date = calendar::add(first, Offset::weeks(i64::from(ordinal.value) - 1))?;

        if let Some(amount) = &self.amount {
            if !between(amount.span, ow.span, range.span) {
                return single(Candidate::measured(shift(date, amount)?, Unit::Day));
            }
        }
        single(Candidate {
            date,
            frame: self.weekday_frame(range),
            weekday: Some(ow.weekday.value),
        })
    }

    /// Without an ordinal-duration range the ordinal is free to be read as a day.
    fn release_ordinal(&mut self) -> Result<(), CalendarError> {
        let Some(ow) = self.ordinal_weekday else {
            return Ok(());
        };
        if ow.ordinal.is_none() || self.range_od.is_some() {
            return Ok(());
        }
        self.segments = segment(
            self.input,
            &[Some(ow.weekday.span), self.amount.as_ref().map(|a| a.span)],
        );
        self.range = range(self.input, &self.segments, self.ctx.today)?;
        log::trace!("Released ordinal, range is now {:?}", self.range);
        Ok(())
    }

    /// "friday in 3 days", "in 3 days friday".
    fn weekday_with_amount(&self) -> Step {
        let (Some(weekday), Some(amount)) = (self.weekday(), &self.amount) else {
            return Ok(None);
        };

        let range = match self.range {
            Some(r) if r.unit == Unit::Week => {
                if between(amount.span, weekday.span, r.span) {
                    return Ok(None);
                }
                let (first, _) = weekday_in_range(weekday.value, r.start, Some(r.unit))?;
                return single(Candidate::measured(shift(first, amount)?, Unit::Day));
            }
            Some(r) if r.unit != Unit::Day => return Ok(None),
            range => range,
        };

        let date = range.map_or(self.ctx.today, |r| r.start);
        let shift_first = match range {
            Some(r) => {
                between(amount.span, weekday.span, r.span)
                    || in_order(&[amount.span, r.span, weekday.span])
            }
            None => in_order(&[amount.span, weekday.span]),
        };
        log::debug!("Combining weekday and amount, shifting first: {shift_first}");

        if shift_first {
            let (first, _) = weekday_in_range(weekday.value, shift(date, amount)?, None)?;
            return single(Candidate {
                date: first,
                frame: Frame::Measure(Unit::Day),
                weekday: Some(weekday.value),
            });
        }
        let (first, _) = weekday_in_range(weekday.value, date, None)?;
        single(Candidate::measured(shift(first, amount)?, Unit::Day))
    }

    /// "friday of the 2nd week of march", or every friday of a month.
    fn weekday_in_range(&self) -> Step {
        let (Some(range), Some(weekday)) = (self.range, self.weekday()) else {
            return Ok(None);
        };
        let (first, max) = weekday_in_range(weekday.value, range.start, Some(range.unit))?;
        let frame = self.weekday_frame(range);
        let count = match (range.unit, max) {
            (Unit::Month, Some(max)) => max,
            _ => 1,
        };

        let mut readings = Vec::new();
        for i in 0..count {
            readings.push(Reading::Single(Candidate {
                date: calendar::add(first, Offset::weeks(i64::from(i)))?,
                frame,
                weekday: Some(weekday.value),
            }));
        }
        Ok(Some(readings))
    }

    /// "jan 3 + 2 weeks".
    fn shifted_day(&self) -> Step {
        match (self.range, &self.amount) {
            (Some(range), Some(amount)) if range.unit == Unit::Day => {
                single(Candidate::measured(shift(range.start, amount)?, Unit::Day))
            }
            _ => Ok(None),
        }
    }

    /// "2nd week of march" lists the days of that week.
    fn days_of_week(&self) -> Step {
        let Some(range) = self.range_od.filter(|r| r.unit == Unit::Week) else {
            return Ok(None);
        };
        let (first, frame) = match &self.amount {
            Some(amount) => (shift(range.start, amount)?, Frame::Measure(Unit::Day)),
            None => (range.start, Frame::Plain),
        };

        let mut readings = Vec::with_capacity(7);
        for i in 0..7 {
            let date = calendar::add(first, Offset::days(i))?;
            readings.push(Reading::Single(Candidate {
                date,
                frame,
                weekday: Some(date.weekday()),
            }));
        }
        Ok(Some(readings))
    }

    /// Read every entity on its own.
    fn parallel(mut self) -> Result<Vec<Reading>, CalendarError> {
        let today = self.ctx.today;
        let weekday = self.weekday();
        let mut parallel = Vec::new();

        if let Some(weekday) = weekday {
            let (first, _) = weekday_in_range(weekday.value, today, None)?;
            let template = Candidate {
                date: first,
                frame: Frame::Measure(Unit::Week),
                weekday: Some(weekday.value),
            };
            parallel.push(Reading::Branch(repeat(template, Unit::Week, 3)?));
        }

        if let Some(amount) = &self.amount {
            let relative = match amount.row[..] {
                [term] => Relative::Amount {
                    amount: term.amount,
                    unit: term.unit.value,
                    past: amount.past,
                },
                _ => Relative::Day,
            };
            parallel.push(Reading::Single(Candidate {
                date: shift(today, amount)?,
                frame: Frame::Relative(relative),
                weekday: None,
            }));

            // A trailing "m" may be the start of a month name rather than "months".
            let lone_m = matches!(amount.row[..], [term] if term.unit.label == "m");
            if !amount.past && lone_m && amount.span.end == self.input.len() {
                self.segments = segment(self.input, &[weekday.map(|w| w.span)]);
            }
        }

        let last = self
            .segments
            .last()
            .copied()
            .filter(|s| s.end == self.input.len());

        if let Some(range) = self.range {
            let trailing_year =
                range.unit == Unit::Year && last.is_some_and(|s| range.span.start >= s.start);
            if !trailing_year {
                let frame = match self.range_od {
                    Some(_) => Frame::Measure(range.unit),
                    None => Frame::Plain,
                };
                let extend = range.unit == Unit::Month
                    || (range.unit == Unit::Day && self.range_od.is_none());
                let count = if extend && !range.year_specified { 3 } else { 1 };
                let template = Candidate {
                    date: range.start,
                    frame,
                    weekday: None,
                };
                parallel.push(Reading::Branch(repeat(template, Unit::Year, count)?));
                return Ok(parallel);
            }
        }

        let Some(last) = last else {
            return Ok(parallel);
        };
        let rest = &self.input[last.start..];
        log::trace!("Reading trailing text {rest:?}");

        if weekday.is_none() && self.amount.is_none() {
            if let Some(partial) = weekday_partial(rest) {
                let mut firsts = Vec::with_capacity(partial.values.len());
                for candidate in &partial.values {
                    let (first, _) = weekday_in_range(candidate.value, today, None)?;
                    firsts.push(Candidate {
                        date: first,
                        frame: Frame::Measure(Unit::Week),
                        weekday: Some(candidate.value),
                    });
                }
                push_alternatives(&mut parallel, firsts, Unit::Week)?;
            } else if let Some(amount) = sole_amount(rest) {
                let mut candidates = Vec::with_capacity(3);
                for unit in [Unit::Day, Unit::Week, Unit::Month] {
                    candidates.push(Candidate {
                        date: calendar::add(today, unit.offset(i64::from(amount.value)))?,
                        frame: Frame::Relative(Relative::Amount {
                            amount: amount.value,
                            unit,
                            past: false,
                        }),
                        weekday: None,
                    });
                }
                parallel.push(Reading::Branch(candidates));
            }
        }

        let Some(maybe) = maybe_ymd(rest) else {
            return Ok(parallel);
        };
        let year = maybe.year.map(|t| t.value);
        let day = maybe.day.map(|t| t.value);
        if !maybe.months.is_empty() || year.is_some() {
            let months: Vec<Option<u32>> = if maybe.months.is_empty() {
                vec![None]
            } else {
                maybe.months.iter().copied().map(Some).collect()
            };
            let mut base = Vec::with_capacity(months.len());
            for month in months {
                base.push(Candidate::plain(concrete_date(today, year, month, day)?));
            }
            push_alternatives(&mut parallel, base, Unit::Year)?;
        } else if let Some(day) = day {
            let start = concrete_date(today, None, None, Some(day))?;
            let branch = repeat(Candidate::plain(start), Unit::Month, 3)?;
            parallel.push(Reading::Branch(branch));
        }

        Ok(parallel)
    }
}

fn single(candidate: Candidate) -> Step {
    Ok(Some(vec![Reading::Single(candidate)]))
}

/// Whether `middle` sits between `a` and `b`, in either direction.
fn between(middle: Span, a: Span, b: Span) -> bool {
    in_order(&[a, middle, b]) || in_order(&[b, middle, a])
}

/// `count` copies of `template`, each one `unit` further along.
fn repeat(template: Candidate, unit: Unit, count: u32) -> Result<Vec<Candidate>, CalendarError> {
    (0..count)
        .map(|i| {
            let date = calendar::add(template.date, unit.offset(i64::from(i)))?;
            Ok(Candidate { date, ..template })
        })
        .collect()
}

/// Several guesses stand side by side; a lone guess is extended into a branch of three.
fn push_alternatives(
    parallel: &mut Vec<Reading>,
    candidates: Vec<Candidate>,
    unit: Unit,
) -> Result<(), CalendarError> {
    if let [only] = candidates.as_slice() {
        let branch = repeat(*only, unit, 3)?;
        parallel.push(Reading::Branch(branch));
    } else {
        parallel.extend(candidates.into_iter().map(Reading::Single));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::WeekStart;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ctx() -> Context {
        Context {
            today: date(2025, 1, 15),
            week_start: WeekStart::Monday,
        }
    }

    fn run(input: &str) -> Vec<Reading> {
        process(input, &ctx()).unwrap()
    }

    fn singles(readings: &[Reading]) -> Vec<Candidate> {
        readings
            .iter()
            .map(|r| match r {
                Reading::Single(c) => *c,
                Reading::Branch(_) => panic!("expected only single readings, got {readings:?}"),
            })
            .collect()
    }

    #[test]
    fn nothing_recognized() {
        assert!(run("hello world").is_empty());
        assert!(run("").is_empty());
    }

    #[test]
    fn bare_amount_is_relative() {
        let found = singles(&run("3 days ago"));
        assert_eq!(
            found,
            vec![Candidate {
                date: date(2025, 1, 12),
                frame: Frame::Relative(Relative::Amount {
                    amount: 3,
                    unit: Unit::Day,
                    past: true
                }),
                weekday: None,
            }]
        );
    }

    #[test]
    fn several_terms_show_day_distance() {
        let found = singles(&run("in 2 weeks and 3 days"));
        assert_eq!(found[0].date, date(2025, 2, 1));
        assert_eq!(found[0].frame, Frame::Relative(Relative::Day));
    }

    #[test]
    fn ordinal_weekday_of_month() {
        let found = singles(&run("2nd friday of march"));
        assert_eq!(
            found,
            vec![Candidate {
                date: date(2025, 3, 14),
                frame: Frame::Plain,
                weekday: Some(Weekday::Fri),
            }]
        );
    }

    #[test]
    fn ordinal_weekday_of_year_is_measured() {
        let found = singles(&run("2026 10th monday"));
        // January 5 2026 is the first Monday.
        assert_eq!(found[0].date, date(2026, 3, 9));
        assert_eq!(found[0].frame, Frame::Measure(Unit::Week));
    }

    #[test]
    fn ordinal_weekday_beyond_month_falls_back() {
        // March 2025 has only four Fridays, so every one of them is listed instead.
        let dates: Vec<_> = singles(&run("5th friday of march"))
            .iter()
            .map(|c| c.date)
            .collect();
        assert_eq!(dates, [7, 14, 21, 28].map(|d| date(2025, 3, d)));
    }

    #[test]
    fn ordinal_weekday_with_outside_amount_shifts() {
        let found = singles(&run("2nd friday of march 3 days before"));
        assert_eq!(
            found,
            vec![Candidate::measured(date(2025, 3, 11), Unit::Day)]
        );
    }

    #[test]
    fn amount_then_weekday_shifts_first() {
        // Jan 15 + 1 week is Wednesday Jan 22, the next Friday is Jan 24.
        let found = singles(&run("in 1 week friday"));
        assert_eq!(
            found,
            vec![Candidate {
                date: date(2025, 1, 24),
                frame: Frame::Measure(Unit::Day),
                weekday: Some(Weekday::Fri),
            }]
        );
    }

    #[test]
    fn weekday_then_amount_snaps_first() {
        // Next Friday is Jan 17, two days before it is today.
        let found = singles(&run("friday 2 days before"));
        assert_eq!(
            found,
            vec![Candidate::measured(date(2025, 1, 15), Unit::Day)]
        );
    }

    #[test]
    fn every_weekday_of_a_month() {
        let found = singles(&run("friday in march"));
        let dates: Vec<_> = found.iter().map(|c| c.date).collect();
        assert_eq!(dates, [7, 14, 21, 28].map(|d| date(2025, 3, d)));
        assert!(found.iter().all(|c| c.frame == Frame::Plain));
        assert!(found.iter().all(|c| c.weekday == Some(Weekday::Fri)));
    }

    #[test]
    fn day_range_with_amount_shifts() {
        let found = singles(&run("jan 3 + 2 weeks"));
        assert_eq!(
            found,
            vec![Candidate::measured(date(2025, 1, 17), Unit::Day)]
        );
    }

    #[test]
    fn ordinal_week_lists_its_days() {
        let found = singles(&run("2nd week of march"));
        assert_eq!(found.len(), 7);
        assert_eq!(found[0].date, date(2025, 3, 3));
        assert_eq!(found[0].weekday, Some(Weekday::Mon));
        assert_eq!(found[6].date, date(2025, 3, 9));
        assert_eq!(found[6].weekday, Some(Weekday::Sun));
        assert!(found.iter().all(|c| c.frame == Frame::Plain));
    }

    #[test]
    fn day_range_weekday_then_amount_snaps_first() {
        // Jan 20 is a Monday, the Friday after it is Jan 24.
        let found = singles(&run("jan 20 friday in 3 days"));
        assert_eq!(
            found,
            vec![Candidate::measured(date(2025, 1, 27), Unit::Day)]
        );
    }

    #[test]
    fn day_range_amount_first_shifts_first() {
        // Jan 20 + 3 days is Thursday Jan 23, the next Friday is Jan 24.
        let found = singles(&run("in 3 days jan 20 friday"));
        assert_eq!(
            found,
            vec![Candidate {
                date: date(2025, 1, 24),
                frame: Frame::Measure(Unit::Day),
                weekday: Some(Weekday::Fri),
            }]
        );
    }

    #[test]
    fn weekday_of_ordinal_week_with_amount_shifts() {
        // The 2nd week of March 2025 starts Monday Mar 3, its Friday is Mar 7.
        let found = singles(&run("friday 2nd week of march in 2 days"));
        assert_eq!(
            found,
            vec![Candidate::measured(date(2025, 3, 9), Unit::Day)]
        );
    }

    #[test]
    fn amount_inside_ordinal_weekday_phrase_is_ignored() {
        let found = singles(&run("2nd friday 3 days before of march"));
        assert_eq!(
            found,
            vec![Candidate {
                date: date(2025, 3, 14),
                frame: Frame::Plain,
                weekday: Some(Weekday::Fri),
            }]
        );
    }

    #[test]
    fn ordinal_week_with_amount_lists_shifted_days() {
        let found = singles(&run("2nd week of march in 1 day"));
        assert_eq!(found.len(), 7);
        assert_eq!(found[0].date, date(2025, 3, 4));
        assert_eq!(found[0].weekday, Some(Weekday::Tue));
        assert_eq!(found[6].date, date(2025, 3, 10));
        assert_eq!(found[6].weekday, Some(Weekday::Mon));
        assert!(found.iter().all(|c| c.frame == Frame::Measure(Unit::Day)));
    }

    #[test]
    fn bare_weekday_branches_over_weeks() {
        let found = run("friday");
        let [Reading::Branch(candidates)] = &found[..] else {
            panic!("expected one branch, got {found:?}");
        };
        let dates: Vec<_> = candidates.iter().map(|c| c.date).collect();
        assert_eq!(
            dates,
            vec![date(2025, 1, 17), date(2025, 1, 24), date(2025, 1, 31)]
        );
    }

    #[test]
    fn month_without_year_branches_over_years() {
        let found = run("march 3");
        let [Reading::Branch(candidates)] = &found[..] else {
            panic!("expected one branch, got {found:?}");
        };
        let dates: Vec<_> = candidates.iter().map(|c| c.date).collect();
        assert_eq!(
            dates,
            vec![date(2025, 3, 3), date(2026, 3, 3), date(2027, 3, 3)]
        );
    }

    #[test]
    fn pinned_year_does_not_branch() {
        let found = run("jan 15 2026");
        assert_eq!(
            found,
            vec![Reading::Branch(vec![Candidate::plain(date(2026, 1, 15))])]
        );
    }

    #[test]
    fn trailing_year_reads_as_year() {
        let found = run("2027");
        let [Reading::Branch(candidates)] = &found[..] else {
            panic!("expected one branch, got {found:?}");
        };
        assert_eq!(candidates[0].date, date(2027, 1, 1));
        assert_eq!(candidates.len(), 3);
    }

    #[test]
    fn partial_weekdays_stand_side_by_side() {
        let found = singles(&run("t"));
        let weekdays: Vec<_> = found.iter().map(|c| c.weekday).collect();
        assert_eq!(weekdays, vec![Some(Weekday::Tue), Some(Weekday::Thu)]);
        assert_eq!(found[0].date, date(2025, 1, 21));
        assert_eq!(found[1].date, date(2025, 1, 16));
    }

    #[test]
    fn single_partial_weekday_branches_over_weeks() {
        let found = run("f");
        let Reading::Branch(candidates) = &found[0] else {
            panic!("expected a branch, got {found:?}");
        };
        let dates: Vec<_> = candidates.iter().map(|c| c.date).collect();
        assert_eq!(
            dates,
            vec![date(2025, 1, 17), date(2025, 1, 24), date(2025, 1, 31)]
        );
        assert!(candidates.iter().all(|c| c.weekday == Some(Weekday::Fri)));
        assert!(candidates.iter().all(|c| c.frame == Frame::Measure(Unit::Week)));
    }

    #[test]
    fn overflowing_ordinal_reads_bare_weekday() {
        let found = run("99999999999th friday");
        let [Reading::Branch(candidates)] = &found[..] else {
            panic!("expected one branch, got {found:?}");
        };
        assert_eq!(candidates[0].date, date(2025, 1, 17));
        assert_eq!(candidates[0].weekday, Some(Weekday::Fri));
        assert_eq!(candidates.len(), 3);
    }

    #[test]
    fn sole_amount_branches_over_units() {
        let found = run("12");
        assert_eq!(found.len(), 2);
        let Reading::Branch(candidates) = &found[0] else {
            panic!("expected a branch, got {found:?}");
        };
        let dates: Vec<_> = candidates.iter().map(|c| c.date).collect();
        assert_eq!(
            dates,
            vec![date(2025, 1, 27), date(2025, 4, 9), date(2026, 1, 15)]
        );
        // And the day reading: the 12th has passed, so next month first.
        let Reading::Branch(days) = &found[1] else {
            panic!("expected a branch, got {found:?}");
        };
        assert_eq!(days[0].date, date(2025, 2, 12));
    }

    #[test]
    fn lone_m_can_start_a_month() {
        let found = singles(&run("4 m"));
        let dates: Vec<_> = found.iter().map(|c| c.date).collect();
        assert_eq!(
            dates,
            vec![date(2025, 5, 15), date(2025, 3, 4), date(2025, 5, 4)]
        );
    }

    #[test]
    fn ambiguous_month_prefix_lists_each_month() {
        let found = singles(&run("15 ju"));
        let dates: Vec<_> = found.iter().map(|c| c.date).collect();
        assert_eq!(dates, vec![date(2025, 6, 15), date(2025, 7, 15)]);
    }

    #[test]
    fn representative_is_first_of_branch() {
        let branch = Reading::Branch(vec![
            Candidate::plain(date(2025, 3, 3)),
            Candidate::plain(date(2026, 3, 3)),
        ]);
        assert_eq!(
            branch.representative(),
            Some(&Candidate::plain(date(2025, 3, 3)))
        );
        assert_eq!(Reading::Branch(Vec::new()).representative(), None);
    }

    const WEEKDAY_WORDS: [(&str, Weekday); 7] = [
        ("monday", Weekday::Mon),
        ("tuesday", Weekday::Tue),
        ("wednesday", Weekday::Wed),
        ("thursday", Weekday::Thu),
        ("friday", Weekday::Fri),
        ("saturday", Weekday::Sat),
        ("sunday", Weekday::Sun),
    ];

    proptest! {
        #[test]
        fn amount_before_weekday_lands_on_weekday(i in 0usize..7, n in 1u32..60) {
            let (word, weekday) = WEEKDAY_WORDS[i];
            let found = run(&format!("in {n} days {word}"));
            let found = singles(&found);
            prop_assert_eq!(found.len(), 1);
            let shifted = ctx().today + chrono::Days::new(u64::from(n));
            prop_assert_eq!(found[0].date.weekday(), weekday);
            prop_assert_eq!(found[0].weekday, Some(weekday));
            prop_assert!(found[0].date >= shifted);
            prop_assert!(calendar::compare(found[0].date, shifted) < 7);
        }

        #[test]
        fn weekday_before_amount_shifts_from_weekday(i in 0usize..7, n in 1u32..60) {
            let (word, weekday) = WEEKDAY_WORDS[i];
            let found = run(&format!("{word} in {n} days"));
            let found = singles(&found);
            prop_assert_eq!(found.len(), 1);
            let snapped = found[0].date - chrono::Days::new(u64::from(n));
            prop_assert_eq!(snapped.weekday(), weekday);
            prop_assert!(snapped >= ctx().today);
            prop_assert!(calendar::compare(snapped, ctx().today) < 7);
            prop_assert_eq!(found[0].weekday, None);
        }
    }
}
