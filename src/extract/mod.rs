//! Entity extractors.
//!
//! Each extractor scans the whole text it is given on its own and reports the first thing it
//! recognizes together with where it was found. Spans are relative to the text passed in.

mod range;
mod tables;
mod ymd;

use chrono::Weekday;
use serde::Serialize;

use crate::calendar::Offset;
use crate::pattern::{matched_groups, Candidates, Resolved};
use crate::segment::Span;

use tables::tables;

pub use range::{
    concrete_date, range, range_from_ordinal_duration, shift, weekday_in_range, Range,
};
pub use ymd::{maybe_ymd, resolve_ymd, MaybeYmd, Ymd, YmdParts};

/// Largest amount accepted per unit in an amount sequence.
const MAX_DAYS: u32 = 9999;
const MAX_WEEKS: u32 = 999;
const MAX_MONTHS: u32 = 999;
const MAX_YEARS: u32 = 99;

/// Most `amount unit` terms one sequence consumes.
const MAX_TERMS: usize = 6;

/// A duration unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Days.
    Day,
    /// Weeks.
    Week,
    /// Months.
    Month,
    /// Years.
    Year,
}

impl Unit {
    /// Lower-case singular name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// A shift of `n` of this unit.
    #[must_use]
    pub fn offset(self, n: i64) -> Offset {
        match self {
            Self::Day => Offset::days(n),
            Self::Week => Offset::weeks(n),
            Self::Month => Offset::months(n),
            Self::Year => Offset::years(n),
        }
    }

    fn max_amount(self) -> u32 {
        match self {
            Self::Day => MAX_DAYS,
            Self::Week => MAX_WEEKS,
            Self::Month => MAX_MONTHS,
            Self::Year => MAX_YEARS,
        }
    }
}

/// A recognized value, the label of the pattern that produced it, and where it was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<T> {
    /// The value.
    pub value: T,
    /// Label of the matching pattern.
    pub label: &'static str,
    /// Location in the scanned text.
    pub span: Span,
}

impl<T> Token<T> {
    fn new(span: Span, resolved: Resolved<T>) -> Self {
        Self {
            value: resolved.value,
            label: resolved.label,
            span,
        }
    }

    /// The same token with its span moved right by `offset` bytes.
    #[must_use]
    pub fn offset(self, offset: usize) -> Self {
        Self {
            span: self.span.offset(offset),
            ..self
        }
    }
}

/// "2nd friday" or a bare "friday".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrdinalWeekday {
    /// Where the whole phrase was found.
    pub span: Span,
    /// The ordinal, if one preceded the weekday.
    pub ordinal: Option<Token<u32>>,
    /// The weekday.
    pub weekday: Token<Weekday>,
}

/// "3rd week" and the like.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrdinalDuration {
    /// Where the whole phrase was found.
    pub span: Span,
    /// The ordinal.
    pub ordinal: Token<u32>,
    /// The unit it counts.
    pub unit: Token<Unit>,
}

/// One `amount unit` term of an [`AmountDuration`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AmountTerm {
    /// How many units.
    pub amount: u32,
    /// The unit, with the label of the word that named it.
    pub unit: Resolved<Unit>,
}

/// "2 weeks and 3 days ago".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmountDuration {
    /// Where the sequence, including any past marker, was found.
    pub span: Span,
    /// The terms in input order.
    pub row: Vec<AmountTerm>,
    /// Whether a past marker ("ago", "before", "earlier") followed.
    pub past: bool,
}

/// A bare four-digit year between 1900 and 2999.
#[must_use]
pub fn year(input: &str) -> Option<Token<i32>> {
    let m = tables().year.captures(input)?.get(1)?;
    Some(Token {
        value: m.as_str().parse().ok()?,
        label: "20xx",
        span: m.into(),
    })
}

/// A number that can only be a day: an ordinal word, `1st`..`31st`, or a bare 13..31.
#[must_use]
pub fn day_certain(input: &str) -> Option<Token<u32>> {
    let (span, resolved) = tables().day_certain.first(input)?;
    Some(Token::new(span, resolved))
}

/// A bare 1..12, which could be a day or a month.
#[must_use]
pub fn day_or_month(input: &str) -> Option<Token<u32>> {
    let m = tables().day_or_month.captures(input)?.get(1)?;
    Some(Token {
        value: m.as_str().parse().ok()?,
        label: "0?1-12",
        span: m.into(),
    })
}

/// A month named by at least its first three letters.
#[must_use]
pub fn month_certain(input: &str) -> Option<Token<u32>> {
    let (span, resolved) = tables().month_certain.first(input)?;
    Some(Token::new(span, resolved))
}

/// A one or two letter month prefix ending the text, with every month it could start.
#[must_use]
pub fn month_partial(input: &str) -> Option<Candidates<u32>> {
    tables().month_partial.candidates(input)
}

/// A one or two letter weekday prefix making up the whole text, with every weekday it could start.
#[must_use]
pub fn weekday_partial(input: &str) -> Option<Candidates<Weekday>> {
    tables().weekday_partial.candidates(input)
}

/// A lone amount (a cardinal word or 1..999) making up the whole text.
#[must_use]
pub fn sole_amount(input: &str) -> Option<Token<u32>> {
    let (span, resolved) = tables().sole_amount.first(input)?;
    Some(Token::new(span, resolved))
}

/// An optional ordinal followed by a weekday.
#[must_use]
pub fn ordinal_weekday(input: &str) -> Option<OrdinalWeekday> {
    let t = tables();
    let captures = t.ordinal_weekday.captures(input)?;
    let span = captures.get(0)?.into();
    let groups: Vec<usize> = matched_groups(&captures).collect();
    let weekday_group = |group: usize| {
        let m = captures.get(group)?;
        let resolved = t
            .weekdays
            .resolve((group - 1).checked_sub(t.ordinals.len())?, m.as_str())?;
        Some(Token::new(m.into(), resolved))
    };

    match groups[..] {
        [i, j, ..] => {
            let weekday = weekday_group(j)?;
            let m = captures.get(i)?;
            let Some(ordinal) = t.ordinals.resolve(i - 1, m.as_str()) else {
                log::debug!(
                    "Ordinal {:?} is out of range, reading a bare weekday",
                    m.as_str()
                );
                return Some(OrdinalWeekday {
                    span: weekday.span,
                    ordinal: None,
                    weekday,
                });
            };
            Some(OrdinalWeekday {
                span,
                ordinal: Some(Token::new(m.into(), ordinal)),
                weekday,
            })
        }
        [i] => Some(OrdinalWeekday {
            span,
            ordinal: None,
            weekday: weekday_group(i)?,
        }),
        [] => None,
    }
}

/// An ordinal immediately followed by a duration unit.
#[must_use]
pub fn ordinal_duration(input: &str) -> Option<OrdinalDuration> {
    let t = tables();
    let captures = t.ordinal_duration.captures(input)?;
    let mut groups = matched_groups(&captures);
    let (i, j) = (groups.next()?, groups.next()?);

    let ordinal = captures.get(i)?;
    let unit = captures.get(j)?;
    let value = t.ordinals.resolve(i - 1, ordinal.as_str())?;
    let k = (j - 1).checked_sub(t.ordinals.len())?;
    Some(OrdinalDuration {
        span: captures.get(0)?.into(),
        ordinal: Token::new(ordinal.into(), value),
        unit: Token::new(unit.into(), t.durations.resolve(k, unit.as_str())?),
    })
}

/// A sequence of `amount unit` terms with an optional trailing past marker.
///
/// Terms are consumed greedily; a term whose amount is over its unit's bound ends the sequence
/// without being consumed.
#[must_use]
pub fn amount_duration(input: &str) -> Option<AmountDuration> {
    let t = tables();
    let mut row = Vec::new();
    let mut start = None;
    let mut end = 0;

    while row.len() < MAX_TERMS && end < input.len() {
        let rest = &input[end..];
        let regex = if start.is_none() {
            &t.amount_first
        } else {
            &t.amount_followed
        };
        let Some(captures) = regex.captures(rest) else {
            break;
        };
        let mut groups = matched_groups(&captures);
        let (Some(i), Some(j)) = (groups.next(), groups.next()) else {
            break;
        };
        let (Some(amount), Some(unit)) = (
            t.amounts.resolve(i - 1, &captures[i]),
            (j - 1)
                .checked_sub(t.amounts.len())
                .and_then(|k| t.durations.resolve(k, &captures[j])),
        ) else {
            break;
        };
        if amount.value > unit.value.max_amount() {
            log::debug!(
                "Amount {} is too large for {}, ending the sequence",
                amount.value,
                unit.value.name()
            );
            break;
        }

        let Some(whole) = captures.get(0) else {
            break;
        };
        start.get_or_insert(end + whole.start());
        end += whole.end();
        row.push(AmountTerm {
            amount: amount.value,
            unit,
        });
    }

    let start = start?;
    let past = match t.past_suffix.find(&input[end..]) {
        Some(m) => {
            end += m.end();
            true
        }
        None => false,
    };

    Some(AmountDuration {
        span: Span::new(start, end),
        row,
        past,
    })
}
