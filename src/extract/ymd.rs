//! Combining year, month and day numbers into one date expression.

use crate::segment::Span;

use super::{day_certain, day_or_month, month_certain, month_partial, year, Token};

/// The raw year/month/day tokens found in a piece of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct YmdParts {
    /// A four-digit year.
    pub year: Option<Token<i32>>,
    /// A month name.
    pub month_certain: Option<Token<u32>>,
    /// A number that can only be a day.
    pub day_certain: Option<Token<u32>>,
    /// A bare 1..12.
    pub day_or_month: Option<Token<u32>>,
}

impl YmdParts {
    /// Run every year/month/day extractor over `input`.
    #[must_use]
    pub fn scan(input: &str) -> Self {
        Self {
            year: year(input),
            month_certain: month_certain(input),
            day_certain: day_certain(input),
            day_or_month: day_or_month(input),
        }
    }
}

/// A resolved month and day, with the year if one was given.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ymd {
    /// Span covering every contributing token.
    pub span: Span,
    /// The year.
    pub year: Option<Token<i32>>,
    /// The month.
    pub month: Token<u32>,
    /// The day.
    pub day: Token<u32>,
}

impl Ymd {
    fn new(year: Option<Token<i32>>, month: Token<u32>, day: Token<u32>) -> Option<Self> {
        let span = Span::cover([year.map(|t| t.span), Some(month.span), Some(day.span)])?;
        Some(Self {
            span,
            year,
            month,
            day,
        })
    }
}

/// Decide which of the tokens in `parts` are the month and the day.
///
/// In order of preference:
/// 1. a month name plus any day number;
/// 2. a certain day plus a bare 1..12, which is then the month;
/// 3. two bare 1..12 numbers. With a year before both they read as month then day ("2026 2 3"
///    is February 3), otherwise as day then month ("2 3" is March 2). A year between the two
///    numbers leaves the pair unresolved.
#[must_use]
pub fn resolve_ymd(input: &str, parts: &YmdParts) -> Option<Ymd> {
    let day = parts.day_certain.or(parts.day_or_month);
    if let (Some(month), Some(day)) = (parts.month_certain, day) {
        return Ymd::new(parts.year, month, day);
    }

    let first = parts.day_or_month?;
    if let Some(day) = parts.day_certain {
        return Ymd::new(parts.year, first, day);
    }

    let rest = input.get(first.span.end..)?;
    let second = day_or_month(rest)?.offset(first.span.end);
    let year_start = parts.year.map(|t| t.span.start);
    if year_start.is_some_and(|start| start > first.span.start && start < second.span.start) {
        log::debug!(
            "Year sits between {} and {}, leaving the pair unresolved",
            first.value,
            second.value
        );
        return None;
    }

    if year_start.is_some_and(|start| start < second.span.start) {
        Ymd::new(parts.year, first, second)
    } else {
        Ymd::new(parts.year, second, first)
    }
}

/// A loose reading of trailing text that may still be mid-typing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MaybeYmd {
    /// The year.
    pub year: Option<Token<i32>>,
    /// Every month the text could mean; empty when none was named.
    pub months: Vec<u32>,
    /// The day.
    pub day: Option<Token<u32>>,
}

/// Read a year, a (possibly partial) month and a day from `input` without requiring all three.
#[must_use]
pub fn maybe_ymd(input: &str) -> Option<MaybeYmd> {
    let year = year(input);
    let day_or_month = day_or_month(input);
    let day = day_certain(input).or(day_or_month);

    if let Some(partial) = month_partial(input) {
        return Some(MaybeYmd {
            year,
            months: partial.values.iter().map(|r| r.value).collect(),
            day,
        });
    }
    if year.is_some() {
        return Some(MaybeYmd {
            year,
            months: day_or_month.map(|t| t.value).into_iter().collect(),
            day: None,
        });
    }
    day.map(|day| MaybeYmd {
        day: Some(day),
        ..MaybeYmd::default()
    })
}
