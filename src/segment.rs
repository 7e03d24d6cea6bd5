//! Character spans over the input and the unclaimed text between them.

use serde::Serialize;

/// A half-open byte range `[start, end)` over the parsed text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Span {
    /// First byte covered.
    pub start: usize,
    /// One past the last byte covered.
    pub end: usize,
}

impl Span {
    /// Create a new span.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted span {start}..{end}");
        Self { start, end }
    }

    /// Move the span right by `offset` bytes, used when a match was found in a slice of the input.
    #[must_use]
    pub fn offset(self, offset: usize) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }

    /// Smallest span covering every given span, or `None` when none is given.
    pub fn cover(spans: impl IntoIterator<Item = Option<Span>>) -> Option<Span> {
        spans.into_iter().flatten().reduce(|acc, span| Span {
            start: acc.start.min(span.start),
            end: acc.end.max(span.end),
        })
    }

    /// Whether the two spans touch without a gap.
    #[must_use]
    pub fn adjacent(self, other: Span) -> bool {
        self.end == other.start || other.end == self.start
    }
}

impl From<regex::Match<'_>> for Span {
    fn from(m: regex::Match<'_>) -> Self {
        Self::new(m.start(), m.end())
    }
}

/// The parts of `input` not covered by any of `spans`, left to right.
///
/// Overlapping spans are tolerated; nothing is merged, the uncovered gaps are just skipped over.
#[must_use]
pub fn segment(input: &str, spans: &[Option<Span>]) -> Vec<Span> {
    let mut valid: Vec<Span> = spans.iter().flatten().copied().collect();
    valid.sort_by_key(|span| span.start);

    let mut gaps = Vec::new();
    let mut seek = 0;
    for span in valid {
        if span.start > seek {
            gaps.push(Span::new(seek, span.start));
        }
        seek = seek.max(span.end);
    }
    if seek < input.len() {
        gaps.push(Span::new(seek, input.len()));
    }
    log::trace!("Segmented {input:?} into {gaps:?}");
    gaps
}

/// Whether the spans appear in the given order without overlapping.
#[must_use]
pub fn in_order(spans: &[Span]) -> bool {
    spans
        .windows(2)
        .all(|pair| pair[1].start >= pair[0].end)
}
