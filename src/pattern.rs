//! Partial-word pattern tables compiled into a single alternation.
//!
//! Every [`Pattern`] becomes exactly one capturing group of the combined expression: its own groups
//! are flattened to non-capturing ones, so the index of the group that matched identifies the
//! pattern. The value is then computed from the matched text by re-running that pattern alone,
//! anchored on both ends.
//!
//! Short prefixes are often shared ("ma" starts both "march" and "may"). In gather mode every later
//! pattern that also matches the same text is collected, so the caller gets all candidates.

use regex::{Captures, Regex};

use crate::segment::Span;

/// How a pattern turns its match into a value.
#[derive(Clone, Copy, Debug)]
pub enum Value<T> {
    /// The pattern always stands for this value.
    Literal(T),
    /// The value is computed from the pattern's own captures.
    Derived(fn(&Captures<'_>) -> Option<T>),
}

/// One labelled entry of a pattern table.
#[derive(Clone, Copy, Debug)]
pub struct Pattern<T> {
    /// Human-readable label, shown in logs and used for a few special cases.
    pub label: &'static str,
    /// Regular expression source for the partial word.
    pub source: &'static str,
    /// How the value is obtained.
    pub value: Value<T>,
}

impl<T> Pattern<T> {
    /// A pattern that always yields `value`.
    pub const fn literal(label: &'static str, source: &'static str, value: T) -> Self {
        Self {
            label,
            source,
            value: Value::Literal(value),
        }
    }

    /// A pattern whose value is computed from its captures.
    pub const fn derived(
        label: &'static str,
        source: &'static str,
        derive: fn(&Captures<'_>) -> Option<T>,
    ) -> Self {
        Self {
            label,
            source,
            value: Value::Derived(derive),
        }
    }
}

/// A value produced by a pattern, with the label of the pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolved<T> {
    /// Label of the pattern that produced the value.
    pub label: &'static str,
    /// The value.
    pub value: T,
}

/// An ordered pattern table with a fully anchored expression per entry.
#[derive(Debug)]
pub struct PatternSet<T> {
    patterns: Vec<Pattern<T>>,
    anchored: Vec<Regex>,
}

impl<T: Copy> PatternSet<T> {
    /// Compile the anchored form of every pattern.
    ///
    /// # Panics
    ///
    /// Panics if a pattern source is not a valid regular expression.
    pub fn new(patterns: impl IntoIterator<Item = Pattern<T>>) -> Self {
        let patterns: Vec<_> = patterns.into_iter().collect();
        let anchored = patterns
            .iter()
            .map(|p| compile(&format!("^(?:{})$", p.source)))
            .collect();
        Self { patterns, anchored }
    }

    /// Number of patterns, which is also the number of capturing groups in [`Self::alternation`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// `(p1)|(p2)|...` with each pattern's own groups made non-capturing.
    #[must_use]
    pub fn alternation(&self) -> String {
        let groups: Vec<_> = self.patterns.iter().map(|p| flatten(p.source)).collect();
        format!("({})", groups.join(")|("))
    }

    /// Value of the pattern at `index` for `text`, which must be matched by it in full.
    #[must_use]
    pub fn resolve(&self, index: usize, text: &str) -> Option<Resolved<T>> {
        let pattern = self.patterns.get(index)?;
        let value = match pattern.value {
            Value::Literal(value) => value,
            Value::Derived(derive) => derive(&self.anchored[index].captures(text)?)?,
        };
        Some(Resolved {
            label: pattern.label,
            value,
        })
    }

    /// The pattern at `index` plus every later pattern that also matches `text` in full.
    #[must_use]
    pub fn gather(&self, index: usize, text: &str) -> Vec<Resolved<T>> {
        let anchor = self.resolve(index, text);
        let rest = (index + 1..self.len())
            .filter(|&j| self.anchored[j].is_match(text))
            .filter_map(|j| self.resolve(j, text));
        anchor.into_iter().chain(rest).collect()
    }
}

/// A pattern table together with the expression that searches for it.
#[derive(Debug)]
pub struct Matcher<T> {
    set: PatternSet<T>,
    regex: Regex,
}

/// A match over a shared prefix, with every pattern it could stand for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidates<T> {
    /// Where the prefix was found.
    pub span: Span,
    /// Candidate values in table order.
    pub values: Vec<Resolved<T>>,
}

impl<T: Copy> Matcher<T> {
    /// Build the search expression by wrapping the table's alternation, e.g. in word boundaries.
    ///
    /// # Panics
    ///
    /// Panics if the wrapped expression is not a valid regular expression.
    pub fn new(set: PatternSet<T>, wrap: impl FnOnce(&str) -> String) -> Self {
        let regex = compile(&wrap(&set.alternation()));
        Self { set, regex }
    }

    /// The first match in `input`, resolved to the single pattern that matched.
    #[must_use]
    pub fn first(&self, input: &str) -> Option<(Span, Resolved<T>)> {
        let captures = self.regex.captures(input)?;
        let group = matched_groups(&captures).next()?;
        let resolved = self.set.resolve(group - 1, &captures[group])?;
        Some((captures.get(0)?.into(), resolved))
    }

    /// The first match in `input` with every pattern that could have produced it.
    #[must_use]
    pub fn candidates(&self, input: &str) -> Option<Candidates<T>> {
        let captures = self.regex.captures(input)?;
        let group = matched_groups(&captures).next()?;
        let values = self.set.gather(group - 1, &captures[group]);
        if values.is_empty() {
            return None;
        }
        Some(Candidates {
            span: captures.get(0)?.into(),
            values,
        })
    }
}

/// Indices of the capturing groups that matched non-empty text.
pub fn matched_groups<'a>(captures: &'a Captures<'_>) -> impl Iterator<Item = usize> + 'a {
    captures
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(i, m)| m.filter(|m| !m.as_str().is_empty()).map(|_| i))
}

/// Compile a table-derived expression; the tables are constants so a failure is a bug.
pub(crate) fn compile(source: &str) -> Regex {
    Regex::new(source).unwrap_or_else(|err| panic!("invalid pattern {source:?}: {err}"))
}

/// Turn every capturing `(` into `(?:`.
fn flatten(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + 8);
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '(' if chars.peek() != Some(&'?') => out.push_str("?:"),
            _ => {}
        }
    }
    out
}
