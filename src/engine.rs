//! Public entry points: text in, display strings out.

use chrono::NaiveDate;
use serde::Serialize;

use crate::compose::{process, Candidate, Reading};
use crate::config::Config;
use crate::context::Context;
use crate::render::render;

/// One date the text could mean, rendered for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The date.
    pub date: NaiveDate,
    /// Relative phrase or date label.
    pub left: String,
    /// Context label.
    pub right: String,
}

/// Every date `text` could mean, as seen from `ctx`.
///
/// Unrecognized text gives an empty list. A single branch of alternatives is listed in full;
/// with several independent readings only the first alternative of each is kept.
#[must_use]
pub fn resolve(text: &str, ctx: &Context) -> Vec<Resolution> {
    let input = text.to_lowercase();
    log::debug!("Resolving {input:?} against {}...", ctx.today);

    let readings = match process(&input, ctx) {
        Ok(readings) => readings,
        Err(err) => {
            log::warn!("Could not resolve {input:?}: {err}");
            return Vec::new();
        }
    };
    log::trace!("Readings: {readings:#?}");

    let candidates: Vec<&Candidate> = match readings.as_slice() {
        [Reading::Branch(candidates)] => candidates.iter().collect(),
        all => all.iter().filter_map(Reading::representative).collect(),
    };
    candidates
        .into_iter()
        .map(|candidate| {
            let (left, right) = render(candidate, ctx.today);
            Resolution {
                date: candidate.date,
                left,
                right,
            }
        })
        .collect()
}

/// `(left, right)` display pairs for `text`, as seen from `ctx`.
#[must_use]
pub fn parse_with(text: &str, ctx: &Context) -> Vec<(String, String)> {
    resolve(text, ctx)
        .into_iter()
        .map(|r| (r.left, r.right))
        .collect()
}

/// `(left, right)` display pairs for `text`, as seen from the current local date.
#[must_use]
pub fn parse(text: &str) -> Vec<(String, String)> {
    parse_with(text, &Context::local(&Config::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::WeekStart;

    fn ctx() -> Context {
        Context {
            today: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            week_start: WeekStart::Monday,
        }
    }

    fn pairs(text: &str) -> Vec<(String, String)> {
        parse_with(text, &ctx())
    }

    fn pair(left: &str, right: &str) -> (String, String) {
        (left.to_string(), right.to_string())
    }

    #[test]
    fn days_ago() {
        assert_eq!(pairs("3 days ago"), vec![pair("3 days ago", "Sunday")]);
    }

    #[test]
    fn unrecognized_text() {
        assert!(pairs("hello world").is_empty());
        assert!(pairs("").is_empty());
    }

    #[test]
    fn ignores_case() {
        assert_eq!(pairs("3 Days AGO"), pairs("3 days ago"));
    }

    #[test]
    fn ordinal_weekday_of_month() {
        assert_eq!(
            pairs("2nd Friday of March"),
            vec![pair("March 14", "Friday")]
        );
    }

    #[test]
    fn sole_branch_is_listed_in_full() {
        assert_eq!(
            pairs("friday"),
            vec![
                pair("Friday, Jan 17", "in 2 days"),
                pair("Friday, Jan 24", "in > 1 week"),
                pair("Friday, Jan 31", "in > 2 weeks"),
            ]
        );
    }

    #[test]
    fn independent_readings_keep_their_first() {
        let found = resolve("12", &ctx());
        let dates: Vec<_> = found.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2025-01-27", "2025-02-12"]);
        assert_eq!(found[0].left, "in 12 days");
        assert_eq!(found[1].left, "February 12");
    }

    #[test]
    fn week_of_month_lists_days() {
        let found = pairs("2nd week of march");
        assert_eq!(found.len(), 7);
        assert_eq!(found[0], pair("March 3", "Monday"));
        assert_eq!(found[6], pair("March 9", "Sunday"));
    }

    #[test]
    fn parse_uses_local_today() {
        assert_eq!(parse("hello world"), Vec::<(String, String)>::new());
        assert_eq!(parse("3 days ago").len(), 1);
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(pairs("next friday"), pairs("next friday"));
    }
}
