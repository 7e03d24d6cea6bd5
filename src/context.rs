//! The reference point every parse is resolved against.

use chrono::{Local, NaiveDate};

use crate::calendar::WeekStart;
use crate::config::Config;

/// What "today" is and how weeks are laid out, passed into every parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Context {
    /// The date relative phrases are measured from.
    pub today: NaiveDate,
    /// First day of the week, used for "Nth week of" phrases.
    pub week_start: WeekStart,
}

impl Context {
    /// Create a new context for a fixed `today`.
    #[must_use]
    pub fn new(today: NaiveDate, config: &Config) -> Self {
        Self {
            today,
            week_start: config.calendar.week_start,
        }
    }

    /// Create a new context for the current local date.
    #[must_use]
    pub fn local(config: &Config) -> Self {
        let today = Local::now().date_naive();
        log::trace!("Using local date {today} as today");
        Self::new(today, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CalendarConfig;

    #[test]
    fn takes_week_start_from_config() {
        let config = Config {
            calendar: CalendarConfig {
                week_start: WeekStart::Sunday,
            },
        };
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let ctx = Context::new(today, &config);
        assert_eq!(ctx.today, today);
        assert_eq!(ctx.week_start, WeekStart::Sunday);
    }

    #[test]
    fn local_context_uses_todays_date() {
        let ctx = Context::local(&Config::default());
        assert_eq!(ctx.today, Local::now().date_naive());
        assert_eq!(ctx.week_start, WeekStart::Monday);
    }
}
