//! Utility functions shared across the application.

use std::env;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::context::Context;
use crate::engine::resolve;

/// Parse a date from a string, supporting both ISO format and natural language.
///
/// Accepts:
/// - ISO format: "2026-01-15"
/// - Anything the engine recognizes: "3 days ago", "2nd friday of march", "jan 15 2026", etc.
///   The first date it resolves to is used.
///
/// # Errors
///
/// Returns an error if the date cannot be parsed in either format.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use when::config::Config;
/// use when::context::Context;
/// use when::utils::parse_flexible_date;
///
/// let ctx = Context::new(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(), &Config::default());
///
/// // ISO format
/// let date = parse_flexible_date("2026-01-15", &ctx).unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
///
/// // Natural language
/// let date = parse_flexible_date("3 days ago", &ctx).unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 12).unwrap());
/// ```
pub fn parse_flexible_date(input: &str, ctx: &Context) -> anyhow::Result<NaiveDate> {
    // Try ISO format first (YYYY-MM-DD)
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    resolve(input, ctx)
        .first()
        .map(|resolution| resolution.date)
        .ok_or_else(|| anyhow::anyhow!("Failed to parse date '{input}'"))
}

/// Replace `~` in `path` with the user's home directory.
///
/// # Errors
///
/// Returns an error if `HOME` is not set.
pub fn expand_homedir(path: &Path) -> anyhow::Result<PathBuf> {
    Ok(path
        .to_string_lossy()
        .replace('~', &env::var("HOME")?)
        .into())
}
