//! Application configuration types.

use std::fs;
use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::calendar::WeekStart;

/// Application configuration loaded from config file.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Calendar settings.
    pub calendar: CalendarConfig,
}

/// Load configuration from disk.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or parsed.
pub fn load(path: &Path) -> anyhow::Result<Config> {
    log::debug!(
        "Checking if configuration file exists at {}...",
        path.display()
    );
    if !path.exists() {
        log::warn!(
            "Could not find configuration at {}, so creating and using an empty configuration...",
            path.display()
        );
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("could not create path to configuration file")?;
        }
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .context("could not create configuration file")?;
    }

    log::debug!("Loading configuration from {}...", path.display());
    let config = parse(&fs::read_to_string(path).context("could not read configuration file")?)?;
    log::trace!("Loaded configuration: {config:#?}");
    Ok(config)
}

/// Parse configuration from TOML text.
///
/// # Errors
///
/// Returns an error if the text is not a valid configuration.
pub fn parse(text: &str) -> anyhow::Result<Config> {
    toml::from_str(text).context("could not deserialize configuration file")
}

/// Calendar configuration.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Which day starts a week.
    pub week_start: WeekStart,
}
