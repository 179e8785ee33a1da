use std::path::PathBuf;

use chrono::NaiveDate;
use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Startup settings for the dashboard.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Dataset loaded at startup.
    pub data_path: PathBuf,
    /// Default value of the start date picker.
    pub start_date: NaiveDate,
    /// Default value of the end date picker.
    pub end_date: NaiveDate,
}

impl Settings {
    /// Layering, lowest to highest priority: built-in defaults, an optional
    /// `dashboard.{toml,json,yaml}` in the working directory, `BIKESHARE_*`
    /// environment variables, then the first command-line argument as the
    /// data path.
    pub fn new() -> Result<Self, ConfigError> {
        let builder = Self::defaults()?
            .add_source(File::with_name("dashboard").required(false))
            .add_source(Environment::with_prefix("BIKESHARE"))
            .set_override_option("data_path", std::env::args().nth(1))?;

        builder.build()?.try_deserialize()
    }

    /// Built-in values, before any file, environment or argument layer.
    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("data_path", "data/day.csv")?
            .set_default("start_date", "2011-01-01")?
            .set_default("end_date", "2012-12-31")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_dataset_span() {
        let settings: Settings = Settings::defaults()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.data_path, PathBuf::from("data/day.csv"));
        assert_eq!(settings.start_date, NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
        assert_eq!(settings.end_date, NaiveDate::from_ymd_opt(2012, 12, 31).unwrap());
    }

    #[test]
    fn override_replaces_only_the_data_path() {
        let settings: Settings = Settings::defaults()
            .unwrap()
            .set_override_option("data_path", Some("other/day.parquet"))
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.data_path, PathBuf::from("other/day.parquet"));
        assert_eq!(settings.start_date, NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
    }
}
