use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{ensure, Context, Result};

use crate::jobs::JobDefaults;
use crate::jumbo::element::JumboSettings;
use crate::layout::font_metrics::FontFamily;
use crate::van::notification::NotificationSettings;

/// Runtime configuration loaded from environment variables (and `.env` if present).
/// Every key is optional; malformed values fail at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub rust_log: String,
    /// JSON job file; stdin when unset.
    pub jobs_path: Option<PathBuf>,
    pub font: FontFamily,
    pub min_font_size: f64,
    pub max_font_size: f64,
    pub refit_debounce: Duration,
    pub notification_hide_after: Duration,
    pub notification_message: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup (the process env in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Config {
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            jobs_path: lookup("FIT_JOBS_PATH")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            font: parse_or(&lookup, "JUMBO_FONT", FontFamily::Inter)?,
            min_font_size: parse_or(&lookup, "JUMBO_MIN_FONT_SIZE", 1.0)?,
            max_font_size: parse_or(&lookup, "JUMBO_MAX_FONT_SIZE", 500.0)?,
            refit_debounce: Duration::from_millis(parse_or(&lookup, "REFIT_DEBOUNCE_MS", 100)?),
            notification_hide_after: Duration::from_millis(parse_or(
                &lookup,
                "VAN_NOTIFICATION_HIDE_MS",
                6000,
            )?),
            notification_message: lookup("VAN_NOTIFICATION_MESSAGE").filter(|m| !m.is_empty()),
        };

        ensure!(
            config.min_font_size > 0.0 && config.min_font_size <= config.max_font_size,
            "JUMBO_MIN_FONT_SIZE ({}) must be positive and not exceed JUMBO_MAX_FONT_SIZE ({})",
            config.min_font_size,
            config.max_font_size
        );
        Ok(config)
    }

    pub fn jumbo_settings(&self) -> JumboSettings {
        JumboSettings {
            default_min_font_size: self.min_font_size,
            default_max_font_size: self.max_font_size,
            ..JumboSettings::default()
        }
    }

    pub fn notification_settings(&self) -> NotificationSettings {
        NotificationSettings {
            hide_after: self.notification_hide_after,
            ..NotificationSettings::default()
        }
    }

    pub fn job_defaults(&self) -> JobDefaults {
        JobDefaults {
            font: self.font,
            settings: self.jumbo_settings(),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_env_empty() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.jobs_path, None);
        assert_eq!(config.font, FontFamily::Inter);
        assert_eq!(config.min_font_size, 1.0);
        assert_eq!(config.max_font_size, 500.0);
        assert_eq!(config.refit_debounce, Duration::from_millis(100));
        assert_eq!(config.notification_hide_after, Duration::from_millis(6000));
        assert_eq!(config.notification_message, None);
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = config_from(&[
            ("JUMBO_FONT", "Oswald"),
            ("JUMBO_MIN_FONT_SIZE", "12"),
            ("JUMBO_MAX_FONT_SIZE", "240.5"),
            ("VAN_NOTIFICATION_HIDE_MS", "3000"),
            ("VAN_NOTIFICATION_MESSAGE", "Parts for your van"),
            ("FIT_JOBS_PATH", "/tmp/jobs.json"),
        ])
        .unwrap();
        assert_eq!(config.font, FontFamily::Oswald);
        assert_eq!(config.jumbo_settings().default_min_font_size, 12.0);
        assert_eq!(config.jumbo_settings().default_max_font_size, 240.5);
        assert_eq!(
            config.notification_settings().hide_after,
            Duration::from_millis(3000)
        );
        assert_eq!(config.notification_message.as_deref(), Some("Parts for your van"));
        assert_eq!(config.jobs_path, Some(PathBuf::from("/tmp/jobs.json")));
    }

    #[test]
    fn test_malformed_value_names_the_key() {
        let err = config_from(&[("REFIT_DEBOUNCE_MS", "soon")]).unwrap_err();
        assert!(format!("{err:#}").contains("REFIT_DEBOUNCE_MS"));
    }

    #[test]
    fn test_inverted_font_bounds_rejected() {
        assert!(config_from(&[("JUMBO_MIN_FONT_SIZE", "90"), ("JUMBO_MAX_FONT_SIZE", "30")]).is_err());
    }
}
