//! Configuration for the gamification engine
//!
//! Read from the environment (a `.env` file is honoured):
//! - `DATABASE_URL`: Postgres connection string
//! - `XNEU_UTC_OFFSET_MINUTES`: offset defining the check-in calendar day (default 0)
//! - `XNEU_DB_MAX_CONNECTIONS`: pool size (default 5)

use anyhow::{Context, Result};

use xneu::CheckinCalendar;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Engine settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamificationConfig {
    pub database_url: Option<String>,
    /// Minutes east of UTC; negative values are west
    pub utc_offset_minutes: i32,
    pub db_max_connections: u32,
}

impl Default for GamificationConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            utc_offset_minutes: 0,
            db_max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl GamificationConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup (environment, secret store, test map)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            ..Self::default()
        };

        if let Some(raw) = lookup("XNEU_UTC_OFFSET_MINUTES") {
            config.utc_offset_minutes = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid XNEU_UTC_OFFSET_MINUTES: {}", raw))?;
        }

        if let Some(raw) = lookup("XNEU_DB_MAX_CONNECTIONS") {
            config.db_max_connections = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid XNEU_DB_MAX_CONNECTIONS: {}", raw))?;
        }

        config.calendar()?;
        Ok(config)
    }

    /// Calendar-day policy derived from the configured offset
    pub fn calendar(&self) -> Result<CheckinCalendar> {
        CheckinCalendar::from_offset_minutes(self.utc_offset_minutes).map_err(Into::into)
    }

    pub fn require_database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .context("DATABASE_URL is not set")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GamificationConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, GamificationConfig::default());
        assert!(config.require_database_url().is_err());
        assert_eq!(config.calendar().unwrap(), CheckinCalendar::utc());
    }

    #[test]
    fn test_reads_all_keys() {
        let config = GamificationConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/xneu"),
            ("XNEU_UTC_OFFSET_MINUTES", "-300"),
            ("XNEU_DB_MAX_CONNECTIONS", "12"),
        ]))
        .unwrap();

        assert_eq!(config.require_database_url().unwrap(), "postgres://localhost/xneu");
        assert_eq!(config.utc_offset_minutes, -300);
        assert_eq!(config.db_max_connections, 12);
    }

    #[test]
    fn test_rejects_bad_offset() {
        assert!(GamificationConfig::from_lookup(lookup(&[("XNEU_UTC_OFFSET_MINUTES", "abc")])).is_err());
        assert!(GamificationConfig::from_lookup(lookup(&[("XNEU_UTC_OFFSET_MINUTES", "1440")])).is_err());
    }

    #[test]
    fn test_blank_database_url_is_unset() {
        let config = GamificationConfig::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap();
        assert!(config.database_url.is_none());
    }
}
