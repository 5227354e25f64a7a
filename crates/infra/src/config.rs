use crate::repos::DEFAULT_LEGACY_FILE;
use chrono_tz::Tz;
use kennel_reminders_domain::{rules::DEFAULT_HEAT_INTERVAL_DAYS, RuleSettings};
use std::{fmt::Display, path::PathBuf, str::FromStr};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Days between two heats for dogs that have no interval of their own
    pub default_heat_interval_days: i64,
    /// Failed migration runs after which the user gets a warning. Runs are
    /// still retried after that.
    pub migration_max_attempts: i64,
    /// Timezone of the kennel. Decides which calendar day "today" is when
    /// the reminder rules are evaluated.
    pub timezone: Tz,
    /// JSON file holding reminder data of the previous client version
    pub legacy_reminders_path: Option<PathBuf>,
}

impl Config {
    pub fn new() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_heat_interval_days = parse_or_default(
            &lookup,
            "DEFAULT_HEAT_INTERVAL_DAYS",
            DEFAULT_HEAT_INTERVAL_DAYS,
            |days| *days > 0,
        );
        let migration_max_attempts =
            parse_or_default(&lookup, "MIGRATION_MAX_ATTEMPTS", 3, |attempts| *attempts > 0);
        let timezone = parse_or_default(&lookup, "REMINDERS_TIMEZONE", Tz::UTC, |_| true);
        let legacy_reminders_path = match lookup("LEGACY_REMINDERS_PATH") {
            Some(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
            _ => {
                info!(
                    "Did not find LEGACY_REMINDERS_PATH environment variable. Legacy reminders will be read from: {} if present.",
                    DEFAULT_LEGACY_FILE
                );
                None
            }
        };

        Self {
            default_heat_interval_days,
            migration_max_attempts,
            timezone,
            legacy_reminders_path,
        }
    }

    pub fn rule_settings(&self) -> RuleSettings {
        RuleSettings {
            default_heat_interval_days: self.default_heat_interval_days,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_or_default<T, F, V>(lookup: &F, key: &str, default: T, is_valid: V) -> T
where
    T: FromStr + Display,
    F: Fn(&str) -> Option<String>,
    V: Fn(&T) -> bool,
{
    let raw = match lookup(key) {
        Some(raw) => raw,
        None => return default,
    };
    match raw.trim().parse::<T>() {
        Ok(value) if is_valid(&value) => value,
        _ => {
            warn!(
                "The given {}: {} is not valid, falling back to the default: {}.",
                key, raw, default
            );
            default
        }
    }
}
