use std::sync::Arc;

use chrono_tz::Tz;
use wellcheck_core::{Clock, SystemClock};

pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5001";

/// Process configuration, read once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// Zone the greeting clock reads wall time in
    pub timezone: Tz,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let timezone = match lookup("WELLCHECK_TIMEZONE") {
            Some(name) => name.trim().parse::<Tz>().unwrap_or_else(|_| {
                tracing::warn!(timezone = %name, "Unknown WELLCHECK_TIMEZONE, falling back to UTC");
                Tz::UTC
            }),
            None => Tz::UTC,
        };

        let cors_origins = parse_origins(
            &lookup("WELLCHECK_CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
        );

        Self {
            port,
            timezone,
            cors_origins,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Shared, immutable request state. The decision logic itself is stateless
/// and called directly; only the clock is injected.
#[derive(Clone)]
pub struct AppState {
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_clock(SystemClock::new(config.timezone))
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_state(hour: u32) -> AppState {
    AppState::with_clock(wellcheck_core::FixedClock { hour, tz: Tz::UTC })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.timezone, Tz::UTC);
        assert_eq!(config.cors_origins, vec![DEFAULT_CORS_ORIGIN.to_string()]);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("WELLCHECK_TIMEZONE", "Europe/Berlin"),
            ("WELLCHECK_CORS_ORIGINS", "https://a.example, ,https://b.example"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.timezone, chrono_tz::Europe::Berlin);
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn bad_values_fall_back() {
        let config = config_from(&[("PORT", "not-a-port"), ("WELLCHECK_TIMEZONE", "Mars/Olympus")]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.timezone, Tz::UTC);
    }
}
