use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Process-wide configuration, built once in `main` and injected into the
/// upstream client and database instead of living behind a global.
#[derive(Debug, Clone)]
pub struct Config {
    pub content_api_base: String,
    pub content_api_key: String,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
    pub cancellation_timeout: Duration,
    pub mongo_uri: String,
    pub mongo_db_name: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok(); // Load .env file if present

        Ok(Config {
            content_api_base: get_env_or_default(
                "CONTENT_API_BASE",
                "https://content-api.sandbox.junction.dev",
            ),
            content_api_key: get_env("CONTENT_API_KEY")?,
            poll_interval: parse_duration_secs(
                "POLL_INTERVAL_SEC",
                &get_env_or_default("POLL_INTERVAL_SEC", "5"),
            )?,
            max_poll_attempts: get_env_or_default("MAX_POLL_ATTEMPTS", "12")
                .parse()
                .context("MAX_POLL_ATTEMPTS must be an integer")?,
            cancellation_timeout: parse_duration_secs(
                "CANCELLATION_TIMEOUT_SEC",
                &get_env_or_default("CANCELLATION_TIMEOUT_SEC", "15"),
            )?,
            mongo_uri: get_env_or_default("MONGO_URI", "mongodb://localhost:27017"),
            mongo_db_name: get_env_or_default("MONGO_DB_NAME", "waypoint"),
            port: get_env_or_default("PORT", "4000")
                .parse()
                .context("PORT must be a valid port number")?,
        })
    }
}

fn get_env(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("Missing required environment variable: {key}"))
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_duration_secs(key: &str, raw: &str) -> Result<Duration> {
    let secs: f64 = raw
        .parse()
        .with_context(|| format!("{key} must be a number of seconds"))?;
    Duration::try_from_secs_f64(secs)
        .with_context(|| format!("{key} must be a finite, non-negative number of seconds"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_whole_and_fractional_seconds() {
        assert_eq!(
            parse_duration_secs("POLL_INTERVAL_SEC", "5").unwrap(),
            Duration::from_secs(5)
        );
        assert_eq!(
            parse_duration_secs("POLL_INTERVAL_SEC", "0.5").unwrap(),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_rejects_negative_seconds() {
        assert!(parse_duration_secs("POLL_INTERVAL_SEC", "-1").is_err());
    }

    #[test]
    fn test_rejects_non_finite_seconds() {
        assert!(parse_duration_secs("POLL_INTERVAL_SEC", "NaN").is_err());
        assert!(parse_duration_secs("POLL_INTERVAL_SEC", "inf").is_err());
    }

    #[test]
    fn test_rejects_non_numeric_seconds() {
        assert!(parse_duration_secs("CANCELLATION_TIMEOUT_SEC", "soon").is_err());
    }
}
