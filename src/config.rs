use std::{env, fmt::Display, str::FromStr, time::Duration};

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use crate::auth::password;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub session_ttl: Duration,
    /// scrypt log2(N) used when hashing new passwords
    pub password_cost: u8,
    pub nats_url: Option<String>,
}

#[derive(Error, Debug)]
#[error("invalid value for {key}: {reason}")]
pub struct ConfigError {
    key: &'static str,
    reason: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            port: try_load("PORT", "3001")?,
            database_url: try_load("DATABASE_URL", "sqlite://ezelectronics.db?mode=rwc")?,
            db_max_connections: try_load("DB_MAX_CONNECTIONS", "5")?,
            session_ttl: checked_session_ttl(try_load("SESSION_TTL_HOURS", "24")?)?,
            password_cost: checked_password_cost(try_load("PASSWORD_COST", "14")?)?,
            nats_url: env::var("NATS_URL").ok().filter(|url| !url.is_empty()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3001,
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 1,
            session_ttl: Duration::from_secs(24 * 60 * 60),
            password_cost: 14,
            nats_url: None,
        }
    }
}

/// Hours to a TTL that still yields a representable expiry when added to now
fn checked_session_ttl(hours: u64) -> Result<Duration, ConfigError> {
    hours
        .checked_mul(60 * 60)
        .map(Duration::from_secs)
        .filter(|ttl| {
            chrono::Duration::from_std(*ttl)
                .ok()
                .and_then(|ttl| Utc::now().checked_add_signed(ttl))
                .is_some()
        })
        .ok_or_else(|| ConfigError { key: "SESSION_TTL_HOURS", reason: format!("{hours} hours is out of range") })
}

fn checked_password_cost(cost: u8) -> Result<u8, ConfigError> {
    password::validate_cost(cost).map_err(|reason| ConfigError { key: "PASSWORD_COST", reason })?;
    Ok(cost)
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| ConfigError { key, reason: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_load_default_and_errors() {
        let port: u16 = try_load("EZ_TEST_UNSET_PORT", "3001").unwrap();
        assert_eq!(port, 3001);
        let err = try_load::<u16>("EZ_TEST_UNSET_PORT", "not-a-port").unwrap_err();
        assert!(err.to_string().contains("EZ_TEST_UNSET_PORT"));
    }

    #[test]
    fn test_session_ttl_bounds() {
        assert_eq!(checked_session_ttl(24).unwrap(), Duration::from_secs(86_400));
        assert_eq!(checked_session_ttl(0).unwrap(), Duration::ZERO);
        let err = checked_session_ttl(u64::MAX).unwrap_err();
        assert!(err.to_string().contains("SESSION_TTL_HOURS"));
        assert!(checked_session_ttl(u64::MAX / 3600).is_err());
    }

    #[test]
    fn test_password_cost_must_suit_the_hasher() {
        assert_eq!(checked_password_cost(14).unwrap(), 14);
        let err = checked_password_cost(200).unwrap_err();
        assert!(err.to_string().contains("PASSWORD_COST"));
    }
}
