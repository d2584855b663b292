//! Runtime Configuration
//!
//! Settings come from the process environment (optionally a `.env` file
//! loaded by the entry point). Invalid values fail startup immediately;
//! absent optional values select the conservative default.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, bail};

/// Default bucket refill period when `RATE_PERIOD_SECS` is unset
const DEFAULT_RATE_PERIOD_SECS: u64 = 60;

/// Resolved application settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Deployment environment name, lowercased (`dev`, `staging`, `prod`)
    pub env: String,
    /// Insert the development API key into an empty key table
    pub seed_dev_key: bool,
    /// Shared secret for `/admin`; unset disables the admin surface
    pub admin_api_key: Option<String>,
    pub api_keys_db_path: PathBuf,
    pub coupons_db_path: PathBuf,
    /// Unset selects the in-process rate-limit backend
    pub redis_url: Option<String>,
    /// Global bucket refill period, shared by every key
    pub rate_period_secs: u64,
    pub port: u16,
}

impl Settings {
    /// Read settings from the environment.
    ///
    /// `RATE_PERIOD_SECS` must be at least 1; a zero period would make
    /// every admission check a caller error, so it is rejected here.
    pub fn from_env() -> anyhow::Result<Self> {
        let env_name = env::var("ENV").unwrap_or_else(|_| "dev".to_string()).to_lowercase();

        let seed_default = env_name == "dev";
        let seed_dev_key = match env::var("SEED_DEV_KEY") {
            Ok(raw) => parse_bool(&raw).context("SEED_DEV_KEY must be true or false")?,
            Err(_) => seed_default,
        };

        let admin_api_key = env::var("ADMIN_API_KEY").ok().filter(|v| !v.is_empty());

        let api_keys_db_path = env::var("API_KEYS_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("api_keys.db"));
        let coupons_db_path = env::var("COUPONS_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("goodrx_coupons.db"));

        let redis_url = env::var("REDIS_URL").ok().filter(|v| !v.is_empty());

        let rate_period_secs = match env::var("RATE_PERIOD_SECS") {
            Ok(raw) => parse_period(&raw)?,
            Err(_) => DEFAULT_RATE_PERIOD_SECS,
        };

        let port: u16 = match env::var("PORT") {
            Ok(raw) => raw.parse().context("PORT must be a valid port number")?,
            Err(_) => 8080,
        };

        Ok(Self {
            env: env_name,
            seed_dev_key,
            admin_api_key,
            api_keys_db_path,
            coupons_db_path,
            redis_url,
            rate_period_secs,
            port,
        })
    }

    /// Whether error details should be withheld from responses
    pub fn is_prod(&self) -> bool {
        self.env == "prod"
    }
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => bail!("not a boolean: {other}"),
    }
}

fn parse_period(raw: &str) -> anyhow::Result<u64> {
    let period: u64 = raw
        .parse()
        .context("RATE_PERIOD_SECS must be a positive integer")?;
    if period == 0 {
        bail!("RATE_PERIOD_SECS must be at least 1");
    }
    Ok(period)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_accepts_common_forms() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("TRUE").unwrap());
        assert!(parse_bool("1").unwrap());
        assert!(!parse_bool("false").unwrap());
        assert!(!parse_bool("no").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn test_parse_period_rejects_zero_and_garbage() {
        assert_eq!(parse_period("60").unwrap(), 60);
        assert_eq!(parse_period("1").unwrap(), 1);
        assert!(parse_period("0").is_err());
        assert!(parse_period("-5").is_err());
        assert!(parse_period("soon").is_err());
    }
}
