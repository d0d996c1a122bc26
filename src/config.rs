//! Runtime configuration resolved from the environment.
//!
//! **Environment Variables**:
//! - `TAPROOM_API_BASE`: directory API root (default `https://api.openbrewerydb.org/v1`)
//! - `TAPROOM_PER_PAGE`: page size, 1 to 200 (default 50)
//! - `TAPROOM_TIMEOUT_SECS`: per-request timeout (default 10)

use crate::error::{Result, TaproomError};
use crate::query::DEFAULT_PER_PAGE;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.openbrewerydb.org/v1";
pub const MAX_PER_PAGE: u32 = 200;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub api_base: String,
    pub per_page: u32,
    #[serde(serialize_with = "as_secs")]
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            per_page: DEFAULT_PER_PAGE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`, so tests don't have to touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = lookup("TAPROOM_API_BASE").filter(|v| !v.trim().is_empty()) {
            config.api_base = base.trim().to_string();
        }

        if let Some(per_page) = lookup("TAPROOM_PER_PAGE") {
            let per_page = per_page.trim().parse().map_err(|_| {
                TaproomError::Config(format!("TAPROOM_PER_PAGE is not a number: '{}'", per_page))
            })?;
            config = config.with_per_page(per_page)?;
        }

        if let Some(timeout) = lookup("TAPROOM_TIMEOUT_SECS") {
            let secs: u64 = timeout.trim().parse().map_err(|_| {
                TaproomError::Config(format!(
                    "TAPROOM_TIMEOUT_SECS is not a number: '{}'",
                    timeout
                ))
            })?;
            if secs == 0 {
                return Err(TaproomError::Config(
                    "TAPROOM_TIMEOUT_SECS must be positive".to_string(),
                ));
            }
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Result<Self> {
        self.api_base = api_base.into();
        self.validate()?;
        Ok(self)
    }

    pub fn with_per_page(mut self, per_page: u32) -> Result<Self> {
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(TaproomError::Config(format!(
                "per_page must be between 1 and {}, got {}",
                MAX_PER_PAGE, per_page
            )));
        }
        self.per_page = per_page;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(TaproomError::Config(format!(
                "API base must be an http(s) URL, got '{}'",
                self.api_base
            )));
        }
        Ok(())
    }
}

fn as_secs<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(duration.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.per_page, 50);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("TAPROOM_API_BASE", "http://localhost:9000/v1"),
            ("TAPROOM_PER_PAGE", "20"),
            ("TAPROOM_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();
        assert_eq!(config.api_base, "http://localhost:9000/v1");
        assert_eq!(config.per_page, 20);
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_lookup(lookup(&[("TAPROOM_PER_PAGE", "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[("TAPROOM_PER_PAGE", "lots")])).is_err());
        assert!(Config::from_lookup(lookup(&[("TAPROOM_TIMEOUT_SECS", "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[("TAPROOM_API_BASE", "ftp://x")])).is_err());
    }
}
