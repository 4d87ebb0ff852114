use anyhow::{Context, Result};
use std::env;

use game_persistence::connection::DEFAULT_DATABASE_URL;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub default_result_limit: u64,
    pub max_result_limit: u64,
}

impl Config {
    pub fn new() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            default_result_limit: env::var("DEFAULT_RESULT_LIMIT")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("Invalid DEFAULT_RESULT_LIMIT")?,
            max_result_limit: env::var("MAX_RESULT_LIMIT")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .context("Invalid MAX_RESULT_LIMIT")?,
        })
    }

    /// In-memory store, default limits
    pub fn for_testing() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            default_result_limit: 10,
            max_result_limit: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.default_result_limit, 10);
        assert_eq!(config.max_result_limit, 100);
    }

    // The only test touching these variables, so no other test races it
    #[test]
    fn test_config_from_environment() {
        const VARS: [&str; 3] = ["DATABASE_URL", "DEFAULT_RESULT_LIMIT", "MAX_RESULT_LIMIT"];
        let saved: Vec<_> = VARS.iter().map(|var| env::var(var).ok()).collect();

        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
        assert_eq!(Config::new().unwrap(), Config::default());

        unsafe {
            env::set_var("DATABASE_URL", "sqlite::memory:");
            env::set_var("DEFAULT_RESULT_LIMIT", "25");
            env::set_var("MAX_RESULT_LIMIT", "50");
        }
        let config = Config::new().unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.default_result_limit, 25);
        assert_eq!(config.max_result_limit, 50);

        unsafe {
            env::set_var("DEFAULT_RESULT_LIMIT", "abc");
        }
        let err = Config::new().unwrap_err();
        assert!(err.to_string().contains("DEFAULT_RESULT_LIMIT"));

        unsafe {
            env::set_var("DEFAULT_RESULT_LIMIT", "10");
            env::set_var("MAX_RESULT_LIMIT", "-1");
        }
        assert!(Config::new().is_err());

        unsafe {
            for (var, value) in VARS.iter().zip(saved) {
                match value {
                    Some(value) => env::set_var(var, value),
                    None => env::remove_var(var),
                }
            }
        }
    }

    #[test]
    fn test_testing_config_uses_memory_database() {
        let config = Config::for_testing();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_result_limit, 100);
    }
}
