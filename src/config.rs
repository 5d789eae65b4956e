//! Configuration management for the event registration server.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is loaded if present; `dotenvy` does not print to stdout, which the
//! MCP transport owns.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Default prefix for dated worksheet tabs.
pub const DEFAULT_TAB_PREFIX: &str = "Form_";

/// Mail API settings for confirmation emails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyConfig {
    /// Mail API base URL
    pub api_url: String,

    /// Mail API key (sent as a bearer token)
    pub api_key: String,

    /// Sender address for confirmation emails
    pub sender: String,
}

/// Configuration for the event registration server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Prefix of dated worksheet tab titles (default: "Form_")
    pub tab_prefix: String,

    /// Maximum rows per worksheet tab, header included (default: 100)
    pub tab_capacity: usize,

    /// Confirmation email settings; `None` disables confirmations
    pub notify: Option<NotifyConfig>,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `SHEET_TAB_PREFIX`: Worksheet tab prefix (default: "Form_")
    /// - `SHEET_TAB_CAPACITY`: Rows per tab (default: 100)
    /// - `NOTIFY_API_URL`: Mail API base URL; enables confirmation emails
    /// - `NOTIFY_API_KEY`: Mail API key, required when `NOTIFY_API_URL` is set
    /// - `NOTIFY_SENDER`: Sender address (default: "no-reply@localhost")
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let tab_prefix =
            env::var("SHEET_TAB_PREFIX").unwrap_or_else(|_| DEFAULT_TAB_PREFIX.to_string());

        let tab_capacity = Self::parse_env_usize("SHEET_TAB_CAPACITY", 100)?;
        if tab_capacity < 2 {
            return Err(ConfigError::InvalidValue {
                var: "SHEET_TAB_CAPACITY".to_string(),
                reason: "Must leave room for the header and at least one row".to_string(),
            });
        }

        let notify = Self::notify_from_env()?;
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            tab_prefix,
            tab_capacity,
            notify,
            request_timeout,
            log_level,
        })
    }

    /// Read the mail API settings; absent URL means confirmations are off.
    fn notify_from_env() -> ConfigResult<Option<NotifyConfig>> {
        let api_url = match env::var("NOTIFY_API_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => return Ok(None),
        };

        // Validate API URL format
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "NOTIFY_API_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let api_key = env::var("NOTIFY_API_KEY")
            .map_err(|_| ConfigError::MissingVar("NOTIFY_API_KEY".to_string()))?;

        if api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "NOTIFY_API_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let sender =
            env::var("NOTIFY_SENDER").unwrap_or_else(|_| "no-reply@localhost".to_string());

        Ok(Some(NotifyConfig {
            api_url,
            api_key,
            sender,
        }))
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tab_prefix: DEFAULT_TAB_PREFIX.to_string(),
            tab_capacity: 100,
            notify: None,
            request_timeout: 10,
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const VARS: [&str; 7] = [
        "SHEET_TAB_PREFIX",
        "SHEET_TAB_CAPACITY",
        "NOTIFY_API_URL",
        "NOTIFY_API_KEY",
        "NOTIFY_SENDER",
        "REQUEST_TIMEOUT",
        "LOG_LEVEL",
    ];

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        /// Start from a clean slate so values from earlier tests cannot leak in.
        fn new() -> Self {
            for var in VARS {
                env::remove_var(var);
            }
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.tab_prefix, "Form_");
        assert_eq!(config.tab_capacity, 100);
        assert_eq!(config.request_timeout, 10);
        assert!(config.notify.is_none());
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        let _guard = EnvGuard::new();

        let config = Config::from_env().unwrap();
        assert_eq!(config.tab_prefix, "Form_");
        assert_eq!(config.tab_capacity, 100);
        assert!(config.notify.is_none());
    }

    #[test]
    #[serial]
    fn test_config_from_env_with_notify() {
        let mut guard = EnvGuard::new();
        guard.set("NOTIFY_API_URL", "https://mail.example.com/v1");
        guard.set("NOTIFY_API_KEY", "secret");
        guard.set("NOTIFY_SENDER", "events@example.com");
        guard.set("SHEET_TAB_PREFIX", "Workshop_");

        let config = Config::from_env().unwrap();
        assert_eq!(config.tab_prefix, "Workshop_");
        assert_eq!(
            config.notify,
            Some(NotifyConfig {
                api_url: "https://mail.example.com/v1".to_string(),
                api_key: "secret".to_string(),
                sender: "events@example.com".to_string(),
            })
        );
    }

    #[test]
    #[serial]
    fn test_config_notify_invalid_url() {
        let mut guard = EnvGuard::new();
        guard.set("NOTIFY_API_URL", "mail.example.com");
        guard.set("NOTIFY_API_KEY", "secret");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "NOTIFY_API_URL"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_notify_missing_key() {
        let mut guard = EnvGuard::new();
        guard.set("NOTIFY_API_URL", "https://mail.example.com");

        match Config::from_env() {
            Err(ConfigError::MissingVar(var)) => assert_eq!(var, "NOTIFY_API_KEY"),
            other => panic!("Expected MissingVar error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_notify_blank_key() {
        let mut guard = EnvGuard::new();
        guard.set("NOTIFY_API_URL", "https://mail.example.com");
        guard.set("NOTIFY_API_KEY", "   ");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "NOTIFY_API_KEY"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_tab_capacity_too_small() {
        let mut guard = EnvGuard::new();
        guard.set("SHEET_TAB_CAPACITY", "1");

        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref var, .. }) if var == "SHEET_TAB_CAPACITY"
        ));
    }

    #[test]
    #[serial]
    fn test_parse_env_u64() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U64", "42");

        let result = Config::parse_env_u64("TEST_U64", 10);
        assert_eq!(result.unwrap(), 42);

        let result = Config::parse_env_u64("NONEXISTENT", 10);
        assert_eq!(result.unwrap(), 10);
    }

    #[test]
    #[serial]
    fn test_parse_env_u64_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U64_INVALID", "not-a-number");

        let result = Config::parse_env_u64("TEST_U64_INVALID", 10);
        assert!(result.is_err());
    }
}
