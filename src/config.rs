//! Centralized configuration management for otpgate

use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the authentication service
    pub api_base_url: String,
    /// UI language tag ("en", "fr")
    pub locale: String,
    /// Render with the dark palette
    pub dark_theme: bool,
    /// Country calling code used to prefill the phone field
    pub default_dial_code: String,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: concat!("otpgate/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let api_base_url = std::env::var("OTPGATE_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());

        let locale = std::env::var("OTPGATE_LOCALE").unwrap_or_else(|_| "en".to_string());

        let dark_theme = parse_env_var("OTPGATE_DARK")?.unwrap_or(true);

        // +243 is the dial code of the service's home market
        let default_dial_code =
            std::env::var("OTPGATE_DIAL_CODE").unwrap_or_else(|_| "243".to_string());

        let http = HttpConfig {
            timeout_seconds: parse_env_var("OTPGATE_HTTP_TIMEOUT_SECONDS")?.unwrap_or(30),
            user_agent: std::env::var("OTPGATE_USER_AGENT")
                .unwrap_or_else(|_| HttpConfig::default().user_agent),
        };

        Ok(Config {
            api_base_url,
            locale,
            dark_theme,
            default_dial_code,
            http,
        })
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Initial value of the phone field, e.g. "+243"
    pub fn dial_code_prefix(&self) -> String {
        format!("+{}", self.default_dial_code.trim_start_matches('+'))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "API base URL must be http(s): {}",
                self.api_base_url
            ));
        }

        if self.default_dial_code.trim_start_matches('+').is_empty()
            || !self
                .default_dial_code
                .trim_start_matches('+')
                .chars()
                .all(|c| c.is_ascii_digit())
        {
            return Err(anyhow::anyhow!(
                "Dial code must be digits: {}",
                self.default_dial_code
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            locale: "en".to_string(),
            dark_theme: true,
            default_dial_code: "243".to_string(),
            http: HttpConfig::default(),
        }
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.locale, "en");
        assert!(config.dark_theme);
        assert_eq!(config.dial_code_prefix(), "+243");
        assert_eq!(config.http.timeout_seconds, 30);
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        config.validate().unwrap();
    }

    #[test]
    fn test_config_rejects_non_http_url() {
        let config = Config {
            api_base_url: "ftp://example.com".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_bad_dial_code() {
        let config = Config {
            default_dial_code: "+24a".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_dial_code_prefix_keeps_single_plus() {
        let config = Config {
            default_dial_code: "+33".to_string(),
            ..Config::default()
        };
        assert_eq!(config.dial_code_prefix(), "+33");
    }
}
