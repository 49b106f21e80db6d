pub mod toml_config;

use crate::core::listing::MAX_PAGE_SIZE;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_range, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_COOKIE_MAX_AGE_SECONDS: i64 = 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "lead-admin")]
#[command(about = "Admin service for B2B lead records")]
pub struct CliConfig {
    /// TOML config file; when given, it replaces the server flags below
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, default_value = "127.0.0.1")]
    pub bind: String,

    #[arg(long, default_value = "3000")]
    pub port: u16,

    #[arg(long, env = "LEAD_ADMIN_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    #[arg(long, help = "Mark the auth cookie Secure (use behind HTTPS)")]
    pub secure_cookies: bool,

    #[arg(long, default_value = "30")]
    pub request_timeout_seconds: u64,

    #[arg(long, default_value = "200")]
    pub companies_per_page: usize,

    #[arg(long, default_value = "10")]
    pub page_size: usize,

    #[arg(long, help = "Emit JSON log lines")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn backend_url(&self) -> &str {
        &self.backend_url
    }

    fn bind_address(&self) -> &str {
        &self.bind
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn secure_cookies(&self) -> bool {
        self.secure_cookies
    }

    fn cookie_max_age_seconds(&self) -> i64 {
        DEFAULT_COOKIE_MAX_AGE_SECONDS
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.request_timeout_seconds
    }

    fn companies_per_page(&self) -> usize {
        self.companies_per_page
    }

    fn default_page_size(&self) -> usize {
        self.page_size
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

/// Checks shared by every config source.
pub fn validate_provider(config: &impl ConfigProvider) -> Result<()> {
    validate_url("backend_url", config.backend_url())?;
    validate_range("request_timeout_seconds", config.request_timeout_seconds(), 1, 300)?;
    validate_positive_number("companies_per_page", config.companies_per_page(), 1)?;
    validate_range("page_size", config.default_page_size(), 1, MAX_PAGE_SIZE)?;
    validate_range("cookie_max_age_seconds", config.cookie_max_age_seconds(), 1, 60 * 60 * 24 * 30)?;
    Ok(())
}

/// Resolved settings the server runs with, whatever the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub bind_address: String,
    pub port: u16,
    pub backend_url: String,
    pub secure_cookies: bool,
    pub cookie_max_age_seconds: i64,
    pub request_timeout_seconds: u64,
    pub companies_per_page: usize,
    pub default_page_size: usize,
}

impl ServerSettings {
    pub fn from_provider(config: &impl ConfigProvider) -> Self {
        Self {
            bind_address: config.bind_address().to_string(),
            port: config.port(),
            backend_url: config.backend_url().to_string(),
            secure_cookies: config.secure_cookies(),
            cookie_max_age_seconds: config.cookie_max_age_seconds(),
            request_timeout_seconds: config.request_timeout_seconds(),
            companies_per_page: config.companies_per_page(),
            default_page_size: config.default_page_size(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 3000,
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            secure_cookies: false,
            cookie_max_age_seconds: DEFAULT_COOKIE_MAX_AGE_SECONDS,
            request_timeout_seconds: 30,
            companies_per_page: 200,
            default_page_size: crate::core::listing::DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["lead-admin"]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.companies_per_page, 200);
        assert_eq!(config.page_size, 10);
        assert!(!config.secure_cookies);
        assert_eq!(
            ServerSettings::from_provider(&config).cookie_max_age_seconds,
            3600
        );
    }

    #[test]
    fn test_cli_validation() {
        let config = CliConfig::parse_from([
            "lead-admin",
            "--backend-url",
            "https://api.example.com",
            "--page-size",
            "25",
        ]);
        assert!(config.validate().is_ok());

        let bad = CliConfig::parse_from(["lead-admin", "--backend-url", "ftp://x", "--page-size", "0"]);
        assert!(bad.validate().is_err());

        let zero_page = CliConfig::parse_from(["lead-admin", "--backend-url", "http://x", "--page-size", "0"]);
        assert!(zero_page.validate().is_err());
    }
}
