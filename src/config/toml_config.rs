use crate::config::{validate_provider, DEFAULT_COOKIE_MAX_AGE_SECONDS};
use crate::core::listing::DEFAULT_PAGE_SIZE;
use crate::core::ConfigProvider;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerSection,
    pub backend: BackendSection,
    #[serde(default)]
    pub auth: AuthSection,
    #[serde(default)]
    pub leads: LeadsSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSection {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
    pub companies_per_page: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthSection {
    pub secure_cookies: Option<bool>,
    pub cookie_max_age_seconds: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadsSection {
    pub page_size: Option<usize>,
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BACKEND_URL})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn backend_url(&self) -> &str {
        &self.backend.base_url
    }

    fn bind_address(&self) -> &str {
        &self.server.bind
    }

    fn port(&self) -> u16 {
        self.server.port
    }

    fn secure_cookies(&self) -> bool {
        self.auth.secure_cookies.unwrap_or(false)
    }

    fn cookie_max_age_seconds(&self) -> i64 {
        self.auth
            .cookie_max_age_seconds
            .unwrap_or(DEFAULT_COOKIE_MAX_AGE_SECONDS)
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.backend.timeout_seconds.unwrap_or(30)
    }

    fn companies_per_page(&self) -> usize {
        self.backend.companies_per_page.unwrap_or(200)
    }

    fn default_page_size(&self) -> usize {
        self.leads.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.bind", &self.server.bind)?;
        if self.backend.base_url.contains("${") {
            return Err(AppError::MissingConfigError {
                field: format!("backend.base_url (unresolved {})", self.backend.base_url),
            });
        }
        validate_provider(self)
    }
}
