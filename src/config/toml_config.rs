use crate::domain::ports::StoreSettings;
use crate::services::businesses::DEFAULT_BUSINESSES_TABLE;
use crate::services::enrollments::DEFAULT_ENROLLMENTS_TABLE;
use crate::utils::error::{FormsError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub store: StoreSection,
    pub tables: Option<TablesSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    pub url: String,
    pub api_key: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesSection {
    pub businesses: Option<String>,
    pub enrollments: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FormsError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SUPABASE_ANON_KEY})；未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FormsError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn tables(&self) -> (&str, &str) {
        let businesses = self
            .tables
            .as_ref()
            .and_then(|t| t.businesses.as_deref())
            .unwrap_or(DEFAULT_BUSINESSES_TABLE);
        let enrollments = self
            .tables
            .as_ref()
            .and_then(|t| t.enrollments.as_deref())
            .unwrap_or(DEFAULT_ENROLLMENTS_TABLE);
        (businesses, enrollments)
    }
}

impl StoreSettings for TomlConfig {
    fn store_url(&self) -> &str {
        &self.store.url
    }

    fn api_key(&self) -> &str {
        &self.store.api_key
    }

    fn timeout_seconds(&self) -> u64 {
        self.store.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn businesses_table(&self) -> &str {
        self.tables().0
    }

    fn enrollments_table(&self) -> &str {
        self.tables().1
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        super::validate_store_settings(self)
    }
}
