use crate::config::toml_config::DEFAULT_TIMEOUT_SECONDS;
use crate::domain::ports::StoreSettings;
use crate::services::businesses::DEFAULT_BUSINESSES_TABLE;
use crate::services::enrollments::DEFAULT_ENROLLMENTS_TABLE;
use crate::utils::error::{FormsError, Result};
use crate::utils::validation::Validate;
use std::env;

/// 從環境變數讀取的連線設定
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub store_url: String,
    pub api_key: String,
    pub timeout_seconds: u64,
    pub businesses_table: String,
    pub enrollments_table: String,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// `--dry-run` 且沒有任何設定時使用；只有資料表名稱有意義
    pub fn offline() -> Self {
        Self {
            store_url: String::new(),
            api_key: String::new(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            businesses_table: DEFAULT_BUSINESSES_TABLE.to_string(),
            enrollments_table: DEFAULT_ENROLLMENTS_TABLE.to_string(),
        }
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        Ok(Self {
            store_url: lookup("SUPABASE_URL").ok_or_else(|| FormsError::MissingConfigError {
                field: "SUPABASE_URL".to_string(),
            })?,
            api_key: lookup("SUPABASE_ANON_KEY").ok_or_else(|| {
                FormsError::MissingConfigError {
                    field: "SUPABASE_ANON_KEY".to_string(),
                }
            })?,
            timeout_seconds: lookup("STORE_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            businesses_table: lookup("BUSINESSES_TABLE")
                .unwrap_or_else(|| DEFAULT_BUSINESSES_TABLE.to_string()),
            enrollments_table: lookup("ENROLLMENTS_TABLE")
                .unwrap_or_else(|| DEFAULT_ENROLLMENTS_TABLE.to_string()),
        })
    }
}

impl StoreSettings for EnvConfig {
    fn store_url(&self) -> &str {
        &self.store_url
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn businesses_table(&self) -> &str {
        &self.businesses_table
    }

    fn enrollments_table(&self) -> &str {
        &self.enrollments_table
    }
}

impl Validate for EnvConfig {
    fn validate(&self) -> Result<()> {
        super::validate_store_settings(self)
    }
}
