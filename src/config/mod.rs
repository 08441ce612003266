#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use env::EnvConfig;
pub use toml_config::TomlConfig;

use crate::domain::ports::StoreSettings;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_table_name, validate_url,
};

/// 所有設定來源共用的檢查
pub fn validate_store_settings<C: StoreSettings + ?Sized>(settings: &C) -> Result<()> {
    validate_url("store.url", settings.store_url())?;
    validate_non_empty_string("store.api_key", settings.api_key())?;
    validate_positive_number("store.timeout_seconds", settings.timeout_seconds(), 1)?;
    validate_table_name("tables.businesses", settings.businesses_table())?;
    validate_table_name("tables.enrollments", settings.enrollments_table())?;
    Ok(())
}
