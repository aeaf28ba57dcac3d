use std::path::PathBuf;
use std::time::Duration;

use crate::catalog::DEFAULT_API_BASE;
use crate::pager::DEFAULT_PAGE_SIZE;

pub const DEFAULT_LIST_LIMIT: usize = 150;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("page size must be at least 1")]
    ZeroPageSize,
    #[error("list limit must be at least 1")]
    ZeroListLimit,
}

/// Runtime settings for one session.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_base: String,
    pub list_limit: usize,
    pub page_size: usize,
    pub timeout: Duration,
    pub log_file: PathBuf,
}

impl Config {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.list_limit == 0 {
            return Err(ConfigError::ZeroListLimit);
        }
        Ok(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            list_limit: DEFAULT_LIST_LIMIT,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_file: default_log_file(),
        }
    }
}

pub fn default_log_file() -> PathBuf {
    dirs_next::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("pokefav")
        .join("pokefav.log")
}
