use crate::error::{CatalogError, CatalogResult};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_PAGE_SIZE: u32 = 5;
/// The text endpoints always page book text at 300 per page.
pub const TEXT_PAGE_SIZE: u32 = 300;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub page_size: u32,
    pub text_page_size: u32,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            text_page_size: TEXT_PAGE_SIZE,
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Reads `CATALOG_API_URL`, `CATALOG_PAGE_SIZE` and `CATALOG_TIMEOUT_SECS`,
    /// falling back to the defaults for unset variables.
    pub fn from_env() -> CatalogResult<Self> {
        let base_url =
            std::env::var("CATALOG_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let page_size = match std::env::var("CATALOG_PAGE_SIZE") {
            Ok(value) => parse_page_size(&value)?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };

        let timeout = match std::env::var("CATALOG_TIMEOUT_SECS") {
            Ok(value) => Some(parse_timeout(&value)?),
            Err(_) => None,
        };

        let config = Self {
            base_url,
            page_size,
            text_page_size: TEXT_PAGE_SIZE,
            timeout,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn validate(&self) -> CatalogResult<()> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| CatalogError::Config(format!("invalid base URL '{}': {}", self.base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(CatalogError::Config(format!(
                "base URL '{}' cannot carry a path",
                self.base_url
            )));
        }
        if self.page_size == 0 || self.text_page_size == 0 {
            return Err(CatalogError::Config("page size must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn parse_page_size(value: &str) -> CatalogResult<u32> {
    match value.trim().parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(CatalogError::Config(format!(
            "CATALOG_PAGE_SIZE must be a positive integer, got '{}'",
            value
        ))),
    }
}

fn parse_timeout(value: &str) -> CatalogResult<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| {
            CatalogError::Config(format!(
                "CATALOG_TIMEOUT_SECS must be a number of seconds, got '{}'",
                value
            ))
        })
}
