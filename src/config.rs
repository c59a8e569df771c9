//! Application configuration
//!
//! Loaded from YAML. Every section and field has a default, so an empty
//! file (or no file at all) is a valid configuration.
//!
//! ```yaml
//! endpoint:
//!   base_url: http://127.0.0.1:8080
//!   path: /api/users
//! table:
//!   default_page_size: 10
//!   page_size_options: [10, 20, 50, 100]
//!   debounce_ms: 300
//!   max_page_buttons: 7
//! http:
//!   timeout_secs: 30
//!   rate_limit:
//!     requests_per_second: 10
//!     burst_size: 5
//! server:
//!   port: 8080
//!   rows: 500
//!   latency_ms: 0
//! ```

use crate::endpoint::{EndpointConfig, MAX_PAGE_SIZE, USERS_PATH};
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::table::TableOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the table fetches from
    pub endpoint: EndpointDef,

    /// Table behavior
    pub table: TableConfig,

    /// HTTP client settings
    pub http: HttpConfig,

    /// Mock server settings
    pub server: ServerDef,
}

impl AppConfig {
    /// Load and validate a YAML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse and validate YAML config
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        let table = &self.table;

        if table.page_size_options.is_empty() {
            return Err(Error::invalid_value(
                "table.page_size_options",
                "must not be empty",
            ));
        }

        if let Some(bad) = table
            .page_size_options
            .iter()
            .find(|size| **size == 0 || **size > MAX_PAGE_SIZE)
        {
            return Err(Error::invalid_value(
                "table.page_size_options",
                format!("{bad} is outside 1..={MAX_PAGE_SIZE}"),
            ));
        }

        if !table.page_size_options.contains(&table.default_page_size) {
            return Err(Error::invalid_value(
                "table.default_page_size",
                format!(
                    "{} is not one of {:?}",
                    table.default_page_size, table.page_size_options
                ),
            ));
        }

        if table.max_page_buttons < 5 {
            return Err(Error::invalid_value(
                "table.max_page_buttons",
                "must be at least 5",
            ));
        }

        if self.endpoint.base_url.trim().is_empty() {
            return Err(Error::invalid_value("endpoint.base_url", "must not be empty"));
        }
        url::Url::parse(&self.endpoint.base_url)?;

        Ok(())
    }

    /// Options for the table controller
    pub fn table_options(&self) -> TableOptions {
        TableOptions {
            default_page_size: self.table.default_page_size,
            page_size_options: self.table.page_size_options.clone(),
            debounce: Duration::from_millis(self.table.debounce_ms),
        }
    }

    /// HTTP client configuration pointing at the endpoint
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.endpoint.base_url.clone())
            .timeout(Duration::from_secs(self.http.timeout_secs));

        if let Some(ref agent) = self.http.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        if let Some(ref limit) = self.http.rate_limit {
            builder = builder.rate_limit(limit.clone());
        }

        builder.build()
    }

    /// Mock server configuration
    pub fn endpoint_config(&self) -> EndpointConfig {
        EndpointConfig {
            port: self.server.port,
            rows: self.server.rows,
            latency: Duration::from_millis(self.server.latency_ms),
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Query endpoint location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointDef {
    pub base_url: String,
    pub path: String,
}

impl Default for EndpointDef {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            path: USERS_PATH.to_string(),
        }
    }
}

/// Table behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub default_page_size: u32,
    pub page_size_options: Vec<u32>,
    /// Search debounce in milliseconds
    pub debounce_ms: u64,
    /// Most buttons a pager shows before compacting
    pub max_page_buttons: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            page_size_options: vec![10, 20, 50, 100],
            debounce_ms: 300,
            max_page_buttons: 7,
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: None,
            rate_limit: None,
        }
    }
}

/// Mock server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerDef {
    pub port: u16,
    pub rows: usize,
    pub latency_ms: u64,
}

impl Default for ServerDef {
    fn default() -> Self {
        Self {
            port: 8080,
            rows: 500,
            latency_ms: 0,
        }
    }
}
