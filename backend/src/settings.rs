//! Process settings loaded via OrthoConfig.
//!
//! Values layer as defaults, then a config file, then `STUDY_*` environment
//! variables, then command-line flags.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";
const DEFAULT_STORE_TIMEOUT_MS: u64 = 3_000;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_SESSION_TTL_HOURS: i64 = 12;

/// Top-level server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STUDY")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it the server keeps data in memory.
    pub database_url: Option<String>,
    /// Budget for each repository call, pool checkout included.
    pub store_timeout_ms: Option<u64>,
    /// Upper bound on pooled connections.
    pub pool_max_size: Option<u32>,
    /// Lifetime of the session cookie.
    pub session_ttl_hours: Option<i64>,
}

impl AppSettings {
    /// Listen address, defaulting to `0.0.0.0:4000`.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Configured database URL, if any.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Per-call storage budget.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms.unwrap_or(DEFAULT_STORE_TIMEOUT_MS))
    }

    /// Pool size.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Session lifetime in whole hours.
    pub fn session_ttl_hours(&self) -> i64 {
        self.session_ttl_hours
            .filter(|hours| *hours > 0)
            .unwrap_or(DEFAULT_SESSION_TTL_HOURS)
    }
}
