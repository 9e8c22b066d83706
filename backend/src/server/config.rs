//! Server configuration assembled in `main`.

use std::time::Duration;

use study_tracker::inbound::http::session_config::SessionSettings;
use study_tracker::outbound::persistence::DbPool;

/// Everything `create_server` needs besides the route table.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) session_ttl_hours: i64,
    pub(crate) bind_addr: String,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) store_timeout: Duration,
}

impl ServerConfig {
    /// Configuration backed by in-memory stores.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: impl Into<String>) -> Self {
        Self {
            session,
            session_ttl_hours: 12,
            bind_addr: bind_addr.into(),
            db_pool: None,
            store_timeout: Duration::from_secs(3),
        }
    }

    /// Persist through PostgreSQL, bounding each call by `store_timeout`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool, store_timeout: Duration) -> Self {
        self.db_pool = Some(pool);
        self.store_timeout = store_timeout;
        self
    }

    /// Session cookie lifetime.
    #[must_use]
    pub fn with_session_ttl_hours(mut self, hours: i64) -> Self {
        self.session_ttl_hours = hours;
        self
    }
}
