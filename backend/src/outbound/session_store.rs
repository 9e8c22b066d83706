//! Server-side login session storage.
//!
//! The cookie only carries an opaque, encrypted key; the session state lives
//! here. Purging a session deletes its record, so a copy of an old cookie
//! resolves to nothing afterwards. Records past their time-to-live are
//! treated as absent and swept on the next write.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use actix_session::storage::{LoadError, SaveError, SessionKey, SessionStore, UpdateError};
use actix_web::cookie::time::Duration as CookieDuration;
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use rand::distributions::{Alphanumeric, DistString};
use tracing::debug;

/// Length of generated session keys, in alphanumeric characters.
const SESSION_KEY_LEN: usize = 64;

type SessionState = HashMap<String, String>;

struct StoredSession {
    state: SessionState,
    expires_at: DateTime<Utc>,
}

/// Process-local [`SessionStore`]. Clones share the same records.
#[derive(Clone)]
pub struct InMemorySessionStore {
    records: Arc<Mutex<HashMap<String, StoredSession>>>,
    clock: Arc<dyn Clock>,
}

impl InMemorySessionStore {
    /// Empty store whose expiry checks read `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            clock,
        }
    }

    /// Number of live sessions.
    pub fn live_sessions(&self) -> usize {
        let now = self.clock.utc();
        self.lock()
            .values()
            .filter(|stored| stored.expires_at > now)
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, StoredSession>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn expiry(&self, ttl: &CookieDuration) -> DateTime<Utc> {
        self.clock.utc() + Duration::seconds(ttl.whole_seconds())
    }

    fn insert_fresh(
        &self,
        state: SessionState,
        ttl: &CookieDuration,
    ) -> Result<SessionKey, anyhow::Error> {
        let key = Alphanumeric.sample_string(&mut rand::thread_rng(), SESSION_KEY_LEN);
        let session_key = SessionKey::try_from(key.clone())?;
        let now = self.clock.utc();
        let expires_at = self.expiry(ttl);

        let mut records = self.lock();
        let before = records.len();
        records.retain(|_, stored| stored.expires_at > now);
        if records.len() < before {
            debug!(swept = before - records.len(), "expired sessions removed");
        }
        records.insert(key, StoredSession { state, expires_at });
        Ok(session_key)
    }
}

impl SessionStore for InMemorySessionStore {
    async fn load(&self, session_key: &SessionKey) -> Result<Option<SessionState>, LoadError> {
        let now = self.clock.utc();
        let mut records = self.lock();
        match records.get(session_key.as_ref()) {
            Some(stored) if stored.expires_at > now => return Ok(Some(stored.state.clone())),
            Some(_) => {}
            None => return Ok(None),
        }
        records.remove(session_key.as_ref());
        debug!("expired session presented");
        Ok(None)
    }

    async fn save(
        &self,
        session_state: SessionState,
        ttl: &CookieDuration,
    ) -> Result<SessionKey, SaveError> {
        self.insert_fresh(session_state, ttl).map_err(SaveError::Other)
    }

    async fn update(
        &self,
        session_key: SessionKey,
        session_state: SessionState,
        ttl: &CookieDuration,
    ) -> Result<SessionKey, UpdateError> {
        let now = self.clock.utc();
        let expires_at = self.expiry(ttl);
        {
            let mut records = self.lock();
            if let Some(stored) = records
                .get_mut(session_key.as_ref())
                .filter(|stored| stored.expires_at > now)
            {
                stored.state = session_state;
                stored.expires_at = expires_at;
                return Ok(session_key);
            }
        }
        // A deleted or expired key is never revived; the state moves to a new key.
        self.insert_fresh(session_state, ttl).map_err(UpdateError::Other)
    }

    async fn update_ttl(
        &self,
        session_key: &SessionKey,
        ttl: &CookieDuration,
    ) -> Result<(), anyhow::Error> {
        let expires_at = self.expiry(ttl);
        if let Some(stored) = self.lock().get_mut(session_key.as_ref()) {
            stored.expires_at = expires_at;
        }
        Ok(())
    }

    async fn delete(&self, session_key: &SessionKey) -> Result<(), anyhow::Error> {
        self.lock().remove(session_key.as_ref());
        Ok(())
    }
}
