//! Shared fixtures for HTTP handler tests.

use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{Goal, PasswordAccountService, Quote, StudySession};
use crate::outbound::{Argon2PasswordHasher, InMemoryRecords, InMemorySessionStore, InMemoryUsers};

use super::csrf::SessionCsrfTokens;
use super::state::HttpState;
use super::views::JsonViewRenderer;

/// Session middleware over a fresh store, a throwaway key and no `Secure` flag.
pub fn test_session_middleware() -> SessionMiddleware<InMemorySessionStore> {
    SessionMiddleware::builder(InMemorySessionStore::new(fixed_clock()), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Clock frozen at one instant.
pub struct FixtureClock(pub DateTime<Utc>);

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Clock pinned to 2025-01-10 09:30 UTC.
pub fn fixed_clock() -> Arc<dyn Clock> {
    let instant = Utc
        .with_ymd_and_hms(2025, 1, 10, 9, 30, 0)
        .single()
        .expect("valid fixture instant");
    Arc::new(FixtureClock(instant))
}

/// State wired to in-memory stores and a cheap Argon2 configuration.
pub fn memory_state() -> HttpState {
    let clock = fixed_clock();
    let users = Arc::new(InMemoryUsers::new(clock.clone()));
    let hasher = Arc::new(Argon2PasswordHasher::with_costs(1024, 1, 1).expect("test params"));
    HttpState {
        goals: Arc::new(InMemoryRecords::<Goal>::new(clock.clone())),
        sessions: Arc::new(InMemoryRecords::<StudySession>::new(clock.clone())),
        quotes: Arc::new(InMemoryRecords::<Quote>::new(clock.clone())),
        accounts: Arc::new(PasswordAccountService::new(users, hasher)),
        renderer: Arc::new(JsonViewRenderer),
        csrf: Arc::new(SessionCsrfTokens),
        clock,
    }
}

/// The `session` cookie set by `res`, if any.
pub fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}
