//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;
use std::time::Duration;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
};
use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use mockable::Clock;
use tracing::warn;

use study_tracker::Trace;
use study_tracker::domain::ports::UserRepository;
use study_tracker::domain::{Goal, PasswordAccountService, Quote, StudySession};
use study_tracker::inbound::http::csrf::SessionCsrfTokens;
use study_tracker::inbound::http::routes::configure;
use study_tracker::inbound::http::state::HttpState;
use study_tracker::inbound::http::views::JsonViewRenderer;
use study_tracker::outbound::persistence::{
    DbPool, DieselGoalRepository, DieselQuoteRepository, DieselStudySessionRepository,
    DieselUserRepository,
};
use study_tracker::outbound::{
    Argon2PasswordHasher, InMemoryRecords, InMemorySessionStore, InMemoryUsers, system_clock,
};

fn accounts(users: Arc<dyn UserRepository>) -> Arc<PasswordAccountService> {
    Arc::new(PasswordAccountService::new(
        users,
        Arc::new(Argon2PasswordHasher::default()),
    ))
}

fn diesel_state(
    pool: &DbPool,
    budget: Duration,
    accounts: Arc<PasswordAccountService>,
) -> HttpState {
    HttpState {
        goals: Arc::new(DieselGoalRepository::new(pool.clone(), budget)),
        sessions: Arc::new(DieselStudySessionRepository::new(pool.clone(), budget)),
        quotes: Arc::new(DieselQuoteRepository::new(pool.clone(), budget)),
        accounts,
        renderer: Arc::new(JsonViewRenderer),
        csrf: Arc::new(SessionCsrfTokens),
        clock: system_clock(),
    }
}

fn memory_state(clock: Arc<dyn Clock>, accounts: Arc<PasswordAccountService>) -> HttpState {
    HttpState {
        goals: Arc::new(InMemoryRecords::<Goal>::new(clock.clone())),
        sessions: Arc::new(InMemoryRecords::<StudySession>::new(clock.clone())),
        quotes: Arc::new(InMemoryRecords::<Quote>::new(clock.clone())),
        accounts,
        renderer: Arc::new(JsonViewRenderer),
        csrf: Arc::new(SessionCsrfTokens),
        clock,
    }
}

/// Build the adapters, warm the login path, bind the listener and start
/// serving.
///
/// # Errors
/// Propagates [`std::io::Error`] when hashing the login decoy or binding the
/// socket fails.
pub async fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let clock = system_clock();
    let state = match &config.db_pool {
        Some(pool) => {
            let users = Arc::new(DieselUserRepository::new(
                pool.clone(),
                config.store_timeout,
            ));
            let accounts = accounts(users);
            accounts.warm().await.map_err(std::io::Error::other)?;
            diesel_state(pool, config.store_timeout, accounts)
        }
        None => {
            warn!("no database configured; data lives in memory and is lost on exit");
            let accounts = accounts(Arc::new(InMemoryUsers::new(clock.clone())));
            accounts.warm().await.map_err(std::io::Error::other)?;
            memory_state(clock.clone(), accounts)
        }
    };
    let state = web::Data::new(state);
    let ServerConfig {
        session,
        session_ttl_hours,
        bind_addr,
        ..
    } = config;

    // One store shared by every worker, so a session is visible whichever
    // worker serves the next request.
    let store = InMemorySessionStore::new(clock);

    let server = HttpServer::new(move || {
        let sessions = SessionMiddleware::builder(store.clone(), session.key.clone())
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(session.cookie_secure)
            .cookie_http_only(true)
            .cookie_content_security(CookieContentSecurity::Private)
            .cookie_same_site(session.same_site)
            .session_lifecycle(
                PersistentSession::default().session_ttl(CookieDuration::hours(session_ttl_hours)),
            )
            .build();

        App::new()
            .app_data(state.clone())
            .wrap(sessions)
            .wrap(Trace)
            .configure(configure)
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}
