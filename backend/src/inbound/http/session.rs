//! Request-scoped session capability.
//!
//! Wraps the Actix cookie session so handlers deal in user ids, flash
//! notices and anti-forgery tokens instead of raw keys.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const FLASH_KEY: &str = "flash";
pub(crate) const CSRF_KEY: &str = "csrf_token";

fn write_failed(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to write session: {error}"))
}

fn read_failed(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to read session: {error}"))
}

/// Newtype exposing the session operations handlers need.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the authenticated user's id.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(write_failed)
    }

    /// Current user id, if one is stored and well formed.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let Some(raw) = self.0.get::<String>(USER_ID_KEY).map_err(read_failed)? else {
            return Ok(None);
        };
        match UserId::new(raw) {
            Ok(id) => Ok(Some(id)),
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                Ok(None)
            }
        }
    }

    /// Current user id or an unauthorised error.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Leave a one-shot notice for the next rendered page.
    pub fn put_flash(&self, message: &str) -> Result<(), Error> {
        self.0.insert(FLASH_KEY, message).map_err(write_failed)
    }

    /// Take the pending notice. A second call returns `None`.
    pub fn pop_flash(&self) -> Option<String> {
        match self.0.remove_as::<String>(FLASH_KEY)? {
            Ok(message) => Some(message),
            Err(raw) => {
                warn!(raw_len = raw.len(), "discarding malformed flash notice");
                None
            }
        }
    }

    /// Anti-forgery token issued earlier in this session.
    pub fn csrf_token(&self) -> Result<Option<String>, Error> {
        self.0.get::<String>(CSRF_KEY).map_err(read_failed)
    }

    /// Remember the anti-forgery token for later pages.
    pub fn store_csrf_token(&self, token: &str) -> Result<(), Error> {
        self.0.insert(CSRF_KEY, token).map_err(write_failed)
    }

    /// Keep the state but rotate the session cookie.
    pub fn renew(&self) {
        self.0.renew();
    }

    /// Drop every key and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
