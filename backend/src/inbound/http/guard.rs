//! Authorisation guard for protected routes.
//!
//! Taking [`CurrentUser`] as the first handler argument makes a route
//! protected: anonymous requests are redirected to the login page before
//! the form body is read or any repository is touched.

use actix_session::SessionExt;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::domain::{Error, UserId};

use super::session::SessionContext;

/// Identity of the signed-in caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

impl CurrentUser {
    /// Owner id to scope repository calls with.
    pub fn id(&self) -> &UserId {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = SessionContext::new(req.get_session());
        ready(session.require_user_id().map(CurrentUser))
    }
}
