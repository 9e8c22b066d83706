//! Dependency bundle shared by every handler.
//!
//! Handlers receive this through `web::Data` and only see ports, so the same
//! handlers run against Diesel in production and in-memory stores in tests.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::{AccountService, Error};
use crate::domain::ports::{GoalRepository, QuoteRepository, StudySessionRepository};

use super::csrf::CsrfTokens;
use super::session::SessionContext;
use super::views::{TemplateData, ViewRenderer};

/// Ports and collaborators used by the HTTP adapter.
#[derive(Clone)]
pub struct HttpState {
    /// Goal store.
    pub goals: Arc<GoalRepository>,
    /// Study session store.
    pub sessions: Arc<StudySessionRepository>,
    /// Quote store.
    pub quotes: Arc<QuoteRepository>,
    /// Signup and login.
    pub accounts: Arc<dyn AccountService>,
    /// Turns a page and its data into a response body.
    pub renderer: Arc<dyn ViewRenderer>,
    /// Per-session anti-forgery tokens.
    pub csrf: Arc<dyn CsrfTokens>,
    /// Source of the home page's current time.
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Page bag with the per-request fields filled in.
    ///
    /// Pops the pending flash notice, so call it once per rendered page.
    pub(crate) fn page_data(
        &self,
        session: &SessionContext,
        title: &str,
        header_text: &str,
    ) -> Result<TemplateData, Error> {
        let mut data = TemplateData::new(title, header_text);
        data.csrf_token = self.csrf.token_for(session)?;
        data.is_authenticated = session.user_id()?.is_some();
        data.flash = session.pop_flash();
        Ok(data)
    }
}
