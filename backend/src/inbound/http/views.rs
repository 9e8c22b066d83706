//! View model handed to the page renderer.
//!
//! Handlers fill a [`TemplateData`] bag and name a [`Page`]; a
//! [`ViewRenderer`] turns the pair into a response body. The production
//! renderer emits JSON so the service can sit behind any front end.

use std::collections::BTreeMap;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;

use crate::domain::{Error, FieldErrors, Goal, Quote, StudySession};

/// Every page the service can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// Dashboard with goals, a random quote and the current time.
    Home,
    /// Account creation form.
    Signup,
    /// Login form.
    Login,
    /// New goal form.
    GoalForm,
    /// Every goal of the caller.
    GoalList,
    /// Edit one goal.
    GoalEdit,
    /// New study session form.
    SessionForm,
    /// Every study session of the caller.
    SessionList,
    /// Edit one study session.
    SessionEdit,
    /// Detail view shown when a study session is started.
    SessionStart,
    /// New quote form.
    QuoteForm,
    /// Every quote of the caller.
    QuoteList,
    /// Edit one quote.
    QuoteEdit,
}

/// Everything a page template may display.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TemplateData {
    /// Browser title.
    pub title: String,
    /// Heading shown above the content.
    pub header_text: String,
    /// Per-field messages; empty unless a submission was rejected.
    pub form_errors: FieldErrors,
    /// Submitted values echoed back after a rejected submission.
    pub form_data: BTreeMap<String, String>,
    /// Goal listing, newest first.
    pub goals: Vec<Goal>,
    /// Study session listing, newest first.
    pub sessions: Vec<StudySession>,
    /// Quote listing, newest first.
    pub quotes: Vec<Quote>,
    /// The session shown on the start page.
    pub study_session: Option<StudySession>,
    /// One-shot notice popped from the login session.
    pub flash: Option<String>,
    /// Quote picked for the home page, if the caller has any.
    pub random_quote: Option<Quote>,
    /// Server time at render, home page only.
    pub current_time: Option<DateTime<Utc>>,
    /// Whether a user is signed in.
    pub is_authenticated: bool,
    /// Anti-forgery token for forms on the page.
    pub csrf_token: String,
}

impl TemplateData {
    /// Empty bag with the page title and heading set.
    pub fn new(title: &str, header_text: &str) -> Self {
        Self {
            title: title.to_owned(),
            header_text: header_text.to_owned(),
            ..Self::default()
        }
    }
}

/// Rendering failure.
#[derive(Debug, thiserror::Error)]
#[error("failed to render {page:?}: {message}")]
pub struct RenderError {
    page: Page,
    message: String,
}

impl RenderError {
    /// Failure while rendering `page`.
    pub fn new(page: Page, message: impl Into<String>) -> Self {
        Self {
            page,
            message: message.into(),
        }
    }
}

/// Turns a page and its data into a response body.
pub trait ViewRenderer: Send + Sync {
    /// MIME type of the produced body.
    fn content_type(&self) -> &'static str;

    /// Render `page` with `data`.
    fn render(&self, page: Page, data: &TemplateData) -> Result<String, RenderError>;
}

/// Renders `{"page": ..., "data": ...}` documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonViewRenderer;

#[derive(Serialize)]
struct Document<'a> {
    page: Page,
    data: &'a TemplateData,
}

impl ViewRenderer for JsonViewRenderer {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn render(&self, page: Page, data: &TemplateData) -> Result<String, RenderError> {
        serde_json::to_string(&Document { page, data })
            .map_err(|err| RenderError::new(page, err.to_string()))
    }
}

/// Render `page` with `status`; failures are logged and become a 500.
pub fn respond(
    renderer: &dyn ViewRenderer,
    status: StatusCode,
    page: Page,
    data: &TemplateData,
) -> Result<HttpResponse, Error> {
    match renderer.render(page, data) {
        Ok(body) => Ok(HttpResponse::build(status)
            .content_type(renderer.content_type())
            .body(body)),
        Err(err) => {
            error!(?page, error = %err, "failed to render page");
            Err(Error::internal(err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::Value;

    struct BrokenRenderer;

    impl ViewRenderer for BrokenRenderer {
        fn content_type(&self) -> &'static str {
            "text/html"
        }

        fn render(&self, page: Page, _data: &TemplateData) -> Result<String, RenderError> {
            Err(RenderError::new(page, "template missing"))
        }
    }

    #[rstest]
    fn json_document_names_page_and_carries_data() {
        let mut data = TemplateData::new("Daily Goals", "Daily Goals");
        data.flash = Some("Goal successfully added".to_owned());
        data.csrf_token = "abc".to_owned();

        let body = JsonViewRenderer
            .render(Page::GoalList, &data)
            .expect("json renders");
        let doc: Value = serde_json::from_str(&body).expect("valid json");

        assert_eq!(doc["page"], "goal_list");
        assert_eq!(doc["data"]["title"], "Daily Goals");
        assert_eq!(doc["data"]["flash"], "Goal successfully added");
        assert_eq!(doc["data"]["csrf_token"], "abc");
        assert_eq!(doc["data"]["goals"], Value::Array(Vec::new()));
    }

    #[rstest]
    #[actix_web::test]
    async fn respond_sets_status_and_content_type() {
        let data = TemplateData::new("Login", "Login");
        let response = respond(
            &JsonViewRenderer,
            StatusCode::UNPROCESSABLE_ENTITY,
            Page::Login,
            &data,
        )
        .expect("rendered");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
        let bytes = to_bytes(response.into_body()).await.expect("body");
        assert!(!bytes.is_empty());
    }

    #[rstest]
    fn renderer_failure_is_internal() {
        let err = respond(
            &BrokenRenderer,
            StatusCode::OK,
            Page::Home,
            &TemplateData::default(),
        )
        .expect_err("broken renderer");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
