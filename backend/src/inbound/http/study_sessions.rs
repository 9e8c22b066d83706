//! Study session pages, including the "session started" view.

use std::collections::BTreeMap;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};

use crate::domain::ports::OwnerScopedRepository;
use crate::domain::{Error, StudySession, StudySessionDraft, StudySessionId};

use super::ApiResult;
use super::error::storage_failure;
use super::forms::{FormResource, PageMeta};
use super::guard::CurrentUser;
use super::session::SessionContext;
use super::state::HttpState;
use super::validation::{DATE_FORMAT, FormFields};
use super::views::{Page, TemplateData, respond};

impl FormResource for StudySession {
    const NOUN: &'static str = "Session";
    const LIST_PATH: &'static str = "/sessions";
    const ID_FIELD: &'static str = "session_id";
    const FIELDS: &'static [&'static str] = &[
        "title",
        "description",
        "subject",
        "start_date",
        "end_date",
        "is_completed",
    ];

    const CREATE_PAGE: PageMeta = PageMeta {
        page: Page::SessionForm,
        title: "Session",
        header: "Add a Session",
    };
    const LIST_PAGE: PageMeta = PageMeta {
        page: Page::SessionList,
        title: "Session List",
        header: "All Session Entries",
    };
    const EDIT_PAGE: PageMeta = PageMeta {
        page: Page::SessionEdit,
        title: "Edit Session",
        header: "Edit Session",
    };

    fn repository(state: &HttpState) -> &dyn OwnerScopedRepository<Self> {
        state.sessions.as_ref()
    }

    fn parse_draft(fields: &FormFields) -> Result<StudySessionDraft, Error> {
        Ok(StudySessionDraft {
            title: fields.text("title").to_owned(),
            description: fields.text("description").to_owned(),
            subject: fields.text("subject").to_owned(),
            start_date: fields.date("start_date")?,
            end_date: fields.date("end_date")?,
            completed: fields.flag("is_completed")?,
        })
    }

    fn prefill(draft: &StudySessionDraft) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("title".to_owned(), draft.title.clone()),
            ("description".to_owned(), draft.description.clone()),
            ("subject".to_owned(), draft.subject.clone()),
            (
                "start_date".to_owned(),
                draft.start_date.format(DATE_FORMAT).to_string(),
            ),
            (
                "end_date".to_owned(),
                draft.end_date.format(DATE_FORMAT).to_string(),
            ),
            ("is_completed".to_owned(), draft.completed.to_string()),
        ])
    }

    fn attach_listing(data: &mut TemplateData, records: Vec<Self>) {
        data.sessions = records;
    }
}

/// `GET /sessions/start?session_id=N`: show one owned session as running.
pub async fn show_start(
    user: CurrentUser,
    session: SessionContext,
    state: web::Data<HttpState>,
    query: web::Query<FormFields>,
) -> ApiResult<HttpResponse> {
    let id = query.record_id::<StudySessionId>(StudySession::ID_FIELD)?;
    let record = state
        .sessions
        .get(user.id(), id)
        .await
        .map_err(|err| storage_failure("session", "get", err))?;

    let mut data = state.page_data(&session, "Session Started", "Session Started")?;
    data.study_session = Some(record);
    respond(
        state.renderer.as_ref(),
        StatusCode::OK,
        Page::SessionStart,
        &data,
    )
}
