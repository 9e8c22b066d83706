//! Generic create/list/edit/delete handlers for owned records.
//!
//! Goals, study sessions and quotes share one request flow:
//!
//! ```text
//! guard -> parse fields -> build draft -> validate
//!       -> Rejected  => 422, form re-rendered with errors and echoed input
//!       -> Persisted => flash notice, 303 to the listing
//! ```
//!
//! Each record kind plugs in through [`FormResource`] and the handlers are
//! instantiated per kind in the route table.

use std::collections::BTreeMap;

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, web};

use crate::domain::ports::OwnerScopedRepository;
use crate::domain::{Error, FieldErrors, OwnedEntity, SubmissionOutcome, submit_edit, submit_new};

use super::ApiResult;
use super::error::storage_failure;
use super::guard::CurrentUser;
use super::session::SessionContext;
use super::state::HttpState;
use super::validation::FormFields;
use super::views::{Page, TemplateData, respond};

/// Page identity plus its title and heading.
#[derive(Debug, Clone, Copy)]
pub struct PageMeta {
    /// Which page the renderer draws.
    pub page: Page,
    /// Browser title.
    pub title: &'static str,
    /// Heading shown above the content.
    pub header: &'static str,
}

/// Binds one record kind to its paths, pages and form fields.
pub trait FormResource: OwnedEntity {
    /// Capitalised noun used in flash notices.
    const NOUN: &'static str;
    /// Listing path successful mutations redirect to.
    const LIST_PATH: &'static str;
    /// Form or query field carrying the record id.
    const ID_FIELD: &'static str;
    /// Editable form fields, in display order.
    const FIELDS: &'static [&'static str];

    /// Empty create form, also re-rendered when a create is rejected.
    const CREATE_PAGE: PageMeta;
    /// Listing of every owned record.
    const LIST_PAGE: PageMeta;
    /// Pre-filled edit form, also re-rendered when an edit is rejected.
    const EDIT_PAGE: PageMeta;

    /// Repository for this kind.
    fn repository(state: &HttpState) -> &dyn OwnerScopedRepository<Self>;

    /// Build a draft from submitted fields; malformed values are a 400.
    fn parse_draft(fields: &FormFields) -> Result<Self::Draft, Error>;

    /// Form values that pre-fill the edit page.
    fn prefill(draft: &Self::Draft) -> BTreeMap<String, String>;

    /// Place a listing into the page bag.
    fn attach_listing(data: &mut TemplateData, records: Vec<Self>);
}

pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn rerender_rejected(
    state: &HttpState,
    session: &SessionContext,
    meta: PageMeta,
    errors: FieldErrors,
    form_data: BTreeMap<String, String>,
) -> ApiResult<HttpResponse> {
    let mut data = state.page_data(session, meta.title, meta.header)?;
    data.form_errors = errors;
    data.form_data = form_data;
    respond(
        state.renderer.as_ref(),
        StatusCode::UNPROCESSABLE_ENTITY,
        meta.page,
        &data,
    )
}

/// `GET` the empty create form.
pub async fn show_create_form<R: FormResource>(
    _user: CurrentUser,
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let meta = R::CREATE_PAGE;
    let data = state.page_data(&session, meta.title, meta.header)?;
    respond(state.renderer.as_ref(), StatusCode::OK, meta.page, &data)
}

/// `POST` a new record.
pub async fn submit_create<R: FormResource>(
    user: CurrentUser,
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<FormFields>,
) -> ApiResult<HttpResponse> {
    let fields = form.into_inner();
    let draft = R::parse_draft(&fields)?;
    let outcome = submit_new::<R>(R::repository(&state), user.id(), draft)
        .await
        .map_err(|err| storage_failure(R::KIND, "insert", err))?;

    match outcome {
        SubmissionOutcome::Rejected(errors) => rerender_rejected(
            &state,
            &session,
            R::CREATE_PAGE,
            errors,
            fields.echo(R::FIELDS),
        ),
        SubmissionOutcome::Persisted(record) => {
            tracing::info!(entity = R::KIND, id = %record.id(), user_id = %user.id(), "record created");
            session.put_flash(&format!("{} successfully added", R::NOUN))?;
            Ok(see_other(R::LIST_PATH))
        }
    }
}

/// `GET` the owner's records, newest first.
pub async fn list<R: FormResource>(
    user: CurrentUser,
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let records = R::repository(&state)
        .list_for(user.id())
        .await
        .map_err(|err| storage_failure(R::KIND, "list", err))?;

    let meta = R::LIST_PAGE;
    let mut data = state.page_data(&session, meta.title, meta.header)?;
    R::attach_listing(&mut data, records);
    respond(state.renderer.as_ref(), StatusCode::OK, meta.page, &data)
}

/// `GET` the edit form pre-filled from the stored record.
pub async fn show_edit_form<R: FormResource>(
    user: CurrentUser,
    session: SessionContext,
    state: web::Data<HttpState>,
    query: web::Query<FormFields>,
) -> ApiResult<HttpResponse> {
    let id = query.record_id::<R::Id>(R::ID_FIELD)?;
    let record = R::repository(&state)
        .get(user.id(), id)
        .await
        .map_err(|err| storage_failure(R::KIND, "get", err))?;

    let meta = R::EDIT_PAGE;
    let mut data = state.page_data(&session, meta.title, meta.header)?;
    data.form_data = R::prefill(&record.draft());
    data.form_data
        .insert(R::ID_FIELD.to_owned(), record.id().to_string());
    respond(state.renderer.as_ref(), StatusCode::OK, meta.page, &data)
}

/// `POST` changes to an owned record.
pub async fn submit_edit_form<R: FormResource>(
    user: CurrentUser,
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<FormFields>,
) -> ApiResult<HttpResponse> {
    let fields = form.into_inner();
    let id = fields.record_id::<R::Id>(R::ID_FIELD)?;
    let draft = R::parse_draft(&fields)?;
    let outcome = submit_edit::<R>(R::repository(&state), user.id(), id, draft)
        .await
        .map_err(|err| storage_failure(R::KIND, "update", err))?;

    match outcome {
        SubmissionOutcome::Rejected(errors) => {
            let mut echoed = fields.echo(R::FIELDS);
            echoed.insert(R::ID_FIELD.to_owned(), id.to_string());
            rerender_rejected(&state, &session, R::EDIT_PAGE, errors, echoed)
        }
        SubmissionOutcome::Persisted(_) => {
            tracing::info!(entity = R::KIND, %id, user_id = %user.id(), "record updated");
            session.put_flash(&format!("{} successfully updated", R::NOUN))?;
            Ok(see_other(R::LIST_PATH))
        }
    }
}

/// `POST` removal of an owned record.
pub async fn delete<R: FormResource>(
    user: CurrentUser,
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<FormFields>,
) -> ApiResult<HttpResponse> {
    let id = form.record_id::<R::Id>(R::ID_FIELD)?;
    R::repository(&state)
        .delete(user.id(), id)
        .await
        .map_err(|err| storage_failure(R::KIND, "delete", err))?;

    tracing::info!(entity = R::KIND, %id, user_id = %user.id(), "record deleted");
    session.put_flash(&format!("{} successfully deleted", R::NOUN))?;
    Ok(see_other(R::LIST_PATH))
}
