//! Account pages.
//!
//! ```text
//! GET  /user/signup   signup form
//! POST /user/signup   register, then 303 to the login page
//! GET  /user/login    login form
//! POST /user/login    authenticate, then 303 to /
//! POST /user/logout   purge the session, then 303 to the login page
//! ```

use std::collections::BTreeMap;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::{error, info};

use crate::domain::{AccountError, Error, FieldErrors, LoginCredentials, SignupRequest};

use super::ApiResult;
use super::forms::see_other;
use super::routes::LOGIN_PATH;
use super::session::SessionContext;
use super::state::HttpState;
use super::views::{Page, respond};

const GENERIC_LOGIN_ERROR: &str = "Invalid email or password.";
const DUPLICATE_EMAIL: &str = "Email address is already in use";

/// Signup form body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    /// Display name.
    pub name: String,
    /// Login email; normalised before storage.
    pub email: String,
    /// Plaintext password, never echoed back.
    pub password: String,
}

/// Login form body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    /// Login email.
    pub email: String,
    /// Plaintext password, never echoed back.
    pub password: String,
}

fn account_failure(operation: &'static str, err: AccountError) -> Error {
    error!(operation, error = %err, "account operation failed");
    Error::internal(err.to_string())
}

fn render_signup(
    state: &HttpState,
    session: &SessionContext,
    status: StatusCode,
    errors: FieldErrors,
    form_data: BTreeMap<String, String>,
) -> ApiResult<HttpResponse> {
    let mut data = state.page_data(session, "Signup", "Signup")?;
    data.form_errors = errors;
    data.form_data = form_data;
    respond(state.renderer.as_ref(), status, Page::Signup, &data)
}

fn render_login(
    state: &HttpState,
    session: &SessionContext,
    status: StatusCode,
    errors: FieldErrors,
    email: Option<&str>,
) -> ApiResult<HttpResponse> {
    let mut data = state.page_data(session, "Login", "Login")?;
    data.form_errors = errors;
    if let Some(email) = email {
        data.form_data.insert("email".to_owned(), email.to_owned());
    }
    respond(state.renderer.as_ref(), status, Page::Login, &data)
}

/// `GET /user/signup`
pub async fn show_signup(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    render_signup(
        &state,
        &session,
        StatusCode::OK,
        FieldErrors::new(),
        BTreeMap::new(),
    )
}

/// `POST /user/signup`
pub async fn signup(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<SignupForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let echoed = BTreeMap::from([
        ("name".to_owned(), form.name.clone()),
        ("email".to_owned(), form.email.clone()),
    ]);

    let request = match SignupRequest::parse(&form.name, &form.email, &form.password) {
        Ok(request) => request,
        Err(errors) => {
            return render_signup(
                &state,
                &session,
                StatusCode::UNPROCESSABLE_ENTITY,
                errors,
                echoed,
            );
        }
    };

    match state.accounts.register(request).await {
        Ok(user) => {
            info!(user_id = %user.id, "account registered");
            session.put_flash("Signup successful. Please log in.")?;
            Ok(see_other(LOGIN_PATH))
        }
        Err(AccountError::DuplicateEmail) => render_signup(
            &state,
            &session,
            StatusCode::UNPROCESSABLE_ENTITY,
            FieldErrors::from([("email".to_owned(), DUPLICATE_EMAIL.to_owned())]),
            echoed,
        ),
        Err(err) => Err(account_failure("register", err)),
    }
}

/// `GET /user/login`
pub async fn show_login(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    render_login(&state, &session, StatusCode::OK, FieldErrors::new(), None)
}

/// `POST /user/login`
pub async fn login(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let credentials = match LoginCredentials::parse(&form.email, &form.password) {
        Ok(credentials) => credentials,
        Err(errors) => {
            return render_login(
                &state,
                &session,
                StatusCode::UNPROCESSABLE_ENTITY,
                errors,
                Some(&form.email),
            );
        }
    };

    match state.accounts.authenticate(&credentials).await {
        Ok(user_id) => {
            session.renew();
            session.persist_user(&user_id)?;
            session.put_flash("You are now logged in.")?;
            info!(%user_id, "user logged in");
            Ok(see_other("/"))
        }
        Err(AccountError::InvalidCredentials) => render_login(
            &state,
            &session,
            StatusCode::UNAUTHORIZED,
            FieldErrors::from([("generic".to_owned(), GENERIC_LOGIN_ERROR.to_owned())]),
            Some(&form.email),
        ),
        Err(err) => Err(account_failure("authenticate", err)),
    }
}

/// `POST /user/logout`
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    see_other(LOGIN_PATH)
}
